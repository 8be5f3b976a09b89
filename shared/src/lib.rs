use serde::{Deserialize, Serialize};

/// A travel: the root aggregate for one group trip.
///
/// Date-only fields (`start_date`, `end_date`, expense and contribution
/// dates) are ISO 8601 calendar dates (`YYYY-MM-DD`); audit timestamps are
/// RFC 3339.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Travel {
    pub id: String,
    pub name: String,
    /// First day of the trip (inclusive)
    pub start_date: String,
    /// Last day of the trip (inclusive)
    pub end_date: String,
    /// Display currency tag, e.g. "EUR"
    pub currency: String,
    pub description: Option<String>,
    pub participants: Vec<Participant>,
    pub expenses: Vec<Expense>,
    pub advance_contributions: Vec<AdvanceContribution>,
    pub created: String,
    pub updated: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub participation_periods: Vec<ParticipationPeriod>,
}

/// A sub-range of the travel during which a participant is present.
/// Both bounds are inclusive calendar dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipationPeriod {
    pub id: String,
    pub start_date: String,
    pub end_date: String,
}

/// Category tag for an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseType {
    Meal,
    Fuel,
    Hotel,
    Custom,
}

impl ExpenseType {
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseType::Meal => "Meal",
            ExpenseType::Fuel => "Fuel",
            ExpenseType::Hotel => "Hotel",
            ExpenseType::Custom => "Custom",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    /// Total expense amount in the travel currency (two-decimal unit)
    pub amount: f64,
    pub date: String,
    pub expense_type: ExpenseType,
    /// Free-form label, only meaningful for `ExpenseType::Custom`
    pub custom_type: Option<String>,
    /// Who advanced the money; empty when `paid_from_fund` is true
    pub paid_by: Vec<ExpensePayer>,
    /// True when the amount was drawn from the shared travel fund
    pub paid_from_fund: bool,
    /// One entry per travel participant, excluded ones with `included = false`
    pub shared_among: Vec<ExpenseShare>,
    pub comment: Option<String>,
    pub created: String,
    pub updated: String,
}

impl Expense {
    /// Category label including the custom tag, e.g. "Custom: Museum"
    pub fn type_label(&self) -> String {
        match (&self.expense_type, &self.custom_type) {
            (ExpenseType::Custom, Some(label)) => format!("Custom: {}", label),
            (expense_type, _) => expense_type.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpensePayer {
    pub participant_id: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseShare {
    pub participant_id: String,
    pub included: bool,
    /// Positive weight for unequal splits (0.5 = half share)
    pub weight: f64,
}

/// Money a participant put into the shared fund ahead of time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvanceContribution {
    pub id: String,
    pub participant_id: String,
    pub amount: f64,
    pub date: String,
    pub comment: Option<String>,
    pub created: String,
}

/// Derived per-participant settlement row (not persisted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub participant_id: String,
    pub name: String,
    /// Sum of advance contributions into the fund
    pub advance_paid: f64,
    /// Sum of non-fund expense amounts this participant advanced
    pub personally_paid: f64,
    /// Weighted share of all expenses, fund-paid included
    pub expense_share: f64,
    /// Amount still owed to the group
    pub due_amount: f64,
    /// Amount the group owes back
    pub refund_amount: f64,
    /// Refund left in the group instead of being paid out
    pub donated: bool,
}

impl Settlement {
    /// Everything this participant put in, fund contributions included
    pub fn total_paid(&self) -> f64 {
        self.advance_paid + self.personally_paid
    }
}

/// A minimized pairwise payment that reduces balances toward zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: String,
    pub to: String,
    pub amount: f64,
}

/// One exported document: a filename plus its full text content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportDocument {
    pub filename: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathRequest {
    /// Directory the export documents are written into
    pub directory: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportToPathResponse {
    /// Absolute paths of the files that were written
    pub written_files: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_type_labels() {
        assert_eq!(ExpenseType::Meal.label(), "Meal");
        assert_eq!(ExpenseType::Fuel.label(), "Fuel");
        assert_eq!(ExpenseType::Hotel.label(), "Hotel");
        assert_eq!(ExpenseType::Custom.label(), "Custom");
    }

    #[test]
    fn test_expense_type_label_with_custom_tag() {
        let expense = Expense {
            id: "e1".to_string(),
            amount: 12.5,
            date: "2025-07-03".to_string(),
            expense_type: ExpenseType::Custom,
            custom_type: Some("Museum".to_string()),
            paid_by: vec![],
            paid_from_fund: true,
            shared_among: vec![],
            comment: None,
            created: "2025-07-03T10:00:00Z".to_string(),
            updated: "2025-07-03T10:00:00Z".to_string(),
        };
        assert_eq!(expense.type_label(), "Custom: Museum");

        let plain = Expense {
            expense_type: ExpenseType::Fuel,
            custom_type: None,
            ..expense
        };
        assert_eq!(plain.type_label(), "Fuel");
    }

    #[test]
    fn test_settlement_total_paid() {
        let settlement = Settlement {
            participant_id: "p1".to_string(),
            name: "Anna".to_string(),
            advance_paid: 50.0,
            personally_paid: 90.0,
            expense_share: 30.0,
            due_amount: 0.0,
            refund_amount: 110.0,
            donated: false,
        };
        assert_eq!(settlement.total_paid(), 140.0);
    }
}
