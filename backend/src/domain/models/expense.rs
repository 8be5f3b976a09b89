use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Category tag for an expense. `Custom` carries its label in
/// `Expense::custom_type`.
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

/// Domain model for a shared expense.
///
/// When `paid_from_fund` is false, the payer amounts sum to `amount` (within
/// the one-cent epsilon); when true, `paid_by` is empty and the amount is
/// drawn from the travel fund. `shared_among` carries one entry per travel
/// participant so that excluding someone is an `included = false` entry, not
/// a missing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub expense_type: ExpenseType,
    pub custom_type: Option<String>,
    pub paid_by: Vec<ExpensePayer>,
    pub paid_from_fund: bool,
    pub shared_among: Vec<ExpenseShare>,
    pub comment: Option<String>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Expense {
    /// Sum of all payer entries
    pub fn payer_total(&self) -> f64 {
        self.paid_by.iter().map(|p| p.amount).sum()
    }

    /// Amount this participant advanced for the expense (0 if absent)
    pub fn payer_amount(&self, participant_id: &str) -> f64 {
        self.paid_by
            .iter()
            .filter(|p| p.participant_id == participant_id)
            .map(|p| p.amount)
            .sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpensePayer {
    pub participant_id: String,
    pub amount: f64,
}

/// Per-participant split entry. Weights are positive reals; fractional
/// weights (e.g. 0.5 for a child attending half the meal) are valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseShare {
    pub participant_id: String,
    pub included: bool,
    pub weight: f64,
}
