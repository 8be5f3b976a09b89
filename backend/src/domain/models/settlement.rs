use serde::{Deserialize, Serialize};

/// Derived per-participant settlement row. Never persisted; recomputed on
/// demand from the travel snapshot.
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
    /// Still to pay in: `max(0, share - paid)`
    pub due_amount: f64,
    /// To get back: `max(0, paid - share)`
    pub refund_amount: f64,
    /// Refund left with the group instead of being paid out
    pub donated: bool,
}

impl Settlement {
    /// Everything this participant put in, fund contributions included
    pub fn total_paid(&self) -> f64 {
        self.advance_paid + self.personally_paid
    }

    /// Signed net position: positive means the group owes this participant
    pub fn net_balance(&self) -> f64 {
        self.refund_amount - self.due_amount
    }
}

/// A concrete pairwise payment: `from` pays `to` the given amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: String,
    pub to: String,
    pub amount: f64,
}
