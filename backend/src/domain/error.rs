use chrono::NaiveDate;
use thiserror::Error;

/// Validation failures raised by the ledger mutators.
///
/// All of these are local, synchronous failures: the ledger stays in its last
/// valid state and nothing is retried. Services surface them through
/// `anyhow::Result`, so callers can downcast when they need the variant.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("participation period {start} - {end} lies outside the travel window")]
    InvalidPeriod { start: NaiveDate, end: NaiveDate },

    #[error("payer amounts sum to {paid:.2} but the expense amount is {amount:.2}")]
    UnbalancedPayment { paid: f64, amount: f64 },

    #[error("participant '{name}' is involved in expenses or contributions and cannot be removed")]
    ReferentialBlock { name: String },

    #[error("no travel is currently selected")]
    NoCurrentTravel,

    #[error("travel not found: {0}")]
    TravelNotFound(String),

    #[error("participant not found: {0}")]
    ParticipantNotFound(String),

    #[error("expense not found: {0}")]
    ExpenseNotFound(String),

    #[error("contribution not found: {0}")]
    ContributionNotFound(String),

    #[error("invalid input: {0}")]
    Validation(String),
}
