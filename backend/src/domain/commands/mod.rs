//! Command and result types for the ledger mutators.

pub mod contribution;
pub mod expense;
pub mod participant;
pub mod travel;
