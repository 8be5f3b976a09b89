//! # Storage
//!
//! The ledger lives entirely in memory. Persistence is not wired in here:
//! an external collaborator registers a [`traits::LedgerObserver`] and is
//! handed a consistent snapshot after every successful mutation, which is
//! where auto-save, sync, or any other write-behind concern plugs in.

pub mod memory;
pub mod traits;

pub use memory::{LedgerSnapshot, LedgerStore};
pub use traits::LedgerObserver;
