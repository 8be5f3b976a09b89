//! # Travel Splitter Backend
//!
//! Ledger engine for splitting group travel costs: who advanced money into
//! the fund, who paid what, what everyone's share is, and how to settle up.
//!
//! The backend is synchronous and entirely in-memory. Services mutate the
//! ledger through whole-value travel replacement, the settlement side is
//! pure computation over snapshots, and persistence is left to
//! [`storage::LedgerObserver`] implementations registered by the embedding
//! application.

use std::sync::Arc;

pub mod domain;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_utils;

pub use storage::{LedgerObserver, LedgerSnapshot, LedgerStore};

use domain::{
    ContributionService, ExpenseService, ExportService, ParticipantService, SettlementService,
    TravelService,
};

/// Main backend struct that wires all services over one shared ledger store.
pub struct Backend {
    pub travel_service: TravelService,
    pub participant_service: ParticipantService,
    pub expense_service: ExpenseService,
    pub contribution_service: ContributionService,
    pub settlement_service: SettlementService,
    pub export_service: ExportService,
    store: Arc<LedgerStore>,
}

impl Backend {
    /// Create a backend over a fresh, empty ledger.
    pub fn new() -> Self {
        Self::with_store(Arc::new(LedgerStore::new()))
    }

    /// Create a backend over an existing store, e.g. one rehydrated by the
    /// embedding application before services come up.
    pub fn with_store(store: Arc<LedgerStore>) -> Self {
        Backend {
            travel_service: TravelService::new(store.clone()),
            participant_service: ParticipantService::new(store.clone()),
            expense_service: ExpenseService::new(store.clone()),
            contribution_service: ContributionService::new(store.clone()),
            settlement_service: SettlementService::new(store.clone()),
            export_service: ExportService::new(store.clone()),
            store,
        }
    }

    /// Register an observer that is handed a consistent snapshot after
    /// every successful mutation (the auto-save seam).
    pub fn add_observer(&self, observer: Box<dyn LedgerObserver>) {
        self.store.add_observer(observer);
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self::new()
    }
}
