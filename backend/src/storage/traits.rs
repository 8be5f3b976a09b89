use super::memory::LedgerSnapshot;

/// Observer notified after every successful mutator call.
///
/// The snapshot is complete and self-consistent; an implementation may
/// serialize it wholesale (the JSON payload shape is stable through serde).
/// Observers must not mutate the ledger from inside the callback.
pub trait LedgerObserver: Send + Sync {
    fn ledger_changed(&self, snapshot: &LedgerSnapshot);
}
