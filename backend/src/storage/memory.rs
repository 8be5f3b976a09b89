use std::collections::HashMap;
use std::sync::RwLock;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::traits::LedgerObserver;
use crate::domain::models::Travel;

/// Complete ledger state at one point in time: every travel, the current
/// selection, and the refund donation flags (which are tracked per
/// participant, outside any single travel).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub travels: Vec<Travel>,
    pub current_travel_id: Option<String>,
    pub refund_donations: HashMap<String, bool>,
}

impl LedgerSnapshot {
    fn empty() -> Self {
        Self {
            travels: Vec::new(),
            current_travel_id: None,
            refund_donations: HashMap::new(),
        }
    }
}

/// In-memory ledger shared by all services.
///
/// Mutations replace whole `Travel` values rather than editing nested
/// collections in place, so a cloned snapshot stays consistent regardless of
/// later writes. Registered observers receive the new snapshot after each
/// commit.
pub struct LedgerStore {
    state: RwLock<LedgerSnapshot>,
    observers: RwLock<Vec<Box<dyn LedgerObserver>>>,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(LedgerSnapshot::empty()),
            observers: RwLock::new(Vec::new()),
        }
    }

    pub fn add_observer(&self, observer: Box<dyn LedgerObserver>) {
        self.observers
            .write()
            .expect("observer list lock poisoned")
            .push(observer);
    }

    /// Clone of the full ledger state
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.state.read().expect("ledger state lock poisoned").clone()
    }

    pub fn list_travels(&self) -> Vec<Travel> {
        self.state
            .read()
            .expect("ledger state lock poisoned")
            .travels
            .clone()
    }

    pub fn get_travel(&self, travel_id: &str) -> Option<Travel> {
        self.state
            .read()
            .expect("ledger state lock poisoned")
            .travels
            .iter()
            .find(|t| t.id == travel_id)
            .cloned()
    }

    pub fn current_travel_id(&self) -> Option<String> {
        self.state
            .read()
            .expect("ledger state lock poisoned")
            .current_travel_id
            .clone()
    }

    /// Snapshot of the currently selected travel, if any
    pub fn current_travel(&self) -> Option<Travel> {
        let state = self.state.read().expect("ledger state lock poisoned");
        let current_id = state.current_travel_id.as_deref()?;
        state.travels.iter().find(|t| t.id == current_id).cloned()
    }

    /// Insert a new travel, optionally selecting it as current
    pub fn insert_travel(&self, travel: Travel, make_current: bool) {
        {
            let mut state = self.state.write().expect("ledger state lock poisoned");
            if make_current {
                state.current_travel_id = Some(travel.id.clone());
            }
            state.travels.push(travel);
        }
        self.notify();
    }

    /// Replace the stored travel with the same id. Returns false when the
    /// travel is unknown, in which case nothing changes and no notification
    /// fires.
    pub fn replace_travel(&self, travel: Travel) -> bool {
        let replaced = {
            let mut state = self.state.write().expect("ledger state lock poisoned");
            match state.travels.iter_mut().find(|t| t.id == travel.id) {
                Some(slot) => {
                    *slot = travel;
                    true
                }
                None => false,
            }
        };
        if replaced {
            self.notify();
        } else {
            warn!("replace_travel: travel not found, ignoring");
        }
        replaced
    }

    /// Remove a travel and everything beneath it. Clears the current
    /// selection when it pointed at the removed travel.
    pub fn remove_travel(&self, travel_id: &str) -> bool {
        let removed = {
            let mut state = self.state.write().expect("ledger state lock poisoned");
            let before = state.travels.len();
            state.travels.retain(|t| t.id != travel_id);
            let removed = state.travels.len() != before;
            if removed && state.current_travel_id.as_deref() == Some(travel_id) {
                state.current_travel_id = None;
            }
            removed
        };
        if removed {
            self.notify();
        }
        removed
    }

    /// Select the current travel (`None` clears the selection). Returns the
    /// selected travel, or `None` for an unknown id or a cleared selection.
    pub fn set_current_travel(&self, travel_id: Option<&str>) -> Option<Travel> {
        let selected = {
            let mut state = self.state.write().expect("ledger state lock poisoned");
            match travel_id {
                Some(id) => match state.travels.iter().find(|t| t.id == id).cloned() {
                    Some(travel) => {
                        state.current_travel_id = Some(travel.id.clone());
                        Some(travel)
                    }
                    None => {
                        warn!("set_current_travel: unknown travel {}", id);
                        None
                    }
                },
                None => {
                    state.current_travel_id = None;
                    None
                }
            }
        };
        self.notify();
        selected
    }

    pub fn donation_flag(&self, participant_id: &str) -> bool {
        self.state
            .read()
            .expect("ledger state lock poisoned")
            .refund_donations
            .get(participant_id)
            .copied()
            .unwrap_or(false)
    }

    pub fn donations(&self) -> HashMap<String, bool> {
        self.state
            .read()
            .expect("ledger state lock poisoned")
            .refund_donations
            .clone()
    }

    pub fn set_donation_flag(&self, participant_id: &str, donated: bool) {
        {
            let mut state = self.state.write().expect("ledger state lock poisoned");
            state
                .refund_donations
                .insert(participant_id.to_string(), donated);
        }
        self.notify();
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        let observers = self.observers.read().expect("observer list lock poisoned");
        debug!("notifying {} ledger observer(s)", observers.len());
        for observer in observers.iter() {
            observer.ledger_changed(&snapshot);
        }
    }
}

impl Default for LedgerStore {
    fn default() -> Self {
        Self::new()
    }
}
