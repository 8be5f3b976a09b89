//! Settlement computation for the current travel.
//!
//! Everything here is derived on demand from a snapshot of the travel; no
//! settlement data is persisted. The per-participant due/refund table is the
//! primary settlement view, with the minimized pairwise transfers available
//! as a secondary reading of the same balances.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, info, warn};

use crate::domain::models::{Settlement, Transfer, Travel};
use crate::domain::shares::compute_shares;
use crate::domain::transfers::minimize_transfers;
use crate::storage::LedgerStore;

#[derive(Clone)]
pub struct SettlementService {
    store: Arc<LedgerStore>,
}

impl SettlementService {
    pub fn new(store: Arc<LedgerStore>) -> Self {
        Self { store }
    }

    /// One settlement row per participant, in participant insertion order.
    /// Returns an empty list when no travel is selected.
    pub fn calculate_settlements(&self) -> Vec<Settlement> {
        let Some(travel) = self.store.current_travel() else {
            debug!("calculate_settlements: no current travel");
            return Vec::new();
        };
        let donations = self.store.donations();
        Self::settlements_for(&travel, &donations)
    }

    /// Pure settlement calculation over one travel snapshot.
    pub(crate) fn settlements_for(
        travel: &Travel,
        donations: &HashMap<String, bool>,
    ) -> Vec<Settlement> {
        // Shares are computed once per expense, then folded per participant.
        let share_maps: Vec<HashMap<String, f64>> =
            travel.expenses.iter().map(compute_shares).collect();

        travel
            .participants
            .iter()
            .map(|participant| {
                let advance_paid: f64 = travel
                    .advance_contributions
                    .iter()
                    .filter(|c| c.participant_id == participant.id)
                    .map(|c| c.amount)
                    .sum();

                let personally_paid: f64 = travel
                    .expenses
                    .iter()
                    .filter(|e| !e.paid_from_fund)
                    .map(|e| e.payer_amount(&participant.id))
                    .sum();

                let expense_share: f64 = share_maps
                    .iter()
                    .filter_map(|shares| shares.get(&participant.id))
                    .sum();

                let net_balance = advance_paid + personally_paid - expense_share;

                Settlement {
                    participant_id: participant.id.clone(),
                    name: participant.name.clone(),
                    advance_paid,
                    personally_paid,
                    expense_share,
                    due_amount: (-net_balance).max(0.0),
                    refund_amount: net_balance.max(0.0),
                    donated: donations.get(&participant.id).copied().unwrap_or(false),
                }
            })
            .collect()
    }

    /// Minimized pairwise transfers that settle the current travel's
    /// balances. Empty when no travel is selected.
    pub fn settlement_transfers(&self) -> Vec<Transfer> {
        let settlements = self.calculate_settlements();
        let balances: Vec<(String, f64)> = settlements
            .iter()
            .map(|s| (s.participant_id.clone(), s.net_balance()))
            .collect();
        minimize_transfers(&balances)
    }

    /// Contributions paid in minus expenses drawn from the fund
    pub fn travel_fund_balance(&self) -> f64 {
        let Some(travel) = self.store.current_travel() else {
            return 0.0;
        };

        let total_contributions: f64 = travel
            .advance_contributions
            .iter()
            .map(|c| c.amount)
            .sum();
        let total_fund_expenses: f64 = travel
            .expenses
            .iter()
            .filter(|e| e.paid_from_fund)
            .map(|e| e.amount)
            .sum();

        total_contributions - total_fund_expenses
    }

    pub fn total_expenses(&self) -> f64 {
        self.store
            .current_travel()
            .map(|travel| travel.expenses.iter().map(|e| e.amount).sum())
            .unwrap_or(0.0)
    }

    /// The participant who put the most money in (advance + personal),
    /// when anyone has paid anything at all.
    pub fn top_contributor(&self) -> Option<Settlement> {
        self.calculate_settlements()
            .into_iter()
            .max_by(|a, b| a.total_paid().total_cmp(&b.total_paid()))
            .filter(|s| s.total_paid() > 0.0)
    }

    /// Flag (or unflag) a participant's refund as donated to the group.
    /// Presentation-only: the settlement arithmetic never changes.
    pub fn mark_refund_as_donated(&self, participant_id: &str, donated: bool) {
        let known = self
            .store
            .current_travel()
            .map(|t| t.has_participant(participant_id))
            .unwrap_or(false);
        if !known {
            warn!(
                "marking refund donation for participant {} outside the current travel",
                participant_id
            );
        }

        self.store.set_donation_flag(participant_id, donated);
        info!(
            "refund for participant {} marked donated={}",
            participant_id, donated
        );
    }
}
