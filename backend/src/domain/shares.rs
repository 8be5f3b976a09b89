//! Weighted proportional split of a single expense.

use std::collections::HashMap;

use crate::domain::models::Expense;

/// Compute each listed participant's monetary share of one expense.
///
/// Only entries with `included = true` take part in the split; everyone
/// listed gets a map entry, excluded participants at 0. When nobody is
/// included, or the total weight is zero, every share is zero — a
/// zero-participation expense is valid, not an error.
///
/// Shares are `amount * weight / total_weight`; rounding drift up to the
/// one-cent epsilon is accepted rather than reconciled across entries.
pub fn compute_shares(expense: &Expense) -> HashMap<String, f64> {
    let mut shares: HashMap<String, f64> = expense
        .shared_among
        .iter()
        .map(|share| (share.participant_id.clone(), 0.0))
        .collect();

    let total_weight: f64 = expense
        .shared_among
        .iter()
        .filter(|share| share.included)
        .map(|share| share.weight)
        .sum();

    if total_weight <= 0.0 {
        return shares;
    }

    for share in expense.shared_among.iter().filter(|share| share.included) {
        shares.insert(
            share.participant_id.clone(),
            expense.amount * share.weight / total_weight,
        );
    }

    shares
}
