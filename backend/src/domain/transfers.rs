//! Reduction of signed balances to concrete pairwise transfers.

use crate::domain::models::Transfer;
use crate::domain::AMOUNT_EPSILON;

/// Turn signed per-participant balances (positive = owed to them, negative =
/// they owe) into a small list of transfers.
///
/// Greedy largest-debtor-against-largest-creditor matching: entries are
/// sorted by balance ascending and consumed from both ends. This emits at
/// most `n - 1` transfers for `n` non-zero balances; it is a deterministic
/// approximation, not a guaranteed minimum-transaction solution. Remainders
/// within the one-cent epsilon count as settled, so floating point drift can
/// neither loop forever nor produce phantom cent transfers.
///
/// When the balances do not sum to zero (a travel fund surplus), the excess
/// simply stays unmatched and produces no transfer.
pub fn minimize_transfers(balances: &[(String, f64)]) -> Vec<Transfer> {
    let mut entries: Vec<(String, f64)> = balances.to_vec();
    entries.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

    let mut transfers = Vec::new();
    let mut i = 0;
    let mut j = entries.len().saturating_sub(1);

    while i < j {
        let owed = -entries[i].1;
        let receivable = entries[j].1;

        if owed <= AMOUNT_EPSILON {
            i += 1;
            continue;
        }
        if receivable <= AMOUNT_EPSILON {
            j -= 1;
            continue;
        }

        let amount = owed.min(receivable);
        transfers.push(Transfer {
            from: entries[i].0.clone(),
            to: entries[j].0.clone(),
            amount,
        });

        entries[i].1 += amount;
        entries[j].1 -= amount;

        if -entries[i].1 <= AMOUNT_EPSILON {
            i += 1;
        }
        if entries[j].1 <= AMOUNT_EPSILON {
            j -= 1;
        }
    }

    transfers
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn balances(pairs: &[(&str, f64)]) -> Vec<(String, f64)> {
        pairs
            .iter()
            .map(|(id, amount)| (id.to_string(), *amount))
            .collect()
    }

    /// Apply transfers back onto the balances; every result should be ~0
    /// when the input sums to zero.
    fn apply(balances: &[(String, f64)], transfers: &[Transfer]) -> HashMap<String, f64> {
        let mut remaining: HashMap<String, f64> = balances.iter().cloned().collect();
        for transfer in transfers {
            *remaining.get_mut(&transfer.from).unwrap() += transfer.amount;
            *remaining.get_mut(&transfer.to).unwrap() -= transfer.amount;
        }
        remaining
    }

    #[test]
    fn test_two_debtors_one_creditor() {
        let input = balances(&[("a", 60.0), ("b", -30.0), ("c", -30.0)]);
        let transfers = minimize_transfers(&input);

        assert_eq!(transfers.len(), 2);
        assert_eq!(transfers[0].from, "b");
        assert_eq!(transfers[0].to, "a");
        assert_eq!(transfers[0].amount, 30.0);
        assert_eq!(transfers[1].from, "c");
        assert_eq!(transfers[1].to, "a");
        assert_eq!(transfers[1].amount, 30.0);
    }

    #[test]
    fn test_transfers_zero_out_balances() {
        let input = balances(&[
            ("a", 125.5),
            ("b", -40.25),
            ("c", -85.25),
            ("d", 12.75),
            ("e", -12.75),
        ]);
        let transfers = minimize_transfers(&input);

        for (_, remainder) in apply(&input, &transfers) {
            assert!(remainder.abs() <= AMOUNT_EPSILON);
        }
    }

    #[test]
    fn test_transfer_count_bounded() {
        let input = balances(&[
            ("a", 10.0),
            ("b", 20.0),
            ("c", -5.0),
            ("d", -15.0),
            ("e", -10.0),
        ]);
        let transfers = minimize_transfers(&input);
        assert!(transfers.len() <= 4);
    }

    #[test]
    fn test_zero_balances_produce_no_transfers() {
        assert!(minimize_transfers(&balances(&[("a", 0.0), ("b", 0.0)])).is_empty());
        assert!(minimize_transfers(&[]).is_empty());
        assert!(minimize_transfers(&balances(&[("a", 5.0)])).is_empty());
    }

    #[test]
    fn test_sub_cent_drift_is_treated_as_settled() {
        // 0.003 leftovers must neither loop nor emit phantom transfers
        let input = balances(&[("a", 10.003), ("b", -10.0), ("c", -0.004)]);
        let transfers = minimize_transfers(&input);

        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].from, "b");
        assert_eq!(transfers[0].to, "a");
        assert!((transfers[0].amount - 10.0).abs() <= AMOUNT_EPSILON);
    }

    #[test]
    fn test_fund_surplus_stays_unmatched() {
        // balances sum to +20: the fund owes the group, nobody pays anyone
        // more than their debt
        let input = balances(&[("a", 50.0), ("b", -30.0)]);
        let transfers = minimize_transfers(&input);

        assert_eq!(transfers.len(), 1);
        assert_eq!(transfers[0].amount, 30.0);
    }

    #[test]
    fn test_chain_settlement() {
        let input = balances(&[("a", -10.0), ("b", -20.0), ("c", 30.0)]);
        let transfers = minimize_transfers(&input);

        assert_eq!(transfers.len(), 2);
        // largest debtor pays first
        assert_eq!(transfers[0].from, "b");
        assert_eq!(transfers[0].amount, 20.0);
        assert_eq!(transfers[1].from, "a");
        assert_eq!(transfers[1].amount, 10.0);
        assert!(transfers.iter().all(|t| t.to == "c"));
    }
}
