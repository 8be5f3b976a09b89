//! Presence resolution for participation periods.
//!
//! Presence only drives defaults (pre-ticking people on a new expense,
//! rendering a "not present" hint); it never overrides an inclusion choice a
//! user already made.

use chrono::NaiveDate;

use crate::domain::models::Participant;

/// True iff the date falls inside at least one participation period,
/// inclusive on both ends. An empty period list yields false.
pub fn is_present(participant: &Participant, date: NaiveDate) -> bool {
    participant
        .participation_periods
        .iter()
        .any(|period| period.contains(date))
}
