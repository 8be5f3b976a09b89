use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Domain model for a travel participant.
///
/// A participant may have zero, one, or many participation periods; they may
/// overlap. Presence on a date means the date falls inside at least one
/// period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub participation_periods: Vec<ParticipationPeriod>,
}

/// A `[start_date, end_date]` sub-range of the travel window, both ends
/// inclusive, date-only granularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipationPeriod {
    pub id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl ParticipationPeriod {
    /// Inclusive on both ends
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}
