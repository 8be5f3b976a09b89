use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::contribution::AdvanceContribution;
use super::expense::Expense;
use super::participant::{Participant, ParticipationPeriod};

/// Domain model for a travel: a bounded time window plus the three owned
/// collections. Deleting a travel destroys everything beneath it.
///
/// Mutators never edit a travel in place; they build a new value and replace
/// the stored one, so every read works against a consistent snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Travel {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub currency: String,
    pub description: Option<String>,
    pub participants: Vec<Participant>,
    pub expenses: Vec<Expense>,
    pub advance_contributions: Vec<AdvanceContribution>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl Travel {
    /// Participation periods must lie inside the travel window
    pub fn contains_period(&self, period: &ParticipationPeriod) -> bool {
        period.start_date >= self.start_date && period.end_date <= self.end_date
    }

    pub fn participant(&self, participant_id: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id == participant_id)
    }

    pub fn has_participant(&self, participant_id: &str) -> bool {
        self.participant(participant_id).is_some()
    }
}
