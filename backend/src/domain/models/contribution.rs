use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Money a participant put into the shared travel fund ahead of time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvanceContribution {
    pub id: String,
    pub participant_id: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub comment: Option<String>,
    pub created: DateTime<Utc>,
}
