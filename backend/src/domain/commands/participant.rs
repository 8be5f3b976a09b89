use chrono::NaiveDate;

use crate::domain::models::Participant;

/// Raw period bounds before an id is assigned.
#[derive(Debug, Clone, Copy)]
pub struct PeriodInput {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct AddParticipantCommand {
    pub name: String,
    pub email: Option<String>,
    pub participation_periods: Vec<PeriodInput>,
    /// Optional opening payment into the travel fund, recorded as an
    /// advance contribution dated at the travel start.
    pub initial_contribution: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct AddParticipantResult {
    pub participant: Participant,
}

/// Field-wise update; `None` leaves the field untouched. Passing
/// `participation_periods` replaces the whole period list.
#[derive(Debug, Clone, Default)]
pub struct UpdateParticipantCommand {
    pub participant_id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub participation_periods: Option<Vec<PeriodInput>>,
}

#[derive(Debug, Clone)]
pub struct UpdateParticipantResult {
    pub participant: Participant,
}

#[derive(Debug, Clone)]
pub struct DeleteParticipantCommand {
    pub participant_id: String,
}

#[derive(Debug, Clone)]
pub struct DeleteParticipantResult {
    pub success_message: String,
}
