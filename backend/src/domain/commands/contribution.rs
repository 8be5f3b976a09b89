use chrono::NaiveDate;

use crate::domain::models::AdvanceContribution;

#[derive(Debug, Clone)]
pub struct AddContributionCommand {
    pub participant_id: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub comment: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AddContributionResult {
    pub contribution: AdvanceContribution,
}

#[derive(Debug, Clone)]
pub struct UpdateContributionCommand {
    pub contribution_id: String,
    pub participant_id: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub comment: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateContributionResult {
    pub contribution: AdvanceContribution,
}

#[derive(Debug, Clone)]
pub struct DeleteContributionCommand {
    pub contribution_id: String,
}

#[derive(Debug, Clone)]
pub struct DeleteContributionResult {
    pub success_message: String,
}
