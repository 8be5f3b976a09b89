//! Advance contributions into the shared travel fund.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use log::info;
use uuid::Uuid;

use crate::domain::commands::contribution::{
    AddContributionCommand, AddContributionResult, DeleteContributionCommand,
    DeleteContributionResult, UpdateContributionCommand, UpdateContributionResult,
};
use crate::domain::error::DomainError;
use crate::domain::models::{AdvanceContribution, Travel};
use crate::storage::LedgerStore;

#[derive(Clone)]
pub struct ContributionService {
    store: Arc<LedgerStore>,
}

impl ContributionService {
    pub fn new(store: Arc<LedgerStore>) -> Self {
        Self { store }
    }

    pub fn add_contribution(&self, command: AddContributionCommand) -> Result<AddContributionResult> {
        let mut travel = self.current_travel()?;
        Self::validate(&travel, &command.participant_id, command.amount)?;

        let contribution = AdvanceContribution {
            id: Uuid::new_v4().to_string(),
            participant_id: command.participant_id,
            amount: command.amount,
            date: command.date,
            comment: command.comment,
            created: Utc::now(),
        };

        travel.advance_contributions.push(contribution.clone());
        travel.updated = Utc::now();
        self.store.replace_travel(travel);
        info!(
            "recorded fund contribution of {:.2} by participant {}",
            contribution.amount, contribution.participant_id
        );

        Ok(AddContributionResult { contribution })
    }

    pub fn update_contribution(
        &self,
        command: UpdateContributionCommand,
    ) -> Result<UpdateContributionResult> {
        let mut travel = self.current_travel()?;
        Self::validate(&travel, &command.participant_id, command.amount)?;

        let contribution = travel
            .advance_contributions
            .iter_mut()
            .find(|c| c.id == command.contribution_id)
            .ok_or_else(|| DomainError::ContributionNotFound(command.contribution_id.clone()))?;

        contribution.participant_id = command.participant_id;
        contribution.amount = command.amount;
        contribution.date = command.date;
        contribution.comment = command.comment;

        let updated = contribution.clone();
        travel.updated = Utc::now();
        self.store.replace_travel(travel);
        info!("updated fund contribution {}", updated.id);

        Ok(UpdateContributionResult {
            contribution: updated,
        })
    }

    pub fn delete_contribution(
        &self,
        command: DeleteContributionCommand,
    ) -> Result<DeleteContributionResult> {
        let mut travel = self.current_travel()?;

        let contribution = travel
            .advance_contributions
            .iter()
            .find(|c| c.id == command.contribution_id)
            .ok_or_else(|| DomainError::ContributionNotFound(command.contribution_id.clone()))?
            .clone();

        travel
            .advance_contributions
            .retain(|c| c.id != contribution.id);
        travel.updated = Utc::now();
        self.store.replace_travel(travel);
        info!(
            "deleted fund contribution of {:.2} by participant {}",
            contribution.amount, contribution.participant_id
        );

        Ok(DeleteContributionResult {
            success_message: format!(
                "Contribution of {:.2} has been deleted",
                contribution.amount
            ),
        })
    }

    fn current_travel(&self) -> Result<Travel> {
        self.store
            .current_travel()
            .ok_or_else(|| DomainError::NoCurrentTravel.into())
    }

    fn validate(travel: &Travel, participant_id: &str, amount: f64) -> Result<()> {
        if !travel.has_participant(participant_id) {
            return Err(DomainError::ParticipantNotFound(participant_id.to_string()).into());
        }
        if amount <= 0.0 {
            return Err(
                DomainError::Validation("contribution amount must be positive".to_string()).into(),
            );
        }
        Ok(())
    }
}
