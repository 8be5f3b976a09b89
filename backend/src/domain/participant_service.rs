//! Participant lifecycle: joins, edits, presence queries, and the
//! referential-integrity guard on deletion.

use std::sync::Arc;

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use log::info;
use uuid::Uuid;

use crate::domain::commands::participant::{
    AddParticipantCommand, AddParticipantResult, DeleteParticipantCommand,
    DeleteParticipantResult, PeriodInput, UpdateParticipantCommand, UpdateParticipantResult,
};
use crate::domain::error::DomainError;
use crate::domain::models::{
    AdvanceContribution, Participant, ParticipationPeriod, Travel,
};
use crate::domain::presence;
use crate::storage::LedgerStore;

#[derive(Clone)]
pub struct ParticipantService {
    store: Arc<LedgerStore>,
}

impl ParticipantService {
    pub fn new(store: Arc<LedgerStore>) -> Self {
        Self { store }
    }

    /// Add a participant to the current travel. An optional initial
    /// contribution is recorded into the fund, dated at the travel start.
    pub fn add_participant(&self, command: AddParticipantCommand) -> Result<AddParticipantResult> {
        let mut travel = self.current_travel()?;

        let name = command.name.trim();
        if name.is_empty() {
            return Err(
                DomainError::Validation("participant name must not be empty".to_string()).into(),
            );
        }
        let periods = Self::build_periods(&travel, &command.participation_periods)?;

        let participant = Participant {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: command.email,
            participation_periods: periods,
        };
        travel.participants.push(participant.clone());

        if let Some(amount) = command.initial_contribution {
            if amount > 0.0 {
                travel.advance_contributions.push(AdvanceContribution {
                    id: Uuid::new_v4().to_string(),
                    participant_id: participant.id.clone(),
                    amount,
                    date: travel.start_date,
                    comment: Some("Initial contribution".to_string()),
                    created: Utc::now(),
                });
            }
        }

        travel.updated = Utc::now();
        self.store.replace_travel(travel);
        info!("added participant '{}'", participant.name);

        Ok(AddParticipantResult { participant })
    }

    pub fn update_participant(
        &self,
        command: UpdateParticipantCommand,
    ) -> Result<UpdateParticipantResult> {
        let mut travel = self.current_travel()?;

        let new_periods = match &command.participation_periods {
            Some(inputs) => Some(Self::build_periods(&travel, inputs)?),
            None => None,
        };

        let participant = travel
            .participants
            .iter_mut()
            .find(|p| p.id == command.participant_id)
            .ok_or_else(|| DomainError::ParticipantNotFound(command.participant_id.clone()))?;

        if let Some(name) = command.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(DomainError::Validation(
                    "participant name must not be empty".to_string(),
                )
                .into());
            }
            participant.name = name;
        }
        if let Some(email) = command.email {
            participant.email = Some(email);
        }
        if let Some(periods) = new_periods {
            participant.participation_periods = periods;
        }

        let updated = participant.clone();
        travel.updated = Utc::now();
        self.store.replace_travel(travel);
        info!("updated participant '{}'", updated.name);

        Ok(UpdateParticipantResult {
            participant: updated,
        })
    }

    /// Remove a participant, refused while any expense payer entry, any
    /// share entry with `included = true`, or any contribution still points
    /// at them. No partial mutation happens on refusal.
    pub fn delete_participant(
        &self,
        command: DeleteParticipantCommand,
    ) -> Result<DeleteParticipantResult> {
        let mut travel = self.current_travel()?;

        let participant = travel
            .participant(&command.participant_id)
            .ok_or_else(|| DomainError::ParticipantNotFound(command.participant_id.clone()))?
            .clone();

        if Self::is_referenced(&travel, &participant.id) {
            return Err(DomainError::ReferentialBlock {
                name: participant.name,
            }
            .into());
        }

        travel.participants.retain(|p| p.id != participant.id);
        // drop the idle included=false rows pointing at the removed participant
        for expense in &mut travel.expenses {
            expense
                .shared_among
                .retain(|s| s.participant_id != participant.id);
        }
        travel.updated = Utc::now();
        self.store.replace_travel(travel);
        info!("removed participant '{}'", participant.name);

        Ok(DeleteParticipantResult {
            success_message: format!("Participant '{}' removed from the travel", participant.name),
        })
    }

    /// Presence on a date, used to default share inclusion for new expenses
    /// and to render a "not present" hint. False for unknown participants or
    /// when no travel is selected.
    pub fn is_participant_present_on_date(&self, participant_id: &str, date: NaiveDate) -> bool {
        self.store
            .current_travel()
            .as_ref()
            .and_then(|travel| travel.participant(participant_id))
            .map(|participant| presence::is_present(participant, date))
            .unwrap_or(false)
    }

    fn current_travel(&self) -> Result<Travel> {
        self.store
            .current_travel()
            .ok_or_else(|| DomainError::NoCurrentTravel.into())
    }

    fn build_periods(
        travel: &Travel,
        inputs: &[PeriodInput],
    ) -> Result<Vec<ParticipationPeriod>> {
        inputs
            .iter()
            .map(|input| {
                let period = ParticipationPeriod {
                    id: Uuid::new_v4().to_string(),
                    start_date: input.start_date,
                    end_date: input.end_date,
                };
                if period.start_date > period.end_date {
                    return Err(DomainError::Validation(format!(
                        "period start {} is after its end {}",
                        period.start_date, period.end_date
                    ))
                    .into());
                }
                if !travel.contains_period(&period) {
                    return Err(DomainError::InvalidPeriod {
                        start: period.start_date,
                        end: period.end_date,
                    }
                    .into());
                }
                Ok(period)
            })
            .collect()
    }

    fn is_referenced(travel: &Travel, participant_id: &str) -> bool {
        let in_expenses = travel.expenses.iter().any(|expense| {
            expense
                .paid_by
                .iter()
                .any(|payer| payer.participant_id == participant_id)
                || expense
                    .shared_among
                    .iter()
                    .any(|share| share.participant_id == participant_id && share.included)
        });
        let in_contributions = travel
            .advance_contributions
            .iter()
            .any(|c| c.participant_id == participant_id);

        in_expenses || in_contributions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::contribution::AddContributionCommand;
    use crate::domain::commands::expense::CreateExpenseCommand;
    use crate::domain::models::ExpenseType;
    use crate::test_utils::{
        backend_with_participants, backend_with_travel, payer, share_input, ymd,
    };

    fn add_command(name: &str, periods: Vec<PeriodInput>) -> AddParticipantCommand {
        AddParticipantCommand {
            name: name.to_string(),
            email: None,
            participation_periods: periods,
            initial_contribution: None,
        }
    }

    #[test]
    fn test_add_participant_requires_current_travel() {
        let backend = crate::Backend::new();
        let err = backend
            .participant_service
            .add_participant(add_command("Anna", vec![]))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::NoCurrentTravel)
        ));
    }

    #[test]
    fn test_add_participant_with_period_inside_window() {
        // travel window is 2025-07-01 .. 2025-07-10
        let backend = backend_with_travel();
        let result = backend
            .participant_service
            .add_participant(add_command(
                "Anna",
                vec![PeriodInput {
                    start_date: ymd(2025, 7, 2),
                    end_date: ymd(2025, 7, 8),
                }],
            ))
            .unwrap();

        assert_eq!(result.participant.participation_periods.len(), 1);
        assert!(backend
            .participant_service
            .is_participant_present_on_date(&result.participant.id, ymd(2025, 7, 2)));
        assert!(!backend
            .participant_service
            .is_participant_present_on_date(&result.participant.id, ymd(2025, 7, 9)));
    }

    #[test]
    fn test_period_outside_travel_window_is_rejected() {
        let backend = backend_with_travel();
        let err = backend
            .participant_service
            .add_participant(add_command(
                "Anna",
                vec![PeriodInput {
                    start_date: ymd(2025, 6, 30),
                    end_date: ymd(2025, 7, 5),
                }],
            ))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::InvalidPeriod { .. })
        ));
        // nothing was added
        assert!(backend
            .travel_service
            .current_travel()
            .unwrap()
            .participants
            .is_empty());
    }

    #[test]
    fn test_inverted_period_is_rejected() {
        let backend = backend_with_travel();
        let err = backend
            .participant_service
            .add_participant(add_command(
                "Anna",
                vec![PeriodInput {
                    start_date: ymd(2025, 7, 8),
                    end_date: ymd(2025, 7, 2),
                }],
            ))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_initial_contribution_is_recorded() {
        let backend = backend_with_travel();
        let participant = backend
            .participant_service
            .add_participant(AddParticipantCommand {
                initial_contribution: Some(75.0),
                ..add_command("Anna", vec![])
            })
            .unwrap()
            .participant;

        let travel = backend.travel_service.current_travel().unwrap();
        assert_eq!(travel.advance_contributions.len(), 1);
        let contribution = &travel.advance_contributions[0];
        assert_eq!(contribution.participant_id, participant.id);
        assert_eq!(contribution.amount, 75.0);
        assert_eq!(contribution.date, travel.start_date);
    }

    #[test]
    fn test_update_participant_periods() {
        let (backend, ids) = backend_with_participants(&["Anna"]);
        let updated = backend
            .participant_service
            .update_participant(UpdateParticipantCommand {
                participant_id: ids[0].clone(),
                name: Some("Anna B".to_string()),
                email: Some("anna@example.com".to_string()),
                participation_periods: Some(vec![PeriodInput {
                    start_date: ymd(2025, 7, 5),
                    end_date: ymd(2025, 7, 10),
                }]),
            })
            .unwrap()
            .participant;

        assert_eq!(updated.name, "Anna B");
        assert_eq!(updated.email.as_deref(), Some("anna@example.com"));
        assert!(!backend
            .participant_service
            .is_participant_present_on_date(&ids[0], ymd(2025, 7, 4)));
        assert!(backend
            .participant_service
            .is_participant_present_on_date(&ids[0], ymd(2025, 7, 5)));
    }

    #[test]
    fn test_delete_blocked_by_payer_entry() {
        let (backend, ids) = backend_with_participants(&["Anna", "Ben"]);
        backend
            .expense_service
            .create_expense(CreateExpenseCommand {
                amount: 20.0,
                date: ymd(2025, 7, 2),
                expense_type: ExpenseType::Meal,
                custom_type: None,
                paid_by: vec![payer(&ids[0], 20.0)],
                paid_from_fund: false,
                shared_among: vec![share_input(&ids[1], true, 1.0)],
                comment: None,
            })
            .unwrap();

        let err = backend
            .participant_service
            .delete_participant(DeleteParticipantCommand {
                participant_id: ids[0].clone(),
            })
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::ReferentialBlock { .. })
        ));
    }

    #[test]
    fn test_delete_blocked_by_contribution() {
        let (backend, ids) = backend_with_participants(&["Anna"]);
        backend
            .contribution_service
            .add_contribution(AddContributionCommand {
                participant_id: ids[0].clone(),
                amount: 10.0,
                date: ymd(2025, 7, 1),
                comment: None,
            })
            .unwrap();

        assert!(backend
            .participant_service
            .delete_participant(DeleteParticipantCommand {
                participant_id: ids[0].clone(),
            })
            .is_err());
    }

    #[test]
    fn test_delete_allowed_with_excluded_share_entries() {
        // normalization gives every participant an included=false row;
        // those alone must not block deletion
        let (backend, ids) = backend_with_participants(&["Anna", "Ben", "Cleo"]);
        backend
            .expense_service
            .create_expense(CreateExpenseCommand {
                amount: 30.0,
                date: ymd(2025, 7, 2),
                expense_type: ExpenseType::Meal,
                custom_type: None,
                paid_by: vec![payer(&ids[0], 30.0)],
                paid_from_fund: false,
                shared_among: vec![
                    share_input(&ids[0], true, 1.0),
                    share_input(&ids[1], true, 1.0),
                    share_input(&ids[2], false, 1.0),
                ],
                comment: None,
            })
            .unwrap();

        backend
            .participant_service
            .delete_participant(DeleteParticipantCommand {
                participant_id: ids[2].clone(),
            })
            .unwrap();

        let travel = backend.travel_service.current_travel().unwrap();
        assert_eq!(travel.participants.len(), 2);
        assert!(travel.expenses[0]
            .shared_among
            .iter()
            .all(|s| s.participant_id != ids[2]));
    }
}
