//! Shared fixtures for domain tests.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::commands::expense::{PayerInput, ShareInput};
use crate::domain::commands::participant::{AddParticipantCommand, PeriodInput};
use crate::domain::commands::travel::CreateTravelCommand;
use crate::domain::models::{
    Expense, ExpenseShare, ExpenseType, Participant, ParticipationPeriod, Travel,
};
use crate::Backend;

pub(crate) fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Backend with one selected travel, "Summer Trip", 2025-07-01 .. 2025-07-10.
pub(crate) fn backend_with_travel() -> Backend {
    let backend = Backend::new();
    backend
        .travel_service
        .create_travel(CreateTravelCommand {
            name: "Summer Trip".to_string(),
            start_date: ymd(2025, 7, 1),
            end_date: ymd(2025, 7, 10),
            currency: "EUR".to_string(),
            description: None,
        })
        .unwrap();
    backend
}

/// Backend with a travel plus the given participants, each present for the
/// whole trip. Returns the participant ids in insertion order.
pub(crate) fn backend_with_participants(names: &[&str]) -> (Backend, Vec<String>) {
    let backend = backend_with_travel();
    let ids = names
        .iter()
        .map(|name| {
            backend
                .participant_service
                .add_participant(AddParticipantCommand {
                    name: name.to_string(),
                    email: None,
                    participation_periods: vec![PeriodInput {
                        start_date: ymd(2025, 7, 1),
                        end_date: ymd(2025, 7, 10),
                    }],
                    initial_contribution: None,
                })
                .unwrap()
                .participant
                .id
        })
        .collect();
    (backend, ids)
}

pub(crate) fn payer(participant_id: &str, amount: f64) -> PayerInput {
    PayerInput {
        participant_id: participant_id.to_string(),
        amount,
    }
}

pub(crate) fn share_input(participant_id: &str, included: bool, weight: f64) -> ShareInput {
    ShareInput {
        participant_id: participant_id.to_string(),
        included,
        weight,
    }
}

pub(crate) fn share(participant_id: &str, included: bool, weight: f64) -> ExpenseShare {
    ExpenseShare {
        participant_id: participant_id.to_string(),
        included,
        weight,
    }
}

pub(crate) fn participant_with_periods(
    name: &str,
    periods: &[(NaiveDate, NaiveDate)],
) -> Participant {
    Participant {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        email: None,
        participation_periods: periods
            .iter()
            .map(|(start_date, end_date)| ParticipationPeriod {
                id: Uuid::new_v4().to_string(),
                start_date: *start_date,
                end_date: *end_date,
            })
            .collect(),
    }
}

/// Standalone expense value for exercising the pure share math.
pub(crate) fn expense_shared(
    amount: f64,
    date: NaiveDate,
    shared_among: Vec<ExpenseShare>,
) -> Expense {
    let now = Utc::now();
    Expense {
        id: Uuid::new_v4().to_string(),
        amount,
        date,
        expense_type: ExpenseType::Meal,
        custom_type: None,
        paid_by: Vec::new(),
        paid_from_fund: true,
        shared_among,
        comment: None,
        created: now,
        updated: now,
    }
}

/// Empty travel value, 2025-07-01 .. 2025-07-10, for store-level tests.
pub(crate) fn sample_travel(name: &str) -> Travel {
    let now = Utc::now();
    Travel {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        start_date: ymd(2025, 7, 1),
        end_date: ymd(2025, 7, 10),
        currency: "EUR".to_string(),
        description: None,
        participants: Vec::new(),
        expenses: Vec::new(),
        advance_contributions: Vec::new(),
        created: now,
        updated: now,
    }
}
