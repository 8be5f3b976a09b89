//! Conversions between domain models and the `shared` DTOs.
//!
//! DTOs carry dates as strings (`YYYY-MM-DD` for calendar dates, RFC 3339
//! for audit timestamps); the domain side keeps `chrono` types. The DTO
//! direction is infallible, the domain direction parses and validates.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::error::DomainError;
use crate::domain::models::{
    AdvanceContribution, Expense, ExpensePayer, ExpenseShare, ExpenseType, Participant,
    ParticipationPeriod, Settlement, Transfer, Travel,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn travel_to_dto(travel: &Travel) -> shared::Travel {
    shared::Travel {
        id: travel.id.clone(),
        name: travel.name.clone(),
        start_date: travel.start_date.format(DATE_FORMAT).to_string(),
        end_date: travel.end_date.format(DATE_FORMAT).to_string(),
        currency: travel.currency.clone(),
        description: travel.description.clone(),
        participants: travel.participants.iter().map(participant_to_dto).collect(),
        expenses: travel.expenses.iter().map(expense_to_dto).collect(),
        advance_contributions: travel
            .advance_contributions
            .iter()
            .map(contribution_to_dto)
            .collect(),
        created: travel.created.to_rfc3339(),
        updated: travel.updated.to_rfc3339(),
    }
}

pub fn participant_to_dto(participant: &Participant) -> shared::Participant {
    shared::Participant {
        id: participant.id.clone(),
        name: participant.name.clone(),
        email: participant.email.clone(),
        participation_periods: participant
            .participation_periods
            .iter()
            .map(|period| shared::ParticipationPeriod {
                id: period.id.clone(),
                start_date: period.start_date.format(DATE_FORMAT).to_string(),
                end_date: period.end_date.format(DATE_FORMAT).to_string(),
            })
            .collect(),
    }
}

pub fn expense_to_dto(expense: &Expense) -> shared::Expense {
    shared::Expense {
        id: expense.id.clone(),
        amount: expense.amount,
        date: expense.date.format(DATE_FORMAT).to_string(),
        expense_type: expense_type_to_dto(expense.expense_type),
        custom_type: expense.custom_type.clone(),
        paid_by: expense
            .paid_by
            .iter()
            .map(|payer| shared::ExpensePayer {
                participant_id: payer.participant_id.clone(),
                amount: payer.amount,
            })
            .collect(),
        paid_from_fund: expense.paid_from_fund,
        shared_among: expense
            .shared_among
            .iter()
            .map(|share| shared::ExpenseShare {
                participant_id: share.participant_id.clone(),
                included: share.included,
                weight: share.weight,
            })
            .collect(),
        comment: expense.comment.clone(),
        created: expense.created.to_rfc3339(),
        updated: expense.updated.to_rfc3339(),
    }
}

pub fn contribution_to_dto(contribution: &AdvanceContribution) -> shared::AdvanceContribution {
    shared::AdvanceContribution {
        id: contribution.id.clone(),
        participant_id: contribution.participant_id.clone(),
        amount: contribution.amount,
        date: contribution.date.format(DATE_FORMAT).to_string(),
        comment: contribution.comment.clone(),
        created: contribution.created.to_rfc3339(),
    }
}

pub fn settlement_to_dto(settlement: &Settlement) -> shared::Settlement {
    shared::Settlement {
        participant_id: settlement.participant_id.clone(),
        name: settlement.name.clone(),
        advance_paid: settlement.advance_paid,
        personally_paid: settlement.personally_paid,
        expense_share: settlement.expense_share,
        due_amount: settlement.due_amount,
        refund_amount: settlement.refund_amount,
        donated: settlement.donated,
    }
}

pub fn transfer_to_dto(transfer: &Transfer) -> shared::Transfer {
    shared::Transfer {
        from: transfer.from.clone(),
        to: transfer.to.clone(),
        amount: transfer.amount,
    }
}

fn expense_type_to_dto(expense_type: ExpenseType) -> shared::ExpenseType {
    match expense_type {
        ExpenseType::Meal => shared::ExpenseType::Meal,
        ExpenseType::Fuel => shared::ExpenseType::Fuel,
        ExpenseType::Hotel => shared::ExpenseType::Hotel,
        ExpenseType::Custom => shared::ExpenseType::Custom,
    }
}

fn expense_type_from_dto(expense_type: shared::ExpenseType) -> ExpenseType {
    match expense_type {
        shared::ExpenseType::Meal => ExpenseType::Meal,
        shared::ExpenseType::Fuel => ExpenseType::Fuel,
        shared::ExpenseType::Hotel => ExpenseType::Hotel,
        shared::ExpenseType::Custom => ExpenseType::Custom,
    }
}

/// Rebuild a domain travel from its DTO form, as read back from a JSON
/// backup. Structural problems (empty identity fields, malformed dates)
/// surface as validation errors; referential consistency inside the travel
/// is the exporter's responsibility and is not re-checked here.
pub fn travel_from_dto(dto: shared::Travel) -> Result<Travel> {
    if dto.id.trim().is_empty() || dto.name.trim().is_empty() {
        return Err(DomainError::Validation(
            "imported travel is missing its id or name".to_string(),
        )
        .into());
    }

    let travel = Travel {
        start_date: parse_date(&dto.start_date, "travel start date")?,
        end_date: parse_date(&dto.end_date, "travel end date")?,
        created: parse_timestamp(&dto.created, "travel created timestamp")?,
        updated: parse_timestamp(&dto.updated, "travel updated timestamp")?,
        id: dto.id,
        name: dto.name,
        currency: dto.currency,
        description: dto.description,
        participants: dto
            .participants
            .into_iter()
            .map(participant_from_dto)
            .collect::<Result<_>>()?,
        expenses: dto
            .expenses
            .into_iter()
            .map(expense_from_dto)
            .collect::<Result<_>>()?,
        advance_contributions: dto
            .advance_contributions
            .into_iter()
            .map(contribution_from_dto)
            .collect::<Result<_>>()?,
    };
    Ok(travel)
}

fn participant_from_dto(dto: shared::Participant) -> Result<Participant> {
    Ok(Participant {
        participation_periods: dto
            .participation_periods
            .into_iter()
            .map(|period| {
                Ok(ParticipationPeriod {
                    start_date: parse_date(&period.start_date, "period start date")?,
                    end_date: parse_date(&period.end_date, "period end date")?,
                    id: period.id,
                })
            })
            .collect::<Result<_>>()?,
        id: dto.id,
        name: dto.name,
        email: dto.email,
    })
}

fn expense_from_dto(dto: shared::Expense) -> Result<Expense> {
    Ok(Expense {
        date: parse_date(&dto.date, "expense date")?,
        created: parse_timestamp(&dto.created, "expense created timestamp")?,
        updated: parse_timestamp(&dto.updated, "expense updated timestamp")?,
        expense_type: expense_type_from_dto(dto.expense_type),
        id: dto.id,
        amount: dto.amount,
        custom_type: dto.custom_type,
        paid_by: dto
            .paid_by
            .into_iter()
            .map(|payer| ExpensePayer {
                participant_id: payer.participant_id,
                amount: payer.amount,
            })
            .collect(),
        paid_from_fund: dto.paid_from_fund,
        shared_among: dto
            .shared_among
            .into_iter()
            .map(|share| ExpenseShare {
                participant_id: share.participant_id,
                included: share.included,
                weight: share.weight,
            })
            .collect(),
        comment: dto.comment,
    })
}

fn contribution_from_dto(dto: shared::AdvanceContribution) -> Result<AdvanceContribution> {
    Ok(AdvanceContribution {
        date: parse_date(&dto.date, "contribution date")?,
        created: parse_timestamp(&dto.created, "contribution created timestamp")?,
        id: dto.id,
        participant_id: dto.participant_id,
        amount: dto.amount,
        comment: dto.comment,
    })
}

fn parse_date(value: &str, what: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .with_context(|| format!("invalid {}: {:?}", what, value))
}

fn parse_timestamp(value: &str, what: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("invalid {}: {:?}", what, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{participant_with_periods, sample_travel, ymd};

    #[test]
    fn test_travel_round_trips_through_dto() {
        let mut travel = sample_travel("Summer Trip");
        travel
            .participants
            .push(participant_with_periods("Anna", &[(ymd(2025, 7, 1), ymd(2025, 7, 10))]));

        let restored = travel_from_dto(travel_to_dto(&travel)).unwrap();
        assert_eq!(restored, travel);
    }

    #[test]
    fn test_import_rejects_missing_name() {
        let mut dto = travel_to_dto(&sample_travel("Summer Trip"));
        dto.name = "  ".to_string();

        let err = travel_from_dto(dto).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_import_rejects_malformed_date() {
        let mut dto = travel_to_dto(&sample_travel("Summer Trip"));
        dto.start_date = "July 1st".to_string();
        assert!(travel_from_dto(dto).is_err());
    }
}
