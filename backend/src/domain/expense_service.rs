//! Expense lifecycle and the payment/share validation in front of the
//! settlement math.

use std::sync::Arc;

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use log::info;
use uuid::Uuid;

use crate::domain::commands::expense::{
    CreateExpenseCommand, CreateExpenseResult, DeleteExpenseCommand, DeleteExpenseResult,
    PayerInput, ShareInput, UpdateExpenseCommand, UpdateExpenseResult,
};
use crate::domain::error::DomainError;
use crate::domain::models::{Expense, ExpensePayer, ExpenseShare, ExpenseType, Travel};
use crate::domain::{presence, AMOUNT_EPSILON};
use crate::storage::LedgerStore;

#[derive(Clone)]
pub struct ExpenseService {
    store: Arc<LedgerStore>,
}

impl ExpenseService {
    pub fn new(store: Arc<LedgerStore>) -> Self {
        Self { store }
    }

    pub fn create_expense(&self, command: CreateExpenseCommand) -> Result<CreateExpenseResult> {
        let mut travel = self.current_travel()?;

        let paid_by = Self::validate_payers(
            &travel,
            command.amount,
            &command.paid_by,
            command.paid_from_fund,
        )?;
        let shared_among = Self::normalize_shares(&travel, &command.shared_among)?;

        let now = Utc::now();
        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            amount: command.amount,
            date: command.date,
            expense_type: command.expense_type,
            custom_type: Self::custom_label(command.expense_type, command.custom_type),
            paid_by,
            paid_from_fund: command.paid_from_fund,
            shared_among,
            comment: command.comment,
            created: now,
            updated: now,
        };

        travel.expenses.push(expense.clone());
        travel.updated = now;
        self.store.replace_travel(travel);
        info!(
            "added {} expense of {:.2} on {}",
            expense.expense_type.label(),
            expense.amount,
            expense.date
        );

        Ok(CreateExpenseResult { expense })
    }

    pub fn update_expense(&self, command: UpdateExpenseCommand) -> Result<UpdateExpenseResult> {
        let mut travel = self.current_travel()?;

        let paid_by = Self::validate_payers(
            &travel,
            command.amount,
            &command.paid_by,
            command.paid_from_fund,
        )?;
        let shared_among = Self::normalize_shares(&travel, &command.shared_among)?;

        let now = Utc::now();
        let expense = travel
            .expenses
            .iter_mut()
            .find(|e| e.id == command.expense_id)
            .ok_or_else(|| DomainError::ExpenseNotFound(command.expense_id.clone()))?;

        expense.amount = command.amount;
        expense.date = command.date;
        expense.expense_type = command.expense_type;
        expense.custom_type = Self::custom_label(command.expense_type, command.custom_type);
        expense.paid_by = paid_by;
        expense.paid_from_fund = command.paid_from_fund;
        expense.shared_among = shared_among;
        expense.comment = command.comment;
        expense.updated = now;

        let updated = expense.clone();
        travel.updated = now;
        self.store.replace_travel(travel);
        info!("updated expense {}", updated.id);

        Ok(UpdateExpenseResult { expense: updated })
    }

    pub fn delete_expense(&self, command: DeleteExpenseCommand) -> Result<DeleteExpenseResult> {
        let mut travel = self.current_travel()?;

        let expense = travel
            .expenses
            .iter()
            .find(|e| e.id == command.expense_id)
            .ok_or_else(|| DomainError::ExpenseNotFound(command.expense_id.clone()))?
            .clone();

        travel.expenses.retain(|e| e.id != expense.id);
        travel.updated = Utc::now();
        self.store.replace_travel(travel);
        info!(
            "deleted {} expense of {:.2}",
            expense.expense_type.label(),
            expense.amount
        );

        Ok(DeleteExpenseResult {
            success_message: format!(
                "The {} expense of {:.2} has been deleted",
                expense.expense_type.label().to_lowercase(),
                expense.amount
            ),
        })
    }

    /// Share defaults for a new expense on the given date: everyone present
    /// is pre-included at weight 1. Empty when no travel is selected. This
    /// only seeds the form; a saved inclusion choice is never overridden.
    pub fn default_shares_for_date(&self, date: NaiveDate) -> Vec<ExpenseShare> {
        let Some(travel) = self.store.current_travel() else {
            return Vec::new();
        };
        travel
            .participants
            .iter()
            .map(|participant| ExpenseShare {
                participant_id: participant.id.clone(),
                included: presence::is_present(participant, date),
                weight: 1.0,
            })
            .collect()
    }

    fn current_travel(&self) -> Result<Travel> {
        self.store
            .current_travel()
            .ok_or_else(|| DomainError::NoCurrentTravel.into())
    }

    /// Zero-amount entries are dropped before the balance check; for a
    /// non-fund expense the remaining payer amounts must sum to the expense
    /// amount within the one-cent epsilon. A fund-paid expense keeps no
    /// payer entries at all.
    fn validate_payers(
        travel: &Travel,
        amount: f64,
        paid_by: &[PayerInput],
        paid_from_fund: bool,
    ) -> Result<Vec<ExpensePayer>> {
        if amount <= 0.0 {
            return Err(
                DomainError::Validation("expense amount must be positive".to_string()).into(),
            );
        }
        if paid_from_fund {
            return Ok(Vec::new());
        }

        let payers: Vec<ExpensePayer> = paid_by
            .iter()
            .filter(|payer| payer.amount != 0.0)
            .map(|payer| ExpensePayer {
                participant_id: payer.participant_id.clone(),
                amount: payer.amount,
            })
            .collect();

        for payer in &payers {
            if !travel.has_participant(&payer.participant_id) {
                return Err(DomainError::ParticipantNotFound(payer.participant_id.clone()).into());
            }
            if payer.amount < 0.0 {
                return Err(DomainError::Validation(
                    "payer amounts must not be negative".to_string(),
                )
                .into());
            }
        }

        let paid: f64 = payers.iter().map(|p| p.amount).sum();
        if (paid - amount).abs() > AMOUNT_EPSILON {
            return Err(DomainError::UnbalancedPayment { paid, amount }.into());
        }

        Ok(payers)
    }

    /// Every travel participant ends up with exactly one share entry, so
    /// that excluding someone is a stored `included = false` row and UI
    /// toggling stays idempotent. Entries the caller did not provide are
    /// added excluded at weight 1.
    fn normalize_shares(travel: &Travel, shared_among: &[ShareInput]) -> Result<Vec<ExpenseShare>> {
        for share in shared_among {
            if !travel.has_participant(&share.participant_id) {
                return Err(DomainError::ParticipantNotFound(share.participant_id.clone()).into());
            }
            if share.weight <= 0.0 {
                return Err(DomainError::Validation(format!(
                    "share weight must be positive, got {}",
                    share.weight
                ))
                .into());
            }
        }

        Ok(travel
            .participants
            .iter()
            .map(|participant| {
                match shared_among
                    .iter()
                    .find(|s| s.participant_id == participant.id)
                {
                    Some(share) => ExpenseShare {
                        participant_id: participant.id.clone(),
                        included: share.included,
                        weight: share.weight,
                    },
                    None => ExpenseShare {
                        participant_id: participant.id.clone(),
                        included: false,
                        weight: 1.0,
                    },
                }
            })
            .collect())
    }

    fn custom_label(expense_type: ExpenseType, custom_type: Option<String>) -> Option<String> {
        match expense_type {
            ExpenseType::Custom => custom_type,
            _ => None,
        }
    }
}
