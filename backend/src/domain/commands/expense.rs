use chrono::NaiveDate;

use crate::domain::models::{Expense, ExpenseType};

#[derive(Debug, Clone)]
pub struct PayerInput {
    pub participant_id: String,
    pub amount: f64,
}

#[derive(Debug, Clone)]
pub struct ShareInput {
    pub participant_id: String,
    pub included: bool,
    pub weight: f64,
}

#[derive(Debug, Clone)]
pub struct CreateExpenseCommand {
    pub amount: f64,
    pub date: NaiveDate,
    pub expense_type: ExpenseType,
    pub custom_type: Option<String>,
    pub paid_by: Vec<PayerInput>,
    pub paid_from_fund: bool,
    pub shared_among: Vec<ShareInput>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateExpenseResult {
    pub expense: Expense,
}

/// Wholesale replacement of an expense's fields, keeping its identity.
#[derive(Debug, Clone)]
pub struct UpdateExpenseCommand {
    pub expense_id: String,
    pub amount: f64,
    pub date: NaiveDate,
    pub expense_type: ExpenseType,
    pub custom_type: Option<String>,
    pub paid_by: Vec<PayerInput>,
    pub paid_from_fund: bool,
    pub shared_among: Vec<ShareInput>,
    pub comment: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateExpenseResult {
    pub expense: Expense,
}

#[derive(Debug, Clone)]
pub struct DeleteExpenseCommand {
    pub expense_id: String,
}

#[derive(Debug, Clone)]
pub struct DeleteExpenseResult {
    pub success_message: String,
}
