use chrono::NaiveDate;

use crate::domain::models::Travel;

#[derive(Debug, Clone)]
pub struct CreateTravelCommand {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub currency: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreateTravelResult {
    pub travel: Travel,
}

/// Field-wise update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateTravelCommand {
    pub travel_id: String,
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub currency: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct UpdateTravelResult {
    pub travel: Travel,
}

#[derive(Debug, Clone)]
pub struct DeleteTravelCommand {
    pub travel_id: String,
}

#[derive(Debug, Clone)]
pub struct DeleteTravelResult {
    pub success_message: String,
}

/// `None` clears the current travel selection.
#[derive(Debug, Clone)]
pub struct SetCurrentTravelCommand {
    pub travel_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SetCurrentTravelResult {
    pub travel: Option<Travel>,
}

#[derive(Debug, Clone)]
pub struct ListTravelsResult {
    pub travels: Vec<Travel>,
}
