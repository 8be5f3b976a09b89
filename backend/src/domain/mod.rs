//! Domain layer: models, mutator services, and the pure settlement core.

pub mod commands;
pub mod contribution_service;
pub mod error;
pub mod expense_service;
pub mod export_service;
pub mod mappers;
pub mod models;
pub mod participant_service;
pub mod presence;
pub mod settlement_service;
pub mod shares;
pub mod transfers;
pub mod travel_service;

pub use contribution_service::ContributionService;
pub use error::DomainError;
pub use expense_service::ExpenseService;
pub use export_service::ExportService;
pub use participant_service::ParticipantService;
pub use settlement_service::SettlementService;
pub use travel_service::TravelService;

/// Money comparisons tolerate one cent of floating point drift.
pub const AMOUNT_EPSILON: f64 = 0.01;
