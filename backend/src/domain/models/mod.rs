//! Domain models for the travel splitter.

pub mod contribution;
pub mod expense;
pub mod participant;
pub mod settlement;
pub mod travel;

pub use contribution::AdvanceContribution;
pub use expense::{Expense, ExpensePayer, ExpenseShare, ExpenseType};
pub use participant::{Participant, ParticipationPeriod};
pub use settlement::{Settlement, Transfer};
pub use travel::Travel;
