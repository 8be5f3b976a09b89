//! Travel lifecycle: the root aggregate every other mutator hangs off.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use log::{info, warn};
use uuid::Uuid;

use crate::domain::commands::travel::{
    CreateTravelCommand, CreateTravelResult, DeleteTravelCommand, DeleteTravelResult,
    ListTravelsResult, SetCurrentTravelCommand, SetCurrentTravelResult, UpdateTravelCommand,
    UpdateTravelResult,
};
use crate::domain::error::DomainError;
use crate::domain::models::Travel;
use crate::storage::LedgerStore;

#[derive(Clone)]
pub struct TravelService {
    store: Arc<LedgerStore>,
}

impl TravelService {
    pub fn new(store: Arc<LedgerStore>) -> Self {
        Self { store }
    }

    /// Create a travel and select it as current.
    pub fn create_travel(&self, command: CreateTravelCommand) -> Result<CreateTravelResult> {
        let name = command.name.trim();
        if name.is_empty() {
            return Err(DomainError::Validation("travel name must not be empty".to_string()).into());
        }
        if command.start_date > command.end_date {
            return Err(DomainError::Validation(
                "travel start date must not be after its end date".to_string(),
            )
            .into());
        }

        let now = Utc::now();
        let travel = Travel {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            start_date: command.start_date,
            end_date: command.end_date,
            currency: command.currency,
            description: command.description,
            participants: Vec::new(),
            expenses: Vec::new(),
            advance_contributions: Vec::new(),
            created: now,
            updated: now,
        };

        self.store.insert_travel(travel.clone(), true);
        info!(
            "created travel '{}' ({} - {})",
            travel.name, travel.start_date, travel.end_date
        );

        Ok(CreateTravelResult { travel })
    }

    pub fn update_travel(&self, command: UpdateTravelCommand) -> Result<UpdateTravelResult> {
        let mut travel = self
            .store
            .get_travel(&command.travel_id)
            .ok_or_else(|| DomainError::TravelNotFound(command.travel_id.clone()))?;

        if let Some(name) = command.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(
                    DomainError::Validation("travel name must not be empty".to_string()).into(),
                );
            }
            travel.name = name;
        }
        if let Some(start_date) = command.start_date {
            travel.start_date = start_date;
        }
        if let Some(end_date) = command.end_date {
            travel.end_date = end_date;
        }
        if travel.start_date > travel.end_date {
            return Err(DomainError::Validation(
                "travel start date must not be after its end date".to_string(),
            )
            .into());
        }
        if let Some(currency) = command.currency {
            travel.currency = currency;
        }
        if let Some(description) = command.description {
            travel.description = Some(description);
        }

        travel.updated = Utc::now();
        self.store.replace_travel(travel.clone());
        info!("updated travel '{}'", travel.name);

        Ok(UpdateTravelResult { travel })
    }

    /// Delete a travel and everything it owns.
    pub fn delete_travel(&self, command: DeleteTravelCommand) -> Result<DeleteTravelResult> {
        let travel = self
            .store
            .get_travel(&command.travel_id)
            .ok_or_else(|| DomainError::TravelNotFound(command.travel_id.clone()))?;

        self.store.remove_travel(&travel.id);
        info!("deleted travel '{}'", travel.name);

        Ok(DeleteTravelResult {
            success_message: format!("Travel '{}' deleted successfully", travel.name),
        })
    }

    pub fn set_current_travel(
        &self,
        command: SetCurrentTravelCommand,
    ) -> Result<SetCurrentTravelResult> {
        match command.travel_id {
            Some(travel_id) => {
                let travel = self
                    .store
                    .get_travel(&travel_id)
                    .ok_or_else(|| DomainError::TravelNotFound(travel_id.clone()))?;
                self.store.set_current_travel(Some(&travel.id));
                info!("current travel is now '{}'", travel.name);
                Ok(SetCurrentTravelResult {
                    travel: Some(travel),
                })
            }
            None => {
                self.store.set_current_travel(None);
                info!("current travel selection cleared");
                Ok(SetCurrentTravelResult { travel: None })
            }
        }
    }

    pub fn current_travel(&self) -> Option<Travel> {
        self.store.current_travel()
    }

    pub fn list_travels(&self) -> ListTravelsResult {
        ListTravelsResult {
            travels: self.store.list_travels(),
        }
    }

    /// Insert an already-validated travel coming from a JSON backup. A fresh
    /// id is assigned when the imported one collides with an existing travel.
    pub(crate) fn insert_imported(&self, mut travel: Travel) -> Travel {
        if self.store.get_travel(&travel.id).is_some() {
            warn!(
                "imported travel id {} already exists, assigning a new one",
                travel.id
            );
            travel.id = Uuid::new_v4().to_string();
        }
        self.store.insert_travel(travel.clone(), false);
        info!("imported travel '{}'", travel.name);
        travel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ymd;

    fn create_command(name: &str) -> CreateTravelCommand {
        CreateTravelCommand {
            name: name.to_string(),
            start_date: ymd(2025, 7, 1),
            end_date: ymd(2025, 7, 10),
            currency: "EUR".to_string(),
            description: None,
        }
    }

    #[test]
    fn test_create_travel_selects_it() {
        let backend = crate::Backend::new();
        let result = backend
            .travel_service
            .create_travel(create_command("Summer Trip"))
            .unwrap();

        let current = backend.travel_service.current_travel().unwrap();
        assert_eq!(current.id, result.travel.id);
        assert_eq!(current.name, "Summer Trip");
        assert!(current.participants.is_empty());
    }

    #[test]
    fn test_create_travel_rejects_empty_name() {
        let backend = crate::Backend::new();
        let err = backend
            .travel_service
            .create_travel(create_command("   "))
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_create_travel_rejects_inverted_window() {
        let backend = crate::Backend::new();
        let command = CreateTravelCommand {
            start_date: ymd(2025, 7, 10),
            end_date: ymd(2025, 7, 1),
            ..create_command("Backwards")
        };
        assert!(backend.travel_service.create_travel(command).is_err());
    }

    #[test]
    fn test_update_travel_fields() {
        let backend = crate::Backend::new();
        let travel = backend
            .travel_service
            .create_travel(create_command("Summer Trip"))
            .unwrap()
            .travel;

        let updated = backend
            .travel_service
            .update_travel(UpdateTravelCommand {
                travel_id: travel.id.clone(),
                name: Some("Autumn Trip".to_string()),
                description: Some("replanned".to_string()),
                ..Default::default()
            })
            .unwrap()
            .travel;

        assert_eq!(updated.name, "Autumn Trip");
        assert_eq!(updated.description.as_deref(), Some("replanned"));
        assert_eq!(updated.start_date, travel.start_date);
        assert!(updated.updated >= travel.updated);
    }

    #[test]
    fn test_update_unknown_travel() {
        let backend = crate::Backend::new();
        let err = backend
            .travel_service
            .update_travel(UpdateTravelCommand {
                travel_id: "missing".to_string(),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::TravelNotFound(_))
        ));
    }

    #[test]
    fn test_delete_travel_clears_selection() {
        let backend = crate::Backend::new();
        let travel = backend
            .travel_service
            .create_travel(create_command("Summer Trip"))
            .unwrap()
            .travel;

        backend
            .travel_service
            .delete_travel(DeleteTravelCommand {
                travel_id: travel.id,
            })
            .unwrap();

        assert!(backend.travel_service.current_travel().is_none());
        assert!(backend.travel_service.list_travels().travels.is_empty());
    }

    #[test]
    fn test_switch_current_travel() {
        let backend = crate::Backend::new();
        let first = backend
            .travel_service
            .create_travel(create_command("First"))
            .unwrap()
            .travel;
        backend
            .travel_service
            .create_travel(create_command("Second"))
            .unwrap();

        let selected = backend
            .travel_service
            .set_current_travel(SetCurrentTravelCommand {
                travel_id: Some(first.id.clone()),
            })
            .unwrap();
        assert_eq!(selected.travel.unwrap().id, first.id);
        assert_eq!(backend.travel_service.current_travel().unwrap().id, first.id);

        backend
            .travel_service
            .set_current_travel(SetCurrentTravelCommand { travel_id: None })
            .unwrap();
        assert!(backend.travel_service.current_travel().is_none());
    }
}
