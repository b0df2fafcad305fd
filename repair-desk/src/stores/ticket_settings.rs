//! Ticket option lists: device types, brands, models and tasks
//!
//! Device types, brands and tasks are plain strings edited by value.
//! Models carry an id and reference their brand by name, so brand removal
//! and renaming cascade to the models.

use super::tickets::TicketsStore;
use crate::core::error::{DeskError, DeskResult};
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use shared::message::{SyncAction, SyncResource};
use shared::models::{DeviceModel, TicketSettings};
use shared::types::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueList {
    DeviceTypes,
    Brands,
    Tasks,
}

impl ValueList {
    fn label(self) -> &'static str {
        match self {
            Self::DeviceTypes => "device type",
            Self::Brands => "brand",
            Self::Tasks => "task",
        }
    }

    fn entries(self, settings: &mut TicketSettings) -> &mut Vec<String> {
        match self {
            Self::DeviceTypes => &mut settings.device_types,
            Self::Brands => &mut settings.brands,
            Self::Tasks => &mut settings.tasks,
        }
    }
}

fn normalized(list: ValueList, value: &str) -> DeskResult<String> {
    validate_required_text(value, list.label(), MAX_NAME_LEN)?;
    Ok(value.trim().to_string())
}

impl TicketsStore {
    pub fn settings(&self) -> &TicketSettings {
        &self.settings
    }

    pub fn settings_version(&self) -> u64 {
        self.notifier.version(SyncResource::TicketSettings)
    }

    // ── Device types ────────────────────────────────────────────────

    pub fn add_device_type(&mut self, value: &str) -> DeskResult<()> {
        self.add_value(ValueList::DeviceTypes, value)
    }

    pub fn remove_device_type(&mut self, value: &str) -> DeskResult<()> {
        self.remove_value(ValueList::DeviceTypes, value).map(drop)
    }

    pub fn rename_device_type(&mut self, old: &str, new: &str) -> DeskResult<()> {
        self.rename_value(ValueList::DeviceTypes, old, new)
    }

    // ── Brands ──────────────────────────────────────────────────────

    pub fn add_brand(&mut self, value: &str) -> DeskResult<()> {
        self.add_value(ValueList::Brands, value)
    }

    /// Remove a brand together with every model that belongs to it
    ///
    /// Returns the models that were dropped.
    pub fn remove_brand(&mut self, value: &str) -> DeskResult<Vec<DeviceModel>> {
        self.remove_value(ValueList::Brands, value)
    }

    /// Rename a brand and repoint its models at the new name
    pub fn rename_brand(&mut self, old: &str, new: &str) -> DeskResult<()> {
        self.rename_value(ValueList::Brands, old, new)
    }

    // ── Tasks ───────────────────────────────────────────────────────

    pub fn add_task(&mut self, value: &str) -> DeskResult<()> {
        self.add_value(ValueList::Tasks, value)
    }

    pub fn remove_task(&mut self, value: &str) -> DeskResult<()> {
        self.remove_value(ValueList::Tasks, value).map(drop)
    }

    pub fn rename_task(&mut self, old: &str, new: &str) -> DeskResult<()> {
        self.rename_value(ValueList::Tasks, old, new)
    }

    // ── Models ──────────────────────────────────────────────────────

    /// Add a model under an existing brand
    pub fn add_model(&mut self, name: &str, brand: &str) -> DeskResult<DeviceModel> {
        validate_required_text(name, "model", MAX_NAME_LEN)?;
        if !self.settings.brands.iter().any(|b| b == brand) {
            return Err(DeskError::SettingsEntryNotFound {
                list: ValueList::Brands.label(),
                value: brand.to_string(),
            });
        }

        let model = DeviceModel {
            id: self.next_model_id,
            name: name.trim().to_string(),
            brand_id: brand.to_string(),
        };
        self.next_model_id += 1;
        self.settings.models.push(model.clone());

        tracing::debug!(model_id = model.id, brand = %brand, "Model added");
        self.notifier.publish(
            SyncResource::TicketSettings,
            SyncAction::Created,
            model.id,
            &self.settings,
        );
        Ok(model)
    }

    pub fn remove_model(&mut self, id: EntityId) -> DeskResult<DeviceModel> {
        let index = self
            .settings
            .models
            .iter()
            .position(|m| m.id == id)
            .ok_or(DeskError::ModelNotFound(id))?;
        let model = self.settings.models.remove(index);

        tracing::debug!(model_id = id, "Model removed");
        self.notifier.publish(
            SyncResource::TicketSettings,
            SyncAction::Deleted,
            id,
            &self.settings,
        );
        Ok(model)
    }

    pub fn rename_model(&mut self, id: EntityId, name: &str) -> DeskResult<DeviceModel> {
        validate_required_text(name, "model", MAX_NAME_LEN)?;
        let model = self
            .settings
            .models
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(DeskError::ModelNotFound(id))?;
        model.name = name.trim().to_string();
        let model = model.clone();

        tracing::debug!(model_id = id, "Model renamed");
        self.notifier.publish(
            SyncResource::TicketSettings,
            SyncAction::Updated,
            id,
            &self.settings,
        );
        Ok(model)
    }

    // ── Shared list editing ─────────────────────────────────────────

    fn add_value(&mut self, list: ValueList, value: &str) -> DeskResult<()> {
        let value = normalized(list, value)?;
        let entries = list.entries(&mut self.settings);
        if entries.contains(&value) {
            return Err(DeskError::SettingsEntryExists {
                list: list.label(),
                value,
            });
        }
        entries.push(value.clone());

        tracing::debug!(list = list.label(), value = %value, "Settings entry added");
        self.notifier.publish(
            SyncResource::TicketSettings,
            SyncAction::Created,
            value,
            &self.settings,
        );
        Ok(())
    }

    /// Returns the models dropped along with a brand
    fn remove_value(&mut self, list: ValueList, value: &str) -> DeskResult<Vec<DeviceModel>> {
        let entries = list.entries(&mut self.settings);
        let before = entries.len();
        entries.retain(|e| e != value);
        if entries.len() == before {
            return Err(DeskError::SettingsEntryNotFound {
                list: list.label(),
                value: value.to_string(),
            });
        }

        let mut dropped = Vec::new();
        if list == ValueList::Brands {
            let (gone, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.settings.models)
                .into_iter()
                .partition(|m| m.brand_id == value);
            self.settings.models = kept;
            dropped = gone;
        }

        tracing::debug!(
            list = list.label(),
            value = %value,
            models_removed = dropped.len(),
            "Settings entry removed"
        );
        self.notifier.publish(
            SyncResource::TicketSettings,
            SyncAction::Deleted,
            value,
            &self.settings,
        );
        Ok(dropped)
    }

    fn rename_value(&mut self, list: ValueList, old: &str, new: &str) -> DeskResult<()> {
        let new = normalized(list, new)?;
        let entries = list.entries(&mut self.settings);
        if old != new && entries.contains(&new) {
            return Err(DeskError::SettingsEntryExists {
                list: list.label(),
                value: new,
            });
        }
        let entry = entries
            .iter_mut()
            .find(|e| e.as_str() == old)
            .ok_or_else(|| DeskError::SettingsEntryNotFound {
                list: list.label(),
                value: old.to_string(),
            })?;
        *entry = new.clone();

        if list == ValueList::Brands {
            for model in self.settings.models.iter_mut().filter(|m| m.brand_id == old) {
                model.brand_id = new.clone();
            }
        }

        tracing::debug!(list = list.label(), old = %old, new = %new, "Settings entry renamed");
        self.notifier.publish(
            SyncResource::TicketSettings,
            SyncAction::Updated,
            new,
            &self.settings,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Notifier;

    fn store() -> TicketsStore {
        let settings = TicketSettings {
            device_types: vec!["Mobile".into(), "Tablet".into()],
            brands: vec!["Apple".into(), "Samsung".into(), "Huawei".into()],
            models: vec![
                DeviceModel {
                    id: 1,
                    name: "iPhone 14".into(),
                    brand_id: "Apple".into(),
                },
                DeviceModel {
                    id: 2,
                    name: "Galaxy S23".into(),
                    brand_id: "Samsung".into(),
                },
                DeviceModel {
                    id: 3,
                    name: "iPhone 15".into(),
                    brand_id: "Apple".into(),
                },
            ],
            tasks: vec!["Battery".into(), "Screen".into()],
        };
        TicketsStore::with_data(Vec::new(), settings, Notifier::standalone())
    }

    #[test]
    fn test_remove_brand_cascades_to_models() {
        let mut store = store();
        let dropped = store.remove_brand("Apple").unwrap();

        assert_eq!(dropped.len(), 2);
        assert_eq!(store.settings().brands, ["Samsung", "Huawei"]);
        assert_eq!(store.settings().models.len(), 1);
        assert_eq!(store.settings().models[0].brand_id, "Samsung");
    }

    #[test]
    fn test_remove_brand_without_models() {
        let mut store = store();
        assert!(store.remove_brand("Huawei").unwrap().is_empty());
        assert_eq!(store.settings().models.len(), 3);
    }

    #[test]
    fn test_remove_missing_entry() {
        let mut store = store();
        let mut rx = store.subscribe();
        assert!(matches!(
            store.remove_brand("Nokia"),
            Err(DeskError::SettingsEntryNotFound { list: "brand", .. })
        ));
        assert!(store.remove_task("Speaker").is_err());
        assert_eq!(store.settings().models.len(), 3);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_rename_brand_repoints_models() {
        let mut store = store();
        store.rename_brand("Apple", "Apple Inc.").unwrap();

        assert!(store.settings().brands.contains(&"Apple Inc.".to_string()));
        assert_eq!(store.settings().models_for_brand("Apple Inc.").count(), 2);
        assert_eq!(store.settings().models_for_brand("Apple").count(), 0);
    }

    #[test]
    fn test_rename_keeps_position() {
        let mut store = store();
        store.rename_device_type("Mobile", "Phone").unwrap();
        assert_eq!(store.settings().device_types, ["Phone", "Tablet"]);
    }

    #[test]
    fn test_rename_to_existing_value_rejected() {
        let mut store = store();
        assert!(matches!(
            store.rename_task("Battery", "Screen"),
            Err(DeskError::SettingsEntryExists { .. })
        ));
        assert!(store.rename_task("Battery", "Battery").is_ok());
    }

    #[test]
    fn test_add_duplicate_and_blank() {
        let mut store = store();
        store.add_task("Camera").unwrap();
        assert!(store.add_task("Camera").is_err());
        assert!(store.add_device_type("  ").is_err());
        assert_eq!(store.settings().tasks, ["Battery", "Screen", "Camera"]);
    }

    #[test]
    fn test_model_lifecycle() {
        let mut store = store();
        let model = store.add_model("P60 Pro", "Huawei").unwrap();
        assert_eq!(model.id, 4);
        assert_eq!(model.brand_id, "Huawei");

        let renamed = store.rename_model(model.id, "P60 Pro+").unwrap();
        assert_eq!(renamed.name, "P60 Pro+");

        store.remove_model(model.id).unwrap();
        assert!(matches!(
            store.remove_model(model.id),
            Err(DeskError::ModelNotFound(4))
        ));
    }

    #[test]
    fn test_add_model_requires_known_brand() {
        let mut store = store();
        assert!(store.add_model("3310", "Nokia").is_err());
    }

    #[test]
    fn test_settings_edits_notify_once() {
        let mut store = store();
        let mut rx = store.subscribe();

        store.remove_brand("Apple").unwrap();
        let payload = rx.try_recv().unwrap();
        assert_eq!(payload.resource, SyncResource::TicketSettings);
        assert_eq!(payload.action, SyncAction::Deleted);
        assert_eq!(payload.id, "Apple");
        assert_eq!(payload.data.unwrap()["models"].as_array().unwrap().len(), 1);
        assert!(rx.try_recv().is_err());
        assert_eq!(store.settings_version(), 1);
    }

    #[test]
    fn test_settings_edit_actions() {
        let mut store = store();
        let mut rx = store.subscribe();

        store.add_task("Keyboard").unwrap();
        store.rename_task("Keyboard", "Keyboard repair").unwrap();
        store.remove_task("Keyboard repair").unwrap();

        let actions: Vec<SyncAction> = std::iter::from_fn(|| rx.try_recv().ok())
            .map(|p| p.action)
            .collect();
        assert_eq!(
            actions,
            [SyncAction::Created, SyncAction::Updated, SyncAction::Deleted]
        );
    }
}
