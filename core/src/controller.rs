//! Generic list/modal controller shared by every entity.
//!
//! # Design
//! `EntityController<E>` owns the store, the outcome of the last load, and
//! the modal form. It has two states: the list view (modal closed) and the
//! editing state (modal open in create or edit mode). Every successful
//! mutation is followed by a full reload of the list; a failed mutation
//! leaves both the list and the form untouched.
//!
//! The `Panel` trait erases the entity type so the tab controller and the
//! console can drive any of the four controllers the same way.

use std::sync::Arc;

use tracing::{debug, info};

use crate::client::ApiClient;
use crate::confirm::Confirm;
use crate::entity::{Entity, Schema};
use crate::envelope::success_message;
use crate::error::FormError;
use crate::form::FormData;
use crate::notify::{Notification, Notifier};
use crate::view::{EntityStore, LoadStatus, Table};

/// Whether the open form creates a record or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open { mode: FormMode, form: FormData },
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        matches!(self, ModalState::Open { .. })
    }
}

/// Operations of one entity panel, independent of the record type.
pub trait Panel {
    fn schema(&self) -> Schema;

    /// Fetch the whole collection and replace the store with it.
    fn load(&mut self);

    /// Open a blank form in create mode.
    fn open_new(&mut self);

    /// Fetch record `id` and open it in edit mode.
    fn open_edit(&mut self, id: i64);

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FormError>;

    /// Close the form without sending anything.
    fn cancel(&mut self);

    /// Submit the open form. Returns `true` when the server accepted it.
    fn save(&mut self) -> bool;

    /// Delete record `id` once `confirm` approves. Returns `true` when the
    /// server accepted the delete.
    fn delete(&mut self, id: i64, confirm: &dyn Confirm) -> bool;

    fn table(&self) -> Table;

    /// Cells of record `id` as last loaded, if the list contained it.
    fn row(&self, id: i64) -> Option<Vec<String>>;

    fn modal(&self) -> &ModalState;
}

pub struct EntityController<E> {
    api: ApiClient,
    notifier: Arc<dyn Notifier>,
    store: EntityStore<E>,
    status: LoadStatus,
    modal: ModalState,
}

impl<E: Entity> EntityController<E> {
    pub fn new(api: ApiClient, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            notifier,
            store: EntityStore::new(),
            status: LoadStatus::NotLoaded,
            modal: ModalState::Closed,
        }
    }

    pub fn store(&self) -> &EntityStore<E> {
        &self.store
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    fn notify_error(&self, message: String) {
        self.notifier.notify(Notification::error(message));
    }
}

impl<E: Entity> Panel for EntityController<E> {
    fn schema(&self) -> Schema {
        E::SCHEMA
    }

    fn load(&mut self) {
        match self.api.list::<E>() {
            Ok(records) => {
                debug!(resource = E::SCHEMA.resource, count = records.len(), "list loaded");
                self.store.replace_all(records);
                self.status = LoadStatus::Loaded;
            }
            Err(err) => self.status = LoadStatus::Failed(err.to_string()),
        }
    }

    fn open_new(&mut self) {
        self.modal = ModalState::Open {
            mode: FormMode::Create,
            form: E::blank_form(),
        };
    }

    fn open_edit(&mut self, id: i64) {
        match self.api.get::<E>(id) {
            Ok(record) => {
                self.modal = ModalState::Open {
                    mode: FormMode::Edit(record.id().unwrap_or(id)),
                    form: record.to_form(),
                };
            }
            Err(err) => self.notify_error(err.to_string()),
        }
    }

    fn set_field(&mut self, field: &str, value: &str) -> Result<(), FormError> {
        let ModalState::Open { form, .. } = &mut self.modal else {
            return Err(FormError::NoOpenForm);
        };
        let schema = E::SCHEMA;
        let name = schema
            .field(field)
            .map(|f| f.name)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))?;
        form.set(name, value);
        Ok(())
    }

    fn cancel(&mut self) {
        self.modal = ModalState::Closed;
    }

    fn save(&mut self) -> bool {
        let ModalState::Open { mode, form } = &self.modal else {
            return false;
        };
        let mode = *mode;

        let payload = match E::payload(form) {
            Ok(payload) => payload,
            Err(err) => {
                self.notify_error(err.to_string());
                return false;
            }
        };

        let (result, message) = match mode {
            FormMode::Create => (self.api.create::<E>(&payload), E::SCHEMA.created_message()),
            FormMode::Edit(id) => (self.api.update::<E>(id, &payload), E::SCHEMA.updated_message()),
        };

        match result {
            Ok(_) => {
                info!(resource = E::SCHEMA.resource, ?mode, "record saved");
                self.notifier.notify(Notification::success(message));
                self.modal = ModalState::Closed;
                self.load();
                true
            }
            Err(err) => {
                self.notify_error(err.to_string());
                false
            }
        }
    }

    fn delete(&mut self, id: i64, confirm: &dyn Confirm) -> bool {
        if !confirm.confirm(&E::SCHEMA.confirm_delete_prompt()) {
            return false;
        }

        match self.api.delete::<E>(id) {
            Ok(payload) => {
                info!(resource = E::SCHEMA.resource, id, "record deleted");
                let message = success_message(&payload).unwrap_or_else(|| E::SCHEMA.deleted_message());
                self.notifier.notify(Notification::success(message));
                self.load();
                true
            }
            Err(err) => {
                self.notify_error(err.to_string());
                false
            }
        }
    }

    fn table(&self) -> Table {
        Table::project(&self.store, &self.status)
    }

    fn row(&self, id: i64) -> Option<Vec<String>> {
        self.store.get(id).map(Entity::cells)
    }

    fn modal(&self) -> &ModalState {
        &self.modal
    }
}
