//! Entity schemas and wire records.
//!
//! # Design
//! Each backend record type implements `Entity`, whose `SCHEMA` descriptor
//! carries everything the generic controller needs: endpoint segment, the
//! words used in operator messages, table columns, and form fields. Records
//! mirror the backend's JSON field names but every field is optional, since
//! the view has to cope with whatever shape the server sent.

mod client;
mod employee;
mod pet;
mod product;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::FormError;
use crate::form::FormData;

pub use client::{Client, ClientPayload};
pub use employee::{Employee, EmployeePayload};
pub use pet::{Pet, PetPayload};
pub use product::{Product, ProductPayload};

/// Input type of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Integer,
    Decimal,
    Date,
}

/// One input of an entity form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    /// Wire name, also the key in `FormData`.
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FormField {
    pub const fn required(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind, required: true }
    }

    pub const fn optional(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind, required: false }
    }
}

/// Static description of one entity type.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    /// Path segment under `/api`, e.g. `clientes`.
    pub resource: &'static str,
    /// Capitalized singular used at the start of messages, e.g. `Cliente`.
    pub label: &'static str,
    /// Lowercase singular used inside sentences, e.g. `cliente`.
    pub noun: &'static str,
    pub columns: &'static [&'static str],
    pub fields: &'static [FormField],
}

impl Schema {
    pub fn collection_path(&self) -> String {
        format!("/api/{}", self.resource)
    }

    pub fn item_path(&self, id: i64) -> String {
        format!("/api/{}/{id}", self.resource)
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn created_message(&self) -> String {
        format!("{} cadastrado com sucesso!", self.label)
    }

    pub fn updated_message(&self) -> String {
        format!("{} atualizado com sucesso!", self.label)
    }

    pub fn deleted_message(&self) -> String {
        format!("{} excluido com sucesso!", self.label)
    }

    pub fn empty_message(&self) -> String {
        format!("Nenhum {} cadastrado", self.noun)
    }

    pub fn confirm_delete_prompt(&self) -> String {
        format!("Tem certeza que deseja excluir este {}?", self.noun)
    }
}

/// A backend-managed record type.
pub trait Entity: DeserializeOwned + Clone + fmt::Debug {
    /// Body sent on create and update. Never carries the id.
    type Payload: Serialize + fmt::Debug;

    const SCHEMA: Schema;

    fn id(&self) -> Option<i64>;

    /// Table cells, in `SCHEMA.columns` order.
    fn cells(&self) -> Vec<String>;

    /// Pre-filled form for editing this record.
    fn to_form(&self) -> FormData;

    /// Form contents of a blank "new" form.
    fn blank_form() -> FormData {
        Self::SCHEMA
            .fields
            .iter()
            .fold(FormData::new(), |form, field| form.with(field.name, ""))
    }

    fn payload(form: &FormData) -> Result<Self::Payload, FormError>;
}

pub(crate) const PLACEHOLDER: &str = "-";

pub(crate) fn id_cell(id: Option<i64>) -> String {
    id.map_or_else(|| PLACEHOLDER.to_string(), |id| id.to_string())
}

pub(crate) fn text_cell(value: &Option<String>) -> String {
    match value.as_deref() {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

pub(crate) fn currency_cell(value: Option<f64>) -> String {
    format!("R$ {:.2}", value.unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_resource() {
        assert_eq!(Pet::SCHEMA.collection_path(), "/api/pets");
        assert_eq!(Product::SCHEMA.item_path(9), "/api/produtos/9");
        assert_eq!(Employee::SCHEMA.collection_path(), "/api/funcionarios");
        assert_eq!(Client::SCHEMA.item_path(1), "/api/clientes/1");
    }

    #[test]
    fn messages_use_label_and_noun() {
        assert_eq!(Client::SCHEMA.created_message(), "Cliente cadastrado com sucesso!");
        assert_eq!(Employee::SCHEMA.updated_message(), "Funcionario atualizado com sucesso!");
        assert_eq!(Pet::SCHEMA.deleted_message(), "Pet excluido com sucesso!");
        assert_eq!(Product::SCHEMA.empty_message(), "Nenhum produto cadastrado");
        assert_eq!(
            Client::SCHEMA.confirm_delete_prompt(),
            "Tem certeza que deseja excluir este cliente?"
        );
    }

    #[test]
    fn cells_substitute_placeholders() {
        assert_eq!(id_cell(None), "-");
        assert_eq!(text_cell(&Some(String::new())), "-");
        assert_eq!(text_cell(&None), "-");
        assert_eq!(currency_cell(Some(1234.5)), "R$ 1234.50");
        assert_eq!(currency_cell(None), "R$ 0.00");
    }

    #[test]
    fn blank_form_lists_every_field() {
        let form = Pet::blank_form();
        let names: Vec<&str> = form.iter().map(|(k, _)| k).collect();
        assert_eq!(names.len(), Pet::SCHEMA.fields.len());
        assert!(form.iter().all(|(_, v)| v.is_empty()));
    }
}
