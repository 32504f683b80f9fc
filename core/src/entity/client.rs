use serde::{Deserialize, Serialize};

use super::{id_cell, text_cell, Entity, FieldKind, FormField, Schema};
use crate::error::FormError;
use crate::form::{text_input, FormData};

/// A clinic customer, the owner of one or more pets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Client {
    #[serde(rename = "idCliente", alias = "id")]
    pub id: Option<i64>,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    pub cpf: Option<String>,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "endereco")]
    pub address: Option<String>,
    #[serde(rename = "dataCadastro")]
    pub registered_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientPayload {
    #[serde(rename = "nome")]
    pub name: String,
    pub cpf: String,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "endereco")]
    pub address: Option<String>,
}

impl Entity for Client {
    type Payload = ClientPayload;

    const SCHEMA: Schema = Schema {
        resource: "clientes",
        label: "Cliente",
        noun: "cliente",
        columns: &["ID", "Nome", "CPF", "Telefone", "Email"],
        fields: &[
            FormField::required("nome", "Nome", FieldKind::Text),
            FormField::required("cpf", "CPF", FieldKind::Text),
            FormField::optional("telefone", "Telefone", FieldKind::Text),
            FormField::optional("email", "Email", FieldKind::Text),
            FormField::optional("endereco", "Endereco", FieldKind::Text),
        ],
    };

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            id_cell(self.id),
            text_cell(&self.name),
            text_cell(&self.cpf),
            text_cell(&self.phone),
            text_cell(&self.email),
        ]
    }

    fn to_form(&self) -> FormData {
        FormData::new()
            .with("nome", text_input(&self.name))
            .with("cpf", text_input(&self.cpf))
            .with("telefone", text_input(&self.phone))
            .with("email", text_input(&self.email))
            .with("endereco", text_input(&self.address))
    }

    fn payload(form: &FormData) -> Result<ClientPayload, FormError> {
        Ok(ClientPayload {
            name: form.required_text("nome")?,
            cpf: form.required_text("cpf")?,
            phone: form.optional_text("telefone"),
            email: form.optional_text("email"),
            address: form.optional_text("endereco"),
        })
    }
}
