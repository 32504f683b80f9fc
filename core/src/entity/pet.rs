use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{id_cell, text_cell, Entity, FieldKind, FormField, Schema};
use crate::error::FormError;
use crate::form::{date_input, number_input, text_input, FormData};

/// An animal registered to a client. `client_id` is not checked against the
/// client list before submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pet {
    #[serde(rename = "idPet")]
    pub id: Option<i64>,
    #[serde(rename = "idCliente")]
    pub client_id: Option<i64>,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "especie")]
    pub species: Option<String>,
    #[serde(rename = "raca")]
    pub breed: Option<String>,
    #[serde(rename = "dataNascimento")]
    pub born_on: Option<String>,
    #[serde(rename = "peso")]
    pub weight: Option<f64>,
    #[serde(rename = "observacoes")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PetPayload {
    #[serde(rename = "idCliente")]
    pub client_id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "especie")]
    pub species: String,
    #[serde(rename = "raca")]
    pub breed: Option<String>,
    #[serde(rename = "dataNascimento")]
    pub born_on: Option<NaiveDate>,
    #[serde(rename = "peso")]
    pub weight: Option<f64>,
    #[serde(rename = "observacoes")]
    pub notes: Option<String>,
}

impl Entity for Pet {
    type Payload = PetPayload;

    const SCHEMA: Schema = Schema {
        resource: "pets",
        label: "Pet",
        noun: "pet",
        columns: &["ID", "Nome", "Especie", "Raca", "Cliente"],
        fields: &[
            FormField::required("idCliente", "ID do cliente", FieldKind::Integer),
            FormField::required("nome", "Nome", FieldKind::Text),
            FormField::required("especie", "Especie", FieldKind::Text),
            FormField::optional("raca", "Raca", FieldKind::Text),
            FormField::optional("dataNascimento", "Data de nascimento", FieldKind::Date),
            FormField::optional("peso", "Peso", FieldKind::Decimal),
            FormField::optional("observacoes", "Observacoes", FieldKind::Text),
        ],
    };

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            id_cell(self.id),
            text_cell(&self.name),
            text_cell(&self.species),
            text_cell(&self.breed),
            id_cell(self.client_id),
        ]
    }

    fn to_form(&self) -> FormData {
        FormData::new()
            .with("idCliente", number_input(self.client_id))
            .with("nome", text_input(&self.name))
            .with("especie", text_input(&self.species))
            .with("raca", text_input(&self.breed))
            .with("dataNascimento", date_input(&self.born_on))
            .with("peso", number_input(self.weight))
            .with("observacoes", text_input(&self.notes))
    }

    fn payload(form: &FormData) -> Result<PetPayload, FormError> {
        Ok(PetPayload {
            client_id: form.required_integer("idCliente")?,
            name: form.required_text("nome")?,
            species: form.required_text("especie")?,
            breed: form.optional_text("raca"),
            born_on: form.optional_date("dataNascimento")?,
            weight: form.optional_decimal("peso")?,
            notes: form.optional_text("observacoes"),
        })
    }
}
