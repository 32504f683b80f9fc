use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{currency_cell, id_cell, text_cell, Entity, FieldKind, FormField, Schema};
use crate::error::FormError;
use crate::form::{date_input, number_input, text_input, FormData};

/// A clinic employee. `role` is one of `VETERINARIO`, `TOSADOR`, or
/// `ATENDENTE`; the server derives `computed_salary` from it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Employee {
    #[serde(rename = "idFuncionario")]
    pub id: Option<i64>,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    pub cpf: Option<String>,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "cargo")]
    pub role: Option<String>,
    #[serde(rename = "salarioBase")]
    pub base_salary: Option<f64>,
    #[serde(rename = "salarioCalculado")]
    pub computed_salary: Option<f64>,
    #[serde(rename = "dataContratacao")]
    pub hired_on: Option<String>,
    #[serde(rename = "ativo")]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeePayload {
    #[serde(rename = "nome")]
    pub name: String,
    pub cpf: String,
    #[serde(rename = "telefone")]
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "cargo")]
    pub role: String,
    #[serde(rename = "salarioBase")]
    pub base_salary: Option<f64>,
    #[serde(rename = "dataContratacao")]
    pub hired_on: Option<NaiveDate>,
}

impl Entity for Employee {
    type Payload = EmployeePayload;

    const SCHEMA: Schema = Schema {
        resource: "funcionarios",
        label: "Funcionario",
        noun: "funcionario",
        columns: &["ID", "Nome", "CPF", "Cargo", "Salario"],
        fields: &[
            FormField::required("nome", "Nome", FieldKind::Text),
            FormField::required("cpf", "CPF", FieldKind::Text),
            FormField::optional("telefone", "Telefone", FieldKind::Text),
            FormField::optional("email", "Email", FieldKind::Text),
            FormField::required("cargo", "Cargo", FieldKind::Text),
            FormField::optional("salarioBase", "Salario base", FieldKind::Decimal),
            FormField::optional("dataContratacao", "Data de contratacao", FieldKind::Date),
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
            text_cell(&self.role),
            currency_cell(self.base_salary),
        ]
    }

    fn to_form(&self) -> FormData {
        FormData::new()
            .with("nome", text_input(&self.name))
            .with("cpf", text_input(&self.cpf))
            .with("telefone", text_input(&self.phone))
            .with("email", text_input(&self.email))
            .with("cargo", text_input(&self.role))
            .with("salarioBase", number_input(self.base_salary))
            .with("dataContratacao", date_input(&self.hired_on))
    }

    fn payload(form: &FormData) -> Result<EmployeePayload, FormError> {
        Ok(EmployeePayload {
            name: form.required_text("nome")?,
            cpf: form.required_text("cpf")?,
            phone: form.optional_text("telefone"),
            email: form.optional_text("email"),
            role: form.required_text("cargo")?,
            base_salary: form.optional_decimal("salarioBase")?,
            hired_on: form.optional_date("dataContratacao")?,
        })
    }
}
