use serde::{Deserialize, Serialize};

use super::{currency_cell, id_cell, text_cell, Entity, FieldKind, FormField, Schema};
use crate::error::FormError;
use crate::form::{number_input, text_input, FormData};

/// An item sold or used by the clinic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    #[serde(rename = "idProduto")]
    pub id: Option<i64>,
    #[serde(rename = "nome")]
    pub name: Option<String>,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "preco")]
    pub price: Option<f64>,
    #[serde(rename = "estoque")]
    pub stock: Option<i64>,
    #[serde(rename = "categoria")]
    pub category: Option<String>,
    #[serde(rename = "ativo")]
    pub active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: Option<String>,
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "estoque")]
    pub stock: i64,
    #[serde(rename = "categoria")]
    pub category: String,
}

impl Entity for Product {
    type Payload = ProductPayload;

    const SCHEMA: Schema = Schema {
        resource: "produtos",
        label: "Produto",
        noun: "produto",
        columns: &["ID", "Nome", "Categoria", "Preco", "Estoque"],
        fields: &[
            FormField::required("nome", "Nome", FieldKind::Text),
            FormField::optional("descricao", "Descricao", FieldKind::Text),
            FormField::required("preco", "Preco", FieldKind::Decimal),
            FormField::optional("estoque", "Estoque", FieldKind::Integer),
            FormField::required("categoria", "Categoria", FieldKind::Text),
        ],
    };

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn cells(&self) -> Vec<String> {
        vec![
            id_cell(self.id),
            text_cell(&self.name),
            text_cell(&self.category),
            currency_cell(self.price),
            self.stock.unwrap_or(0).to_string(),
        ]
    }

    fn to_form(&self) -> FormData {
        FormData::new()
            .with("nome", text_input(&self.name))
            .with("descricao", text_input(&self.description))
            .with("preco", number_input(self.price))
            .with("estoque", self.stock.unwrap_or(0).to_string())
            .with("categoria", text_input(&self.category))
    }

    fn blank_form() -> FormData {
        Self::default().to_form()
    }

    fn payload(form: &FormData) -> Result<ProductPayload, FormError> {
        Ok(ProductPayload {
            name: form.required_text("nome")?,
            description: form.optional_text("descricao"),
            price: form.required_decimal("preco")?,
            stock: form.integer_or_zero("estoque"),
            category: form.required_text("categoria")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn price_has_two_decimals_and_stock_defaults() {
        let product: Product = serde_json::from_value(json!({
            "idProduto": 2,
            "nome": "Racao",
            "preco": 89.9,
            "categoria": "Alimento"
        }))
        .unwrap();
        assert_eq!(product.cells(), vec!["2", "Racao", "Alimento", "R$ 89.90", "0"]);
    }

    #[test]
    fn new_form_starts_with_zero_stock() {
        let form = Product::blank_form();
        assert_eq!(form.get("estoque"), "0");
        assert_eq!(form.get("nome"), "");
    }

    #[test]
    fn payload_requires_price() {
        let form = FormData::new().with("nome", "Coleira").with("categoria", "Acessorio");
        assert_eq!(Product::payload(&form), Err(FormError::Missing("preco")));
    }
}
