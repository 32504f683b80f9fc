//! Raw form input and its conversion into typed payload fields.
//!
//! Every input arrives as text. Required fields are checked here, before any
//! request is built, and empty optional inputs become `None` so they
//! serialize as JSON `null`.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::FormError;

/// The raw contents of an entity form, keyed by wire field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    values: BTreeMap<String, String>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.values.insert(field.to_string(), value.into());
    }

    /// Builder-style `set`.
    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// The raw input for `field`, or `""` when it was never filled.
    pub fn get(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn required_text(&self, field: &'static str) -> Result<String, FormError> {
        self.optional_text(field).ok_or(FormError::Missing(field))
    }

    pub fn optional_text(&self, field: &str) -> Option<String> {
        let value = self.get(field).trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    pub fn required_decimal(&self, field: &'static str) -> Result<f64, FormError> {
        self.optional_decimal(field)?.ok_or(FormError::Missing(field))
    }

    /// Accepts either `.` or `,` as the decimal separator.
    pub fn optional_decimal(&self, field: &'static str) -> Result<Option<f64>, FormError> {
        let Some(raw) = self.optional_text(field) else {
            return Ok(None);
        };
        raw.replace(',', ".")
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Some)
            .ok_or(FormError::Invalid { field, value: raw })
    }

    pub fn required_integer(&self, field: &'static str) -> Result<i64, FormError> {
        let raw = self.required_text(field)?;
        raw.parse().map_err(|_| FormError::Invalid { field, value: raw })
    }

    /// Integer input where blank or unparseable text counts as zero.
    pub fn integer_or_zero(&self, field: &str) -> i64 {
        self.get(field).trim().parse().unwrap_or(0)
    }

    /// A calendar date entered as `YYYY-MM-DD`. A time suffix is ignored.
    pub fn optional_date(&self, field: &'static str) -> Result<Option<NaiveDate>, FormError> {
        let Some(raw) = self.optional_text(field) else {
            return Ok(None);
        };
        NaiveDate::parse_from_str(date_part(&raw), "%Y-%m-%d")
            .map(Some)
            .map_err(|_| FormError::Invalid { field, value: raw })
    }
}

/// Strip a `T...` time suffix from a wire timestamp for display in a form.
pub fn date_part(value: &str) -> &str {
    value.split('T').next().unwrap_or(value)
}

pub(crate) fn text_input(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

pub(crate) fn number_input<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

pub(crate) fn date_input(value: &Option<String>) -> String {
    value.as_deref().map(date_part).unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_required_text_is_missing() {
        let form = FormData::new().with("nome", "   ");
        assert_eq!(form.required_text("nome"), Err(FormError::Missing("nome")));
        assert_eq!(form.required_text("cpf"), Err(FormError::Missing("cpf")));
    }

    #[test]
    fn empty_optional_is_none() {
        let form = FormData::new().with("email", "");
        assert_eq!(form.optional_text("email"), None);
        assert_eq!(form.optional_text("telefone"), None);
    }

    #[test]
    fn decimals_accept_comma() {
        let form = FormData::new().with("peso", "4,25").with("preco", "19.9");
        assert_eq!(form.optional_decimal("peso"), Ok(Some(4.25)));
        assert_eq!(form.required_decimal("preco"), Ok(19.9));
    }

    #[test]
    fn bad_decimal_is_invalid() {
        let form = FormData::new().with("preco", "abc");
        assert_eq!(
            form.required_decimal("preco"),
            Err(FormError::Invalid {
                field: "preco",
                value: "abc".to_string()
            })
        );
    }

    #[test]
    fn stock_defaults_to_zero() {
        let form = FormData::new().with("estoque", "x");
        assert_eq!(form.integer_or_zero("estoque"), 0);
        assert_eq!(FormData::new().integer_or_zero("estoque"), 0);
        assert_eq!(FormData::new().with("estoque", " 12 ").integer_or_zero("estoque"), 12);
    }

    #[test]
    fn dates_drop_time_suffix() {
        let form = FormData::new().with("dataNascimento", "2021-03-04T00:00:00");
        assert_eq!(
            form.optional_date("dataNascimento"),
            Ok(NaiveDate::from_ymd_opt(2021, 3, 4))
        );
        assert!(FormData::new().with("dataNascimento", "04/03/2021").optional_date("dataNascimento").is_err());
    }

    #[test]
    fn date_input_formats_for_display() {
        assert_eq!(date_input(&Some("2020-01-15T10:00:00".to_string())), "2020-01-15");
        assert_eq!(date_input(&None), "");
    }
}
