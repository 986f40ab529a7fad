use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::extenso::validate_monetary_value;
use super::fiscal::{is_valid_cnpj, is_valid_cpf, is_valid_document};

/// Per-field error messages owned by a form.
///
/// The `check_*` helpers run a pure validator, record or clear the
/// field's message, and return the validator's result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<String, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field`, replacing any previous one.
    pub fn set(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.insert(field.into(), message.into());
    }

    pub fn clear(&mut self, field: &str) {
        self.errors.remove(field);
    }

    pub fn clear_all(&mut self) {
        self.errors.clear();
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    /// True when no field has an error.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Fields and messages in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn record(&mut self, field: &str, ok: bool, message: &str) -> bool {
        if ok {
            self.clear(field);
        } else {
            self.set(field, message);
        }
        ok
    }

    pub fn check_cpf(&mut self, field: &str, value: &str) -> bool {
        self.record(field, is_valid_cpf(value), "CPF inválido")
    }

    pub fn check_cnpj(&mut self, field: &str, value: &str) -> bool {
        self.record(field, is_valid_cnpj(value), "CNPJ inválido")
    }

    pub fn check_document(&mut self, field: &str, value: &str) -> bool {
        self.record(field, is_valid_document(value), "Documento inválido (CPF/CNPJ)")
    }

    /// Check an amount against its written-out form.
    pub fn check_monetary(&mut self, field: &str, amount: Decimal, written: &str) -> bool {
        match validate_monetary_value(amount, written) {
            Ok(()) => {
                self.clear(field);
                true
            }
            Err(e) => {
                self.set(field, e.message);
                false
            }
        }
    }
}
