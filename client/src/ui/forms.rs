//! Form validation state
//!
//! A [`FormValidation`] holds per-field rules. Each submit attempt checks
//! every field, marks the form as validated (so error styling appears) and
//! reports whether the submission may go ahead.

use std::collections::HashMap;

use shared::validation::{is_valid_barcode, is_valid_cpf, is_valid_email, is_valid_money};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    Required,
    Email,
    Cpf,
    Money,
    Barcode,
    MinLength(usize),
}

impl FieldRule {
    /// Format rules only judge non-empty input; emptiness is `Required`'s job.
    pub fn check(&self, value: &str) -> bool {
        let value = value.trim();
        match self {
            FieldRule::Required => !value.is_empty(),
            _ if value.is_empty() => true,
            FieldRule::Email => is_valid_email(value),
            FieldRule::Cpf => is_valid_cpf(value),
            FieldRule::Money => is_valid_money(value),
            FieldRule::Barcode => is_valid_barcode(value),
            FieldRule::MinLength(min) => value.chars().count() >= *min,
        }
    }

    pub fn message(&self) -> String {
        match self {
            FieldRule::Required => "Campo obrigatório".to_string(),
            FieldRule::Email => "E-mail inválido".to_string(),
            FieldRule::Cpf => "CPF inválido".to_string(),
            FieldRule::Money => "Valor inválido".to_string(),
            FieldRule::Barcode => "Código de barras inválido".to_string(),
            FieldRule::MinLength(min) => format!("Mínimo de {} caracteres", min),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub rule: FieldRule,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValidation {
    fields: Vec<(String, Vec<FieldRule>)>,
    was_validated: bool,
    errors: Vec<FieldError>,
}

impl FormValidation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: impl Into<String>, rules: &[FieldRule]) -> Self {
        self.fields.push((name.into(), rules.to_vec()));
        self
    }

    /// First failing rule per field. Missing values count as empty.
    pub fn check_validity(&self, values: &HashMap<String, String>) -> Vec<FieldError> {
        self.fields
            .iter()
            .filter_map(|(name, rules)| {
                let value = values.get(name).map(String::as_str).unwrap_or("");
                rules.iter().find(|rule| !rule.check(value)).map(|rule| FieldError {
                    field: name.clone(),
                    rule: *rule,
                    message: rule.message(),
                })
            })
            .collect()
    }

    /// Returns whether the submission may proceed.
    pub fn submit(&mut self, values: &HashMap<String, String>) -> bool {
        self.errors = self.check_validity(values);
        self.was_validated = true;
        if !self.errors.is_empty() {
            tracing::debug!(errors = self.errors.len(), "Form submission blocked");
        }
        self.errors.is_empty()
    }

    pub fn was_validated(&self) -> bool {
        self.was_validated
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn error_for(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    pub fn reset(&mut self) {
        self.was_validated = false;
        self.errors.clear();
    }
}
