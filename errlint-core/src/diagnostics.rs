//! Diagnostics produced by the engine and the frontend.
//!
//! Every diagnostic is local to one declaration or constant; there is no
//! whole-run failure state. Whether any diagnostic is build-fatal is the
//! host's decision (the CLI exits non-zero on errors).

use serde::{Deserialize, Serialize};

/// Diagnostic severity. Only errors exist today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

/// One validation failure, attached to the declaration it concerns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// Composite type the diagnostic is attached to
    pub type_name: String,
    /// Constant the diagnostic is attached to, when it concerns one
    pub const_name: Option<String>,
    /// Source file of the declaration
    pub file: String,
}

impl Diagnostic {
    /// An error attached to a whole type.
    pub fn type_error(type_name: &str, file: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            type_name: type_name.to_string(),
            const_name: None,
            file: file.to_string(),
        }
    }

    /// An error attached to one constant of a type.
    pub fn const_error(
        type_name: &str,
        const_name: &str,
        file: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            type_name: type_name.to_string(),
            const_name: Some(const_name.to_string()),
            file: file.to_string(),
        }
    }

    /// Location label used in plain output (`file: Type::CONST`).
    pub fn location(&self) -> String {
        match &self.const_name {
            Some(c) => format!("{}: {}::{}", self.file, self.type_name, c),
            None => format!("{}: {}", self.file, self.type_name),
        }
    }
}

// Message builders, kept together so every template lives in one place.

pub(crate) fn field_not_found(field: &str) -> String {
    format!("Error code field named '{}' not found", field)
}

pub(crate) fn field_must_be_int(field: &str) -> String {
    format!("Error code field '{}' must be of i32 type", field)
}

pub(crate) fn unable_to_extract(const_name: &str) -> String {
    format!(
        "Unable to extract error code value from constant '{}', \
         please ensure constructor arguments are integer literals",
        const_name
    )
}

pub(crate) fn duplicate_code(code: &str, first_definer: &str) -> String {
    format!(
        "Duplicate error code {}: already defined by {}",
        code, first_definer
    )
}

pub(crate) fn marker_on_non_struct(item_name: &str) -> String {
    format!(
        "Only struct types can carry #[error_code]; '{}' is not a struct",
        item_name
    )
}

pub(crate) fn invalid_marker(detail: &str) -> String {
    format!("Invalid #[error_code] attribute: {}", detail)
}
