//! Validation results reported by SQL generators.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What is wrong with a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// The field must be set.
    RequiredFieldMissing,
    /// The field must be unset on this database.
    DisallowedField,
    /// The database cannot express the value given for the field.
    UnsupportedOption,
}

/// A single field-level validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field name, in change-document spelling (e.g. `baseColumnNames`).
    pub field: String,
    /// What is wrong with it.
    pub kind: ValidationErrorKind,
    /// Database the error applies to, for engine-gated errors.
    pub database: Option<String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, &self.database) {
            (ValidationErrorKind::RequiredFieldMissing, _) => {
                write!(f, "{} is required", self.field)
            }
            (ValidationErrorKind::DisallowedField, Some(db)) => {
                write!(f, "{} is not allowed on {db}", self.field)
            }
            (ValidationErrorKind::DisallowedField, None) => {
                write!(f, "{} is not allowed", self.field)
            }
            (ValidationErrorKind::UnsupportedOption, Some(db)) => {
                write!(f, "{} is not supported on {db}", self.field)
            }
            (ValidationErrorKind::UnsupportedOption, None) => {
                write!(f, "{} is not supported", self.field)
            }
        }
    }
}

/// Values that can be checked for presence.
pub trait FieldValue {
    /// Returns true if the value counts as unset.
    fn is_unset(&self) -> bool;
}

impl FieldValue for str {
    fn is_unset(&self) -> bool {
        self.trim().is_empty()
    }
}

impl FieldValue for String {
    fn is_unset(&self) -> bool {
        self.as_str().is_unset()
    }
}

impl FieldValue for bool {
    fn is_unset(&self) -> bool {
        !*self
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    fn is_unset(&self) -> bool {
        self.as_ref().is_none_or(FieldValue::is_unset)
    }
}

/// A list counts as unset when it is empty or any entry is unset.
impl<T: FieldValue> FieldValue for [T] {
    fn is_unset(&self) -> bool {
        self.is_empty() || self.iter().any(FieldValue::is_unset)
    }
}

impl<T: FieldValue> FieldValue for Vec<T> {
    fn is_unset(&self) -> bool {
        self.as_slice().is_unset()
    }
}

impl<T: FieldValue + ?Sized> FieldValue for &T {
    fn is_unset(&self) -> bool {
        (**self).is_unset()
    }
}

/// Ordered collection of validation errors.
///
/// Empty means the statement is valid for the database. Errors are kept in
/// the order they were reported so callers see them generator by generator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error if `value` is unset.
    pub fn check_required_field(&mut self, field: &str, value: &(impl FieldValue + ?Sized)) {
        if value.is_unset() {
            self.push(field, ValidationErrorKind::RequiredFieldMissing, None);
        }
    }

    /// Records an error if `value` is set; `database` names the engine that forbids it.
    pub fn check_disallowed_field(
        &mut self,
        field: &str,
        value: &(impl FieldValue + ?Sized),
        database: &str,
    ) {
        if !value.is_unset() {
            self.push(field, ValidationErrorKind::DisallowedField, Some(database));
        }
    }

    /// Records that `database` cannot express the value of `field`.
    pub fn add_unsupported(&mut self, field: &str, database: &str) {
        self.push(field, ValidationErrorKind::UnsupportedOption, Some(database));
    }

    /// Appends every error of `other`.
    pub fn extend(&mut self, other: Self) {
        self.errors.extend(other.errors);
    }

    /// Returns whether there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns whether there are no errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns all errors in report order.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Returns the errors reported for `field`.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.errors.iter().filter(move |e| e.field == field)
    }

    /// Returns whether `field` has an error of `kind`.
    #[must_use]
    pub fn contains(&self, field: &str, kind: ValidationErrorKind) -> bool {
        self.for_field(field).any(|e| e.kind == kind)
    }

    fn push(&mut self, field: &str, kind: ValidationErrorKind, database: Option<&str>) {
        self.errors.push(ValidationError {
            field: field.to_string(),
            kind,
            database: database.map(str::to_string),
        });
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.errors.iter().map(|e| format!("  - {e}")).collect();
        f.write_str(&lines.join("\n"))
    }
}
