//! Field-level validation error types.
//!
//! These are values, not `Err`s: a form carries them as part of its state and
//! renders them inline.

use serde::Serialize;

/// A single field validation error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// An ordered collection of validation errors, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    items: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.items.iter()
    }

    /// The error currently recorded for `field`.
    pub fn get(&self, field: &str) -> Option<&ValidationError> {
        self.items.iter().find(|e| e.field == field)
    }

    /// Drop any error for `field`, then append `err` if present.
    ///
    /// A replaced error moves to the end, matching the order in which the user
    /// produced it.
    pub fn replace(&mut self, field: &str, err: Option<ValidationError>) {
        self.items.retain(|e| e.field != field);
        if let Some(err) = err {
            self.items.push(err);
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.items
    }
}

impl FromIterator<ValidationError> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        let mut errors = Self::new();
        for err in iter {
            let field = err.field.clone();
            errors.replace(&field, Some(err));
        }
        errors
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
