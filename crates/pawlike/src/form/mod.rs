//! Form state and submission control.
//!
//! A [`Form`] owns the values, errors and touched flags of one form instance
//! and runs the registered field validators on change and on submit.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut form = Form::new(AuthValues::default())
//!     .with_validator("email", email_validator())
//!     .with_validator("password", login_password_validator());
//!
//! form.set_field_value("email", "bob@example.com")?;
//! form.handle_blur("email");
//!
//! let outcome = form
//!     .handle_submit(|values| async move { api.login(&values.into()).await.map(drop) })
//!     .await?;
//! ```

#[cfg(test)]
mod tests;

use crate::busy::BusyGuard;
use crate::changeset::ValidationErrors;
use crate::validate::Validator;
use std::collections::BTreeSet;
use std::future::Future;
use thiserror::Error;

/// Typed form values with string-addressable fields.
pub trait FieldValues: Clone {
    /// All field names, in declaration order.
    const FIELDS: &'static [&'static str];

    /// Current value of `field`, or `None` if the form has no such field.
    fn get(&self, field: &str) -> Option<&str>;

    /// Overwrite `field`. Returns `false` if the form has no such field.
    fn set(&mut self, field: &str, value: String) -> bool;
}

/// Errors raised by form operations (never by validation itself).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown form field: {0}")]
    UnknownField(String),
}

/// How a call to [`Form::handle_submit`] ended (when the handler did not fail).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Validation failed; the submit handler was not called.
    Rejected,
    /// The submit handler ran to completion.
    Completed,
}

/// Snapshot of a form's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState<V> {
    pub values: V,
    pub errors: ValidationErrors,
    pub touched: BTreeSet<String>,
    pub is_submitting: bool,
    pub is_valid: bool,
}

impl<V> FormState<V> {
    fn initial(values: V) -> Self {
        Self {
            values,
            errors: ValidationErrors::new(),
            touched: BTreeSet::new(),
            is_submitting: false,
            is_valid: true,
        }
    }
}

/// Controller for a single form.
#[derive(Debug, Clone)]
pub struct Form<V: FieldValues> {
    initial: V,
    state: FormState<V>,
    validators: Vec<(String, Validator<str>)>,
}

impl<V: FieldValues> Form<V> {
    pub fn new(initial: V) -> Self {
        Self {
            state: FormState::initial(initial.clone()),
            initial,
            validators: Vec::new(),
        }
    }

    /// Register the validator for `field`.
    ///
    /// Registration order is the order errors are reported in on submit.
    /// Registering a field twice replaces the earlier validator in place.
    pub fn with_validator(mut self, field: impl Into<String>, validator: Validator<str>) -> Self {
        let field = field.into();
        match self.validators.iter_mut().find(|(f, _)| *f == field) {
            Some(slot) => slot.1 = validator,
            None => self.validators.push((field, validator)),
        }
        self
    }

    pub fn state(&self) -> &FormState<V> {
        &self.state
    }

    pub fn values(&self) -> &V {
        &self.state.values
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.state.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting
    }

    pub fn is_valid(&self) -> bool {
        self.state.is_valid
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.state.touched.contains(field)
    }

    /// The current error message for `field`, touched or not.
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.state.errors.get(field).map(|e| e.message.as_str())
    }

    /// The error to display for `field`: only once the field has been touched.
    pub fn visible_error(&self, field: &str) -> Option<&str> {
        if self.is_touched(field) {
            self.field_error(field)
        } else {
            None
        }
    }

    /// Update one field and re-run only that field's validator.
    pub fn set_field_value(
        &mut self,
        field: &str,
        value: impl Into<String>,
    ) -> Result<(), FormError> {
        let value = value.into();
        let err = self
            .validator_for(field)
            .and_then(|v| v.validate(value.as_str()));

        if !self.state.values.set(field, value) {
            return Err(FormError::UnknownField(field.to_string()));
        }

        self.state.errors.replace(field, err);
        self.state.is_valid = self.state.errors.is_empty();
        Ok(())
    }

    /// Mark `field` as touched. Validation already ran on change.
    pub fn handle_blur(&mut self, field: &str) {
        if V::FIELDS.contains(&field) {
            self.state.touched.insert(field.to_string());
        }
    }

    /// Run every registered validator against `values`, in registration order.
    pub fn validate_values(&self, values: &V) -> ValidationErrors {
        self.validators
            .iter()
            .filter_map(|(field, v)| v.validate(values.get(field).unwrap_or_default()))
            .collect()
    }

    /// Validate the whole form and, if valid, hand the values to `on_submit`.
    ///
    /// Every field is marked touched. `is_submitting` is true only while
    /// `on_submit` is pending and is cleared on every exit path, including an
    /// `Err` from the handler or the returned future being dropped.
    pub async fn handle_submit<F, Fut, E>(&mut self, on_submit: F) -> Result<Submission, E>
    where
        F: FnOnce(V) -> Fut,
        Fut: Future<Output = Result<(), E>>,
    {
        let errors = self.validate_values(&self.state.values);
        self.state.is_valid = errors.is_empty();
        self.state.errors = errors;
        self.state.touched = V::FIELDS.iter().map(|f| (*f).to_string()).collect();

        if !self.state.is_valid {
            tracing::debug!(
                target: "pawlike.form",
                errors = self.state.errors.len(),
                "submit rejected by validation"
            );
            return Ok(Submission::Rejected);
        }

        let values = self.state.values.clone();
        let guard = BusyGuard::engage(&mut self.state.is_submitting);
        let result = on_submit(values).await;
        drop(guard);

        result.map(|()| Submission::Completed)
    }

    /// Restore the initial values and clear errors, touched and submitting.
    pub fn reset(&mut self) {
        self.state = FormState::initial(self.initial.clone());
    }

    fn validator_for(&self, field: &str) -> Option<&Validator<str>> {
        self.validators
            .iter()
            .find_map(|(f, v)| (f == field).then_some(v))
    }
}
