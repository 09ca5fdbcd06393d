//! Composable field validators.
//!
//! A [`Validator`] is a pure function from a value to an optional
//! [`ValidationError`]. Validators are built from predicates with
//! [`create_validator`] and chained with [`combine_validators`]:
//!
//! ```
//! use pawlike::validate::{combine_validators, create_validator, predicates, Validator};
//!
//! let email: Validator<str> = combine_validators([
//!     create_validator(predicates::required, "email", "Email is required"),
//!     create_validator(predicates::is_email, "email", "Please enter a valid email address"),
//! ]);
//!
//! assert_eq!(email.validate("").unwrap().message, "Email is required");
//! assert!(email.validate("bob@example.com").is_none());
//! ```

pub mod predicates;


use crate::changeset::ValidationError;
use std::fmt;
use std::sync::Arc;

type ValidateFn<T> = dyn Fn(&T) -> Option<ValidationError> + Send + Sync;

/// A reusable, cheaply clonable validator for values of type `T`.
pub struct Validator<T: ?Sized> {
    inner: Arc<ValidateFn<T>>,
}

impl<T: ?Sized> Validator<T> {
    /// Wrap a raw validation function.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&T) -> Option<ValidationError> + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Run the validator. `None` means the value is valid.
    pub fn validate(&self, value: &T) -> Option<ValidationError> {
        (self.inner)(value)
    }

    /// Chain `next` after `self`; the first failure wins.
    pub fn and(self, next: Validator<T>) -> Self
    where
        T: 'static,
    {
        combine_validators([self, next])
    }
}

impl<T: ?Sized> Clone for Validator<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Validator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator").finish_non_exhaustive()
    }
}

/// Build a validator that passes when `predicate` holds and otherwise reports
/// `message` against `field`.
pub fn create_validator<T, P>(
    predicate: P,
    field: impl Into<String>,
    message: impl Into<String>,
) -> Validator<T>
where
    T: ?Sized + 'static,
    P: Fn(&T) -> bool + Send + Sync + 'static,
{
    let err = ValidationError::new(field, message);
    Validator::from_fn(move |value: &T| (!predicate(value)).then(|| err.clone()))
}

/// Run validators in declaration order and stop at the first error.
///
/// Order matters: put presence checks before format checks so an empty value
/// reports "required" rather than "invalid format".
pub fn combine_validators<T>(validators: impl IntoIterator<Item = Validator<T>>) -> Validator<T>
where
    T: ?Sized + 'static,
{
    let chain: Vec<Validator<T>> = validators.into_iter().collect();
    Validator::from_fn(move |value: &T| chain.iter().find_map(|v| v.validate(value)))
}
