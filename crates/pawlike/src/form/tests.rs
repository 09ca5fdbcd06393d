use super::*;
use crate::validate::{combine_validators, create_validator, predicates};
use std::cell::Cell;
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Credentials {
    email: String,
    password: String,
}

impl FieldValues for Credentials {
    const FIELDS: &'static [&'static str] = &["email", "password"];

    fn get(&self, field: &str) -> Option<&str> {
        match field {
            "email" => Some(&self.email),
            "password" => Some(&self.password),
            _ => None,
        }
    }

    fn set(&mut self, field: &str, value: String) -> bool {
        match field {
            "email" => self.email = value,
            "password" => self.password = value,
            _ => return false,
        }
        true
    }
}

fn credentials_form() -> Form<Credentials> {
    Form::new(Credentials::default())
        .with_validator(
            "email",
            combine_validators([
                create_validator(predicates::required, "email", "Email is required"),
                create_validator(
                    predicates::is_email,
                    "email",
                    "Please enter a valid email address",
                ),
            ]),
        )
        .with_validator(
            "password",
            create_validator(predicates::required, "password", "Password is required"),
        )
}

fn filled_form() -> Form<Credentials> {
    let mut form = credentials_form();
    form.set_field_value("email", "bob@example.com").unwrap();
    form.set_field_value("password", "hunter2").unwrap();
    form
}

#[test]
fn test_initial_state() {
    let form = credentials_form();
    assert!(form.is_valid());
    assert!(!form.is_submitting());
    assert!(form.errors().is_empty());
    assert!(!form.is_touched("email"));
    assert_eq!(form.values(), &Credentials::default());
}

#[test]
fn test_set_field_value_validates_only_that_field() {
    let mut form = credentials_form();
    form.set_field_value("email", "bob@x").unwrap();

    assert_eq!(form.values().email, "bob@x");
    assert_eq!(
        form.field_error("email"),
        Some("Please enter a valid email address")
    );
    assert_eq!(form.field_error("password"), None);
    assert!(!form.is_valid());

    form.set_field_value("email", "bob@x.io").unwrap();
    assert_eq!(form.field_error("email"), None);
    assert!(form.is_valid());
    assert_eq!(form.errors().len(), 0);
}

#[test]
fn test_set_field_value_keeps_one_error_per_field() {
    let mut form = credentials_form();
    form.set_field_value("email", "").unwrap();
    form.set_field_value("email", "nope").unwrap();
    assert_eq!(form.errors().len(), 1);
    assert_eq!(
        form.field_error("email"),
        Some("Please enter a valid email address")
    );
}

#[test]
fn test_set_unknown_field() {
    let mut form = credentials_form();
    assert_eq!(
        form.set_field_value("username", "bob"),
        Err(FormError::UnknownField("username".into()))
    );
    assert!(form.errors().is_empty());
}

#[test]
fn test_unvalidated_field_never_errors() {
    let mut form = Form::new(Credentials::default());
    form.set_field_value("email", "").unwrap();
    assert!(form.is_valid());
    assert!(form.errors().is_empty());
}

#[test]
fn test_blur_marks_touched_and_reveals_error() {
    let mut form = credentials_form();
    form.set_field_value("email", "nope").unwrap();
    assert_eq!(form.visible_error("email"), None);

    form.handle_blur("email");
    assert!(form.is_touched("email"));
    assert!(!form.is_touched("password"));
    assert_eq!(
        form.visible_error("email"),
        Some("Please enter a valid email address")
    );

    form.handle_blur("nickname");
    assert!(!form.is_touched("nickname"));
}

#[tokio::test]
async fn test_submit_empty_form_reports_in_declaration_order() {
    let mut form = credentials_form();
    let called = Cell::new(false);

    let outcome = form
        .handle_submit(|_| {
            called.set(true);
            async { Ok::<(), ()>(()) }
        })
        .await
        .unwrap();

    assert_eq!(outcome, Submission::Rejected);
    assert!(!called.get());
    assert!(!form.is_valid());
    assert!(!form.is_submitting());
    assert!(form.is_touched("email"));
    assert!(form.is_touched("password"));

    let errors: Vec<_> = form
        .errors()
        .iter()
        .map(|e| (e.field.as_str(), e.message.as_str()))
        .collect();
    assert_eq!(
        errors,
        [
            ("email", "Email is required"),
            ("password", "Password is required")
        ]
    );
}

#[tokio::test]
async fn test_submit_valid_form_passes_values() {
    let mut form = filled_form();
    assert!(!form.is_submitting());

    let mut seen = None;
    let outcome = form
        .handle_submit(|values| {
            seen = Some(values);
            async { Ok::<(), ()>(()) }
        })
        .await
        .unwrap();

    assert_eq!(outcome, Submission::Completed);
    assert!(!form.is_submitting());
    assert!(form.is_valid());
    assert_eq!(
        seen,
        Some(Credentials {
            email: "bob@example.com".into(),
            password: "hunter2".into(),
        })
    );
    // Submitting does not reset by itself.
    assert_eq!(form.values().email, "bob@example.com");
}

#[tokio::test]
async fn test_submit_error_propagates_after_cleanup() {
    let mut form = filled_form();

    let result = form
        .handle_submit(|_| async { Err::<(), _>("boom") })
        .await;

    assert_eq!(result, Err("boom"));
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn test_submit_cancelled_mid_flight_clears_flag() {
    let mut form = filled_form();

    let pending = form.handle_submit(|_| std::future::pending::<Result<(), ()>>());
    let timed_out = tokio::time::timeout(Duration::from_millis(10), pending).await;

    assert!(timed_out.is_err());
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn test_reset_restores_initial_snapshot() {
    let initial = Credentials {
        email: "preset@example.com".into(),
        password: String::new(),
    };
    let mut form = Form::new(initial.clone()).with_validator(
        "password",
        create_validator(predicates::required, "password", "Password is required"),
    );

    form.set_field_value("email", "other@example.com").unwrap();
    let _ = form
        .handle_submit(|_| async { Ok::<(), ()>(()) })
        .await;
    assert!(!form.is_valid());

    form.reset();
    assert_eq!(form.values(), &initial);
    assert!(form.errors().is_empty());
    assert!(form.is_valid());
    assert!(!form.is_touched("email"));
    assert!(!form.is_submitting());
}

#[test]
fn test_with_validator_replaces_existing_registration() {
    let mut form = credentials_form().with_validator(
        "email",
        create_validator(predicates::min_length(100), "email", "too short"),
    );
    form.set_field_value("email", "bob@example.com").unwrap();
    assert_eq!(form.field_error("email"), Some("too short"));

    let errors = form.validate_values(&Credentials::default());
    let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, ["email", "password"]);
}
