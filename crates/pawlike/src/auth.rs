//! Login and registration forms.

use crate::api::{Credentials, DogApi, LoginResponse};
use crate::error::{ApiError, ClientResult, ErrorCode};
use crate::form::{FieldValues, Form, Submission};
use crate::session::Session;
use crate::validate::{Validator, combine_validators, create_validator, predicates};
use crate::view::{Navigator, View};

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 32;

/// Values of both the login and the register form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthValues {
    pub email: String,
    pub password: String,
}

impl FieldValues for AuthValues {
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

impl From<AuthValues> for Credentials {
    fn from(values: AuthValues) -> Self {
        Credentials::new(values.email, values.password)
    }
}

pub fn email_validator() -> Validator<str> {
    combine_validators([
        create_validator(predicates::required, "email", "Email is required"),
        create_validator(
            predicates::is_email,
            "email",
            "Please enter a valid email address",
        ),
    ])
}

pub fn login_password_validator() -> Validator<str> {
    create_validator(predicates::required, "password", "Password is required")
}

/// The full password policy, checked in the order the messages should appear.
pub fn register_password_validator() -> Validator<str> {
    combine_validators([
        create_validator(predicates::required, "password", "Password is required"),
        create_validator(
            predicates::min_length(PASSWORD_MIN_LEN),
            "password",
            "Password must be at least 8 characters long",
        ),
        create_validator(
            predicates::max_length(PASSWORD_MAX_LEN),
            "password",
            "Password must be at most 32 characters long",
        ),
        create_validator(
            predicates::has_digit,
            "password",
            "Password must contain a digit",
        ),
        create_validator(
            predicates::has_lower_case,
            "password",
            "Password must contain a lowercase letter",
        ),
        create_validator(
            predicates::has_upper_case,
            "password",
            "Password must contain an uppercase letter",
        ),
        create_validator(
            predicates::has_special_char,
            "password",
            "Password must contain a special character",
        ),
    ])
}

pub fn login_form() -> Form<AuthValues> {
    Form::new(AuthValues::default())
        .with_validator("email", email_validator())
        .with_validator("password", login_password_validator())
}

pub fn register_form() -> Form<AuthValues> {
    Form::new(AuthValues::default())
        .with_validator("email", email_validator())
        .with_validator("password", register_password_validator())
}

/// Submit the login form.
///
/// On success the user is signed in, the form is reset and the app goes home.
/// An API error (bad credentials, server down) is returned for display and
/// leaves the form as typed.
pub async fn submit_login<A: DogApi>(
    form: &mut Form<AuthValues>,
    api: &A,
    session: &mut Session,
    nav: &mut Navigator,
) -> ClientResult<Submission> {
    let mut signed_in: Option<(String, String)> = None;
    let slot = &mut signed_in;

    let outcome = form
        .handle_submit(|values| async move {
            *slot = Some(into_bearer(api.login(&values.into()).await?)?);
            Ok::<_, ApiError>(())
        })
        .await?;

    if let Some((user_id, token)) = signed_in {
        session.sign_in(user_id, token);
        form.reset();
        nav.change_view(View::Home);
    }
    Ok(outcome)
}

/// Submit the register form: create the account, then sign straight in.
///
/// The form is reset as soon as the account exists, even if the follow-up
/// login fails.
pub async fn submit_register<A: DogApi>(
    form: &mut Form<AuthValues>,
    api: &A,
    session: &mut Session,
    nav: &mut Navigator,
) -> ClientResult<Submission> {
    let mut registered = false;
    let mut signed_in: Option<(String, String)> = None;
    let (registered_slot, login_slot) = (&mut registered, &mut signed_in);

    let result = form
        .handle_submit(|values| async move {
            let credentials = Credentials::from(values);
            api.register(&credentials).await?;
            *registered_slot = true;
            *login_slot = Some(into_bearer(api.login(&credentials).await?)?);
            Ok::<_, ApiError>(())
        })
        .await;

    if registered {
        form.reset();
    }
    let outcome = result?;

    if let Some((user_id, token)) = signed_in {
        session.sign_in(user_id, token);
        nav.change_view(View::Home);
    }
    Ok(outcome)
}

/// Split a login response into `(user_id, token)`.
///
/// Protected endpoints need the token, so a response without one cannot
/// sign anybody in.
fn into_bearer(login: LoginResponse) -> Result<(String, String), ApiError> {
    match login.token {
        Some(token) => Ok((login.user_id, token)),
        None => Err(ApiError::new(ErrorCode::InvalidToken)),
    }
}

/// Sign out and return to the home view.
pub fn logout(session: &mut Session, nav: &mut Navigator) {
    session.sign_out();
    nav.change_view(View::Home);
}
