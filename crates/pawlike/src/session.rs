//! The signed-in session.
//!
//! There is exactly one `Session` per running app. It starts empty, is filled
//! by a successful login or token verification and emptied by logout. It is
//! owned by the app and passed explicitly to whatever needs it.

use crate::api::DogApi;
use crate::error::{ClientError, ClientResult};
use std::fmt;

#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    user_id: Option<String>,
    token: Option<String>,
}

impl Session {
    /// An empty (signed-out) session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// A signed-in session always carries a token, so this also means
    /// [`Session::bearer`] succeeds.
    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    /// Record a signed-in user and their bearer token, replacing any previous
    /// ones.
    pub fn sign_in(&mut self, user_id: impl Into<String>, token: impl Into<String>) {
        let user_id = user_id.into();
        tracing::debug!(target: "pawlike.session", %user_id, "signed in");
        self.user_id = Some(user_id);
        self.token = Some(token.into());
    }

    pub fn sign_out(&mut self) {
        if self.user_id.take().is_some() {
            tracing::debug!(target: "pawlike.session", "signed out");
        }
        self.token = None;
    }

    /// The `(user_id, token)` pair protected endpoints need.
    pub fn bearer(&self) -> ClientResult<(&str, &str)> {
        match (self.user_id.as_deref(), self.token.as_deref()) {
            (Some(user_id), Some(token)) => Ok((user_id, token)),
            _ => Err(ClientError::NotAuthenticated),
        }
    }

    /// Verify a previously issued token and adopt the user it belongs to.
    ///
    /// On failure the session is left untouched.
    pub async fn restore<A: DogApi>(&mut self, api: &A, token: String) -> ClientResult<&str> {
        let verified = api.verify_auth(&token).await?;
        self.sign_in(verified.user_id, token);
        self.user_id().ok_or(ClientError::NotAuthenticated)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
