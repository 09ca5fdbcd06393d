use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Email and password, as sent to `/auth/login` and `/auth/register`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(rename = "userID")]
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisteredUser {
    pub id: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifiedUser {
    #[serde(rename = "userID")]
    pub user_id: String,
}

/// A random image and whether the requesting user has liked it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DogImage {
    pub image_url: String,
    #[serde(default)]
    pub liked: bool,
}

// ── wire-only shapes ──

#[derive(Debug, Deserialize)]
pub(super) struct RegisterBody {
    pub user: RegisteredUser,
}

#[derive(Debug, Deserialize)]
pub(super) struct LikedImagesBody {
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct ImageBody<'a> {
    #[serde(rename = "imageURL")]
    pub image_url: &'a str,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    pub code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_login_and_verify() {
        let login: LoginResponse = serde_json::from_str(
            r#"{"message":"User logged in successfully","token":"t","userID":"u-1"}"#,
        )
        .unwrap();
        assert_eq!(login.token.as_deref(), Some("t"));
        assert_eq!(login.user_id, "u-1");

        let login: LoginResponse = serde_json::from_str(r#"{"userID":"u-1"}"#).unwrap();
        assert_eq!(login.token, None);

        let verified: VerifiedUser =
            serde_json::from_str(r#"{"message":"User authenticated","userID":"u-2"}"#).unwrap();
        assert_eq!(verified.user_id, "u-2");
    }

    #[test]
    fn decode_register_body() {
        let body: RegisterBody = serde_json::from_str(
            r#"{"message":"User created successfully","user":{"id":"u-1","email":"a@b.co",
                "created_at":"2024-05-01T10:00:00Z","updated_at":"2024-05-01T10:00:00Z"}}"#,
        )
        .unwrap();
        assert_eq!(body.user.id, "u-1");
        assert_eq!(body.user.email, "a@b.co");
    }

    #[test]
    fn dog_image_liked_defaults_to_false() {
        let img: DogImage =
            serde_json::from_str(r#"{"image_url":"https://images.dog.ceo/a.jpg"}"#).unwrap();
        assert!(!img.liked);
    }

    #[test]
    fn image_body_uses_server_field_name() {
        let json = serde_json::to_value(ImageBody { image_url: "https://x/a.jpg" }).unwrap();
        assert_eq!(json, serde_json::json!({ "imageURL": "https://x/a.jpg" }));
    }

    #[test]
    fn credentials_debug_hides_password() {
        let out = format!("{:?}", Credentials::new("a@b.co", "Sup3r$ecret"));
        assert!(out.contains("a@b.co"));
        assert!(!out.contains("Sup3r$ecret"));
    }
}
