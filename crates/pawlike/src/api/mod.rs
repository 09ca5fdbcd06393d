//! Access to the remote pawlike API.
//!
//! [`DogApi`] is the seam between the client-side state machines and the
//! network. [`HttpClient`] talks to the real server; [`MemoryApi`] is a
//! self-contained backend for offline use and tests.

mod http;
mod memory;
mod types;

pub use http::HttpClient;
pub use memory::{MemoryApi, Operation};
pub use types::{Credentials, DogImage, LoginResponse, RegisteredUser, VerifiedUser};

use crate::error::ApiError;
use std::future::Future;

/// The operations the app performs against the server.
///
/// Every call resolves to `Ok(data)` or an [`ApiError`]; transport problems
/// are folded into an `ApiError` too, so callers only handle one error shape.
pub trait DogApi: Send + Sync {
    /// Exchange credentials for a user id and token.
    fn login(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<LoginResponse, ApiError>> + Send;

    /// Create an account.
    fn register(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<RegisteredUser, ApiError>> + Send;

    /// Check that `token` is still valid and return its user.
    fn verify_auth(&self, token: &str)
    -> impl Future<Output = Result<VerifiedUser, ApiError>> + Send;

    /// Fetch a random image. With a user id, `liked` reflects that user's likes.
    fn random_dog(
        &self,
        user_id: Option<&str>,
    ) -> impl Future<Output = Result<DogImage, ApiError>> + Send;

    fn like_image(
        &self,
        token: &str,
        user_id: &str,
        image_url: &str,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn unlike_image(
        &self,
        token: &str,
        user_id: &str,
        image_url: &str,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// URLs the user has liked, oldest first.
    fn liked_images(
        &self,
        token: &str,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<String>, ApiError>> + Send;
}
