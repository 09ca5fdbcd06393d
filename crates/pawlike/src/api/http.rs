use super::DogApi;
use super::types::{
    Credentials, DogImage, ErrorBody, ImageBody, LikedImagesBody, LoginResponse, RegisterBody,
    RegisteredUser, VerifiedUser,
};
use crate::config::ClientConfig;
use crate::error::{ApiError, ClientError, ClientResult, ErrorCode};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

/// [`DogApi`] over HTTP.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::new(ErrorCode::DatabaseError))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, ApiError> {
        Ok(self.http.request(method, self.endpoint(segments)?))
    }

    /// Send `request` and fail with the server's error code on a non-2xx status.
    async fn execute(
        &self,
        op: &'static str,
        request: RequestBuilder,
    ) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| transport_error(op, &e))?;
        let status = response.status();

        if !status.is_success() {
            let body: ErrorBody = response.json().await.unwrap_or_default();
            let err = ApiError::from_code_str(body.code.as_deref());
            tracing::warn!(
                target: "pawlike.api",
                op,
                status = status.as_u16(),
                code = %err.code,
                "request rejected"
            );
            return Err(err);
        }
        Ok(response)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        op: &'static str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.execute(op, request).await?;
        response.json::<T>().await.map_err(|e| transport_error(op, &e))
    }
}

fn transport_error(op: &'static str, err: &reqwest::Error) -> ApiError {
    let code = if err.is_timeout() {
        ErrorCode::ExternalApiError
    } else {
        ErrorCode::DatabaseError
    };
    tracing::error!(target: "pawlike.api", op, error = %err, code = %code, "request failed");
    ApiError::new(code)
}

impl DogApi for HttpClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let req = self
            .request(Method::POST, &["auth", "login"])?
            .json(credentials);
        self.send("login", req).await
    }

    async fn register(&self, credentials: &Credentials) -> Result<RegisteredUser, ApiError> {
        let req = self
            .request(Method::POST, &["auth", "register"])?
            .json(credentials);
        let body: RegisterBody = self.send("register", req).await?;
        Ok(body.user)
    }

    async fn verify_auth(&self, token: &str) -> Result<VerifiedUser, ApiError> {
        let req = self
            .request(Method::GET, &["auth", "verify"])?
            .bearer_auth(token);
        self.send("verify_auth", req).await
    }

    async fn random_dog(&self, user_id: Option<&str>) -> Result<DogImage, ApiError> {
        let mut req = self.request(Method::GET, &["dog", "random"])?;
        if let Some(user_id) = user_id {
            req = req.query(&[("user_id", user_id)]);
        }
        self.send("random_dog", req).await
    }

    async fn like_image(
        &self,
        token: &str,
        user_id: &str,
        image_url: &str,
    ) -> Result<(), ApiError> {
        let req = self
            .request(Method::POST, &["liked_images", user_id])?
            .bearer_auth(token)
            .json(&ImageBody { image_url });
        self.execute("like_image", req).await?;
        Ok(())
    }

    async fn unlike_image(
        &self,
        token: &str,
        user_id: &str,
        image_url: &str,
    ) -> Result<(), ApiError> {
        let req = self
            .request(Method::DELETE, &["liked_images", user_id])?
            .bearer_auth(token)
            .json(&ImageBody { image_url });
        self.execute("unlike_image", req).await?;
        Ok(())
    }

    async fn liked_images(&self, token: &str, user_id: &str) -> Result<Vec<String>, ApiError> {
        let req = self
            .request(Method::GET, &["liked_images", user_id])?
            .bearer_auth(token);
        let body: LikedImagesBody = self.send("liked_images", req).await?;
        Ok(body.images)
    }
}
