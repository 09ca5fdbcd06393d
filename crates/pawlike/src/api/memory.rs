use super::DogApi;
use super::types::{Credentials, DogImage, LoginResponse, RegisteredUser, VerifiedUser};
use crate::auth;
use crate::error::{ApiError, ErrorCode};
use crate::like::check_image_url;
use crate::validate::predicates;
use chrono::Utc;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};

const DEFAULT_IMAGES: &[&str] = &[
    "https://images.dog.ceo/breeds/hound-afghan/n02088094_1003.jpg",
    "https://images.dog.ceo/breeds/retriever-golden/n02099601_3004.jpg",
    "https://images.dog.ceo/breeds/shiba/shiba-11.jpg",
    "https://images.dog.ceo/breeds/corgi-cardigan/n02113186_1030.jpg",
    "https://images.dog.ceo/breeds/poodle-toy/n02113624_2045.jpg",
];

/// Identifies a [`DogApi`] operation, for failure injection and call logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Login,
    Register,
    VerifyAuth,
    RandomDog,
    LikeImage,
    UnlikeImage,
    LikedImages,
}

#[derive(Debug)]
struct User {
    id: String,
    email: String,
    password: String,
}

#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    tokens: HashMap<String, String>,
    liked: HashMap<String, Vec<String>>,
    images: Vec<String>,
    cursor: usize,
    next_id: u64,
    failures: HashMap<Operation, VecDeque<ErrorCode>>,
    calls: Vec<Operation>,
}

impl State {
    fn issue_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    /// Log the call and pop an injected failure, if one is queued.
    fn enter(&mut self, op: Operation) -> Result<(), ApiError> {
        self.calls.push(op);
        match self.failures.get_mut(&op).and_then(VecDeque::pop_front) {
            Some(code) => Err(ApiError::new(code)),
            None => Ok(()),
        }
    }

    fn authorize(&self, token: &str, user_id: &str) -> Result<(), ApiError> {
        match self.tokens.get(token) {
            Some(owner) if owner == user_id => Ok(()),
            _ => Err(ApiError::new(ErrorCode::InvalidToken)),
        }
    }
}

/// An in-process [`DogApi`] backend with the server's rules.
///
/// Images are served round-robin from a fixed list. Failures can be queued
/// per operation with [`MemoryApi::fail_next`].
#[derive(Debug)]
pub struct MemoryApi {
    state: Mutex<State>,
}

impl Default for MemoryApi {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGES.iter().copied())
    }
}

impl MemoryApi {
    pub fn new<I, S>(images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let state = State {
            images: images.into_iter().map(Into::into).collect(),
            ..State::default()
        };
        Self {
            state: Mutex::new(state),
        }
    }

    /// Seed an account directly, bypassing the password rules.
    pub fn with_user(self, email: &str, password: &str) -> Self {
        {
            let mut state = self.lock();
            let id = state.issue_id("user");
            state.users.push(User {
                id,
                email: email.to_string(),
                password: password.to_string(),
            });
        }
        self
    }

    /// Make the next call to `op` fail with `code`. Calls queue up in order.
    pub fn fail_next(&self, op: Operation, code: ErrorCode) {
        self.lock().failures.entry(op).or_default().push_back(code);
    }

    /// Every operation invoked so far, in order.
    pub fn calls(&self) -> Vec<Operation> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self, op: Operation) -> usize {
        self.lock().calls.iter().filter(|c| **c == op).count()
    }

    /// The id of the account registered under `email`.
    pub fn user_id(&self, email: &str) -> Option<String> {
        self.lock()
            .users
            .iter()
            .find(|u| u.email == email)
            .map(|u| u.id.clone())
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DogApi for MemoryApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let mut state = self.lock();
        state.enter(Operation::Login)?;

        let user = state
            .users
            .iter()
            .find(|u| u.email == credentials.email)
            .ok_or_else(|| ApiError::new(ErrorCode::UserNotFound))?;
        if user.password != credentials.password {
            return Err(ApiError::new(ErrorCode::InvalidCredentials));
        }
        let user_id = user.id.clone();

        let token = state.issue_id("token");
        state.tokens.insert(token.clone(), user_id.clone());
        Ok(LoginResponse {
            token: Some(token),
            user_id,
        })
    }

    async fn register(&self, credentials: &Credentials) -> Result<RegisteredUser, ApiError> {
        let mut state = self.lock();
        state.enter(Operation::Register)?;

        if !predicates::is_email(&credentials.email) {
            return Err(ApiError::new(ErrorCode::InvalidEmail));
        }
        if auth::register_password_validator()
            .validate(&credentials.password)
            .is_some()
        {
            return Err(ApiError::new(ErrorCode::InvalidCredentials));
        }
        if state.users.iter().any(|u| u.email == credentials.email) {
            return Err(ApiError::new(ErrorCode::EmailAlreadyExists));
        }

        let id = state.issue_id("user");
        state.users.push(User {
            id: id.clone(),
            email: credentials.email.clone(),
            password: credentials.password.clone(),
        });
        let now = Utc::now();
        Ok(RegisteredUser {
            id,
            email: credentials.email.clone(),
            created_at: now,
            updated_at: now,
        })
    }

    async fn verify_auth(&self, token: &str) -> Result<VerifiedUser, ApiError> {
        let mut state = self.lock();
        state.enter(Operation::VerifyAuth)?;
        state
            .tokens
            .get(token)
            .map(|user_id| VerifiedUser {
                user_id: user_id.clone(),
            })
            .ok_or_else(|| ApiError::new(ErrorCode::InvalidToken))
    }

    async fn random_dog(&self, user_id: Option<&str>) -> Result<DogImage, ApiError> {
        let mut state = self.lock();
        state.enter(Operation::RandomDog)?;

        if state.images.is_empty() {
            return Err(ApiError::new(ErrorCode::ExternalApiError));
        }
        let image_url = state.images[state.cursor % state.images.len()].clone();
        state.cursor += 1;

        let liked = user_id
            .and_then(|id| state.liked.get(id))
            .is_some_and(|urls| urls.contains(&image_url));
        Ok(DogImage { image_url, liked })
    }

    async fn like_image(
        &self,
        token: &str,
        user_id: &str,
        image_url: &str,
    ) -> Result<(), ApiError> {
        let mut state = self.lock();
        state.enter(Operation::LikeImage)?;
        state.authorize(token, user_id)?;
        check_image_url(image_url)?;

        let liked = state.liked.entry(user_id.to_string()).or_default();
        if liked.iter().any(|u| u == image_url) {
            return Err(ApiError::new(ErrorCode::ImageAlreadyLiked));
        }
        liked.push(image_url.to_string());
        Ok(())
    }

    async fn unlike_image(
        &self,
        token: &str,
        user_id: &str,
        image_url: &str,
    ) -> Result<(), ApiError> {
        let mut state = self.lock();
        state.enter(Operation::UnlikeImage)?;
        state.authorize(token, user_id)?;
        check_image_url(image_url)?;

        let liked = state.liked.entry(user_id.to_string()).or_default();
        let Some(pos) = liked.iter().position(|u| u == image_url) else {
            return Err(ApiError::new(ErrorCode::ImageNotLiked));
        };
        liked.remove(pos);
        Ok(())
    }

    async fn liked_images(&self, token: &str, user_id: &str) -> Result<Vec<String>, ApiError> {
        let mut state = self.lock();
        state.enter(Operation::LikedImages)?;
        state.authorize(token, user_id)?;
        Ok(state.liked.get(user_id).cloned().unwrap_or_default())
    }
}
