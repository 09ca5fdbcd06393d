//! The random image feed shown on the home view.

use crate::api::{DogApi, DogImage};
use crate::busy::BusyGuard;
use crate::error::{ApiError, ClientResult};
use crate::like::{LikeToggle, ToggleOutcome};
use crate::session::Session;

#[derive(Debug, Clone, Default)]
pub struct Feed {
    is_fetching: bool,
    error: Option<ApiError>,
    current: Option<DogImage>,
    like: Option<LikeToggle>,
}

impl Feed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_fetching(&self) -> bool {
        self.is_fetching
    }

    /// The error from the most recent fetch, cleared by the next success.
    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }

    pub fn current(&self) -> Option<&DogImage> {
        self.current.as_ref()
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current.as_ref().map(|img| img.image_url.as_str())
    }

    /// The like status to display for the current image.
    pub fn is_liked(&self) -> bool {
        match (&self.like, &self.current) {
            (Some(toggle), Some(img)) if toggle.image_url() == img.image_url => toggle.is_liked(),
            (_, Some(img)) => img.liked,
            (_, None) => false,
        }
    }

    pub fn is_like_pending(&self) -> bool {
        self.like.as_ref().is_some_and(LikeToggle::is_loading)
    }

    /// Replace the current image with a new random one.
    ///
    /// On failure the previous image stays up and the error is recorded.
    pub async fn fetch_next<A: DogApi>(
        &mut self,
        api: &A,
        session: &Session,
    ) -> ClientResult<&DogImage> {
        let result = {
            let _busy = BusyGuard::engage(&mut self.is_fetching);
            api.random_dog(session.user_id()).await
        };

        let image = match result {
            Ok(image) => image,
            Err(err) => {
                tracing::warn!(
                    target: "pawlike.api",
                    code = %err.code,
                    "fetching next image failed"
                );
                self.error = Some(err.clone());
                return Err(err.into());
            }
        };

        self.error = None;
        if let Some(toggle) = self.like.as_mut() {
            toggle.observe(&image.image_url, image.liked);
        }
        Ok(&*self.current.insert(image))
    }

    /// Like the current image, or unlike it if it is already liked.
    ///
    /// Without a signed-in user or a current image nothing is sent.
    pub async fn toggle_like<A: DogApi>(
        &mut self,
        api: &A,
        session: &Session,
    ) -> ClientResult<ToggleOutcome> {
        let (Some(user_id), Some(image)) = (session.user_id(), self.current.as_ref()) else {
            return Ok(ToggleOutcome::Ignored);
        };

        if self.like.as_ref().is_none_or(|t| t.user_id() != user_id) {
            self.like = Some(LikeToggle::new(user_id, &image.image_url, image.liked));
        }
        let Some(toggle) = self.like.as_mut() else {
            return Ok(ToggleOutcome::Ignored);
        };
        toggle.observe(&image.image_url, image.liked);
        toggle.toggle(api, session).await
    }
}
