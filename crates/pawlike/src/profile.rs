//! The liked-images profile view.

use crate::api::DogApi;
use crate::busy::BusyGuard;
use crate::error::{ClientError, ClientResult};
use crate::session::Session;
use crate::view::{Navigator, View};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    is_loading: bool,
    images: Vec<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self::new()
    }
}

impl Profile {
    /// A profile that has not loaded yet (`is_loading` starts out true).
    pub fn new() -> Self {
        Self {
            is_loading: true,
            images: Vec::new(),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// Loaded and nothing liked yet.
    pub fn is_empty(&self) -> bool {
        !self.is_loading && self.images.is_empty()
    }

    /// Fetch the signed-in user's liked images.
    ///
    /// Without a signed-in user this navigates home and fails with
    /// [`ClientError::NotAuthenticated`]. On an API error the previous list
    /// is kept.
    pub async fn load<A: DogApi>(
        &mut self,
        api: &A,
        session: &Session,
        nav: &mut Navigator,
    ) -> ClientResult<&[String]> {
        let Ok((user_id, token)) = session.bearer() else {
            nav.change_view(View::Home);
            return Err(ClientError::NotAuthenticated);
        };

        let result = {
            let _busy = BusyGuard::engage(&mut self.is_loading);
            api.liked_images(token, user_id).await
        };

        match result {
            Ok(images) => {
                self.images = images;
                Ok(self.images.as_slice())
            }
            Err(err) => {
                tracing::error!(
                    target: "pawlike.api",
                    code = %err.code,
                    "fetching liked images failed"
                );
                Err(err.into())
            }
        }
    }
}
