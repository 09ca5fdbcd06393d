//! Optimistic like/unlike.
//!
//! [`LikeState`] is the pure state machine: a committed value, or a pending
//! optimistic guess on top of one. [`LikeToggle`] drives it against a
//! [`DogApi`] for one `(user, image)` pair.
//!
//! ```text
//!   Committed(x) --begin(t)--> Pending { optimistic: t, committed: x }
//!   Pending      --ok-------->  Committed(t)
//!   Pending      --err------->  Committed(x)        (rollback)
//!   any          --reset(y)-->  Committed(y)        (new image / new flag)
//! ```
//!
//! Only one transition may be in flight: `begin` while pending is refused.
//! Every reset bumps a generation counter so a response that arrives for an
//! image that is no longer shown is discarded instead of applied.


use crate::api::DogApi;
use crate::error::{ApiError, ClientError, ClientResult, ErrorCode};
use crate::session::Session;
use crate::validate::predicates;

/// Where the like status currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeStatus {
    /// The server-confirmed (or freshly supplied) value.
    Committed(bool),
    /// A guess is showing while the request for it is outstanding.
    Pending { optimistic: bool, committed: bool },
}

/// A transition that has been started but not yet settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "a pending transition must be settled"]
pub struct PendingToggle {
    target: bool,
    generation: u64,
}

impl PendingToggle {
    pub fn target(&self) -> bool {
        self.target
    }
}

/// What settling a transition did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settled {
    Committed(bool),
    RolledBack(bool),
    /// The state was reset after the transition began; nothing changed.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeState {
    status: LikeStatus,
    generation: u64,
}

impl LikeState {
    pub fn new(initial_liked: bool) -> Self {
        Self {
            status: LikeStatus::Committed(initial_liked),
            generation: 0,
        }
    }

    pub fn status(&self) -> LikeStatus {
        self.status
    }

    /// The value to show: the optimistic guess while pending.
    pub fn is_liked(&self) -> bool {
        match self.status {
            LikeStatus::Committed(liked) => liked,
            LikeStatus::Pending { optimistic, .. } => optimistic,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, LikeStatus::Pending { .. })
    }

    /// Show `target` optimistically. Returns `None` if a transition is
    /// already in flight.
    pub fn begin(&mut self, target: bool) -> Option<PendingToggle> {
        let LikeStatus::Committed(committed) = self.status else {
            return None;
        };
        self.status = LikeStatus::Pending {
            optimistic: target,
            committed,
        };
        Some(PendingToggle {
            target,
            generation: self.generation,
        })
    }

    /// Commit or roll back `pending` depending on whether its request succeeded.
    pub fn settle(&mut self, pending: PendingToggle, succeeded: bool) -> Settled {
        if pending.generation != self.generation {
            return Settled::Stale;
        }
        let LikeStatus::Pending { committed, .. } = self.status else {
            return Settled::Stale;
        };

        if succeeded {
            self.status = LikeStatus::Committed(pending.target);
            Settled::Committed(pending.target)
        } else {
            self.status = LikeStatus::Committed(committed);
            Settled::RolledBack(committed)
        }
    }

    /// Replace the state wholesale, abandoning any pending transition.
    pub fn reset(&mut self, liked: bool) {
        self.generation = self.generation.wrapping_add(1);
        self.status = LikeStatus::Committed(liked);
    }
}

/// Result of a like/unlike call that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The server accepted the change; the value is now committed.
    Committed(bool),
    /// Nothing was sent: another transition was in flight, or there was no
    /// signed-in user or image to act on.
    Ignored,
}

/// Like status of one image for one user, kept in sync with the server.
#[derive(Debug, Clone)]
pub struct LikeToggle {
    user_id: String,
    image_url: String,
    supplied_liked: bool,
    state: LikeState,
}

impl LikeToggle {
    pub fn new(
        user_id: impl Into<String>,
        image_url: impl Into<String>,
        initial_liked: bool,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            image_url: image_url.into(),
            supplied_liked: initial_liked,
            state: LikeState::new(initial_liked),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn state(&self) -> &LikeState {
        &self.state
    }

    pub fn is_liked(&self) -> bool {
        self.state.is_liked()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// Point the toggle at the image currently shown.
    ///
    /// A different image or a different authoritative flag resets the state;
    /// seeing the same pair again is a no-op.
    pub fn observe(&mut self, image_url: &str, initial_liked: bool) {
        if self.image_url == image_url && self.supplied_liked == initial_liked {
            return;
        }
        self.image_url = image_url.to_string();
        self.supplied_liked = initial_liked;
        self.state.reset(initial_liked);
    }

    pub async fn like<A: DogApi>(
        &mut self,
        api: &A,
        session: &Session,
    ) -> ClientResult<ToggleOutcome> {
        self.toggle_to(api, session, true).await
    }

    pub async fn unlike<A: DogApi>(
        &mut self,
        api: &A,
        session: &Session,
    ) -> ClientResult<ToggleOutcome> {
        self.toggle_to(api, session, false).await
    }

    /// Like if not liked, unlike otherwise.
    pub async fn toggle<A: DogApi>(
        &mut self,
        api: &A,
        session: &Session,
    ) -> ClientResult<ToggleOutcome> {
        let target = !self.is_liked();
        self.toggle_to(api, session, target).await
    }

    async fn toggle_to<A: DogApi>(
        &mut self,
        api: &A,
        session: &Session,
        target: bool,
    ) -> ClientResult<ToggleOutcome> {
        let (user_id, token) = session.bearer()?;
        if user_id != self.user_id {
            return Err(ClientError::NotAuthenticated);
        }
        check_image_url(&self.image_url).map_err(ClientError::InvalidImageUrl)?;

        let Some(pending) = self.state.begin(target) else {
            tracing::debug!(
                target: "pawlike.like",
                image_url = %self.image_url,
                "toggle ignored while pending"
            );
            return Ok(ToggleOutcome::Ignored);
        };

        let guard = PendingGuard::new(&mut self.state, pending);
        let result = if target {
            api.like_image(token, user_id, &self.image_url).await
        } else {
            api.unlike_image(token, user_id, &self.image_url).await
        };

        match (guard.settle(result.is_ok()), result) {
            (Settled::Committed(liked), Ok(())) => Ok(ToggleOutcome::Committed(liked)),
            (Settled::RolledBack(liked), Err(err)) => {
                tracing::warn!(
                    target: "pawlike.like",
                    image_url = %self.image_url,
                    code = %err.code,
                    rolled_back_to = liked,
                    "like change failed"
                );
                Err(err.into())
            }
            (_, result) => result.map(|()| ToggleOutcome::Ignored).map_err(Into::into),
        }
    }
}

/// Settles a pending transition as failed if it is dropped unsettled, so a
/// cancelled request rolls back instead of leaving the state pending.
struct PendingGuard<'a> {
    state: &'a mut LikeState,
    pending: Option<PendingToggle>,
}

impl<'a> PendingGuard<'a> {
    fn new(state: &'a mut LikeState, pending: PendingToggle) -> Self {
        Self {
            state,
            pending: Some(pending),
        }
    }

    fn settle(mut self, succeeded: bool) -> Settled {
        match self.pending.take() {
            Some(pending) => self.state.settle(pending, succeeded),
            None => Settled::Stale,
        }
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            let settled = self.state.settle(pending, false);
            tracing::debug!(
                target: "pawlike.like",
                ?settled,
                "like change cancelled before the server answered"
            );
        }
    }
}

/// Check an image URL the way the server does before accepting it.
pub fn check_image_url(url: &str) -> Result<(), ApiError> {
    let code = if !predicates::required(url) {
        ErrorCode::EmptyImageUrl
    } else if !predicates::has_no_spaces(url) || !predicates::is_http_url(url) {
        ErrorCode::MalformedUrl
    } else if !predicates::has_image_extension(url) {
        ErrorCode::InvalidImageExtension
    } else {
        return Ok(());
    };
    Err(ApiError::new(code))
}
