//! # pawlike
//!
//! Client-side core of the pawlike dog feed: browse random dog photos, like
//! the ones you enjoy and revisit them on your profile.
//!
//! ## Pieces
//!
//! - **Validation** ([`validate`]): predicates composed into field validators;
//!   the first failing validator in declaration order wins.
//! - **Forms** ([`form`]): values, errors and touched flags for one form, with
//!   validation on change and on submit.
//! - **Optimistic likes** ([`like`]): show the new like status immediately,
//!   commit it when the server agrees, roll back when it does not.
//! - **Session and views** ([`session`], [`view`]): who is signed in and which
//!   screen is showing, passed explicitly to whatever needs them.
//! - **API** ([`api`]): the [`DogApi`] trait, an HTTP implementation and an
//!   in-memory one.
//!
//! ## Example
//!
//! ```ignore
//! use pawlike::{auth, ClientConfig, Feed, HttpClient, Navigator, Session};
//!
//! let api = HttpClient::new(&ClientConfig::from_env()?)?;
//! let mut session = Session::new();
//! let mut nav = Navigator::default();
//!
//! let mut form = auth::login_form();
//! form.set_field_value("email", "bob@example.com")?;
//! form.set_field_value("password", "Passw0rd!")?;
//! auth::submit_login(&mut form, &api, &mut session, &mut nav).await?;
//!
//! let mut feed = Feed::new();
//! feed.fetch_next(&api, &session).await?;
//! feed.toggle_like(&api, &session).await?;
//! ```

pub mod api;
pub mod auth;
pub mod changeset;
pub mod config;
pub mod error;
pub mod feed;
pub mod form;
pub mod like;
pub mod profile;
pub mod session;
pub mod validate;
pub mod view;

mod busy;

pub use api::{Credentials, DogApi, DogImage, HttpClient, MemoryApi, Operation};
pub use changeset::{ValidationError, ValidationErrors};
pub use config::ClientConfig;
pub use error::{ApiError, ClientError, ClientResult, ErrorCode};
pub use feed::Feed;
pub use form::{FieldValues, Form, FormError, FormState, Submission};
pub use like::{LikeState, LikeStatus, LikeToggle, ToggleOutcome};
pub use profile::Profile;
pub use session::Session;
pub use validate::{Validator, combine_validators, create_validator, predicates};
pub use view::{Navigator, View};
