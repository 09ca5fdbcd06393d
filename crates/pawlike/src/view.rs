//! Which screen is showing.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The closed set of screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum View {
    #[default]
    Home,
    Login,
    Register,
    Profile,
}

impl View {
    pub const ALL: [View; 4] = [Self::Home, Self::Login, Self::Register, Self::Profile];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Login => "login",
            Self::Register => "register",
            Self::Profile => "profile",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown view: {0}")]
pub struct UnknownView(pub String);

impl FromStr for View {
    type Err = UnknownView;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownView(s.to_string()))
    }
}

/// Holds the single current view; the only way to change it is
/// [`Navigator::change_view`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigator {
    current: View,
}

impl Navigator {
    pub fn new(initial: View) -> Self {
        Self { current: initial }
    }

    pub fn current(&self) -> View {
        self.current
    }

    /// Switch to `view` and return the view that was showing.
    pub fn change_view(&mut self, view: View) -> View {
        let previous = std::mem::replace(&mut self.current, view);
        if previous != view {
            tracing::debug!(
                target: "pawlike.session",
                from = %previous,
                to = %view,
                "view changed"
            );
        }
        previous
    }
}
