//! Predicates used to build validators.
//!
//! All predicates are total and side-effect free. Lengths are counted in
//! characters, not bytes.

use std::sync::OnceLock;

const SPECIAL_CHARS: &[char] = &['#', '?', '!', '@', '$', '%', '^', '&', '*', '-'];
const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp"];

/// Non-empty after trimming whitespace.
pub fn required(value: &str) -> bool {
    !value.trim().is_empty()
}

/// At least `min` characters (inclusive).
pub fn min_length(min: usize) -> impl Fn(&str) -> bool + Clone + Send + Sync + 'static {
    move |value: &str| value.chars().count() >= min
}

/// At most `max` characters (inclusive).
pub fn max_length(max: usize) -> impl Fn(&str) -> bool + Clone + Send + Sync + 'static {
    move |value: &str| value.chars().count() <= max
}

pub fn has_upper_case(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_uppercase())
}

pub fn has_lower_case(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_lowercase())
}

pub fn has_digit(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_digit())
}

/// Contains one of `#?!@$%^&*-`.
pub fn has_special_char(value: &str) -> bool {
    value.contains(SPECIAL_CHARS)
}

/// Best-effort email validation.
///
/// This is intentionally not RFC-compliant: `local@domain.ext` with no
/// whitespace or extra `@` in any part.
pub fn is_email(value: &str) -> bool {
    static EMAIL_RE: OnceLock<regex::Regex> = OnceLock::new();
    EMAIL_RE
        .get_or_init(|| {
            regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid built-in email regex")
        })
        .is_match(value)
}

/// Absolute `http`/`https` URL with a host.
pub fn is_http_url(value: &str) -> bool {
    url::Url::parse(value)
        .is_ok_and(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
}

/// Ends with a supported image extension (case-insensitive).
pub fn has_image_extension(value: &str) -> bool {
    let lower = value.to_ascii_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Contains no space characters.
pub fn has_no_spaces(value: &str) -> bool {
    !value.contains(' ')
}
