//! Card cover and board background descriptors.

use super::BoardDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Hex color used as a card cover, such as `#5ba4cf`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CoverColor(String);

impl CoverColor {
    /// Creates a validated cover color, normalized to lowercase.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidCoverColor`] unless the value is a
    /// `#rgb` or `#rrggbb` hex literal.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let normalized = raw.trim().to_ascii_lowercase();
        let digits = normalized.strip_prefix('#').unwrap_or_default();
        let is_valid = matches!(digits.len(), 3 | 6)
            && digits.chars().all(|ch| ch.is_ascii_hexdigit());
        if !is_valid {
            return Err(BoardDomainError::InvalidCoverColor(raw));
        }
        Ok(Self(normalized))
    }

    /// Returns the color as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CoverColor {
    type Error = BoardDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CoverColor> for String {
    fn from(value: CoverColor) -> Self {
        value.0
    }
}

/// Image URL used as a card cover.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CoverImage(String);

impl CoverImage {
    /// Creates a validated cover image URL.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidCoverImage`] unless the trimmed
    /// value is an `http://` or `https://` URL without whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if !is_http_url(trimmed) {
            return Err(BoardDomainError::InvalidCoverImage(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the URL as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CoverImage {
    type Error = BoardDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CoverImage> for String {
    fn from(value: CoverImage) -> Self {
        value.0
    }
}

/// Card cover: either a color strip or an image, never both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Cover {
    /// Solid color cover.
    Color(CoverColor),
    /// Image cover.
    Image(CoverImage),
}

impl Cover {
    /// Creates a color cover.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidCoverColor`] for malformed colors.
    pub fn color(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        CoverColor::new(value).map(Self::Color)
    }

    /// Creates an image cover.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidCoverImage`] for non-http URLs.
    pub fn image(value: impl Into<String>) -> Result<Self, BoardDomainError> {
        CoverImage::new(value).map(Self::Image)
    }

    /// Returns the color, if this is a color cover.
    #[must_use]
    pub const fn cover_color(&self) -> Option<&CoverColor> {
        match self {
            Self::Color(color) => Some(color),
            Self::Image(_) => None,
        }
    }

    /// Returns the image, if this is an image cover.
    #[must_use]
    pub const fn cover_image(&self) -> Option<&CoverImage> {
        match self {
            Self::Image(image) => Some(image),
            Self::Color(_) => None,
        }
    }
}

/// Board background: a CSS color/gradient or an image URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Background {
    /// CSS color or gradient expression.
    Css(String),
    /// Image URL.
    Image(String),
}

impl Background {
    /// Classifies a raw stored value: http(s) URLs become images, anything
    /// else is treated as CSS.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if is_http_url(trimmed) {
            Self::Image(trimmed.to_owned())
        } else {
            Self::Css(trimmed.to_owned())
        }
    }

    /// Returns the raw stored value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Css(value) | Self::Image(value) => value,
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::Css("#0079bf".to_owned())
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn is_http_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    rest.is_some_and(|host| !host.is_empty() && !host.chars().any(char::is_whitespace))
}
