//! Data Model
//!
//! Entities returned by the remote endpoints and the payloads sent to them.
//! The client never mutates categories or image assets; items are created
//! and deleted, never updated in place.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Category identifier
pub type CategoryId = i64;

/// Item identifier
pub type ItemId = i64;

/// A labeled, colored grouping used to filter items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// CSS color, e.g. `#8b5cf6`
    #[serde(default)]
    pub color: String,
}

/// A gallery entry (a "person" in the richer schema)
///
/// Older endpoints return `title`/`description` without a category; both
/// shapes decode into this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub image_url: String,
    #[serde(alias = "title")]
    pub name: String,
    #[serde(alias = "description", default)]
    pub bio: String,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub category_color: Option<String>,
    #[serde(default)]
    pub telegram_username: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

impl Item {
    /// Parse `created_at`.
    ///
    /// Accepts RFC 3339 and naive ISO-8601 (no offset, read as UTC), which is
    /// what the list endpoint emits.
    pub fn created_at(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(&self.created_at)
    }

    /// Category badge `(name, color)` when the endpoint joined it in
    pub fn badge(&self) -> Option<(&str, &str)> {
        match (&self.category_name, &self.category_color) {
            (Some(name), Some(color)) if !name.is_empty() && !color.is_empty() => {
                Some((name.as_str(), color.as_str()))
            }
            _ => None,
        }
    }

    /// Messaging handle, if set and not blank
    pub fn handle(&self) -> Option<&str> {
        self.telegram_username
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
    }
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt);
    }

    let utc = FixedOffset::east_opt(0)?;
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc().with_timezone(&utc))
}

/// Payload for creating an item
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    pub image_url: String,
    pub name: String,
    pub bio: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram_username: Option<String>,
}

/// A previously uploaded image offered by the picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAsset {
    pub url: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub uploaded_at: String,
}

/// Login request body
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

// ============ Response Envelopes ============

#[derive(Debug, Default, Deserialize)]
pub struct ItemsResponse {
    #[serde(default)]
    pub items: Vec<Item>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoriesResponse {
    #[serde(default)]
    pub categories: Vec<Category>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SuccessResponse {
    #[serde(default)]
    pub success: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub token: Option<String>,
}

impl LoginResponse {
    /// The issued token, when the login succeeded and actually returned one
    pub fn accepted_token(&self) -> Option<&str> {
        if !self.success {
            return None;
        }
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ImagesResponse {
    #[serde(default)]
    pub images: Vec<ImageAsset>,
}
