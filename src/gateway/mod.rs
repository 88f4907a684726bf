//! Remote Data Gateway
//!
//! Thin wrapper over the remote JSON endpoints. Every operation is a single
//! request; there are no retries and no cancellation.
//!
//! Mutations report only whether they succeeded. Callers that display the
//! list must call [`Gateway::list_items`] again afterwards.
//!
//! ## Endpoints
//!
//! - `GET  items`                  - `{ items }`
//! - `GET  items?type=categories`  - `{ categories }`
//! - `POST items` (JSON)           - `{ success }`
//! - `DELETE items?id=`            - `{ success }`
//! - `POST auth` (JSON)            - `{ success, token? }`
//! - `POST upload` (multipart)     - `{ url? }`
//! - `GET  images`                 - `{ images }`

mod error;
#[cfg(feature = "native")]
mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use error::{GatewayError, GatewayResult};
#[cfg(feature = "native")]
pub use http::HttpGateway;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::models::{Category, Credentials, ImageAsset, Item, ItemId, LoginResponse, NewItem};
use crate::upload::UploadFile;

/// Header carrying the admin token on mutating requests
pub const AUTH_HEADER: &str = "X-Auth-Token";

/// Endpoint URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoints {
    /// Items (list/create/delete) and categories
    #[serde(default = "default_items_url")]
    pub items_url: String,
    /// Login
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    /// Uploaded image assets
    #[serde(default = "default_images_url")]
    pub images_url: String,
    /// Image upload
    #[serde(default = "default_upload_url")]
    pub upload_url: String,
}

fn default_items_url() -> String {
    "https://functions.poehali.dev/9030f112-3631-4e10-9524-bce45dd0ff5a".to_string()
}

fn default_auth_url() -> String {
    "https://functions.poehali.dev/043fced9-bae9-4e47-8771-992e6067e0c0".to_string()
}

fn default_images_url() -> String {
    "https://functions.poehali.dev/a485142b-5321-477b-a019-6188b5a23541".to_string()
}

fn default_upload_url() -> String {
    default_images_url()
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            items_url: default_items_url(),
            auth_url: default_auth_url(),
            images_url: default_images_url(),
            upload_url: default_upload_url(),
        }
    }
}

impl Endpoints {
    /// All endpoints under one base, `{base}/items`, `{base}/auth`, ...
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            items_url: format!("{}/items", base),
            auth_url: format!("{}/auth", base),
            images_url: format!("{}/images", base),
            upload_url: format!("{}/upload", base),
        }
    }

    pub fn categories_url(&self) -> String {
        with_query(&self.items_url, "type=categories")
    }

    pub fn delete_url(&self, id: ItemId) -> String {
        with_query(&self.items_url, &format!("id={}", id))
    }
}

fn with_query(url: &str, query: &str) -> String {
    let sep = if url.contains('?') { '&' } else { '?' };
    format!("{}{}{}", url, sep, query)
}

/// Operations against the remote endpoints
///
/// Futures are not required to be `Send`: the application runs on a single
/// cooperative thread (the browser event loop, or the CLI's main task).
#[async_trait(?Send)]
pub trait Gateway {
    /// Exchange credentials for a token
    async fn login(&self, credentials: &Credentials) -> GatewayResult<LoginResponse>;

    async fn list_items(&self) -> GatewayResult<Vec<Item>>;

    async fn list_categories(&self) -> GatewayResult<Vec<Category>>;

    /// Returns the endpoint's `success` flag
    async fn create_item(&self, item: &NewItem, token: Option<&str>) -> GatewayResult<bool>;

    /// Returns the endpoint's `success` flag
    async fn delete_item(&self, id: ItemId, token: Option<&str>) -> GatewayResult<bool>;

    /// Returns the hosted URL, `None` if the endpoint did not provide one
    async fn upload_image(
        &self,
        file: &UploadFile,
        token: Option<&str>,
    ) -> GatewayResult<Option<String>>;

    async fn list_images(&self) -> GatewayResult<Vec<ImageAsset>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_urls() {
        let endpoints = Endpoints::with_base("http://localhost:9000/");
        assert_eq!(endpoints.items_url, "http://localhost:9000/items");
        assert_eq!(
            endpoints.categories_url(),
            "http://localhost:9000/items?type=categories"
        );
        assert_eq!(endpoints.delete_url(42), "http://localhost:9000/items?id=42");
    }

    #[test]
    fn test_query_appends_to_existing_query() {
        let endpoints = Endpoints {
            items_url: "https://fn.example/run?fn=gallery".to_string(),
            ..Endpoints::default()
        };
        assert_eq!(endpoints.delete_url(3), "https://fn.example/run?fn=gallery&id=3");
    }
}
