//! # Fame Gallery
//!
//! A person gallery with category filters and a password-gated admin page.
//! Persistence, authentication and image storage live behind remote JSON
//! endpoints; this crate is the presentation and request-orchestration layer.
//!
//! ## Features
//!
//! - **Gallery**: category filter chips, empty states, detail overlay
//! - **Admin**: token session, create/delete entries, image upload with
//!   local type/size checks, picker over previously uploaded images
//! - **Portable core**: the view controllers compile for the browser
//!   (`gallery-ui`) and for the native CLI
//!
//! ## Modules
//!
//! - [`views`]: gallery, admin and image picker controllers
//! - [`gateway`]: remote endpoint operations
//! - [`session`]: admin token storage
//! - [`config`], [`server`]: native-only configuration and static host
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fame_gallery::{ConsoleNotifier, DateLocale, Endpoints, GalleryView, HttpGateway};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = HttpGateway::new(Endpoints::default(), Duration::from_secs(30))?;
//!     let gallery = GalleryView::new(gateway, ConsoleNotifier, DateLocale::En);
//!
//!     gallery.load().await;
//!     gallery.set_filter(Some(1));
//!
//!     for item in gallery.visible_items() {
//!         println!("{} - {}", item.name, item.bio);
//!     }
//!     Ok(())
//! }
//! ```

pub mod filter;
pub mod format;
pub mod gateway;
pub mod models;
pub mod notify;
pub mod session;
pub mod upload;
pub mod views;

#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod server;

// Re-export top-level types for convenience
pub use models::{
    Category, CategoryId, Credentials, ImageAsset, Item, ItemId, LoginResponse, NewItem,
};

pub use gateway::{Endpoints, Gateway, GatewayError, GatewayResult, AUTH_HEADER};

#[cfg(feature = "native")]
pub use gateway::HttpGateway;

pub use session::{MemoryStore, Session, SessionError, TokenStore, TOKEN_KEY};

#[cfg(feature = "native")]
pub use session::FileStore;

pub use notify::{ConsoleNotifier, Notification, NotificationLog, Notifier, Severity};

pub use upload::{validate_upload, UploadError, UploadFile, MAX_UPLOAD_BYTES};

pub use format::{format_long_date, telegram_link, DateLocale};

pub use filter::{filter_chips, visible_items, FilterChip};

pub use views::{
    AdminOptions, AdminState, AdminView, DeleteOutcome, DeletePolicy, EmptyState, GalleryView,
    ImagePicker, ItemDetail, ItemForm, LoginForm, OverlayClick, PickerState,
};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError, LoggingConfig};

#[cfg(feature = "native")]
pub use server::{build_router, serve, ServerError};
