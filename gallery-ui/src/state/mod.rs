//! State Management
//!
//! Global toast state, the browser session store and the controller types
//! the pages render.

pub mod global;
pub mod session;

pub use global::{provide_global_state, GlobalState, ToastNotifier};
pub use session::LocalStorageStore;

use crate::api::BrowserGateway;
use fame_gallery::{AdminView, GalleryView};

pub type GalleryController = GalleryView<BrowserGateway, ToastNotifier>;
pub type AdminController = AdminView<BrowserGateway, LocalStorageStore, ToastNotifier>;
