//! Page controllers
//!
//! Platform-neutral state behind the two pages. The browser front-end and
//! the CLI drive the same controllers; rendering is up to the caller.

pub mod admin;
pub mod gallery;
pub mod picker;

pub use admin::{
    AdminOptions, AdminState, AdminView, DeleteOutcome, DeletePolicy, ItemForm, LoginForm,
};
pub use gallery::{EmptyState, GalleryView, ItemDetail, OverlayClick};
pub use picker::{ImagePicker, LoadTicket, PickerState};
