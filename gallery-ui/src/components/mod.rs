//! UI Components
//!
//! Reusable Leptos components for the gallery and admin pages.

pub mod detail_overlay;
pub mod image_picker;
pub mod item_card;
pub mod loading;
pub mod login_form;
pub mod toast;

pub use detail_overlay::DetailOverlay;
pub use image_picker::ImagePicker;
pub use item_card::ItemCard;
pub use loading::Loading;
pub use login_form::LoginForm;
pub use toast::Toast;
