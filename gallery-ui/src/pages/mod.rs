//! Pages
//!
//! Top-level page components for each route.

pub mod admin;
pub mod gallery;

pub use admin::Admin;
pub use gallery::Gallery;
