//! Remote endpoint access from the browser

pub mod client;

pub use client::{date_locale, endpoints, read_file, BrowserGateway};
