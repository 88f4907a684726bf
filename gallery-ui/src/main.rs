//! Fame Gallery
//!
//! Browser front-end for the person gallery, built with Leptos (WASM).
//!
//! # Features
//!
//! - Public gallery with category filters and a detail overlay
//! - Password-gated admin page: create, delete, upload, reuse uploaded images
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. Page state lives in the `fame-gallery` view controllers;
//! the components here render them and forward user events. All data comes
//! from the remote JSON endpoints.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    // Mount the app to the document body
    mount_to_body(|| view! { <app::App /> });
}
