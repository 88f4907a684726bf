//! Image Picker Overlay
//!
//! Modal used by the admin view to reuse an already uploaded image.
//!
//! ```text
//! Closed --open--> Loading --apply--> Empty | Populated --confirm|cancel--> Closed
//! ```
//!
//! Every `open` starts a new load and hands out a [`LoadTicket`]. Results are
//! applied only for the newest ticket while the overlay is open, so a slow
//! response from an earlier opening cannot overwrite a fresher list.

use crate::gateway::GatewayResult;
use crate::models::ImageAsset;

/// Observable picker state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerState {
    Closed,
    Loading,
    Empty,
    Populated,
}

/// Identifies one load request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Default)]
pub struct ImagePicker {
    open: bool,
    loading: bool,
    images: Vec<ImageAsset>,
    selected: Option<String>,
    generation: u64,
}

impl ImagePicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PickerState {
        if !self.open {
            PickerState::Closed
        } else if self.loading {
            PickerState::Loading
        } else if self.images.is_empty() {
            PickerState::Empty
        } else {
            PickerState::Populated
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn images(&self) -> &[ImageAsset] {
        &self.images
    }

    /// Locally selected URL, not yet committed
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Open (or re-open) the overlay and start a new load
    pub fn open(&mut self) -> LoadTicket {
        self.generation += 1;
        self.open = true;
        self.loading = true;
        self.images.clear();
        self.selected = None;
        LoadTicket(self.generation)
    }

    /// Apply a load result. Returns `false` if the result was stale and dropped.
    pub fn apply(&mut self, ticket: LoadTicket, result: GatewayResult<Vec<ImageAsset>>) -> bool {
        if !self.open || ticket.0 != self.generation {
            tracing::debug!(
                ticket = ticket.0,
                current = self.generation,
                "Dropping superseded image list"
            );
            return false;
        }

        match result {
            Ok(images) => self.images = images,
            Err(e) => {
                tracing::warn!("Failed to fetch images: {}", e);
                self.images.clear();
            }
        }
        self.loading = false;
        true
    }

    /// Select one of the listed images
    pub fn select(&mut self, url: &str) -> bool {
        if self.state() != PickerState::Populated || !self.images.iter().any(|img| img.url == url) {
            return false;
        }
        self.selected = Some(url.to_string());
        true
    }

    /// The select button is enabled only with a selection
    pub fn can_confirm(&self) -> bool {
        self.open && self.selected.is_some()
    }

    /// Commit the selection: `on_select` runs exactly once and the overlay closes.
    /// Without a selection nothing happens.
    pub fn confirm<F: FnOnce(String)>(&mut self, on_select: F) -> bool {
        if !self.open {
            return false;
        }
        let Some(url) = self.selected.take() else {
            return false;
        };
        self.close();
        on_select(url);
        true
    }

    /// Close without committing
    pub fn cancel(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        self.open = false;
        self.loading = false;
        self.selected = None;
    }
}
