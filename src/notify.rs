//! User Notifications
//!
//! Toast-style messages raised by the views. Each operation has its own
//! success and failure messages; transport failures share one.

use std::cell::{Cell, RefCell};

use crate::upload::{UploadError, MAX_UPLOAD_BYTES};

/// Toast variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// A user-visible notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    // ============ Catalog ============

    pub fn connection_failed() -> Self {
        Self::error("Error", "Could not connect to the server")
    }

    pub fn welcome() -> Self {
        Self::success("Welcome!", "You are signed in to the admin panel")
    }

    pub fn session_failed() -> Self {
        Self::error("Sign-in failed", "Could not save the session")
    }

    pub fn login_failed() -> Self {
        Self::error("Sign-in failed", "Invalid username or password")
    }

    pub fn item_added() -> Self {
        Self::success("Added", "The new entry is now in the gallery")
    }

    pub fn add_failed() -> Self {
        Self::error("Error", "Could not add the entry")
    }

    pub fn missing_fields(fields: &[&str]) -> Self {
        Self::error("Missing fields", format!("Please fill in: {}", fields.join(", ")))
    }

    pub fn item_deleted() -> Self {
        Self::success("Deleted", "The entry was removed from the gallery")
    }

    pub fn delete_failed() -> Self {
        Self::error("Error", "Could not delete the entry")
    }

    pub fn image_uploaded() -> Self {
        Self::success("Uploaded", "The image URL was added to the form")
    }

    pub fn upload_failed() -> Self {
        Self::error("Error", "Could not upload the image")
    }

    pub fn upload_rejected(error: &UploadError) -> Self {
        match error {
            UploadError::NotAnImage { .. } => {
                Self::error("Wrong file type", "Please choose an image file")
            }
            UploadError::TooLarge { .. } => Self::error(
                "File too large",
                format!("Maximum size is {} MB", MAX_UPLOAD_BYTES / (1024 * 1024)),
            ),
        }
    }
}

/// Receives notifications and view change signals
pub trait Notifier {
    fn notify(&self, notification: Notification);

    /// Observable view state changed (loading flag, lists, forms)
    fn changed(&self) {}
}

/// Records everything it is told
#[derive(Debug, Default)]
pub struct NotificationLog {
    entries: RefCell<Vec<Notification>>,
    changes: Cell<usize>,
}

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Notification> {
        self.entries.borrow().clone()
    }

    pub fn last(&self) -> Option<Notification> {
        self.entries.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn change_count(&self) -> usize {
        self.changes.get()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, notification: Notification) {
        self.entries.borrow_mut().push(notification);
    }

    fn changed(&self) {
        self.changes.set(self.changes.get() + 1);
    }
}

/// Prints notifications to the terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, n: Notification) {
        match n.severity {
            Severity::Success => {
                tracing::info!(title = %n.title, "{}", n.description);
                println!("✓ {}: {}", n.title, n.description);
            }
            Severity::Error => {
                tracing::warn!(title = %n.title, "{}", n.description);
                eprintln!("✕ {}: {}", n.title, n.description);
            }
        }
    }
}
