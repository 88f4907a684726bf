//! Admin View
//!
//! Password-gated management page.
//!
//! ```text
//!             login ok
//! LoggedOut ------------> LoggedIn
//!     ^                       |
//!     +-------- logout -------+
//! ```
//!
//! The stored token is read once by [`AdminView::mount`]. Creating or
//! deleting an entry never edits the local list: on success the view fetches
//! the list again.
//!
//! Every method takes `&self`. State lives in `Cell`/`RefCell` and no borrow
//! is held across an `.await`, so UI handlers may call into the view while a
//! request is in flight. [`AdminView::logout`] starts a new session epoch;
//! responses that arrive for an older epoch are discarded.

use futures_util::future::join;
use std::cell::{Cell, RefCell};

use super::picker::{ImagePicker, PickerState};
use crate::gateway::Gateway;
use crate::models::{Category, CategoryId, Credentials, ImageAsset, Item, ItemId, NewItem};
use crate::notify::{Notification, Notifier};
use crate::session::{Session, TokenStore};
use crate::upload::{validate_upload, UploadFile};

/// Authentication state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminState {
    LoggedOut,
    LoggedIn,
}

/// Whether deleting asks for confirmation first
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeletePolicy {
    /// Blocking yes/no prompt before the request (persons)
    #[default]
    Confirm,
    /// Delete straight away (plain gallery items)
    Immediate,
}

/// Result of [`AdminView::delete_item`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user said no; nothing was sent
    Declined,
    Failed,
    /// Not logged in, another request is in flight, or the session ended
    /// before the answer arrived
    Skipped,
}

/// Admin view options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdminOptions {
    pub delete_policy: DeletePolicy,
    /// Category preselected in the form; the first loaded category when `None`
    pub default_category: Option<CategoryId>,
}

/// Login form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Creation form fields
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemForm {
    pub image_url: String,
    pub name: String,
    pub category_id: Option<CategoryId>,
    pub telegram_username: String,
    pub bio: String,
}

impl ItemForm {
    pub fn new(category_id: Option<CategoryId>) -> Self {
        Self {
            category_id,
            ..Self::default()
        }
    }

    /// Labels of required fields left blank
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("image URL", &self.image_url),
            ("name", &self.name),
            ("bio", &self.bio),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| label)
        .collect()
    }

    pub fn to_new_item(&self) -> NewItem {
        let handle = self.telegram_username.trim();
        NewItem {
            image_url: self.image_url.trim().to_string(),
            name: self.name.trim().to_string(),
            bio: self.bio.trim().to_string(),
            category_id: self.category_id,
            telegram_username: (!handle.is_empty()).then(|| handle.to_string()),
        }
    }
}

/// Raises a busy flag for the lifetime of a request; lowered on drop
struct Busy<'a, N: Notifier> {
    flag: &'a Cell<bool>,
    notifier: &'a N,
}

impl<'a, N: Notifier> Busy<'a, N> {
    fn start(flag: &'a Cell<bool>, notifier: &'a N) -> Option<Self> {
        if flag.get() {
            return None;
        }
        flag.set(true);
        notifier.changed();
        Some(Self { flag, notifier })
    }
}

impl<N: Notifier> Drop for Busy<'_, N> {
    fn drop(&mut self) {
        self.flag.set(false);
        self.notifier.changed();
    }
}

pub struct AdminView<G, S, N> {
    gateway: G,
    session: Session<S>,
    notifier: N,
    options: AdminOptions,
    state: Cell<AdminState>,
    epoch: Cell<u64>,
    loading: Cell<bool>,
    uploading: Cell<bool>,
    items: RefCell<Vec<Item>>,
    categories: RefCell<Vec<Category>>,
    login_form: RefCell<LoginForm>,
    form: RefCell<ItemForm>,
    picker: RefCell<ImagePicker>,
}

impl<G: Gateway, S: TokenStore, N: Notifier> AdminView<G, S, N> {
    pub fn new(gateway: G, session: Session<S>, notifier: N, options: AdminOptions) -> Self {
        Self {
            gateway,
            session,
            notifier,
            options,
            state: Cell::new(AdminState::LoggedOut),
            epoch: Cell::new(0),
            loading: Cell::new(false),
            uploading: Cell::new(false),
            items: RefCell::new(Vec::new()),
            categories: RefCell::new(Vec::new()),
            login_form: RefCell::new(LoginForm::default()),
            form: RefCell::new(ItemForm::new(options.default_category)),
            picker: RefCell::new(ImagePicker::new()),
        }
    }

    // ============ Accessors ============

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn options(&self) -> AdminOptions {
        self.options
    }

    pub fn state(&self) -> AdminState {
        self.state.get()
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.get() == AdminState::LoggedIn
    }

    /// Disables the submit controls
    pub fn is_loading(&self) -> bool {
        self.loading.get()
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading.get()
    }

    pub fn items(&self) -> Vec<Item> {
        self.items.borrow().clone()
    }

    pub fn item(&self, id: ItemId) -> Option<Item> {
        self.items.borrow().iter().find(|item| item.id == id).cloned()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.categories.borrow().clone()
    }

    pub fn login_form(&self) -> LoginForm {
        self.login_form.borrow().clone()
    }

    pub fn form(&self) -> ItemForm {
        self.form.borrow().clone()
    }

    pub fn edit_login_form(&self, edit: impl FnOnce(&mut LoginForm)) {
        edit(&mut self.login_form.borrow_mut());
    }

    pub fn edit_form(&self, edit: impl FnOnce(&mut ItemForm)) {
        edit(&mut self.form.borrow_mut());
    }

    pub fn picker_state(&self) -> PickerState {
        self.picker.borrow().state()
    }

    pub fn picker_images(&self) -> Vec<ImageAsset> {
        self.picker.borrow().images().to_vec()
    }

    pub fn picker_selection(&self) -> Option<String> {
        self.picker.borrow().selected().map(str::to_string)
    }

    pub fn can_confirm_picker(&self) -> bool {
        self.picker.borrow().can_confirm()
    }

    /// Whether a response started in `epoch` may still touch the view
    fn is_current(&self, epoch: u64) -> bool {
        self.epoch.get() == epoch && self.is_logged_in()
    }

    /// Category the form falls back to
    pub fn default_category(&self) -> Option<CategoryId> {
        self.options
            .default_category
            .or_else(|| self.categories.borrow().first().map(|c| c.id))
    }

    // ============ Session ============

    /// Read the stored token once and pick the initial view
    pub async fn mount(&self) -> AdminState {
        if self.session.get_token().is_some() {
            tracing::info!("Found stored session, opening admin panel");
            self.state.set(AdminState::LoggedIn);
            self.notifier.changed();
            self.refresh().await;
        } else {
            self.state.set(AdminState::LoggedOut);
            self.notifier.changed();
        }
        self.state.get()
    }

    /// Submit the login form
    pub async fn login(&self) -> bool {
        let credentials = {
            let form = self.login_form.borrow();
            Credentials::new(form.username.trim(), form.password.clone())
        };

        let mut missing = Vec::new();
        if credentials.username.is_empty() {
            missing.push("username");
        }
        if credentials.password.is_empty() {
            missing.push("password");
        }
        if !missing.is_empty() {
            self.notifier.notify(Notification::missing_fields(&missing));
            return false;
        }

        let Some(_busy) = Busy::start(&self.loading, &self.notifier) else {
            return false;
        };

        match self.gateway.login(&credentials).await {
            Ok(response) => match response.accepted_token() {
                Some(token) => {
                    if let Err(e) = self.session.set_token(token) {
                        tracing::error!("Failed to persist session token: {}", e);
                        self.notifier.notify(Notification::session_failed());
                        return false;
                    }
                    tracing::info!(username = %credentials.username, "Logged in");
                    self.state.set(AdminState::LoggedIn);
                    self.notifier.notify(Notification::welcome());
                    self.notifier.changed();
                    self.refresh().await;
                    true
                }
                None => {
                    tracing::warn!(username = %credentials.username, "Login rejected");
                    self.notifier.notify(Notification::login_failed());
                    false
                }
            },
            Err(e) if e.is_connection_failure() => {
                tracing::error!("Login request failed: {}", e);
                self.notifier.notify(Notification::connection_failed());
                false
            }
            Err(e) => {
                tracing::warn!("Login failed: {}", e);
                self.notifier.notify(Notification::login_failed());
                false
            }
        }
    }

    /// Forget the token and return to the login form
    pub fn logout(&self) {
        if let Err(e) = self.session.clear_token() {
            tracing::error!("Failed to clear session token: {}", e);
        }

        self.state.set(AdminState::LoggedOut);
        self.epoch.set(self.epoch.get() + 1);
        *self.login_form.borrow_mut() = LoginForm::default();
        self.items.borrow_mut().clear();
        self.categories.borrow_mut().clear();
        *self.form.borrow_mut() = ItemForm::new(self.options.default_category);
        self.picker.borrow_mut().cancel();

        tracing::info!("Logged out");
        self.notifier.changed();
    }

    // ============ Data ============

    /// Fetch items and categories again
    pub async fn refresh(&self) {
        let epoch = self.epoch.get();
        let (items, categories) = join(self.gateway.list_items(), self.gateway.list_categories()).await;

        if !self.is_current(epoch) {
            tracing::debug!("Session ended during refresh, dropping lists");
            return;
        }

        let mut connection_lost = false;
        match items {
            Ok(items) => *self.items.borrow_mut() = items,
            Err(e) => {
                tracing::error!("Failed to fetch items: {}", e);
                connection_lost |= e.is_connection_failure();
            }
        }
        match categories {
            Ok(categories) => {
                *self.categories.borrow_mut() = categories;
                if self.form.borrow().category_id.is_none() {
                    let default = self.default_category();
                    self.form.borrow_mut().category_id = default;
                }
            }
            Err(e) => {
                tracing::error!("Failed to fetch categories: {}", e);
                connection_lost |= e.is_connection_failure();
            }
        }

        if connection_lost {
            self.notifier.notify(Notification::connection_failed());
        }
        self.notifier.changed();
    }

    /// Submit the creation form
    pub async fn submit_item(&self) -> bool {
        if !self.is_logged_in() {
            tracing::warn!("Ignoring submit while logged out");
            return false;
        }

        let missing = self.form.borrow().missing_fields();
        if !missing.is_empty() {
            self.notifier.notify(Notification::missing_fields(&missing));
            return false;
        }

        let Some(_busy) = Busy::start(&self.loading, &self.notifier) else {
            return false;
        };

        let payload = self.form.borrow().to_new_item();
        let token = self.session.get_token();
        let epoch = self.epoch.get();

        let result = self.gateway.create_item(&payload, token.as_deref()).await;
        if !self.is_current(epoch) {
            tracing::info!(name = %payload.name, "Session ended before the create answered");
            return false;
        }

        match result {
            Ok(true) => {
                tracing::info!(name = %payload.name, "Entry created");
                self.notifier.notify(Notification::item_added());
                *self.form.borrow_mut() = ItemForm::new(self.default_category());
                self.refresh().await;
                true
            }
            Ok(false) => {
                tracing::warn!(name = %payload.name, "Endpoint refused the new entry");
                self.notifier.notify(Notification::add_failed());
                false
            }
            Err(e) if e.is_connection_failure() => {
                tracing::error!("Create request failed: {}", e);
                self.notifier.notify(Notification::connection_failed());
                false
            }
            Err(e) => {
                tracing::warn!("Create failed: {}", e);
                self.notifier.notify(Notification::add_failed());
                false
            }
        }
    }

    /// Delete an entry. `confirm` is asked first under [`DeletePolicy::Confirm`].
    pub async fn delete_item<F: FnOnce() -> bool>(&self, id: ItemId, confirm: F) -> DeleteOutcome {
        if !self.is_logged_in() || self.loading.get() {
            return DeleteOutcome::Skipped;
        }

        if self.options.delete_policy == DeletePolicy::Confirm && !confirm() {
            tracing::info!(id, "Deletion declined");
            return DeleteOutcome::Declined;
        }

        let Some(_busy) = Busy::start(&self.loading, &self.notifier) else {
            return DeleteOutcome::Skipped;
        };
        let token = self.session.get_token();
        let epoch = self.epoch.get();

        let result = self.gateway.delete_item(id, token.as_deref()).await;
        if !self.is_current(epoch) {
            tracing::info!(id, "Session ended before the delete answered");
            return DeleteOutcome::Skipped;
        }

        match result {
            Ok(true) => {
                tracing::info!(id, "Entry deleted");
                self.notifier.notify(Notification::item_deleted());
                self.refresh().await;
                DeleteOutcome::Deleted
            }
            Ok(false) => {
                tracing::warn!(id, "Endpoint refused the deletion");
                self.notifier.notify(Notification::delete_failed());
                DeleteOutcome::Failed
            }
            Err(e) if e.is_connection_failure() => {
                tracing::error!("Delete request failed: {}", e);
                self.notifier.notify(Notification::connection_failed());
                DeleteOutcome::Failed
            }
            Err(e) => {
                tracing::warn!("Delete failed: {}", e);
                self.notifier.notify(Notification::delete_failed());
                DeleteOutcome::Failed
            }
        }
    }

    // ============ Images ============

    /// Local type/size check; notifies on rejection
    pub fn check_upload(&self, mime_type: &str, size: u64) -> bool {
        match validate_upload(mime_type, size) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Upload rejected: {}", e);
                self.notifier.notify(Notification::upload_rejected(&e));
                false
            }
        }
    }

    /// Upload a file and put its hosted URL into the form
    pub async fn upload_image(&self, file: UploadFile) -> Option<String> {
        if !self.is_logged_in() {
            return None;
        }
        if !self.check_upload(&file.mime_type, file.size()) {
            return None;
        }

        let _busy = Busy::start(&self.uploading, &self.notifier)?;
        let token = self.session.get_token();
        let epoch = self.epoch.get();

        let result = self.gateway.upload_image(&file, token.as_deref()).await;
        if !self.is_current(epoch) {
            tracing::info!(name = %file.name, "Session ended before the upload answered");
            return None;
        }

        match result {
            Ok(Some(url)) => {
                tracing::info!(%url, "Image uploaded");
                self.form.borrow_mut().image_url = url.clone();
                self.notifier.notify(Notification::image_uploaded());
                Some(url)
            }
            Ok(None) => {
                tracing::warn!(name = %file.name, "Upload answered without a URL");
                self.notifier.notify(Notification::upload_failed());
                None
            }
            Err(e) if e.is_connection_failure() => {
                tracing::error!("Upload request failed: {}", e);
                self.notifier.notify(Notification::connection_failed());
                None
            }
            Err(e) => {
                tracing::warn!("Upload failed: {}", e);
                self.notifier.notify(Notification::upload_failed());
                None
            }
        }
    }

    /// Open the picker and load the image list
    pub async fn open_picker(&self) {
        let ticket = self.picker.borrow_mut().open();
        self.notifier.changed();

        let result = self.gateway.list_images().await;
        let connection_lost = matches!(&result, Err(e) if e.is_connection_failure());

        let applied = self.picker.borrow_mut().apply(ticket, result);
        if applied && connection_lost {
            self.notifier.notify(Notification::connection_failed());
        }
        if applied {
            self.notifier.changed();
        }
    }

    pub fn select_image(&self, url: &str) -> bool {
        let selected = self.picker.borrow_mut().select(url);
        if selected {
            self.notifier.changed();
        }
        selected
    }

    /// Put the selected image into the form and close the picker
    pub fn confirm_picker(&self) -> bool {
        let confirmed = self
            .picker
            .borrow_mut()
            .confirm(|url| self.form.borrow_mut().image_url = url);
        if confirmed {
            self.notifier.changed();
        }
        confirmed
    }

    pub fn cancel_picker(&self) {
        self.picker.borrow_mut().cancel();
        self.notifier.changed();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::fixtures::{category, item};
    use crate::gateway::mock::{Call, MockGateway};
    use crate::notify::NotificationLog;
    use crate::session::MemoryStore;
    use crate::upload::MAX_UPLOAD_BYTES;

    type TestView = AdminView<MockGateway, MemoryStore, NotificationLog>;

    fn admin_with(gw: MockGateway, options: AdminOptions) -> TestView {
        AdminView::new(gw, Session::new(MemoryStore::new()), NotificationLog::new(), options)
    }

    fn admin(gw: MockGateway) -> TestView {
        admin_with(gw, AdminOptions::default())
    }

    fn seeded() -> MockGateway {
        MockGateway::with_data(
            vec![item(1, Some(1)), item(2, Some(2))],
            vec![category(1, "A", "#111"), category(2, "B", "#222")],
        )
    }

    async fn logged_in(gw: MockGateway, options: AdminOptions) -> TestView {
        let view = admin_with(gw, options);
        view.session().set_token("tok-123").unwrap();
        assert_eq!(view.mount().await, AdminState::LoggedIn);
        view.gateway().clear_calls();
        view.notifier().clear();
        view
    }

    fn fill_form(view: &TestView) {
        view.edit_form(|f| {
            f.image_url = "https://cdn.example/new.jpg".into();
            f.name = "New Person".into();
            f.bio = "Somebody".into();
            f.telegram_username = "@newbie".into();
        });
    }

    fn ids(items: &[Item]) -> Vec<i64> {
        items.iter().map(|i| i.id).collect()
    }

    #[tokio::test]
    async fn test_mount_without_token_shows_login() {
        let view = admin(seeded());
        assert_eq!(view.mount().await, AdminState::LoggedOut);
        assert!(view.gateway().calls().is_empty());
    }

    #[tokio::test]
    async fn test_mount_with_token_fetches() {
        let view = admin(seeded());
        view.session().set_token("stored").unwrap();

        assert_eq!(view.mount().await, AdminState::LoggedIn);
        assert_eq!(ids(&view.items()), vec![1, 2]);
        assert_eq!(view.form().category_id, Some(1));
    }

    #[tokio::test]
    async fn test_login_success() {
        let view = admin(seeded());
        view.mount().await;
        view.edit_login_form(|f| {
            f.username = "admin".into();
            f.password = "secret".into();
        });

        assert!(view.login().await);
        assert_eq!(view.state(), AdminState::LoggedIn);
        assert_eq!(view.session().get_token().as_deref(), Some("tok-123"));
        assert!(!view.is_loading());
        assert_eq!(view.items().len(), 2);
        assert_eq!(view.notifier().entries()[0], Notification::welcome());

        // Fetch is issued only after the login answered
        let calls = view.gateway().calls();
        assert_eq!(calls[0], Call::Login("admin".into()));
        assert!(calls[1..].contains(&Call::ListItems));
    }

    #[tokio::test]
    async fn test_login_failure_stays_logged_out() {
        let view = admin(seeded());
        view.mount().await;
        view.edit_login_form(|f| {
            f.username = "admin".into();
            f.password = "wrong".into();
        });

        assert!(!view.login().await);
        assert_eq!(view.state(), AdminState::LoggedOut);
        assert_eq!(view.session().get_token(), None);
        assert!(!view.is_loading());
        assert_eq!(view.notifier().last(), Some(Notification::login_failed()));
        assert_eq!(view.gateway().count(|c| *c == Call::ListItems), 0);
    }

    #[tokio::test]
    async fn test_login_success_without_token_is_failure() {
        let gw = seeded();
        gw.account.borrow_mut().2 = None;
        let view = admin(gw);
        view.edit_login_form(|f| {
            f.username = "admin".into();
            f.password = "secret".into();
        });

        assert!(!view.login().await);
        assert_eq!(view.state(), AdminState::LoggedOut);
        assert_eq!(view.session().get_token(), None);
    }

    #[tokio::test]
    async fn test_login_network_error() {
        let gw = seeded();
        gw.offline.set(true);
        let view = admin(gw);
        view.edit_login_form(|f| {
            f.username = "admin".into();
            f.password = "secret".into();
        });

        assert!(!view.login().await);
        assert_eq!(view.state(), AdminState::LoggedOut);
        assert!(!view.is_loading());
        assert_eq!(view.notifier().last(), Some(Notification::connection_failed()));
    }

    #[tokio::test]
    async fn test_login_requires_both_fields() {
        let view = admin(seeded());
        view.edit_login_form(|f| f.username = "admin".into());

        assert!(!view.login().await);
        assert!(view.gateway().calls().is_empty());
        assert!(view.notifier().last().unwrap().is_error());
    }

    #[tokio::test]
    async fn test_logout_clears_everything() {
        let view = logged_in(seeded(), AdminOptions::default()).await;
        fill_form(&view);

        view.logout();

        assert_eq!(view.state(), AdminState::LoggedOut);
        assert_eq!(view.session().get_token(), None);
        assert!(view.items().is_empty());
        assert_eq!(view.login_form(), LoginForm::default());
        assert!(view.form().name.is_empty());
    }

    #[tokio::test]
    async fn test_logout_while_offline() {
        let gw = seeded();
        let view = logged_in(gw, AdminOptions::default()).await;
        view.gateway().offline.set(true);
        view.refresh().await;

        view.logout();
        assert_eq!(view.state(), AdminState::LoggedOut);
        assert!(!view.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_create_refetches_and_resets_form() {
        let view = logged_in(seeded(), AdminOptions::default()).await;
        fill_form(&view);
        view.edit_form(|f| f.category_id = Some(2));

        assert!(view.submit_item().await);

        let calls = view.gateway().calls();
        match &calls[0] {
            Call::Create { item, token } => {
                assert_eq!(item.name, "New Person");
                assert_eq!(item.category_id, Some(2));
                assert_eq!(item.telegram_username.as_deref(), Some("@newbie"));
                assert_eq!(token.as_deref(), Some("tok-123"));
            }
            other => panic!("expected create, got {:?}", other),
        }
        assert!(calls[1..].contains(&Call::ListItems));

        // Shown list equals a fresh fetch
        assert_eq!(view.items(), view.gateway().items.borrow().clone());
        assert_eq!(view.items().len(), 3);

        let form = view.form();
        assert!(form.name.is_empty() && form.image_url.is_empty() && form.bio.is_empty());
        assert_eq!(form.category_id, Some(1));
        assert!(!view.is_loading());
    }

    #[tokio::test]
    async fn test_create_requires_fields() {
        let view = logged_in(seeded(), AdminOptions::default()).await;
        view.edit_form(|f| f.name = "Only name".into());

        assert!(!view.submit_item().await);
        assert!(view.gateway().calls().is_empty());

        let note = view.notifier().last().unwrap();
        assert!(note.description.contains("image URL"));
        assert!(note.description.contains("bio"));
        assert!(!note.description.contains("name"));
    }

    #[tokio::test]
    async fn test_create_failure_keeps_form() {
        let gw = seeded();
        gw.reject_mutations.set(true);
        let view = logged_in(gw, AdminOptions::default()).await;
        fill_form(&view);

        assert!(!view.submit_item().await);
        assert_eq!(view.form().name, "New Person");
        assert_eq!(view.notifier().last(), Some(Notification::add_failed()));
        assert_eq!(view.gateway().count(|c| *c == Call::ListItems), 0);
    }

    #[tokio::test]
    async fn test_create_network_failure_keeps_form() {
        let view = logged_in(seeded(), AdminOptions::default()).await;
        view.gateway().offline.set(true);
        fill_form(&view);

        assert!(!view.submit_item().await);
        assert_eq!(view.form().name, "New Person");
        assert_eq!(view.notifier().last(), Some(Notification::connection_failed()));
        assert!(!view.is_loading());
    }

    #[tokio::test]
    async fn test_submit_ignored_when_logged_out() {
        let view = admin(seeded());
        fill_form(&view);
        assert!(!view.submit_item().await);
        assert!(view.gateway().calls().is_empty());
    }

    #[tokio::test]
    async fn test_declined_delete_sends_nothing() {
        let view = logged_in(seeded(), AdminOptions::default()).await;

        let outcome = view.delete_item(1, || false).await;

        assert_eq!(outcome, DeleteOutcome::Declined);
        assert!(view.gateway().calls().is_empty());
        assert_eq!(ids(&view.items()), vec![1, 2]);
    }

    #[tokio::test]
    async fn test_confirmed_delete_refetches() {
        let view = logged_in(seeded(), AdminOptions::default()).await;
        let mut asked = 0;

        let outcome = view
            .delete_item(1, || {
                asked += 1;
                true
            })
            .await;

        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(asked, 1);
        assert_eq!(
            view.gateway().calls()[0],
            Call::Delete {
                id: 1,
                token: Some("tok-123".into())
            }
        );
        assert_eq!(ids(&view.items()), vec![2]);
        assert_eq!(view.notifier().entries()[0], Notification::item_deleted());
    }

    #[tokio::test]
    async fn test_immediate_policy_never_prompts() {
        let options = AdminOptions {
            delete_policy: DeletePolicy::Immediate,
            default_category: None,
        };
        let view = logged_in(seeded(), options).await;

        let outcome = view.delete_item(2, || panic!("must not prompt")).await;
        assert_eq!(outcome, DeleteOutcome::Deleted);
        assert_eq!(ids(&view.items()), vec![1]);
    }

    #[tokio::test]
    async fn test_refused_delete_keeps_list() {
        let gw = seeded();
        gw.reject_mutations.set(true);
        let view = logged_in(gw, AdminOptions::default()).await;

        assert_eq!(view.delete_item(1, || true).await, DeleteOutcome::Failed);
        assert_eq!(ids(&view.items()), vec![1, 2]);
        assert_eq!(view.notifier().last(), Some(Notification::delete_failed()));
    }

    #[tokio::test]
    async fn test_upload_rejects_locally() {
        let view = logged_in(seeded(), AdminOptions::default()).await;

        let big = UploadFile::new("big.png", "image/png", vec![0; (MAX_UPLOAD_BYTES + 1) as usize]);
        assert_eq!(view.upload_image(big).await, None);

        let pdf = UploadFile::new("doc.pdf", "application/pdf", vec![1, 2, 3]);
        assert_eq!(view.upload_image(pdf).await, None);

        assert!(view.gateway().calls().is_empty());
        let notes = view.notifier().entries();
        assert_eq!(notes.len(), 2);
        assert!(notes.iter().all(Notification::is_error));
    }

    #[tokio::test]
    async fn test_upload_fills_form() {
        let view = logged_in(seeded(), AdminOptions::default()).await;
        let file = UploadFile::new("face.jpg", "image/jpeg", vec![1, 2, 3]);

        let url = view.upload_image(file).await;

        assert_eq!(url.as_deref(), Some("https://cdn.example/uploaded.png"));
        assert_eq!(view.form().image_url, "https://cdn.example/uploaded.png");
        assert!(!view.is_uploading());
        assert_eq!(
            view.gateway().calls(),
            vec![Call::Upload {
                name: "face.jpg".into(),
                token: Some("tok-123".into())
            }]
        );
    }

    #[tokio::test]
    async fn test_upload_without_url_is_failure() {
        let gw = seeded();
        *gw.upload_url.borrow_mut() = None;
        let view = logged_in(gw, AdminOptions::default()).await;
        view.edit_form(|f| f.image_url = "https://keep.example/me.jpg".into());

        let file = UploadFile::new("face.jpg", "image/jpeg", vec![1]);
        assert_eq!(view.upload_image(file).await, None);
        assert_eq!(view.form().image_url, "https://keep.example/me.jpg");
        assert_eq!(view.notifier().last(), Some(Notification::upload_failed()));
    }

    fn asset(n: u32) -> ImageAsset {
        ImageAsset {
            url: format!("https://cdn.example/{n}.jpg"),
            name: format!("{n}.jpg"),
            size: 1000,
            uploaded_at: "2025-10-25T04:00:00Z".into(),
        }
    }

    #[tokio::test]
    async fn test_picker_selection_fills_form_once() {
        let gw = seeded();
        *gw.images.borrow_mut() = vec![asset(1), asset(2)];
        let view = logged_in(gw, AdminOptions::default()).await;

        view.open_picker().await;
        assert_eq!(view.picker_state(), PickerState::Populated);
        assert!(!view.can_confirm_picker());
        assert!(!view.confirm_picker());

        assert!(view.select_image(&asset(2).url));
        assert!(view.confirm_picker());
        assert_eq!(view.form().image_url, asset(2).url);
        assert_eq!(view.picker_state(), PickerState::Closed);

        // A second confirm has nothing to commit
        assert!(!view.confirm_picker());
    }

    #[tokio::test]
    async fn test_picker_cancel_leaves_form() {
        let gw = seeded();
        *gw.images.borrow_mut() = vec![asset(1)];
        let view = logged_in(gw, AdminOptions::default()).await;

        view.open_picker().await;
        view.select_image(&asset(1).url);
        view.cancel_picker();

        assert_eq!(view.picker_state(), PickerState::Closed);
        assert!(view.form().image_url.is_empty());
    }

    #[tokio::test]
    async fn test_picker_empty() {
        let view = logged_in(seeded(), AdminOptions::default()).await;
        view.open_picker().await;
        assert_eq!(view.picker_state(), PickerState::Empty);
    }

    #[tokio::test]
    async fn test_picker_ignores_superseded_response() {
        let gw = seeded();
        {
            let mut script = gw.image_script.borrow_mut();
            script.push_back((5, vec![asset(1)]));
            script.push_back((0, vec![asset(2), asset(3)]));
        }
        let view = logged_in(gw, AdminOptions::default()).await;

        // Second opening answers first; the slow first answer must be dropped
        join(view.open_picker(), view.open_picker()).await;

        assert_eq!(view.picker_images(), vec![asset(2), asset(3)]);
        assert_eq!(view.picker_state(), PickerState::Populated);
    }

    #[tokio::test]
    async fn test_logout_during_mount_fetch_keeps_view_empty() {
        let gw = seeded();
        gw.delay.set(5);
        let view = admin(gw);
        view.session().set_token("stored").unwrap();

        let (state, _) = join(view.mount(), async {
            tokio::task::yield_now().await;
            view.logout();
        })
        .await;

        assert_eq!(state, AdminState::LoggedOut);
        assert_eq!(view.session().get_token(), None);
        assert!(view.items().is_empty());
        assert!(view.categories().is_empty());
        assert_eq!(view.form(), ItemForm::default());
    }

    #[tokio::test]
    async fn test_logout_during_create_skips_reset_and_notice() {
        let view = logged_in(seeded(), AdminOptions::default()).await;
        fill_form(&view);
        view.gateway().delay.set(5);

        let (created, _) = join(view.submit_item(), async {
            tokio::task::yield_now().await;
            view.logout();
        })
        .await;

        assert!(!created);
        assert!(!view.is_loading());
        assert!(view.items().is_empty());
        assert_eq!(view.form(), ItemForm::default());
        assert!(view.notifier().entries().is_empty());
        assert_eq!(view.gateway().count(|c| *c == Call::ListItems), 0);
    }

    #[tokio::test]
    async fn test_logout_during_upload_leaves_form_alone() {
        let view = logged_in(seeded(), AdminOptions::default()).await;
        view.gateway().delay.set(3);
        let file = UploadFile::new("me.png", "image/png", vec![0u8; 16]);

        let (url, _) = join(view.upload_image(file), async {
            tokio::task::yield_now().await;
            view.logout();
        })
        .await;

        assert_eq!(url, None);
        assert!(!view.is_uploading());
        assert_eq!(view.form().image_url, "");
        assert!(view.notifier().entries().is_empty());
    }

    #[tokio::test]
    async fn test_double_submit_creates_once() {
        let view = logged_in(seeded(), AdminOptions::default()).await;
        fill_form(&view);

        let (first, second) = join(view.submit_item(), view.submit_item()).await;

        assert!(first);
        assert!(!second);
        assert_eq!(view.gateway().count(|c| matches!(c, Call::Create { .. })), 1);
    }
}
