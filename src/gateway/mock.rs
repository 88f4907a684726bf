//! Scripted in-memory gateway for controller tests.

use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use super::{Gateway, GatewayError, GatewayResult};
use crate::models::{Category, Credentials, ImageAsset, Item, ItemId, LoginResponse, NewItem};
use crate::upload::UploadFile;

/// A request the gateway received
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login(String),
    ListItems,
    ListCategories,
    Create { item: NewItem, token: Option<String> },
    Delete { id: ItemId, token: Option<String> },
    Upload { name: String, token: Option<String> },
    ListImages,
}

/// Behaves like the real endpoints backed by in-memory lists
pub struct MockGateway {
    pub items: RefCell<Vec<Item>>,
    pub categories: RefCell<Vec<Category>>,
    pub images: RefCell<Vec<ImageAsset>>,
    /// `(username, password, token)` accepted by `login`
    pub account: RefCell<(String, String, Option<String>)>,
    /// Every call fails with a connection error
    pub offline: Cell<bool>,
    /// Mutations answer `success: false`
    pub reject_mutations: Cell<bool>,
    /// URL returned by `upload_image`
    pub upload_url: RefCell<Option<String>>,
    /// Per-call `(yields, images)` answers for `list_images`; the call
    /// yields to the executor that many times before answering
    pub image_script: RefCell<VecDeque<(usize, Vec<ImageAsset>)>>,
    /// Times `list_items` and the mutations yield before answering
    pub delay: Cell<usize>,
    calls: RefCell<Vec<Call>>,
    next_id: Cell<ItemId>,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self {
            items: RefCell::new(Vec::new()),
            categories: RefCell::new(Vec::new()),
            images: RefCell::new(Vec::new()),
            account: RefCell::new(("admin".into(), "secret".into(), Some("tok-123".into()))),
            offline: Cell::new(false),
            reject_mutations: Cell::new(false),
            upload_url: RefCell::new(Some("https://cdn.example/uploaded.png".into())),
            image_script: RefCell::new(VecDeque::new()),
            delay: Cell::new(0),
            calls: RefCell::new(Vec::new()),
            next_id: Cell::new(100),
        }
    }
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(items: Vec<Item>, categories: Vec<Category>) -> Self {
        let gw = Self::default();
        *gw.items.borrow_mut() = items;
        *gw.categories.borrow_mut() = categories;
        gw
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    async fn pause(&self) {
        for _ in 0..self.delay.get() {
            tokio::task::yield_now().await;
        }
    }

    fn record(&self, call: Call) -> GatewayResult<()> {
        self.calls.borrow_mut().push(call);
        if self.offline.get() {
            Err(GatewayError::Unavailable)
        } else {
            Ok(())
        }
    }
}

#[async_trait(?Send)]
impl Gateway for MockGateway {
    async fn login(&self, credentials: &Credentials) -> GatewayResult<LoginResponse> {
        self.record(Call::Login(credentials.username.clone()))?;
        let (user, pass, token) = self.account.borrow().clone();
        if credentials.username == user && credentials.password == pass {
            Ok(LoginResponse {
                success: true,
                token,
            })
        } else {
            Ok(LoginResponse {
                success: false,
                token: None,
            })
        }
    }

    async fn list_items(&self) -> GatewayResult<Vec<Item>> {
        self.record(Call::ListItems)?;
        self.pause().await;
        Ok(self.items.borrow().clone())
    }

    async fn list_categories(&self) -> GatewayResult<Vec<Category>> {
        self.record(Call::ListCategories)?;
        Ok(self.categories.borrow().clone())
    }

    async fn create_item(&self, item: &NewItem, token: Option<&str>) -> GatewayResult<bool> {
        self.record(Call::Create {
            item: item.clone(),
            token: token.map(str::to_string),
        })?;
        self.pause().await;
        if self.reject_mutations.get() {
            return Ok(false);
        }

        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.items.borrow_mut().insert(
            0,
            Item {
                id,
                image_url: item.image_url.clone(),
                name: item.name.clone(),
                bio: item.bio.clone(),
                category_id: item.category_id,
                category_name: None,
                category_color: None,
                telegram_username: item.telegram_username.clone(),
                created_at: "2025-10-25T04:00:00".into(),
            },
        );
        Ok(true)
    }

    async fn delete_item(&self, id: ItemId, token: Option<&str>) -> GatewayResult<bool> {
        self.record(Call::Delete {
            id,
            token: token.map(str::to_string),
        })?;
        self.pause().await;
        if self.reject_mutations.get() {
            return Ok(false);
        }
        self.items.borrow_mut().retain(|item| item.id != id);
        Ok(true)
    }

    async fn upload_image(
        &self,
        file: &UploadFile,
        token: Option<&str>,
    ) -> GatewayResult<Option<String>> {
        self.record(Call::Upload {
            name: file.name.clone(),
            token: token.map(str::to_string),
        })?;
        self.pause().await;
        Ok(self.upload_url.borrow().clone())
    }

    async fn list_images(&self) -> GatewayResult<Vec<ImageAsset>> {
        self.record(Call::ListImages)?;
        let scripted = self.image_script.borrow_mut().pop_front();
        match scripted {
            Some((yields, images)) => {
                for _ in 0..yields {
                    tokio::task::yield_now().await;
                }
                Ok(images)
            }
            None => Ok(self.images.borrow().clone()),
        }
    }
}
