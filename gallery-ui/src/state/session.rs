//! Browser session storage
//!
//! The admin token lives in `localStorage`, so it survives reloads and is
//! shared by tabs of the same origin.

use fame_gallery::{SessionError, TokenStore};
use wasm_bindgen::JsValue;

/// [`TokenStore`] over `window.localStorage`
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage, SessionError> {
        web_sys::window()
            .ok_or_else(|| SessionError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| SessionError::Unavailable("localStorage is disabled".to_string()))
    }
}

fn js_error(value: JsValue) -> SessionError {
    SessionError::Unavailable(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}

impl TokenStore for LocalStorageStore {
    fn load(&self, key: &str) -> Result<Option<String>, SessionError> {
        Self::storage()?.get_item(key).map_err(js_error)
    }

    fn store(&self, key: &str, value: &str) -> Result<(), SessionError> {
        Self::storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        Self::storage()?.remove_item(key).map_err(js_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fame_gallery::Session;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_token_survives_new_session() {
        Session::new(LocalStorageStore).set_token("tok-browser").unwrap();

        let session = Session::new(LocalStorageStore);
        assert_eq!(session.get_token().as_deref(), Some("tok-browser"));

        session.clear_token().unwrap();
        assert!(!Session::new(LocalStorageStore).is_authenticated());
    }
}
