//! # `localStorage` token store: browser-side persistence
//!
//! [`LocalStorageTokenStore`] keeps the bearer token under
//! [`TOKEN_KEY`](crate::token::TOKEN_KEY) in the browser's `localStorage`, so a
//! reload of the dashboard resumes the session.
//!
//! All operations swallow errors (private browsing, disabled storage) and log
//! them. A missing store degrades to "logged out" rather than breaking the app.

use crate::token::{TokenStore, TOKEN_KEY};

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageTokenStore;

impl LocalStorageTokenStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        match web_sys::window()?.local_storage() {
            Ok(storage) => storage,
            Err(e) => {
                tracing::warn!("localStorage unavailable: {e:?}");
                None
            }
        }
    }
}

impl TokenStore for LocalStorageTokenStore {
    fn load(&self) -> Option<String> {
        Self::storage()?.get_item(TOKEN_KEY).ok().flatten()
    }

    fn save(&self, token: &str) {
        if let Some(storage) = Self::storage() {
            if let Err(e) = storage.set_item(TOKEN_KEY, token) {
                tracing::warn!("failed to persist token: {e:?}");
            }
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            if let Err(e) = storage.remove_item(TOKEN_KEY) {
                tracing::warn!("failed to clear token: {e:?}");
            }
        }
    }
}
