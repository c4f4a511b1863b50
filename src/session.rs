//! Session Store
//!
//! Holds the bearer credential. Durable storage is read once at startup
//! (`Session::init`); afterwards the in-memory signal is authoritative and
//! every change is written through to storage.

use std::sync::{Arc, Mutex};

use leptos::prelude::*;

use crate::error::ApiError;

/// Durable home of the credential
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str);
    fn clear(&self);
}

/// Browser `localStorage`, one key
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl CredentialStore for LocalStorageStore {
    fn load(&self) -> Option<String> {
        Self::storage().and_then(|s| s.get_item(&self.key).ok().flatten())
    }

    fn save(&self, token: &str) {
        if let Some(storage) = Self::storage() {
            if storage.set_item(&self.key, token).is_err() {
                log::warn!("[SESSION] localStorage rejected the credential");
            }
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(&self.key);
        }
    }
}

/// In-memory store (tests, private browsing fallback)
#[derive(Default)]
pub struct MemoryStore {
    slot: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn with_token(token: &str) -> Self {
        Self { slot: Mutex::new(Some(token.to_string())) }
    }
}

impl CredentialStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|slot| slot.clone())
    }

    fn save(&self, token: &str) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(token.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

#[derive(Clone)]
pub struct Session {
    token: ArcRwSignal<Option<String>>,
    store: Arc<dyn CredentialStore>,
}

impl Session {
    /// Read durable storage once; a blank stored value counts as no session
    pub fn init(store: Arc<dyn CredentialStore>) -> Self {
        let token = store.load().filter(|t| !t.trim().is_empty());
        log::debug!("[SESSION] init, authenticated={}", token.is_some());
        Self {
            token: ArcRwSignal::new(token),
            store,
        }
    }

    /// Reactive: views and the route guard re-run when this changes
    pub fn state(&self) -> SessionState {
        if self.token.with(Option::is_some) {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    /// Current credential, without subscribing
    pub fn token(&self) -> Option<String> {
        self.token.get_untracked()
    }

    /// anonymous → authenticated; only a non-empty credential is accepted
    pub fn login(&self, token: &str) -> Result<(), ApiError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ApiError::Decode("login response carried no credential".to_string()));
        }
        self.store.save(token);
        self.token.set(Some(token.to_string()));
        log::info!("[SESSION] logged in");
        Ok(())
    }

    /// authenticated → anonymous, clearing memory and storage
    pub fn logout(&self) {
        self.store.clear();
        self.token.set(None);
        log::info!("[SESSION] logged out");
    }

    /// Credential rejected by the server (401 on an authenticated call)
    pub fn expire(&self) {
        if self.token.with_untracked(Option::is_none) {
            return;
        }
        log::warn!("[SESSION] credential rejected by server, signing out");
        self.store.clear();
        self.token.set(None);
    }
}
