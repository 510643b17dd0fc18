use std::cell::RefCell;
use std::rc::Rc;

use gloo::storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};
use shared::User;

use crate::services::logging::Logger;
use crate::services::subscription::{Listeners, Subscription};

/// Local storage key the hosted SDKs use for the auth state
pub const AUTH_STORAGE_KEY: &str = "pocketbase_auth";

/// Token plus the authenticated record, empty when signed out
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthState {
    pub token: String,
    #[serde(rename = "model", alias = "record", default)]
    pub record: Option<User>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty() && self.record.is_some()
    }
}

/// Where the auth state survives page reloads
pub trait AuthPersistence {
    fn load(&self) -> Option<AuthState>;
    fn save(&self, state: &AuthState);
    fn clear(&self);
}

/// Browser local storage backend
pub struct LocalStorageAuth {
    key: String,
}

impl LocalStorageAuth {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Default for LocalStorageAuth {
    fn default() -> Self {
        Self::new(AUTH_STORAGE_KEY)
    }
}

impl AuthPersistence for LocalStorageAuth {
    fn load(&self) -> Option<AuthState> {
        LocalStorage::get::<AuthState>(&self.key).ok()
    }

    fn save(&self, state: &AuthState) {
        if let Err(e) = LocalStorage::set(&self.key, state) {
            Logger::warn_with_component("auth", &format!("Failed to persist auth state: {}", e));
        }
    }

    fn clear(&self) {
        LocalStorage::delete(&self.key);
    }
}

/// Holds the current auth token and record and tells listeners when they change.
///
/// Cloning shares the same store. Every `save` and `clear` notifies, which
/// covers sign-in, sign-out and token refresh alike.
#[derive(Clone)]
pub struct AuthStore {
    state: Rc<RefCell<AuthState>>,
    listeners: Listeners<AuthState>,
    persistence: Option<Rc<dyn AuthPersistence>>,
}

impl AuthStore {
    /// In-memory store that forgets everything on reload
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(AuthState::default())),
            listeners: Listeners::new(),
            persistence: None,
        }
    }

    /// Store backed by `persistence`, seeded from whatever it has saved
    pub fn with_persistence(persistence: impl AuthPersistence + 'static) -> Self {
        let initial = persistence.load().unwrap_or_default();
        Self {
            state: Rc::new(RefCell::new(initial)),
            listeners: Listeners::new(),
            persistence: Some(Rc::new(persistence)),
        }
    }

    pub fn token(&self) -> String {
        self.state.borrow().token.clone()
    }

    pub fn record(&self) -> Option<User> {
        self.state.borrow().record.clone()
    }

    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Replace the token and record, then notify
    pub fn save(&self, token: impl Into<String>, record: Option<User>) {
        {
            let mut state = self.state.borrow_mut();
            state.token = token.into();
            state.record = record;
        }

        if let Some(persistence) = &self.persistence {
            persistence.save(&self.state.borrow());
        }
        self.notify();
    }

    /// Forget the token and record, then notify
    pub fn clear(&self) {
        *self.state.borrow_mut() = AuthState::default();

        if let Some(persistence) = &self.persistence {
            persistence.clear();
        }
        self.notify();
    }

    /// Register a handler that receives the new state after every change
    pub fn on_change(&self, handler: impl Fn(&AuthState) + 'static) -> Subscription {
        self.listeners.add(handler)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }

    fn notify(&self) {
        let snapshot = self.snapshot();
        self.listeners.emit(&snapshot);
    }
}

impl Default for AuthStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for AuthStore {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl std::fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("AuthStore")
            .field("authenticated", &state.is_authenticated())
            .field("record", &state.record.as_ref().map(|record| &record.id))
            .field("listeners", &self.listeners.len())
            .field("persistent", &self.persistence.is_some())
            .finish()
    }
}
