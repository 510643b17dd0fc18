use std::cell::RefCell;
use std::rc::Rc;

use shared::User;

use crate::services::auth_store::AuthStore;
use crate::services::logging::Logger;
use crate::services::subscription::{Listeners, Subscription};

/// Mirror of the auth store's current record for the UI.
///
/// The snapshot is replaced on every store notification before this
/// bridge's own subscribers run, so they always read the latest user.
#[derive(Clone)]
pub struct CurrentUser {
    user: Rc<RefCell<Option<User>>>,
    listeners: Listeners<Option<User>>,
    _store_subscription: Rc<Subscription>,
}

impl CurrentUser {
    /// Start mirroring `store`, seeded with its current record
    pub fn bind(store: &AuthStore) -> Self {
        let user = Rc::new(RefCell::new(store.record()));
        let listeners = Listeners::new();

        let subscription = {
            let user = user.clone();
            let listeners = listeners.clone();
            store.on_change(move |state| {
                Logger::debug_with_component(
                    "auth",
                    &format!(
                        "Auth store changed: {}",
                        state
                            .record
                            .as_ref()
                            .map(|record| format!("signed in as {}", record.id))
                            .unwrap_or_else(|| "signed out".to_string())
                    ),
                );

                *user.borrow_mut() = state.record.clone();
                listeners.emit(&state.record);
            })
        };

        Self {
            user,
            listeners,
            _store_subscription: Rc::new(subscription),
        }
    }

    /// Current user snapshot, `None` when anonymous
    pub fn get(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.borrow().is_some()
    }

    /// Called with the new snapshot after each auth change
    pub fn subscribe(&self, handler: impl Fn(&Option<User>) + 'static) -> Subscription {
        self.listeners.add(handler)
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.user, &other.user)
    }
}

impl PartialEq for CurrentUser {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl std::fmt::Debug for CurrentUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurrentUser")
            .field("user", &self.user.borrow().as_ref().map(|user| &user.id))
            .finish()
    }
}
