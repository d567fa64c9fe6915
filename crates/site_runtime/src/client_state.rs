//! Typed client-side flags over injected storage backends.
//!
//! Profile and consent live in durable storage; the splash and admin-session flags live in
//! session storage. Every read or write failure fails open to the default value and is logged,
//! never returned to the caller.

use std::rc::Rc;

use platform_host::{load_typed_with, save_typed_with, ClientStorage};
use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

use crate::model::{BootState, Profile};

const PROFILE_KEY: &str = "site.profile.v1";
const CONSENT_KEY: &str = "site.consent.v1";
const SPLASH_SHOWN_KEY: &str = "site.splash_shown.v1";
const ADMIN_SESSION_KEY: &str = "site.admin_session.v1";

#[derive(Clone)]
pub struct ClientStateStore {
    durable: Rc<dyn ClientStorage>,
    session: Rc<dyn ClientStorage>,
}

impl ClientStateStore {
    pub fn new(durable: Rc<dyn ClientStorage>, session: Rc<dyn ClientStorage>) -> Self {
        Self { durable, session }
    }

    pub fn profile_store(&self) -> ProfileStore {
        ProfileStore {
            state: self.clone(),
        }
    }

    pub fn load_boot_state(&self) -> BootState {
        BootState {
            profile: self.profile_store().get(),
            consent_given: self.consent_given(),
            splash_shown: self.splash_shown(),
            admin_unlocked: self.admin_session(),
        }
    }

    pub fn consent_given(&self) -> bool {
        read_or_default(self.durable.as_ref(), CONSENT_KEY)
    }

    pub fn set_consent_given(&self, given: bool) {
        write_or_warn(self.durable.as_ref(), CONSENT_KEY, &given);
    }

    pub fn splash_shown(&self) -> bool {
        read_or_default(self.session.as_ref(), SPLASH_SHOWN_KEY)
    }

    pub fn mark_splash_shown(&self) {
        write_or_warn(self.session.as_ref(), SPLASH_SHOWN_KEY, &true);
    }

    pub fn admin_session(&self) -> bool {
        read_or_default(self.session.as_ref(), ADMIN_SESSION_KEY)
    }

    pub fn set_admin_session(&self, unlocked: bool) {
        if unlocked {
            write_or_warn(self.session.as_ref(), ADMIN_SESSION_KEY, &true);
        } else {
            self.clear_admin_session();
        }
    }

    pub fn clear_admin_session(&self) {
        delete_or_warn(self.session.as_ref(), ADMIN_SESSION_KEY);
    }
}

/// Persisted age-profile facet of [`ClientStateStore`].
#[derive(Clone)]
pub struct ProfileStore {
    state: ClientStateStore,
}

impl ProfileStore {
    /// Persisted profile, or `Unset` when absent or unreadable.
    pub fn get(&self) -> Profile {
        read_or_default(self.state.durable.as_ref(), PROFILE_KEY)
    }

    /// Persists a defined profile. `Unset` is stored by [`ProfileStore::clear`] instead.
    pub fn set(&self, profile: Profile) {
        if profile.is_set() {
            write_or_warn(self.state.durable.as_ref(), PROFILE_KEY, &profile);
        } else {
            self.clear();
        }
    }

    pub fn clear(&self) {
        delete_or_warn(self.state.durable.as_ref(), PROFILE_KEY);
    }
}

fn read_or_default<T: DeserializeOwned + Default>(store: &dyn ClientStorage, key: &str) -> T {
    match load_typed_with::<_, T>(store, key) {
        Ok(value) => value.unwrap_or_default(),
        Err(err) => {
            warn!(key, scope = store.scope().as_str(), error = %err, "client state read failed");
            T::default()
        }
    }
}

fn write_or_warn<T: Serialize>(store: &dyn ClientStorage, key: &str, value: &T) {
    if let Err(err) = save_typed_with(store, key, value) {
        warn!(key, scope = store.scope().as_str(), error = %err, "client state write failed");
    }
}

fn delete_or_warn(store: &dyn ClientStorage, key: &str) {
    if let Err(err) = store.delete_raw(key) {
        warn!(key, scope = store.scope().as_str(), error = %err, "client state delete failed");
    }
}
