//! Identity-provider contracts, subscription tokens, and in-memory adapters.

use std::{
    cell::RefCell,
    collections::BTreeMap,
    fmt,
    future::Future,
    pin::Pin,
    rc::{Rc, Weak},
};

use serde::{Deserialize, Serialize};

/// Object-safe boxed future used by [`IdentityProvider`] async methods.
pub type IdentityFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Callback invoked for every session-change notification.
pub type SessionChangeHandler = Rc<dyn Fn(SessionEvent, Option<AuthSession>)>;

/// Opaque authenticated-session handle owned by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Provider-assigned user id.
    pub user_id: String,
    /// Email address, when the provider exposes one.
    pub email: Option<String>,
}

impl AuthSession {
    /// Creates a session handle for `user_id` without an email.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: None,
        }
    }
}

/// Kind of session-change notification emitted by an identity provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// Result of the one-shot startup read.
    InitialSession,
    /// A user signed in.
    SignedIn,
    /// The current user signed out.
    SignedOut,
    /// The provider refreshed the session token.
    TokenRefreshed,
    /// The provider updated user attributes.
    UserUpdated,
}

/// Exclusively-owned listener registration returned by [`IdentityProvider::subscribe`].
///
/// The release callback runs exactly once, on [`SessionSubscription::unsubscribe`] or on drop.
pub struct SessionSubscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl SessionSubscription {
    /// Wraps a release callback.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Subscription with nothing to release (providers without change notifications).
    pub fn detached() -> Self {
        Self { release: None }
    }

    /// Returns whether the release callback has not run yet.
    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    /// Releases the registration now.
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for SessionSubscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl fmt::Debug for SessionSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionSubscription")
            .field("active", &self.is_active())
            .finish()
    }
}

/// Host service exposing the identity provider's session lifecycle.
pub trait IdentityProvider {
    /// One-shot read of the current session.
    fn current_session(&self) -> IdentityFuture<'_, Result<Option<AuthSession>, String>>;

    /// Registers `handler` for login, logout, and token-refresh notifications.
    fn subscribe(&self, handler: SessionChangeHandler) -> SessionSubscription;

    /// Ends the current session.
    fn sign_out(&self) -> IdentityFuture<'_, Result<(), String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Identity provider for builds without authentication: never signed in.
pub struct NoopIdentityProvider;

impl IdentityProvider for NoopIdentityProvider {
    fn current_session(&self) -> IdentityFuture<'_, Result<Option<AuthSession>, String>> {
        Box::pin(async { Ok(None) })
    }

    fn subscribe(&self, _handler: SessionChangeHandler) -> SessionSubscription {
        SessionSubscription::detached()
    }

    fn sign_out(&self) -> IdentityFuture<'_, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

#[derive(Default)]
struct MemoryIdentityState {
    session: Option<AuthSession>,
    listeners: BTreeMap<u64, SessionChangeHandler>,
    next_listener_id: u64,
    sign_out_calls: usize,
    initial_read_error: Option<String>,
}

#[derive(Clone, Default)]
/// In-memory identity provider with manual event emission. Clones share state.
pub struct MemoryIdentityProvider {
    inner: Rc<RefCell<MemoryIdentityState>>,
}

impl MemoryIdentityProvider {
    /// Creates a provider that already holds `session`.
    pub fn with_session(session: AuthSession) -> Self {
        let provider = Self::default();
        provider.inner.borrow_mut().session = Some(session);
        provider
    }

    /// Makes the next [`IdentityProvider::current_session`] call fail with `message`.
    pub fn fail_initial_read(&self, message: impl Into<String>) {
        self.inner.borrow_mut().initial_read_error = Some(message.into());
    }

    /// Stores `session` and notifies listeners with [`SessionEvent::SignedIn`].
    pub fn sign_in(&self, session: AuthSession) {
        self.inner.borrow_mut().session = Some(session);
        self.emit(SessionEvent::SignedIn);
    }

    /// Notifies listeners with [`SessionEvent::TokenRefreshed`] for the current session.
    pub fn refresh_token(&self) {
        self.emit(SessionEvent::TokenRefreshed);
    }

    /// Number of live listener registrations.
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }

    /// Number of completed [`IdentityProvider::sign_out`] calls.
    pub fn sign_out_calls(&self) -> usize {
        self.inner.borrow().sign_out_calls
    }

    fn emit(&self, event: SessionEvent) {
        // Listeners may re-enter the provider, so no borrow is held while they run.
        let (session, listeners) = {
            let state = self.inner.borrow();
            let listeners: Vec<_> = state.listeners.values().cloned().collect();
            (state.session.clone(), listeners)
        };
        for listener in listeners {
            listener(event, session.clone());
        }
    }
}

impl IdentityProvider for MemoryIdentityProvider {
    fn current_session(&self) -> IdentityFuture<'_, Result<Option<AuthSession>, String>> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            if let Some(err) = state.initial_read_error.take() {
                return Err(err);
            }
            Ok(state.session.clone())
        })
    }

    fn subscribe(&self, handler: SessionChangeHandler) -> SessionSubscription {
        let id = {
            let mut state = self.inner.borrow_mut();
            let id = state.next_listener_id;
            state.next_listener_id += 1;
            state.listeners.insert(id, handler);
            id
        };
        let weak: Weak<RefCell<MemoryIdentityState>> = Rc::downgrade(&self.inner);
        SessionSubscription::new(move || {
            if let Some(inner) = weak.upgrade() {
                inner.borrow_mut().listeners.remove(&id);
            }
        })
    }

    fn sign_out(&self) -> IdentityFuture<'_, Result<(), String>> {
        Box::pin(async move {
            {
                let mut state = self.inner.borrow_mut();
                state.session = None;
                state.sign_out_calls += 1;
            }
            self.emit(SessionEvent::SignedOut);
            Ok(())
        })
    }
}
