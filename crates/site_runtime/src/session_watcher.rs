//! Identity-provider session tracking.
//!
//! The watcher funnels the startup read and every later change notification through one handler
//! and owns the provider subscription for the lifetime of the runtime.

use platform_host::{IdentityProvider, SessionChangeHandler, SessionEvent, SessionSubscription};
use tracing::{debug, warn};

#[derive(Debug)]
pub struct SessionWatcher {
    subscription: Option<SessionSubscription>,
}

impl SessionWatcher {
    /// Reads the current session once, hands it to `handler`, then subscribes `handler` to
    /// later changes. A failed read counts as "no session".
    pub async fn start(identity: &dyn IdentityProvider, handler: SessionChangeHandler) -> Self {
        let initial = match identity.current_session().await {
            Ok(session) => session,
            Err(err) => {
                warn!(error = %err, "initial session read failed; continuing signed out");
                None
            }
        };
        debug!(present = initial.is_some(), "initial session read");
        handler(SessionEvent::InitialSession, initial);

        Self {
            subscription: Some(identity.subscribe(handler)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(SessionSubscription::is_active)
    }

    /// Releases the provider subscription. Later calls are no-ops.
    pub fn stop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
    }
}
