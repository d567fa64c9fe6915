//! Runtime handle owning the site state, its effect queue, and the session subscription.
//!
//! All state changes go through [`SiteRuntime::dispatch`]. Reducer effects are queued and only
//! executed by [`SiteRuntime::tick`], which the view layer calls after each render pass; the same
//! tick applies pending guard redirects so navigation never happens mid-render.

use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use platform_host::{
    AuthSession, GeoCoordinate, HostCapabilities, HostServices, HostStrategy, SessionChangeHandler,
    SessionEvent,
};
use tracing::{debug, info, warn};

use crate::{
    admin_gate::AdminGateError,
    guards::{evaluate_guards, navigation_allowed, GuardOutcome},
    host::SiteHostContext,
    model::{NavState, PageId, Profile, RenderFrame, SiteState},
    reducer::{reduce_site, ReducerError, RuntimeEffect, SiteAction},
    search::SearchHost,
    session_watcher::SessionWatcher,
};

type ChangeListener = Rc<dyn Fn()>;

struct RuntimeInner {
    host: SiteHostContext,
    state: RefCell<SiteState>,
    effects: RefCell<Vec<RuntimeEffect>>,
    watcher: RefCell<Option<SessionWatcher>>,
    on_change: RefCell<Option<ChangeListener>>,
    deferred_path: RefCell<Option<String>>,
}

#[derive(Clone)]
/// Shared handle to one site runtime instance.
pub struct SiteRuntime {
    inner: Rc<RuntimeInner>,
}

impl SiteRuntime {
    /// Builds a runtime over `services`, hydrating client flags from storage.
    pub fn new(services: HostServices) -> Self {
        let host = SiteHostContext::new(services);
        let boot = host.client_state().load_boot_state();
        info!(
            host = host.host_strategy().as_str(),
            profile = boot.profile.as_str(),
            "site runtime starting"
        );
        Self {
            inner: Rc::new(RuntimeInner {
                host,
                state: RefCell::new(SiteState::from_boot(boot)),
                effects: RefCell::new(Vec::new()),
                watcher: RefCell::new(None),
                on_change: RefCell::new(None),
                deferred_path: RefCell::new(None),
            }),
        }
    }

    pub fn snapshot(&self) -> SiteState {
        self.inner.state.borrow().clone()
    }

    pub fn with_state<R>(&self, read: impl FnOnce(&SiteState) -> R) -> R {
        read(&self.inner.state.borrow())
    }

    pub fn capabilities(&self) -> HostCapabilities {
        self.inner.host.capabilities()
    }

    pub fn host_strategy(&self) -> HostStrategy {
        self.inner.host.host_strategy()
    }

    /// Registers the callback fired after every accepted action.
    pub fn set_change_listener(&self, listener: impl Fn() + 'static) {
        *self.inner.on_change.borrow_mut() = Some(Rc::new(listener));
    }

    /// Reduces `action` and queues its effects for the next [`SiteRuntime::tick`].
    ///
    /// # Errors
    ///
    /// Returns the reducer's rejection; state and queue are unchanged in that case.
    pub fn dispatch(&self, action: SiteAction) -> Result<(), ReducerError> {
        let effects = {
            let mut state = self.inner.state.borrow_mut();
            reduce_site(&mut state, action)?
        };
        self.inner.effects.borrow_mut().extend(effects);
        self.notify();
        self.resume_deferred_path();
        Ok(())
    }

    fn resume_deferred_path(&self) {
        if !self.with_state(|state| state.profile.is_set()) {
            return;
        }
        let path = self.inner.deferred_path.borrow_mut().take();
        if let Some(path) = path {
            debug!(path = %path, "opening deferred path");
            if let Err(err) = self.open_path(&path) {
                warn!(error = %err, "deferred path rejected");
            }
        }
    }

    fn notify(&self) {
        let listener = self.inner.on_change.borrow().clone();
        if let Some(listener) = listener {
            listener();
        }
    }

    pub fn pending_effects(&self) -> usize {
        self.inner.effects.borrow().len()
    }

    /// What the view layer should show for the current state. Never mutates.
    pub fn render(&self) -> RenderFrame {
        render_frame(&self.inner.state.borrow())
    }

    /// Post-render pass: applies a pending guard redirect, then drains queued effects.
    pub fn tick(&self) {
        let redirect = self.with_state(|state| {
            match evaluate_guards(state.profile, &state.nav) {
                GuardOutcome::Redirect(target) => Some((state.nav.page, target)),
                GuardOutcome::Render | GuardOutcome::AwaitProfile => None,
            }
        });
        if let Some((from, to)) = redirect {
            info!(from = from.slug(), to = to.slug(), "guard redirect");
            if let Err(err) = self.navigate_to(to, None) {
                warn!(error = %err, "guard redirect rejected");
            }
        }

        loop {
            let queued = std::mem::take(&mut *self.inner.effects.borrow_mut());
            if queued.is_empty() {
                break;
            }
            for effect in queued {
                self.inner.host.run_runtime_effect(effect);
            }
        }
    }

    pub fn navigate_to(&self, page: PageId, sub_resource: Option<String>) -> Result<(), ReducerError> {
        self.dispatch(SiteAction::NavigateTo { page, sub_resource })
    }

    /// Navigates to a URL path such as `/article/coping-with-stress`. Unknown paths land on
    /// the not-found page.
    pub fn open_path(&self, path: &str) -> Result<(), ReducerError> {
        let nav = parse_path(path);
        if nav.page == PageId::NotFound {
            debug!(path, "unknown path");
        }
        self.navigate_to(nav.page, nav.sub_resource)
    }

    /// Opens the entry path of a page load. When the path needs a profile the visitor has not
    /// chosen yet, it is kept and opened as soon as one is set.
    pub fn open_initial_path(&self, path: &str) -> Result<(), ReducerError> {
        let page = parse_path(path).page;
        if navigation_allowed(self.with_state(|state| state.profile), page) {
            return self.open_path(path);
        }
        debug!(path, "deferring path until a profile is chosen");
        *self.inner.deferred_path.borrow_mut() = Some(path.to_string());
        Ok(())
    }

    pub fn choose_profile(&self, profile: Profile) -> Result<(), ReducerError> {
        self.dispatch(SiteAction::ChooseProfile { profile })
    }

    pub fn accept_consent(&self) {
        self.dispatch_infallible(SiteAction::AcceptConsent);
    }

    pub fn dismiss_splash(&self) {
        self.dispatch_infallible(SiteAction::DismissSplash);
    }

    pub fn toggle_mobile_nav(&self) {
        self.dispatch_infallible(SiteAction::ToggleMobileNav);
    }

    pub fn close_mobile_nav(&self) {
        self.dispatch_infallible(SiteAction::CloseMobileNav);
    }

    fn dispatch_infallible(&self, action: SiteAction) {
        if let Err(err) = self.dispatch(action) {
            warn!(error = %err, "unexpected reducer rejection");
        }
    }

    /// Reads the current session and subscribes to identity changes. Replaces any previous
    /// subscription.
    pub async fn start_session_watcher(&self) {
        let weak: Weak<RuntimeInner> = Rc::downgrade(&self.inner);
        let handler: SessionChangeHandler =
            Rc::new(move |event: SessionEvent, session: Option<AuthSession>| {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                debug!(?event, present = session.is_some(), "session change");
                SiteRuntime { inner }.dispatch_infallible(SiteAction::SessionChanged { session });
            });
        let identity = self.inner.host.identity();
        let watcher = SessionWatcher::start(identity.as_ref(), handler).await;
        let previous = self.inner.watcher.borrow_mut().replace(watcher);
        if let Some(mut previous) = previous {
            previous.stop();
        }
    }

    pub fn session_watcher_active(&self) -> bool {
        self.inner
            .watcher
            .borrow()
            .as_ref()
            .is_some_and(SessionWatcher::is_active)
    }

    /// Releases the identity subscription. Safe to call more than once.
    pub fn teardown(&self) {
        let watcher = self.inner.watcher.borrow_mut().take();
        if let Some(mut watcher) = watcher {
            watcher.stop();
            debug!("session watcher stopped");
        }
    }

    /// Signs out with the identity provider, then resets profile and navigation. A provider
    /// failure is logged and the local reset still happens.
    pub async fn logout(&self) {
        if let Err(err) = self.inner.host.identity().sign_out().await {
            warn!(error = %err, "identity sign-out failed");
        }
        self.dispatch_infallible(SiteAction::Logout);
    }

    /// Runs a provider search from the find-provider page and returns its request id.
    pub async fn search(
        &self,
        country: Option<String>,
        city: Option<String>,
        coordinate: Option<GeoCoordinate>,
    ) -> Result<u64, ReducerError> {
        self.ensure_search_page()?;
        Ok(self
            .inner
            .host
            .search_pipeline()
            .search(self, country, city, coordinate)
            .await)
    }

    pub async fn search_near_me(&self) -> Result<u64, ReducerError> {
        self.ensure_search_page()?;
        Ok(self.inner.host.search_pipeline().search_near_me(self).await)
    }

    fn ensure_search_page(&self) -> Result<(), ReducerError> {
        let page = self.with_state(|state| state.nav.page);
        if page == PageId::FindProvider {
            Ok(())
        } else {
            Err(ReducerError::SearchUnavailable(page))
        }
    }

    pub fn back_to_search_form(&self) {
        self.dispatch_infallible(SiteAction::BackToSearchForm);
    }

    pub fn retry_same_country(&self) {
        self.dispatch_infallible(SiteAction::RetrySameCountry);
    }

    pub async fn unlock_admin(&self, passphrase: &str) -> Result<(), AdminGateError> {
        self.inner.host.admin_gate().unlock(passphrase).await?;
        self.dispatch_infallible(SiteAction::AdminUnlocked);
        Ok(())
    }

    pub fn is_admin_unlocked(&self) -> bool {
        self.with_state(|state| state.admin_unlocked)
    }

    pub fn lock_admin(&self) {
        self.dispatch_infallible(SiteAction::AdminLocked);
    }
}

impl SearchHost for SiteRuntime {
    fn apply_search(&self, action: SiteAction) -> u64 {
        self.dispatch_infallible(action);
        self.with_state(|state| state.search.request_id)
    }
}

/// Maps a state to the frame the view layer renders.
pub fn render_frame(state: &SiteState) -> RenderFrame {
    if !state.splash_shown {
        return RenderFrame::Splash;
    }
    match evaluate_guards(state.profile, &state.nav) {
        GuardOutcome::AwaitProfile => RenderFrame::ProfileGate,
        GuardOutcome::Redirect(_) => RenderFrame::Empty,
        GuardOutcome::Render => match state.nav.page {
            PageId::Admin if !state.admin_unlocked => RenderFrame::AdminGate,
            PageId::Admin => RenderFrame::Admin {
                tab: state.nav.sub_resource.clone(),
            },
            PageId::NotFound => RenderFrame::NotFound,
            _ => RenderFrame::Page(state.nav.clone()),
        },
    }
}

/// Parses a URL path into a nav state. The empty path is home; unknown slugs are not-found.
pub fn parse_path(path: &str) -> NavState {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        return NavState::default();
    }
    let (slug, rest) = trimmed.split_once('/').unwrap_or((trimmed, ""));
    match PageId::from_slug(slug) {
        Some(page) => NavState::new(page, Some(rest.to_string())),
        None => NavState::new(PageId::NotFound, None),
    }
}

/// Inverse of [`parse_path`].
pub fn nav_path(nav: &NavState) -> String {
    match (&nav.page, &nav.sub_resource) {
        (PageId::Home, _) => "/".to_string(),
        (page, Some(sub)) => format!("/{}/{sub}", page.slug()),
        (page, None) => format!("/{}", page.slug()),
    }
}
