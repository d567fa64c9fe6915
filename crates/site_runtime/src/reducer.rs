//! Reducer actions, side-effect intents, and transition logic for the site runtime.

use platform_host::{AuthSession, GeoCoordinate};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::{
    guards::navigation_allowed,
    model::{NavState, PageId, Profile, SearchQuery, SearchStatus, SiteState},
};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_site`] to mutate [`SiteState`].
pub enum SiteAction {
    /// Move to a page. The only way NavState changes.
    NavigateTo {
        /// Target page.
        page: PageId,
        /// Article slug or admin tab; dropped for pages without a slot.
        sub_resource: Option<String>,
    },
    /// Record the visitor's age-profile choice from the outer gate.
    ChooseProfile {
        /// `Adult` or `Minor`.
        profile: Profile,
    },
    /// Identity-provider notification (initial read or later change).
    SessionChanged {
        /// Current session, if any.
        session: Option<AuthSession>,
    },
    /// Sign-out completed: back to the default page with no profile.
    Logout,
    AcceptConsent,
    DismissSplash,
    ToggleMobileNav,
    CloseMobileNav,
    AdminUnlocked,
    AdminLocked,
    /// A provider search began.
    SearchStarted {
        /// Query as entered, plus the coordinate when the search is location-based.
        query: SearchQuery,
    },
    /// The device position for a near-me search arrived.
    SearchPositionAcquired {
        request_id: u64,
        coordinate: GeoCoordinate,
    },
    /// Geocoding turned the coordinate into a country/city pair.
    SearchLocationResolved {
        request_id: u64,
        country: String,
        city: String,
    },
    SearchSucceeded {
        request_id: u64,
        payload: Value,
    },
    SearchFailed {
        request_id: u64,
        message: String,
    },
    /// The search future ended without a terminal transition (dropped mid-flight).
    SearchAbandoned {
        request_id: u64,
    },
    /// Clear results and query; show the empty search form.
    BackToSearchForm,
    /// Clear results and city, keeping the country for a same-country retry.
    RetrySameCountry,
}

#[derive(Debug, Clone, PartialEq)]
/// Side-effect intents emitted by [`reduce_site`] for the runtime to execute.
pub enum RuntimeEffect {
    ScrollToTop,
    PersistProfile(Profile),
    ClearPersistedProfile,
    PersistConsent,
    PersistSplashShown,
    PersistAdminSession(bool),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that are not allowed in the current state.
pub enum ReducerError {
    /// Navigation attempted before the outer gate collected a profile.
    #[error("a profile must be chosen before navigating to {}", .0.slug())]
    ProfileRequired(PageId),
    /// `ChooseProfile` with `Unset`.
    #[error("profile choice must be adult or minor")]
    InvalidProfileChoice,
    /// `ChooseProfile(Minor)` while a session exists.
    #[error("a signed-in user cannot be classified as a minor")]
    MinorWithSession,
    /// Provider search requested away from the find-provider page.
    #[error("provider search is not available on {}", .0.slug())]
    SearchUnavailable(PageId),
}

/// Applies a [`SiteAction`] to the site state and collects resulting side effects.
///
/// # Errors
///
/// Returns a [`ReducerError`] when the action is rejected; the state is left untouched.
pub fn reduce_site(
    state: &mut SiteState,
    action: SiteAction,
) -> Result<Vec<RuntimeEffect>, ReducerError> {
    let mut effects = Vec::new();
    match action {
        SiteAction::NavigateTo { page, sub_resource } => {
            if !navigation_allowed(state.profile, page) {
                return Err(ReducerError::ProfileRequired(page));
            }
            state.nav = NavState::new(page, sub_resource);
            if page == PageId::FindProvider {
                state.search.reset_with(SearchQuery::default());
            }
            state.mobile_nav_open = false;
            effects.push(RuntimeEffect::ScrollToTop);
        }
        SiteAction::ChooseProfile { profile } => {
            match profile {
                Profile::Unset => return Err(ReducerError::InvalidProfileChoice),
                Profile::Minor if state.session.is_some() => {
                    return Err(ReducerError::MinorWithSession)
                }
                Profile::Adult | Profile::Minor => {}
            }
            state.profile = profile;
            effects.push(RuntimeEffect::PersistProfile(profile));
        }
        SiteAction::SessionChanged { session } => {
            let present = session.is_some();
            state.session = session;
            if present && state.profile != Profile::Adult {
                state.profile = Profile::Adult;
                effects.push(RuntimeEffect::PersistProfile(Profile::Adult));
            }
        }
        SiteAction::Logout => {
            state.profile = Profile::Unset;
            state.session = None;
            state.nav = NavState::default();
            state.mobile_nav_open = false;
            state.search.reset_with(SearchQuery::default());
            effects.push(RuntimeEffect::ClearPersistedProfile);
            effects.push(RuntimeEffect::ScrollToTop);
        }
        SiteAction::AcceptConsent => {
            if !state.consent_given {
                state.consent_given = true;
                effects.push(RuntimeEffect::PersistConsent);
            }
        }
        SiteAction::DismissSplash => {
            if !state.splash_shown {
                state.splash_shown = true;
                effects.push(RuntimeEffect::PersistSplashShown);
            }
        }
        SiteAction::ToggleMobileNav => {
            state.mobile_nav_open = !state.mobile_nav_open;
        }
        SiteAction::CloseMobileNav => {
            state.mobile_nav_open = false;
        }
        SiteAction::AdminUnlocked => {
            state.admin_unlocked = true;
            effects.push(RuntimeEffect::PersistAdminSession(true));
        }
        SiteAction::AdminLocked => {
            state.admin_unlocked = false;
            effects.push(RuntimeEffect::PersistAdminSession(false));
        }
        SiteAction::SearchStarted { query } => {
            state.search.request_id = state.search.request_id.saturating_add(1);
            state.search.status = SearchStatus::Loading;
            state.search.query = query;
        }
        SiteAction::SearchPositionAcquired {
            request_id,
            coordinate,
        } => {
            if accept_response(state, request_id) {
                state.search.query.last_search_location = Some(coordinate);
            }
        }
        SiteAction::SearchLocationResolved {
            request_id,
            country,
            city,
        } => {
            if accept_response(state, request_id) {
                state.search.query.country = country;
                state.search.query.city = city;
            }
        }
        SiteAction::SearchSucceeded {
            request_id,
            payload,
        } => {
            if accept_response(state, request_id) {
                state.search.status = SearchStatus::Success(payload);
            }
        }
        SiteAction::SearchFailed {
            request_id,
            message,
        } => {
            if accept_response(state, request_id) {
                state.search.status = SearchStatus::Failure(message);
            }
        }
        SiteAction::SearchAbandoned { request_id } => {
            if state.search.is_current(request_id) && state.search.status.is_loading() {
                state.search.status = SearchStatus::Idle;
            }
        }
        SiteAction::BackToSearchForm => {
            state.search.reset_with(SearchQuery::default());
        }
        SiteAction::RetrySameCountry => {
            let country = std::mem::take(&mut state.search.query.country);
            state.search.reset_with(SearchQuery {
                country,
                ..SearchQuery::default()
            });
        }
    }

    Ok(effects)
}

fn accept_response(state: &SiteState, request_id: u64) -> bool {
    if state.search.is_current(request_id) {
        return true;
    }
    debug!(
        request_id,
        current = state.search.request_id,
        "dropping stale search response"
    );
    false
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::model::{SearchState, ALL_PAGES};

    fn adult_state() -> SiteState {
        SiteState {
            profile: Profile::Adult,
            ..SiteState::default()
        }
    }

    fn navigate(state: &mut SiteState, page: PageId, sub: Option<&str>) -> Vec<RuntimeEffect> {
        reduce_site(
            state,
            SiteAction::NavigateTo {
                page,
                sub_resource: sub.map(str::to_string),
            },
        )
        .expect("navigate")
    }

    #[test]
    fn navigate_clears_sub_resource_for_pages_without_slot() {
        let mut state = adult_state();
        navigate(&mut state, PageId::Article, Some("coping-with-stress"));
        assert_eq!(state.nav.sub_resource.as_deref(), Some("coping-with-stress"));

        for page in ALL_PAGES {
            navigate(&mut state, page, Some("slug"));
            if !page.has_sub_resource_slot() {
                assert_eq!(state.nav.sub_resource, None, "page {page:?}");
            }
        }
    }

    #[test]
    fn navigate_closes_overlay_and_scrolls() {
        let mut state = adult_state();
        reduce_site(&mut state, SiteAction::ToggleMobileNav).expect("toggle");
        assert!(state.mobile_nav_open);

        let effects = navigate(&mut state, PageId::Resources, None);
        assert!(!state.mobile_nav_open);
        assert_eq!(effects, vec![RuntimeEffect::ScrollToTop]);
    }

    #[test]
    fn entering_find_provider_resets_search_and_invalidates_in_flight() {
        let mut state = adult_state();
        state.search = SearchState {
            request_id: 4,
            status: SearchStatus::Success(json!({"providers": []})),
            query: SearchQuery {
                country: "France".to_string(),
                city: "Paris".to_string(),
                last_search_location: None,
            },
        };

        navigate(&mut state, PageId::FindProvider, None);
        assert_eq!(state.search.status, SearchStatus::Idle);
        assert_eq!(state.search.query, SearchQuery::default());
        assert_eq!(state.search.request_id, 5);

        reduce_site(
            &mut state,
            SiteAction::SearchSucceeded {
                request_id: 4,
                payload: json!("late"),
            },
        )
        .expect("stale response");
        assert_eq!(state.search.status, SearchStatus::Idle);
    }

    #[test]
    fn navigation_requires_profile_except_admin() {
        let mut state = SiteState::default();
        let err = reduce_site(
            &mut state,
            SiteAction::NavigateTo {
                page: PageId::Blog,
                sub_resource: None,
            },
        )
        .expect_err("profile required");
        assert_eq!(err, ReducerError::ProfileRequired(PageId::Blog));
        assert_eq!(state.nav.page, PageId::Home);

        navigate(&mut state, PageId::Admin, Some("posts"));
        assert_eq!(state.nav, NavState::new(PageId::Admin, Some("posts".to_string())));
    }

    #[test]
    fn session_forces_adult_profile() {
        let mut state = SiteState {
            profile: Profile::Minor,
            ..SiteState::default()
        };
        let effects = reduce_site(
            &mut state,
            SiteAction::SessionChanged {
                session: Some(AuthSession::new("user-1")),
            },
        )
        .expect("session");
        assert_eq!(state.profile, Profile::Adult);
        assert_eq!(effects, vec![RuntimeEffect::PersistProfile(Profile::Adult)]);

        let effects = reduce_site(
            &mut state,
            SiteAction::SessionChanged {
                session: Some(AuthSession::new("user-1")),
            },
        )
        .expect("refresh");
        assert!(effects.is_empty());

        let err = reduce_site(
            &mut state,
            SiteAction::ChooseProfile {
                profile: Profile::Minor,
            },
        )
        .expect_err("minor with session");
        assert_eq!(err, ReducerError::MinorWithSession);
    }

    #[test]
    fn absent_session_leaves_profile_alone() {
        let mut state = SiteState {
            profile: Profile::Minor,
            ..SiteState::default()
        };
        let effects =
            reduce_site(&mut state, SiteAction::SessionChanged { session: None }).expect("none");
        assert!(effects.is_empty());
        assert_eq!(state.profile, Profile::Minor);
    }

    #[test]
    fn logout_resets_profile_nav_and_search() {
        let mut state = adult_state();
        state.session = Some(AuthSession::new("user-1"));
        navigate(&mut state, PageId::Article, Some("slug"));

        let effects = reduce_site(&mut state, SiteAction::Logout).expect("logout");
        assert_eq!(state.profile, Profile::Unset);
        assert_eq!(state.session, None);
        assert_eq!(state.nav, NavState::default());
        assert_eq!(
            effects,
            vec![
                RuntimeEffect::ClearPersistedProfile,
                RuntimeEffect::ScrollToTop
            ]
        );
    }

    #[test]
    fn search_lifecycle_ignores_stale_ids() {
        let mut state = adult_state();
        reduce_site(
            &mut state,
            SiteAction::SearchStarted {
                query: SearchQuery::default(),
            },
        )
        .expect("start");
        let first = state.search.request_id;
        assert!(state.search.status.is_loading());

        reduce_site(
            &mut state,
            SiteAction::SearchStarted {
                query: SearchQuery::default(),
            },
        )
        .expect("restart");
        let second = state.search.request_id;

        reduce_site(
            &mut state,
            SiteAction::SearchFailed {
                request_id: first,
                message: "old".to_string(),
            },
        )
        .expect("stale failure");
        assert!(state.search.status.is_loading());

        reduce_site(
            &mut state,
            SiteAction::SearchSucceeded {
                request_id: second,
                payload: json!(["B"]),
            },
        )
        .expect("success");
        assert_eq!(state.search.status, SearchStatus::Success(json!(["B"])));

        reduce_site(&mut state, SiteAction::SearchAbandoned { request_id: second })
            .expect("abandon after settle");
        assert_eq!(state.search.status, SearchStatus::Success(json!(["B"])));
    }

    #[test]
    fn retry_same_country_keeps_country_only() {
        let mut state = adult_state();
        state.search.query = SearchQuery {
            country: "France".to_string(),
            city: "Paris".to_string(),
            last_search_location: Some(platform_host::GeoCoordinate::new(48.85, 2.35)),
        };
        state.search.status = SearchStatus::Failure("nothing found".to_string());

        reduce_site(&mut state, SiteAction::RetrySameCountry).expect("retry");
        assert_eq!(
            state.search.query,
            SearchQuery {
                country: "France".to_string(),
                ..SearchQuery::default()
            }
        );
        assert_eq!(state.search.status, SearchStatus::Idle);

        reduce_site(&mut state, SiteAction::BackToSearchForm).expect("back");
        assert_eq!(state.search.query, SearchQuery::default());
    }

    #[test]
    fn consent_and_splash_persist_once() {
        let mut state = adult_state();
        assert_eq!(
            reduce_site(&mut state, SiteAction::AcceptConsent).expect("consent"),
            vec![RuntimeEffect::PersistConsent]
        );
        assert!(reduce_site(&mut state, SiteAction::AcceptConsent)
            .expect("consent again")
            .is_empty());
        assert_eq!(
            reduce_site(&mut state, SiteAction::DismissSplash).expect("splash"),
            vec![RuntimeEffect::PersistSplashShown]
        );
    }
}
