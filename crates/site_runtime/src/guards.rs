//! Profile-based access rules for the navigation controller.
//!
//! Guard evaluation is a pure function of the profile and the current nav state. It runs on every
//! render because the profile can change asynchronously while the nav state stays put; the
//! resulting redirect is applied by [`crate::runtime::SiteRuntime::tick`] after the render pass,
//! never during it.

use crate::model::{NavState, PageId, Profile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Render,
    /// Navigate to the target on the next scheduler tick; render nothing meanwhile.
    Redirect(PageId),
    /// No profile yet: the outer gate must collect one before any page resolves.
    AwaitProfile,
}

pub fn evaluate_guards(profile: Profile, nav: &NavState) -> GuardOutcome {
    // The admin zone has its own credential gate and ignores profile rules.
    if nav.page == PageId::Admin {
        return GuardOutcome::Render;
    }

    match profile {
        Profile::Unset => GuardOutcome::AwaitProfile,
        Profile::Adult => GuardOutcome::Render,
        Profile::Minor => minor_redirect(nav.page)
            .map(GuardOutcome::Redirect)
            .unwrap_or(GuardOutcome::Render),
    }
}

fn minor_redirect(page: PageId) -> Option<PageId> {
    match page {
        PageId::SelfAssessment => Some(PageId::FindProvider),
        PageId::Authentication => Some(PageId::Home),
        PageId::Home
        | PageId::About
        | PageId::FindProvider
        | PageId::Resources
        | PageId::Blog
        | PageId::Article
        | PageId::Contact
        | PageId::Privacy
        | PageId::NotFound
        | PageId::Admin => None,
    }
}

/// Whether `navigate_to(page)` may be honored for `profile`.
pub fn navigation_allowed(profile: Profile, page: PageId) -> bool {
    page == PageId::Admin || profile.is_set()
}
