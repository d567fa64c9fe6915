use platform_host::{AuthSession, GeoCoordinate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Profile {
    #[default]
    Unset,
    Adult,
    Minor,
}

impl Profile {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Adult => "adult",
            Self::Minor => "minor",
        }
    }

    pub fn is_set(self) -> bool {
        !matches!(self, Self::Unset)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageId {
    Home,
    About,
    SelfAssessment,
    FindProvider,
    Authentication,
    Resources,
    Blog,
    Article,
    Contact,
    Privacy,
    NotFound,
    Admin,
}

/// Every registered page, in navigation-menu order.
pub const ALL_PAGES: [PageId; 12] = [
    PageId::Home,
    PageId::About,
    PageId::SelfAssessment,
    PageId::FindProvider,
    PageId::Authentication,
    PageId::Resources,
    PageId::Blog,
    PageId::Article,
    PageId::Contact,
    PageId::Privacy,
    PageId::NotFound,
    PageId::Admin,
];

impl PageId {
    pub fn slug(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::About => "about",
            Self::SelfAssessment => "self-assessment",
            Self::FindProvider => "find-provider",
            Self::Authentication => "authentication",
            Self::Resources => "resources",
            Self::Blog => "blog",
            Self::Article => "article",
            Self::Contact => "contact",
            Self::Privacy => "privacy",
            Self::NotFound => "not-found",
            Self::Admin => "admin",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About",
            Self::SelfAssessment => "Self-assessment",
            Self::FindProvider => "Find a provider",
            Self::Authentication => "Sign in",
            Self::Resources => "Resources",
            Self::Blog => "Blog",
            Self::Article => "Article",
            Self::Contact => "Contact",
            Self::Privacy => "Privacy",
            Self::NotFound => "Page not found",
            Self::Admin => "Admin",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        ALL_PAGES.into_iter().find(|page| page.slug() == slug)
    }

    /// Whether the page carries a sub-resource (article slug or admin tab).
    pub fn has_sub_resource_slot(self) -> bool {
        matches!(self, Self::Article | Self::Admin)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavState {
    pub page: PageId,
    pub sub_resource: Option<String>,
}

impl NavState {
    /// Builds a nav state, dropping `sub_resource` for pages without a slot.
    pub fn new(page: PageId, sub_resource: Option<String>) -> Self {
        let sub_resource = sub_resource
            .filter(|_| page.has_sub_resource_slot())
            .filter(|value| !value.is_empty());
        Self { page, sub_resource }
    }
}

impl Default for NavState {
    fn default() -> Self {
        Self::new(PageId::Home, None)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    pub country: String,
    pub city: String,
    pub last_search_location: Option<GeoCoordinate>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchStatus {
    #[default]
    Idle,
    Loading,
    Success(Value),
    Failure(String),
}

impl SearchStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchState {
    /// Id of the latest search; responses carrying any other id are stale.
    pub request_id: u64,
    pub status: SearchStatus,
    pub query: SearchQuery,
}

impl SearchState {
    pub fn is_current(&self, request_id: u64) -> bool {
        self.request_id == request_id
    }

    /// Back to `Idle` with `query`, invalidating any in-flight request.
    pub(crate) fn reset_with(&mut self, query: SearchQuery) {
        self.request_id = self.request_id.saturating_add(1);
        self.status = SearchStatus::Idle;
        self.query = query;
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SiteState {
    pub profile: Profile,
    pub consent_given: bool,
    pub splash_shown: bool,
    pub session: Option<AuthSession>,
    pub admin_unlocked: bool,
    pub nav: NavState,
    pub mobile_nav_open: bool,
    pub search: SearchState,
}

/// Client state restored from storage at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BootState {
    pub profile: Profile,
    pub consent_given: bool,
    pub splash_shown: bool,
    pub admin_unlocked: bool,
}

impl SiteState {
    pub fn from_boot(boot: BootState) -> Self {
        Self {
            profile: boot.profile,
            consent_given: boot.consent_given,
            splash_shown: boot.splash_shown,
            admin_unlocked: boot.admin_unlocked,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderFrame {
    /// No content for this tick; a guard redirect is pending.
    Empty,
    Splash,
    /// Outer gate collecting the age-profile choice.
    ProfileGate,
    AdminGate,
    Admin {
        tab: Option<String>,
    },
    Page(NavState),
    NotFound,
}
