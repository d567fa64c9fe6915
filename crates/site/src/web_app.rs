use leptos::*;
use leptos_meta::*;
use site_runtime::{
    nav_path, render_frame, NavState, PageId, Profile, RenderFrame, SearchStatus, ALL_PAGES,
};

use crate::{
    host_services::browser_host_services,
    runtime_context::{use_site_runtime, SiteProvider},
};

const SITE_NAME: &str = "Find Support";

fn current_path() -> String {
    #[cfg(target_arch = "wasm32")]
    {
        window().location().pathname().unwrap_or_default()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        "/".to_string()
    }
}

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Meta name="description" content="Guidance, resources, and help finding a provider near you." />
        <main class="site-root">
            <SiteProvider host_services=browser_host_services() initial_path=current_path()>
                <SiteShell />
            </SiteProvider>
        </main>
    }
}

#[component]
pub fn SiteShell() -> impl IntoView {
    let site = use_site_runtime();
    let frame = create_memo(move |_| render_frame(&site.state.get()));

    view! {
        <Title text=move || match frame.get() {
            RenderFrame::Page(nav) => format!("{} | {SITE_NAME}", nav.page.title()),
            _ => SITE_NAME.to_string(),
        } />
        {move || match frame.get() {
            RenderFrame::Empty => ().into_view(),
            RenderFrame::Splash => view! { <Splash /> }.into_view(),
            RenderFrame::ProfileGate => view! { <ProfileGate /> }.into_view(),
            RenderFrame::AdminGate => view! { <AdminGate /> }.into_view(),
            RenderFrame::Admin { tab } => view! { <AdminPanel tab=tab /> }.into_view(),
            RenderFrame::NotFound => view! {
                <SiteNav />
                <section class="page page-not-found">
                    <h1>{PageId::NotFound.title()}</h1>
                </section>
            }
            .into_view(),
            RenderFrame::Page(nav) => view! {
                <SiteNav />
                <PageBody nav=nav />
            }
            .into_view(),
        }}
        <ConsentBanner />
    }
}

#[component]
fn Splash() -> impl IntoView {
    let site = use_site_runtime();
    view! {
        <section class="splash">
            <h1>{SITE_NAME}</h1>
            <button on:click=move |_| site.with_runtime(|runtime| runtime.dismiss_splash())>
                "Continue"
            </button>
        </section>
    }
}

#[component]
fn ProfileGate() -> impl IntoView {
    let site = use_site_runtime();
    let choose = move |profile: Profile| site.run(|runtime| runtime.choose_profile(profile));
    view! {
        <section class="profile-gate">
            <h1>"Before we start"</h1>
            <button on:click=move |_| choose(Profile::Adult)>"I am 18 or older"</button>
            <button on:click=move |_| choose(Profile::Minor)>"I am under 18"</button>
        </section>
    }
}

#[component]
fn ConsentBanner() -> impl IntoView {
    let site = use_site_runtime();
    view! {
        <Show when=move || !site.state.with(|state| state.consent_given)>
            <aside class="consent-banner">
                <p>"We store your preferences on this device."</p>
                <button on:click=move |_| site.with_runtime(|runtime| runtime.accept_consent())>
                    "Accept"
                </button>
            </aside>
        </Show>
    }
}

#[component]
fn SiteNav() -> impl IntoView {
    let site = use_site_runtime();
    let open = move || site.state.with(|state| state.mobile_nav_open);
    let signed_in = move || site.state.with(|state| state.session.is_some());
    let menu = ALL_PAGES
        .into_iter()
        .filter(|page| !matches!(page, PageId::NotFound | PageId::Article | PageId::Admin))
        .map(|page| {
            view! {
                <li>
                    <a
                        href=nav_path(&NavState::new(page, None))
                        on:click=move |ev| {
                            ev.prevent_default();
                            site.run(|runtime| runtime.navigate_to(page, None));
                        }
                    >
                        {page.title()}
                    </a>
                </li>
            }
        })
        .collect_view();

    view! {
        <nav class="site-nav" class:open=open>
            <button
                class="site-nav-toggle"
                on:click=move |_| site.with_runtime(|runtime| runtime.toggle_mobile_nav())
            >
                "Menu"
            </button>
            <ul>{menu}</ul>
            <Show when=signed_in>
                <button on:click=move |_| site.spawn(|runtime| async move { runtime.logout().await })>
                    "Sign out"
                </button>
            </Show>
        </nav>
    }
}

#[component]
fn PageBody(nav: NavState) -> impl IntoView {
    let body = match nav.page {
        PageId::FindProvider => view! { <FindProvider /> }.into_view(),
        PageId::Article => {
            let slug = nav.sub_resource.clone().unwrap_or_default();
            view! { <p class="article-slug">{slug}</p> }.into_view()
        }
        _ => ().into_view(),
    };
    view! {
        <section class=format!("page page-{}", nav.page.slug())>
            <h1>{nav.page.title()}</h1>
            {body}
        </section>
    }
}

#[component]
fn FindProvider() -> impl IntoView {
    let site = use_site_runtime();
    let country = create_rw_signal(String::new());
    let city = create_rw_signal(String::new());
    let status = move || site.state.with(|state| state.search.status.clone());
    let near_me_offered = site.with_runtime(|runtime| runtime.capabilities().geolocation.is_offered());

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let (country, city) = (country.get_untracked(), city.get_untracked());
        site.spawn(move |runtime| async move {
            if let Err(err) = runtime.search(Some(country), Some(city), None).await {
                logging::warn!("search rejected: {err}");
            }
        });
    };
    let near_me = move |_| {
        site.spawn(|runtime| async move {
            if let Err(err) = runtime.search_near_me().await {
                logging::warn!("search rejected: {err}");
            }
        });
    };

    view! {
        <form class="provider-search" on:submit=submit>
            <input
                placeholder="Country"
                prop:value=move || country.get()
                on:input=move |ev| country.set(event_target_value(&ev))
            />
            <input
                placeholder="City"
                prop:value=move || city.get()
                on:input=move |ev| city.set(event_target_value(&ev))
            />
            <button type="submit">"Search"</button>
            <Show when=move || near_me_offered>
                <button type="button" on:click=near_me>"Search near me"</button>
            </Show>
        </form>
        {move || match status() {
            SearchStatus::Idle => ().into_view(),
            SearchStatus::Loading => view! { <p class="search-loading">"Searching…"</p> }.into_view(),
            SearchStatus::Success(payload) => view! {
                <pre class="search-results">{payload.to_string()}</pre>
                <button on:click=move |_| site.with_runtime(|runtime| runtime.back_to_search_form())>
                    "New search"
                </button>
            }
            .into_view(),
            SearchStatus::Failure(message) => view! {
                <p class="search-error">{message}</p>
                <button on:click=move |_| site.with_runtime(|runtime| runtime.retry_same_country())>
                    "Try again"
                </button>
            }
            .into_view(),
        }}
    }
}

#[component]
fn AdminGate() -> impl IntoView {
    let site = use_site_runtime();
    let passphrase = create_rw_signal(String::new());
    let error = create_rw_signal(None::<String>);

    let submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let entered = passphrase.get_untracked();
        site.spawn(move |runtime| async move {
            match runtime.unlock_admin(&entered).await {
                Ok(()) => error.set(None),
                Err(err) => error.set(Some(err.to_string())),
            }
        });
    };

    view! {
        <form class="admin-gate" on:submit=submit>
            <input
                type="password"
                prop:value=move || passphrase.get()
                on:input=move |ev| passphrase.set(event_target_value(&ev))
            />
            <button type="submit">"Unlock"</button>
            {move || error.get().map(|message| view! { <p class="admin-error">{message}</p> })}
        </form>
    }
}

#[component]
fn AdminPanel(tab: Option<String>) -> impl IntoView {
    let site = use_site_runtime();
    view! {
        <section class="admin-panel">
            <h1>{PageId::Admin.title()}</h1>
            <p>{tab.unwrap_or_else(|| "overview".to_string())}</p>
            <button on:click=move |_| site.with_runtime(|runtime| runtime.lock_admin())>"Lock"</button>
        </section>
    }
}
