mod console_tracing;
mod host_services;
mod runtime_context;
mod web_app;

pub use console_tracing::{install_console_tracing, ConsoleLayer};
pub use host_services::{browser_host_services, web_endpoints};
pub use runtime_context::{use_site_runtime, SiteProvider, SiteRuntimeContext};
pub use web_app::{SiteApp, SiteShell};

#[cfg(all(feature = "csr", target_arch = "wasm32"))]
pub fn mount() {
    console_error_panic_hook::set_once();
    install_console_tracing(tracing::level_filters::LevelFilter::INFO);
    leptos::mount_to_body(|| leptos::view! { <SiteApp /> })
}
