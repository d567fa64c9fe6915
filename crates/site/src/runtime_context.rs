//! Leptos context around [`SiteRuntime`].
//!
//! The runtime stays the single owner of site state; this module mirrors its snapshot into a
//! signal for the views and installs the post-render executor that calls
//! [`SiteRuntime::tick`].

use leptos::*;
use platform_host::HostServices;
use site_runtime::{ReducerError, SiteRuntime, SiteState};

#[derive(Clone, Copy)]
/// Leptos context for reading site state and driving the runtime.
pub struct SiteRuntimeContext {
    /// Runtime handle.
    pub runtime: StoredValue<SiteRuntime>,
    /// Reactive mirror of the runtime state.
    pub state: RwSignal<SiteState>,
}

impl SiteRuntimeContext {
    /// Runs `op` against the runtime.
    pub fn with_runtime<R>(&self, op: impl FnOnce(&SiteRuntime) -> R) -> R {
        self.runtime.with_value(op)
    }

    /// Runs a fallible runtime operation, logging a rejection.
    pub fn run(&self, op: impl FnOnce(&SiteRuntime) -> Result<(), ReducerError>) {
        if let Err(err) = self.with_runtime(op) {
            logging::warn!("site reducer error: {err}");
        }
    }

    /// Spawns an async runtime operation on the local executor.
    pub fn spawn<F, Fut>(&self, op: F)
    where
        F: FnOnce(SiteRuntime) -> Fut + 'static,
        Fut: std::future::Future<Output = ()> + 'static,
    {
        let runtime = self.runtime.get_value();
        spawn_local(op(runtime));
    }
}

fn install_effect_executor(context: SiteRuntimeContext) {
    // Runs after every state change the views observe; redirects and storage writes happen here
    // and never inside a render closure.
    create_effect(move |_| {
        context.state.with(|_| ());
        context.with_runtime(SiteRuntime::tick);
    });
}

#[component]
/// Provides [`SiteRuntimeContext`] to descendant components.
pub fn SiteProvider(
    /// Injected host bundle assembled by the entry layer.
    host_services: HostServices,
    /// Entry path; opened now, or after the profile gate when it needs a profile.
    #[prop(optional, into)]
    initial_path: Option<String>,
    children: Children,
) -> impl IntoView {
    let runtime = SiteRuntime::new(host_services);
    let state = create_rw_signal(runtime.snapshot());
    let stored = store_value(runtime);
    let context = SiteRuntimeContext {
        runtime: stored,
        state,
    };

    context.with_runtime(|runtime| {
        runtime.set_change_listener(move || {
            state.set(stored.with_value(SiteRuntime::snapshot));
        });
    });
    if let Some(path) = initial_path.filter(|path| path != "/") {
        context.run(|runtime| runtime.open_initial_path(&path));
    }

    provide_context(context);
    install_effect_executor(context);
    context.spawn(|runtime| async move { runtime.start_session_watcher().await });
    on_cleanup(move || stored.with_value(SiteRuntime::teardown));

    children().into_view()
}

/// Returns the current [`SiteRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`SiteProvider`].
pub fn use_site_runtime() -> SiteRuntimeContext {
    use_context::<SiteRuntimeContext>().expect("SiteRuntimeContext not provided")
}
