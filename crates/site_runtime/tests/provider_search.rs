use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
};

use futures::{
    channel::oneshot,
    executor::{block_on, LocalPool},
    task::LocalSpawnExt,
};
use platform_host::{
    AddressComponent, GeoCoordinate, GeocodeResult, GeocodingFuture, GeocodingService,
    GeolocationService, HostServices, ProviderSearchFuture, ProviderSearchRequest,
    ProviderSearchService, ReverseGeocodeResponse,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use site_runtime::{
    PageId, Profile, SearchQuery, SearchStatus, SiteRuntime, LOCATION_UNRESOLVED_MESSAGE,
};

const PARIS: GeoCoordinate = GeoCoordinate::new(48.8566, 2.3522);

/// Provider double: records every request and answers from a queue of pending replies, or
/// immediately with `default_reply` when the queue is empty.
struct ScriptedProvider {
    calls: RefCell<Vec<ProviderSearchRequest>>,
    pending: RefCell<VecDeque<oneshot::Receiver<Result<Value, String>>>>,
    default_reply: Result<Value, String>,
}

impl ScriptedProvider {
    fn replying(reply: Result<Value, String>) -> Rc<Self> {
        Rc::new(Self {
            calls: RefCell::new(Vec::new()),
            pending: RefCell::new(VecDeque::new()),
            default_reply: reply,
        })
    }

    fn defer(&self) -> oneshot::Sender<Result<Value, String>> {
        let (sender, receiver) = oneshot::channel();
        self.pending.borrow_mut().push_back(receiver);
        sender
    }

    fn calls(&self) -> Vec<ProviderSearchRequest> {
        self.calls.borrow().clone()
    }
}

impl ProviderSearchService for ScriptedProvider {
    fn search<'a>(
        &'a self,
        request: &'a ProviderSearchRequest,
    ) -> ProviderSearchFuture<'a, Result<Value, String>> {
        self.calls.borrow_mut().push(request.clone());
        let pending = self.pending.borrow_mut().pop_front();
        let default_reply = self.default_reply.clone();
        Box::pin(async move {
            match pending {
                Some(receiver) => receiver
                    .await
                    .unwrap_or_else(|_| Err("reply dropped".to_string())),
                None => default_reply,
            }
        })
    }
}

struct ParisGeocoder {
    calls: Cell<usize>,
    fail: bool,
    status: &'static str,
}

impl ParisGeocoder {
    fn new(fail: bool) -> Rc<Self> {
        Rc::new(Self {
            calls: Cell::new(0),
            fail,
            status: "OK",
        })
    }

    /// Answers every lookup with `status` and no results.
    fn with_status(status: &'static str) -> Rc<Self> {
        Rc::new(Self {
            calls: Cell::new(0),
            fail: false,
            status,
        })
    }
}

impl GeocodingService for ParisGeocoder {
    fn reverse_geocode(
        &self,
        _coordinate: GeoCoordinate,
    ) -> GeocodingFuture<'_, Result<ReverseGeocodeResponse, String>> {
        self.calls.set(self.calls.get() + 1);
        let fail = self.fail;
        let status = self.status;
        Box::pin(async move {
            if fail {
                return Err("geocoder unreachable".to_string());
            }
            if status != "OK" {
                return Ok(ReverseGeocodeResponse {
                    status: status.to_string(),
                    ..ReverseGeocodeResponse::default()
                });
            }
            let component = |name: &str, kind: &str| AddressComponent {
                long_name: name.to_string(),
                short_name: name.to_string(),
                types: vec![kind.to_string(), "political".to_string()],
            };
            Ok(ReverseGeocodeResponse {
                status: "OK".to_string(),
                results: vec![GeocodeResult {
                    address_components: vec![
                        component("Paris", "locality"),
                        component("Île-de-France", "administrative_area_level_1"),
                        component("France", "country"),
                    ],
                    formatted_address: Some("Paris, France".to_string()),
                }],
                error_message: None,
            })
        })
    }
}

struct FixedPosition(GeoCoordinate);

impl GeolocationService for FixedPosition {
    fn current_position(&self) -> GeocodingFuture<'_, Result<GeoCoordinate, String>> {
        let position = self.0;
        Box::pin(async move { Ok(position) })
    }
}

/// Device position double that answers once the test sends the position.
#[derive(Default)]
struct DeferredPosition {
    pending: RefCell<Option<oneshot::Receiver<Result<GeoCoordinate, String>>>>,
}

impl DeferredPosition {
    fn defer(&self) -> oneshot::Sender<Result<GeoCoordinate, String>> {
        let (sender, receiver) = oneshot::channel();
        *self.pending.borrow_mut() = Some(receiver);
        sender
    }
}

impl GeolocationService for DeferredPosition {
    fn current_position(&self) -> GeocodingFuture<'_, Result<GeoCoordinate, String>> {
        let pending = self.pending.borrow_mut().take();
        Box::pin(async move {
            match pending {
                Some(receiver) => receiver
                    .await
                    .unwrap_or_else(|_| Err("position dropped".to_string())),
                None => Err("no position".to_string()),
            }
        })
    }
}

fn search_runtime(
    provider: Rc<ScriptedProvider>,
    geocoder: Rc<ParisGeocoder>,
) -> SiteRuntime {
    search_runtime_locating(provider, geocoder, Rc::new(FixedPosition(PARIS)))
}

fn search_runtime_locating(
    provider: Rc<ScriptedProvider>,
    geocoder: Rc<ParisGeocoder>,
    geolocation: Rc<dyn GeolocationService>,
) -> SiteRuntime {
    let runtime = SiteRuntime::new(HostServices {
        provider_search: provider,
        geocoding: geocoder,
        geolocation,
        ..HostServices::headless()
    });
    runtime.dismiss_splash();
    runtime.choose_profile(Profile::Adult).expect("adult");
    runtime
        .navigate_to(PageId::FindProvider, None)
        .expect("find provider");
    runtime.tick();
    runtime
}

#[test]
fn country_and_city_search_succeeds() {
    let provider = ScriptedProvider::replying(Ok(json!({ "providers": [{ "name": "A" }] })));
    let runtime = search_runtime(provider.clone(), ParisGeocoder::new(false));

    block_on(runtime.search(Some("France".into()), Some("Paris".into()), None)).expect("search");

    assert_eq!(
        runtime.snapshot().search.status,
        SearchStatus::Success(json!({ "providers": [{ "name": "A" }] }))
    );
    assert_eq!(
        provider.calls(),
        vec![ProviderSearchRequest {
            country: "France".to_string(),
            city: "Paris".to_string(),
            coordinate: None,
            language: "fr".to_string(),
        }]
    );
}

#[test]
fn coordinate_search_is_geocoded_then_issued_by_country() {
    let provider = ScriptedProvider::replying(Ok(json!([])));
    let geocoder = ParisGeocoder::new(false);
    let runtime = search_runtime(provider.clone(), geocoder.clone());

    block_on(runtime.search(None, None, Some(PARIS))).expect("search");

    assert_eq!(geocoder.calls.get(), 1);
    assert_eq!(
        provider.calls(),
        vec![ProviderSearchRequest {
            country: "France".to_string(),
            city: "Paris".to_string(),
            coordinate: None,
            language: "fr".to_string(),
        }]
    );
    assert_eq!(
        runtime.snapshot().search.query,
        SearchQuery {
            country: "France".to_string(),
            city: "Paris".to_string(),
            last_search_location: Some(PARIS),
        }
    );
}

#[test]
fn search_near_me_uses_device_position() {
    let provider = ScriptedProvider::replying(Ok(json!([])));
    let runtime = search_runtime(provider.clone(), ParisGeocoder::new(false));

    block_on(runtime.search_near_me()).expect("search");
    assert_eq!(provider.calls().len(), 1);
    assert_eq!(
        runtime.snapshot().search.query.last_search_location,
        Some(PARIS)
    );
}

#[test]
fn geocoding_failure_never_reaches_the_provider() {
    let provider = ScriptedProvider::replying(Ok(json!([])));
    let runtime = search_runtime(provider.clone(), ParisGeocoder::new(true));

    block_on(runtime.search(None, None, Some(PARIS))).expect("search");

    assert!(provider.calls().is_empty());
    assert!(matches!(
        runtime.snapshot().search.status,
        SearchStatus::Failure(_)
    ));
}

#[test]
fn provider_failure_is_surfaced_with_its_message() {
    let provider = ScriptedProvider::replying(Err("quota exceeded".to_string()));
    let runtime = search_runtime(provider, ParisGeocoder::new(false));

    block_on(runtime.search(Some("Germany".into()), None, None)).expect("search");
    assert_eq!(
        runtime.snapshot().search.status,
        SearchStatus::Failure("Search failed: quota exceeded".to_string())
    );
}

#[test]
fn last_started_search_wins_regardless_of_completion_order() {
    let provider = ScriptedProvider::replying(Ok(json!("unused")));
    let reply_a = provider.defer();
    let reply_b = provider.defer();
    let runtime = search_runtime(provider.clone(), ParisGeocoder::new(false));

    let mut pool = LocalPool::new();
    let spawner = pool.spawner();

    let first = runtime.clone();
    spawner
        .spawn_local(async move {
            first
                .search(Some("France".into()), Some("Lyon".into()), None)
                .await
                .expect("search A");
        })
        .expect("spawn A");
    pool.run_until_stalled();
    assert!(runtime.snapshot().search.status.is_loading());

    let second = runtime.clone();
    spawner
        .spawn_local(async move {
            second
                .search(Some("France".into()), Some("Paris".into()), None)
                .await
                .expect("search B");
        })
        .expect("spawn B");
    pool.run_until_stalled();
    assert_eq!(provider.calls().len(), 2);

    reply_b.send(Ok(json!(["B"]))).expect("reply B");
    pool.run_until_stalled();
    assert_eq!(
        runtime.snapshot().search.status,
        SearchStatus::Success(json!(["B"]))
    );

    reply_a.send(Ok(json!(["A"]))).expect("reply A");
    pool.run_until_stalled();
    let state = runtime.snapshot();
    assert_eq!(state.search.status, SearchStatus::Success(json!(["B"])));
    assert_eq!(state.search.query.city, "Paris");
}

#[test]
fn leaving_the_page_invalidates_an_in_flight_search() {
    let provider = ScriptedProvider::replying(Ok(json!("unused")));
    let reply = provider.defer();
    let runtime = search_runtime(provider, ParisGeocoder::new(false));

    let mut pool = LocalPool::new();
    let task = runtime.clone();
    pool.spawner()
        .spawn_local(async move {
            task.search(Some("France".into()), None, None)
                .await
                .expect("search");
        })
        .expect("spawn");
    pool.run_until_stalled();

    runtime.back_to_search_form();
    reply.send(Ok(json!(["late"]))).expect("reply");
    pool.run_until_stalled();
    assert_eq!(runtime.snapshot().search.status, SearchStatus::Idle);
}

#[test]
fn geocoder_without_results_never_reaches_the_provider() {
    let provider = ScriptedProvider::replying(Ok(json!([])));
    let geocoder = ParisGeocoder::with_status("ZERO_RESULTS");
    let runtime = search_runtime(provider.clone(), geocoder.clone());

    block_on(runtime.search(None, None, Some(PARIS))).expect("search");

    assert_eq!(geocoder.calls.get(), 1);
    assert!(provider.calls().is_empty());
    assert_eq!(
        runtime.snapshot().search.status,
        SearchStatus::Failure(LOCATION_UNRESOLVED_MESSAGE.to_string())
    );
}

fn spawn_near_me(pool: &LocalPool, runtime: &SiteRuntime) {
    let task = runtime.clone();
    pool.spawner()
        .spawn_local(async move {
            task.search_near_me().await.expect("near me");
        })
        .expect("spawn near me");
}

#[test]
fn near_me_is_loading_while_the_device_locates() {
    let provider = ScriptedProvider::replying(Ok(json!(["near"])));
    let position = Rc::new(DeferredPosition::default());
    let send_position = position.defer();
    let runtime =
        search_runtime_locating(provider.clone(), ParisGeocoder::new(false), position);

    let mut pool = LocalPool::new();
    spawn_near_me(&pool, &runtime);
    pool.run_until_stalled();
    assert!(runtime.snapshot().search.status.is_loading());
    assert!(provider.calls().is_empty());

    send_position.send(Ok(PARIS)).expect("position");
    pool.run_until_stalled();
    let state = runtime.snapshot();
    assert_eq!(state.search.status, SearchStatus::Success(json!(["near"])));
    assert_eq!(state.search.query.last_search_location, Some(PARIS));
    assert_eq!(state.search.query.city, "Paris");
}

#[test]
fn late_device_position_failure_does_not_override_a_newer_search() {
    let provider = ScriptedProvider::replying(Ok(json!(["Paris"])));
    let position = Rc::new(DeferredPosition::default());
    let send_position = position.defer();
    let runtime =
        search_runtime_locating(provider.clone(), ParisGeocoder::new(false), position);

    let mut pool = LocalPool::new();
    spawn_near_me(&pool, &runtime);
    pool.run_until_stalled();

    block_on(runtime.search(Some("France".into()), Some("Paris".into()), None)).expect("search");
    assert_eq!(
        runtime.snapshot().search.status,
        SearchStatus::Success(json!(["Paris"]))
    );

    send_position
        .send(Err("permission denied".to_string()))
        .expect("position");
    pool.run_until_stalled();
    assert_eq!(
        runtime.snapshot().search.status,
        SearchStatus::Success(json!(["Paris"]))
    );
}

#[test]
fn late_device_position_does_not_start_a_second_search() {
    let provider = ScriptedProvider::replying(Ok(json!(["Lyon"])));
    let geocoder = ParisGeocoder::new(false);
    let position = Rc::new(DeferredPosition::default());
    let send_position = position.defer();
    let runtime = search_runtime_locating(provider.clone(), geocoder.clone(), position);

    let mut pool = LocalPool::new();
    spawn_near_me(&pool, &runtime);
    pool.run_until_stalled();

    block_on(runtime.search(Some("France".into()), Some("Lyon".into()), None)).expect("search");
    send_position.send(Ok(PARIS)).expect("position");
    pool.run_until_stalled();

    assert_eq!(geocoder.calls.get(), 0);
    assert_eq!(provider.calls().len(), 1);
    let state = runtime.snapshot();
    assert_eq!(state.search.status, SearchStatus::Success(json!(["Lyon"])));
    assert_eq!(state.search.query.city, "Lyon");
    assert_eq!(state.search.query.last_search_location, None);
}

#[test]
fn entering_find_provider_again_resets_the_search_each_time() {
    let provider = ScriptedProvider::replying(Ok(json!(["done"])));
    let runtime = search_runtime(provider.clone(), ParisGeocoder::new(false));

    block_on(runtime.search(Some("France".into()), None, None)).expect("search");
    assert_eq!(
        runtime.snapshot().search.status,
        SearchStatus::Success(json!(["done"]))
    );

    runtime
        .navigate_to(PageId::FindProvider, None)
        .expect("again");
    runtime.tick();
    let once = runtime.snapshot();
    assert_eq!(once.search.status, SearchStatus::Idle);
    assert_eq!(once.search.query, SearchQuery::default());

    // In flight when the page is entered again: the late reply is discarded.
    let reply = provider.defer();
    let mut pool = LocalPool::new();
    let task = runtime.clone();
    pool.spawner()
        .spawn_local(async move {
            task.search(Some("Spain".into()), None, None)
                .await
                .expect("search");
        })
        .expect("spawn");
    pool.run_until_stalled();
    assert!(runtime.snapshot().search.status.is_loading());

    runtime
        .navigate_to(PageId::FindProvider, None)
        .expect("twice");
    runtime.tick();
    reply.send(Ok(json!(["late"]))).expect("reply");
    pool.run_until_stalled();

    let twice = runtime.snapshot();
    assert_eq!(twice.nav, once.nav);
    assert_eq!(twice.search.status, SearchStatus::Idle);
    assert_eq!(twice.search.query, SearchQuery::default());
}
