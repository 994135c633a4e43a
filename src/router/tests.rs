use std::sync::{Arc, Mutex};

use serde_json::json;

use super::*;
use crate::error::{ScreenError, ScreenResult};
use crate::logging::{LogEvent, Logger, MemorySink};
use crate::route::{Route, RouteParams};
use crate::screen::{ReceivesRouteParams, ScreenFactory, fallible_screen_factory, screen_factory};
use crate::toolkit::headless::{HeadlessToolkit, ToolkitCall};

type Journal = Arc<Mutex<Vec<String>>>;

struct Page {
    name: &'static str,
    journal: Journal,
}

impl Page {
    fn new(name: &'static str, journal: &Journal) -> Self {
        Self {
            name,
            journal: Arc::clone(journal),
        }
    }

    fn note(&self, entry: String) {
        self.journal.lock().unwrap().push(entry);
    }
}

impl Screen<String> for Page {
    fn render(&mut self) -> ScreenResult<String> {
        Ok(self.name.to_string())
    }

    fn on_mount(&mut self) {
        self.note(format!("mount:{}", self.name));
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        self.note(format!("drop:{}", self.name));
    }
}

#[derive(Default)]
struct UserPage {
    id: Option<String>,
}

impl Screen<String> for UserPage {
    fn render(&mut self) -> ScreenResult<String> {
        Ok(format!("user:{}", self.id.as_deref().unwrap_or("?")))
    }

    fn params_receiver(&mut self) -> Option<&mut dyn ReceivesRouteParams> {
        Some(self)
    }
}

impl ReceivesRouteParams for UserPage {
    fn on_route_params(&mut self, params: &RouteParams) {
        self.id = params.get("id").cloned();
    }
}

struct Broken;

impl Screen<String> for Broken {
    fn render(&mut self) -> ScreenResult<String> {
        Err(ScreenError::new("no data"))
    }
}

struct Fragile;

impl Screen<String> for Fragile {
    fn render(&mut self) -> ScreenResult<String> {
        Ok("fragile".into())
    }

    fn on_mount(&mut self) {
        panic!("mount hook exploded");
    }
}

fn page(name: &'static str, journal: &Journal) -> ScreenFactory<String> {
    let journal = Arc::clone(journal);
    screen_factory(move |_: &Navigator| Page::new(name, &journal))
}

fn with_request<F>(name: &'static str, journal: &Journal, request: F) -> ScreenFactory<String>
where
    F: Fn(&Navigator) + Send + Sync + 'static,
{
    let journal = Arc::clone(journal);
    screen_factory(move |navigator: &Navigator| {
        request(navigator);
        Page::new(name, &journal)
    })
}

fn routes(journal: &Journal) -> RouteTable<String> {
    let panicking: ScreenFactory<String> =
        Arc::new(|_: &Navigator| -> ScreenResult<Box<dyn Screen<String>>> {
            panic!("factory exploded")
        });

    RouteTable::new(vec![
        Route::new(
            "home",
            page("home", journal),
            RouteProps::new(800, 600).with_title("Home"),
        ),
        Route::new(
            "user/${id}",
            screen_factory(|_: &Navigator| UserPage::default()),
            RouteProps::new(600, 400),
        ),
        Route::new(
            "settings",
            page("settings", journal),
            RouteProps::new(400, 300)
                .with_title("Settings")
                .resizable(false),
        ),
        Route::new(
            "broken",
            screen_factory(|_: &Navigator| Broken),
            RouteProps::new(100, 100),
        ),
        Route::new(
            "missing-dep",
            fallible_screen_factory(|_: &Navigator| -> ScreenResult<Broken> {
                Err(ScreenError::new("database offline"))
            }),
            RouteProps::new(100, 100),
        ),
        Route::new("panics", panicking, RouteProps::new(100, 100)),
        Route::new(
            "fragile",
            screen_factory(|_: &Navigator| Fragile),
            RouteProps::new(100, 100),
        ),
        Route::new(
            "redirect",
            with_request("redirect", journal, |navigator| navigator.navigate_to("home")),
            RouteProps::new(100, 100),
        ),
        Route::new(
            "loop",
            with_request("loop", journal, |navigator| navigator.navigate_to("loop")),
            RouteProps::new(100, 100),
        ),
        Route::new(
            "launcher",
            with_request("launcher", journal, |navigator| {
                navigator.spawn_window("settings")
            }),
            RouteProps::new(300, 200),
        ),
    ])
}

struct Fixture {
    router: Router<HeadlessToolkit<String>>,
    toolkit: HeadlessToolkit<String>,
    main: WindowId,
    journal: Journal,
    logs: MemorySink,
    audit: Arc<RecordingAudit>,
}

impl Fixture {
    fn journal(&self) -> Vec<String> {
        self.journal.lock().unwrap().clone()
    }

    fn main_root(&self) -> Option<String> {
        self.toolkit.scene_root(self.main)
    }

    fn log_event(&self, message: &str) -> Option<LogEvent> {
        self.logs
            .events()
            .into_iter()
            .find(|event| event.message == message)
    }

    fn snapshot(&self) -> MetricSnapshot {
        self.router.metrics_snapshot().expect("metrics enabled")
    }
}

fn fixture() -> Fixture {
    fixture_with(|_| {})
}

fn fixture_with(tune: impl FnOnce(&mut RouterConfig)) -> Fixture {
    let journal = Journal::default();
    let (toolkit, main) = HeadlessToolkit::with_main_window("Main Stage");
    let logs = MemorySink::new();
    let audit = Arc::new(RecordingAudit::new());

    let mut config = RouterConfig::default()
        .with_logger(Logger::new(logs.clone()))
        .with_audit(audit.clone());
    config.enable_metrics();
    tune(&mut config);

    let router = Router::with_config(routes(&journal), "home", toolkit.clone(), main, config)
        .expect("entrypoint renders");
    Fixture {
        router,
        toolkit,
        main,
        journal,
        logs,
        audit,
    }
}

#[test]
fn entrypoint_is_shown_in_main_window() {
    let fx = fixture();
    assert_eq!(fx.main_root().as_deref(), Some("home"));
    assert_eq!(fx.toolkit.scene_size(fx.main), Some((800, 600)));
    assert_eq!(fx.toolkit.title(fx.main).as_deref(), Some("Home"));
    assert_eq!(fx.router.active_window(), ActiveWindow::Main);
    assert_eq!(fx.router.active_window_id(), fx.main);
    assert_eq!(fx.router.main_window(), fx.main);
    assert_eq!(fx.router.spawned_count(), 0);
    assert_eq!(fx.journal(), vec!["mount:home"]);

    let started = fx.log_event("router_started").expect("start logged");
    assert_eq!(started.field("entrypoint"), Some(&json!("home")));
    assert_eq!(started.field("routes"), Some(&json!(10)));
    assert_eq!(
        fx.audit.stages(),
        vec![
            RouterAuditStage::RouteResolved,
            RouterAuditStage::ScreenInstantiated,
            RouterAuditStage::SceneApplied,
            RouterAuditStage::RouterConstructed,
        ]
    );
}

#[test]
fn unknown_entrypoint_fails_construction() {
    let (toolkit, main) = HeadlessToolkit::<String>::with_main_window("Main Stage");
    let err = Router::new(routes(&Journal::default()), "nowhere", toolkit.clone(), main)
        .unwrap_err();
    assert_eq!(err, RouterError::RouteNotFound("nowhere".into()));
    assert_eq!(toolkit.scene_root(main), None);
}

#[test]
fn failing_entrypoint_is_logged_as_error() {
    let (toolkit, main) = HeadlessToolkit::<String>::with_main_window("Main Stage");
    let logs = MemorySink::new();
    let config = RouterConfig::default().with_logger(Logger::new(logs.clone()));
    let err = Router::with_config(routes(&Journal::default()), "broken", toolkit, main, config)
        .unwrap_err();
    assert_eq!(err.kind(), "render_invocation");
    let event = logs
        .events()
        .into_iter()
        .find(|event| event.message == "router_start_failed")
        .expect("failure logged");
    assert_eq!(event.level, LogLevel::Error);
}

#[test]
fn navigation_replaces_main_scene_and_delivers_params() {
    let mut fx = fixture();
    fx.router.try_navigate_to("user/7").unwrap();

    assert_eq!(fx.main_root().as_deref(), Some("user:7"));
    assert_eq!(fx.toolkit.scene_size(fx.main), Some((600, 400)));
    // No route title: the main window's title is kept.
    assert_eq!(fx.toolkit.title(fx.main).as_deref(), Some("Home"));
    assert_eq!(fx.journal(), vec!["mount:home", "drop:home"]);
    assert_eq!(fx.router.active_window(), ActiveWindow::Main);
}

#[test]
fn resolve_is_exposed_without_side_effects() {
    let fx = fixture();
    let resolved = fx.router.resolve("user/42").unwrap();
    assert_eq!(resolved.route().path(), "user/${id}");
    assert_eq!(resolved.params().get("id").map(String::as_str), Some("42"));
    assert_eq!(fx.router.routes().len(), 10);
    assert_eq!(fx.main_root().as_deref(), Some("home"));
}

#[test]
fn failed_navigation_keeps_previous_scene() {
    let mut fx = fixture();
    let cases = [
        ("nowhere", "route_not_found"),
        ("broken", "render_invocation"),
        ("missing-dep", "screen_instantiation"),
        ("panics", "screen_instantiation"),
    ];
    for (path, kind) in cases {
        let err = fx.router.try_navigate_to(path).unwrap_err();
        assert_eq!(err.kind(), kind, "{path}");
        assert_eq!(fx.main_root().as_deref(), Some("home"), "{path}");
        assert_eq!(fx.toolkit.scene_size(fx.main), Some((800, 600)));
    }

    let snapshot = fx.snapshot();
    assert_eq!(snapshot.failures, 4);
    assert_eq!(snapshot.navigations, 0);
}

#[test]
fn panic_message_is_carried_in_the_error() {
    let mut fx = fixture();
    match fx.router.try_navigate_to("panics").unwrap_err() {
        RouterError::ScreenInstantiation { path, reason } => {
            assert_eq!(path, "panics");
            assert!(reason.contains("factory exploded"), "{reason}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
#[should_panic(expected = "factory exploded")]
fn panics_propagate_when_containment_is_off() {
    let mut fx = fixture_with(|config| config.contain_panics = false);
    let _ = fx.router.try_navigate_to("panics");
}

#[test]
fn rejected_scene_is_a_window_application_error() {
    let mut fx = fixture();
    fx.toolkit.reject_next_scene("surface lost");
    let err = fx.router.try_navigate_to("settings").unwrap_err();
    assert!(matches!(
        err,
        RouterError::WindowApplication { window: Some(window), .. } if window == fx.main
    ));
    assert_eq!(fx.main_root().as_deref(), Some("home"));
    assert_eq!(fx.toolkit.title(fx.main).as_deref(), Some("Home"));

    // The screen was built, never mounted, then discarded.
    let journal = fx.journal();
    assert!(!journal.contains(&"mount:settings".to_string()));
    assert!(journal.contains(&"drop:settings".to_string()));
}

#[test]
fn ignore_policy_is_silent_but_counted() {
    let mut fx = fixture();
    fx.router.navigate_to("nowhere", ErrorPolicy::Ignore);
    fx.router.navigate_to("broken", ErrorPolicy::default());

    assert!(fx.log_event("operation_failed").is_none());
    assert_eq!(fx.snapshot().failures, 2);
    assert_eq!(
        fx.audit.stages().last(),
        Some(&RouterAuditStage::OperationFailed)
    );
}

#[test]
fn log_policy_emits_warning() {
    let mut fx = fixture();
    fx.router.navigate_to("nowhere", ErrorPolicy::Log);

    let event = fx.log_event("operation_failed").expect("warning logged");
    assert_eq!(event.level, LogLevel::Warn);
    assert_eq!(event.field("operation"), Some(&json!("navigate_to")));
    assert_eq!(event.field("path"), Some(&json!("nowhere")));
    assert_eq!(event.field("error"), Some(&json!("route_not_found")));
}

#[test]
fn handler_policy_receives_errors() {
    let mut fx = fixture();
    let mut seen = Vec::new();
    let mut record = |err: &RouterError| seen.push(err.kind());
    fx.router
        .navigate_to("broken", ErrorPolicy::handler(&mut record));
    assert_eq!(
        fx.router
            .spawn_window("nowhere", ErrorPolicy::handler(&mut record)),
        None
    );
    assert_eq!(seen, ["render_invocation", "route_not_found"]);
}

#[test]
fn spawn_opens_configured_window_and_activates_it() {
    let mut fx = fixture();
    let window = fx.router.try_spawn_window("settings").unwrap();

    assert_ne!(window, fx.main);
    assert_eq!(fx.router.active_window(), ActiveWindow::Spawned(window));
    assert_eq!(fx.router.active_window_id(), window);
    assert!(fx.router.is_spawned(window));
    assert!(fx.toolkit.is_visible(window));
    assert_eq!(fx.toolkit.scene_root(window).as_deref(), Some("settings"));
    assert_eq!(fx.toolkit.scene_size(window), Some((400, 300)));
    assert_eq!(fx.toolkit.title(window).as_deref(), Some("Settings"));
    assert_eq!(fx.toolkit.is_resizable(window), Some(false));
    assert_eq!(fx.toolkit.observer_count(window), 1);

    let spawned = fx.router.spawned_windows();
    assert_eq!(spawned.len(), 1);
    assert_eq!(spawned[0].window, window);
    assert_eq!(spawned[0].path, "settings");
    assert_eq!(spawned[0].route_path, "settings");

    // Main window untouched.
    assert_eq!(fx.main_root().as_deref(), Some("home"));
}

#[test]
fn spawned_window_inherits_main_title() {
    let mut fx = fixture();
    let window = fx.router.spawn_window("user/9", ErrorPolicy::Ignore).unwrap();
    assert_eq!(fx.toolkit.title(window).as_deref(), Some("Home"));
    assert_eq!(fx.toolkit.is_resizable(window), Some(true));
    assert_eq!(fx.toolkit.scene_root(window).as_deref(), Some("user:9"));
    assert_eq!(fx.router.spawned_windows()[0].route_path, "user/${id}");
}

#[test]
fn navigation_targets_the_active_spawned_window() {
    let mut fx = fixture();
    let window = fx.router.try_spawn_window("settings").unwrap();
    fx.router.try_navigate_to("user/3").unwrap();

    assert_eq!(fx.toolkit.scene_root(window).as_deref(), Some("user:3"));
    assert_eq!(fx.toolkit.scene_size(window), Some((600, 400)));
    assert_eq!(fx.main_root().as_deref(), Some("home"));
    // Registry keeps the path the window was opened with.
    assert_eq!(fx.router.spawned_windows()[0].path, "settings");
    assert!(fx.journal().contains(&"drop:settings".to_string()));
}

#[test]
fn user_close_reverts_to_main_once() {
    let mut fx = fixture();
    let window = fx.router.try_spawn_window("settings").unwrap();
    fx.toolkit.user_close(window);

    assert_eq!(fx.router.active_window(), ActiveWindow::Main);
    assert_eq!(fx.router.spawned_count(), 0);
    assert!(!fx.router.is_spawned(window));

    fx.toolkit.emit_hidden(window);
    assert_eq!(fx.router.spawned_count(), 0);
    assert_eq!(fx.snapshot().closes, 1);

    let closed = fx.log_event("window_closed").expect("close logged");
    assert_eq!(closed.field("cause"), Some(&json!("toolkit")));
    assert_eq!(closed.field("was_active"), Some(&json!(true)));

    fx.router.try_navigate_to("user/1").unwrap();
    assert_eq!(fx.main_root().as_deref(), Some("user:1"));
}

#[test]
fn close_spawn_is_lifo_and_noop_when_empty() {
    let mut fx = fixture();
    assert_eq!(fx.router.close_spawn(), None);

    let first = fx.router.try_spawn_window("settings").unwrap();
    let second = fx.router.try_spawn_window("user/2").unwrap();

    assert_eq!(fx.router.close_spawn(), Some(second));
    assert!(!fx.toolkit.is_visible(second));
    assert_eq!(fx.router.active_window(), ActiveWindow::Main);
    assert_eq!(fx.router.spawned_count(), 1);
    assert!(fx.toolkit.calls().contains(&ToolkitCall::Close(second)));

    assert_eq!(fx.router.close_spawn(), Some(first));
    assert_eq!(fx.router.close_spawn(), None);
    assert_eq!(fx.snapshot().closes, 2);
}

#[test]
fn close_spawn_by_path_matches_request_path() {
    let mut fx = fixture();
    let user = fx.router.try_spawn_window("user/1").unwrap();
    let settings = fx.router.try_spawn_window("settings").unwrap();

    assert_eq!(fx.router.close_spawn_by_path("user/${id}"), None);
    assert_eq!(fx.router.close_spawn_by_path("user/1"), Some(user));
    // Closing an inactive window leaves the pointer alone.
    assert_eq!(fx.router.active_window(), ActiveWindow::Spawned(settings));
    assert_eq!(fx.router.close_spawn_by_path("user/1"), None);

    assert_eq!(fx.router.close_spawn_by_path("settings"), Some(settings));
    assert_eq!(fx.router.active_window(), ActiveWindow::Main);
}

#[test]
fn focus_main_stage_redirects_navigation() {
    let mut fx = fixture();
    let window = fx.router.try_spawn_window("settings").unwrap();
    fx.toolkit.clear_calls();

    fx.router.focus_main_stage();
    assert_eq!(
        fx.toolkit.calls(),
        vec![ToolkitCall::ToFront(fx.main), ToolkitCall::RequestFocus(fx.main)]
    );
    assert!(fx.toolkit.is_focused(fx.main));
    assert_eq!(fx.router.active_window(), ActiveWindow::Main);
    assert!(fx.router.is_spawned(window));
    assert!(fx.toolkit.is_visible(window));

    fx.router.try_navigate_to("user/5").unwrap();
    assert_eq!(fx.main_root().as_deref(), Some("user:5"));
    assert_eq!(fx.toolkit.scene_root(window).as_deref(), Some("settings"));
}

#[test]
fn host_reported_hide_deregisters_once() {
    let mut fx = fixture();
    let window = fx.router.try_spawn_window("settings").unwrap();
    assert!(fx.router.window_hidden(window));
    assert!(!fx.router.window_hidden(window));
    assert_eq!(fx.router.active_window(), ActiveWindow::Main);
    assert!(!fx.router.window_hidden(fx.main));
}

#[test]
fn failed_spawn_leaves_registry_untouched() {
    let mut fx = fixture();

    fx.toolkit.reject_next_scene("no surface");
    match fx.router.try_spawn_window("settings").unwrap_err() {
        RouterError::WindowApplication {
            window: Some(window),
            ..
        } => {
            assert!(!fx.toolkit.is_visible(window));
            assert!(fx.toolkit.calls().contains(&ToolkitCall::Close(window)));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    fx.toolkit.reject_next_create("out of handles");
    assert!(matches!(
        fx.router.try_spawn_window("settings"),
        Err(RouterError::WindowApplication { window: None, .. })
    ));

    let windows = fx.toolkit.window_count();
    assert_eq!(fx.router.spawn_window("nowhere", ErrorPolicy::Ignore), None);
    assert_eq!(fx.router.spawn_window("broken", ErrorPolicy::Ignore), None);
    assert_eq!(fx.toolkit.window_count(), windows);

    assert_eq!(fx.router.spawned_count(), 0);
    assert_eq!(fx.router.active_window(), ActiveWindow::Main);
    assert_eq!(fx.snapshot().failures, 4);
}

#[test]
fn mount_panic_is_logged_and_navigation_proceeds() {
    let mut fx = fixture();
    fx.router.try_navigate_to("fragile").unwrap();
    assert_eq!(fx.main_root().as_deref(), Some("fragile"));
    let event = fx.log_event("mount_failed").expect("mount failure logged");
    assert_eq!(event.level, LogLevel::Warn);
}

#[test]
fn screen_requests_run_after_the_operation() {
    let mut fx = fixture();
    fx.router.try_navigate_to("redirect").unwrap();

    assert_eq!(fx.main_root().as_deref(), Some("home"));
    assert_eq!(
        fx.journal(),
        vec![
            "mount:home",
            "mount:redirect",
            "drop:home",
            "mount:home",
            "drop:redirect",
        ]
    );
    assert_eq!(fx.router.navigator().pending(), 0);
    assert_eq!(fx.snapshot().queued_requests, 1);
}

#[test]
fn screens_can_spawn_windows() {
    let mut fx = fixture();
    fx.router.try_navigate_to("launcher").unwrap();

    assert_eq!(fx.main_root().as_deref(), Some("launcher"));
    assert_eq!(fx.router.spawned_count(), 1);
    let window = fx.router.active_window_id();
    assert_ne!(window, fx.main);
    assert_eq!(fx.toolkit.scene_root(window).as_deref(), Some("settings"));
}

#[test]
fn chained_requests_are_capped() {
    let mut fx = fixture_with(|config| config.max_chained_requests = 3);
    fx.router.try_navigate_to("loop").unwrap();

    let mounts = fx
        .journal()
        .iter()
        .filter(|entry| entry.as_str() == "mount:loop")
        .count();
    assert_eq!(mounts, 4);
    assert_eq!(fx.router.navigator().pending(), 0);
    assert_eq!(fx.snapshot().queued_requests, 3);

    let dropped = fx
        .log_event("queued_requests_dropped")
        .expect("overflow logged");
    assert_eq!(dropped.level, LogLevel::Warn);
    assert_eq!(dropped.field("dropped"), Some(&json!(1)));
    assert_eq!(dropped.field("limit"), Some(&json!(3)));
}

#[test]
fn host_can_drain_queued_requests() {
    let mut fx = fixture_with(|config| config.queued_policy = QueuedPolicy::Log);
    fx.router.try_spawn_window("settings").unwrap();

    let navigator = fx.router.navigator();
    navigator.close_spawn();
    navigator.navigate_to("nowhere");
    navigator.focus_main_stage();
    assert_eq!(navigator.pending(), 3);

    assert_eq!(fx.router.process_pending(), 3);
    assert_eq!(fx.router.spawned_count(), 0);
    assert_eq!(fx.router.active_window(), ActiveWindow::Main);

    let failed = fx.log_event("operation_failed").expect("queued failure logged");
    assert_eq!(failed.field("path"), Some(&json!("nowhere")));
}

#[test]
fn queue_keeps_draining_after_a_request_panics() {
    let mut fx = fixture_with(|config| config.contain_panics = false);
    let navigator = fx.router.navigator();
    navigator.navigate_to("panics");
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        fx.router.process_pending()
    }));
    assert!(outcome.is_err());
    assert_eq!(fx.main_root().as_deref(), Some("home"));

    navigator.navigate_to("user/5");
    assert_eq!(fx.router.process_pending(), 1);
    assert_eq!(fx.main_root().as_deref(), Some("user:5"));
    assert_eq!(navigator.pending(), 0);
}

#[test]
fn spawn_and_close_are_audited() {
    let mut fx = fixture();
    fx.audit.clear();

    let window = fx.router.try_spawn_window("user/7").unwrap();
    let events = fx.audit.events();
    let stages: Vec<_> = events.iter().map(|event| event.stage).collect();
    assert_eq!(
        stages,
        vec![
            RouterAuditStage::RouteResolved,
            RouterAuditStage::ScreenInstantiated,
            RouterAuditStage::SceneApplied,
            RouterAuditStage::WindowSpawned,
        ]
    );
    assert_eq!(events[0].detail("params"), Some(&json!({"id": "7"})));
    assert_eq!(events[3].detail("window"), Some(&json!(window.raw())));

    fx.audit.clear();
    fx.router.close_spawn();
    let events = fx.audit.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].stage, RouterAuditStage::WindowClosed);
    assert_eq!(events[0].detail("cause"), Some(&json!("close_spawn")));
}

#[test]
fn metrics_follow_operations() {
    let mut fx = fixture();
    fx.router.try_navigate_to("user/1").unwrap();
    fx.router.try_spawn_window("settings").unwrap();
    fx.router.close_spawn();
    fx.router.focus_main_stage();
    fx.router.navigate_to("nowhere", ErrorPolicy::Ignore);

    let snapshot = fx.snapshot();
    assert_eq!(snapshot.navigations, 1);
    assert_eq!(snapshot.spawns, 1);
    assert_eq!(snapshot.closes, 1);
    assert_eq!(snapshot.focus_requests, 1);
    assert_eq!(snapshot.failures, 1);
    assert_eq!(snapshot.queued_requests, 0);

    fx.router.emit_metrics();
    let event = fx.log_event("router_metrics").expect("metrics logged");
    assert_eq!(event.field("spawns"), Some(&json!(1)));
}

#[test]
fn metrics_are_optional() {
    let mut fx = fixture_with(RouterConfig::disable_metrics);
    fx.router.try_navigate_to("user/1").unwrap();
    assert!(fx.router.metrics_snapshot().is_none());
    fx.router.emit_metrics();
    assert!(fx.log_event("router_metrics").is_none());
}
