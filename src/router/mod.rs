//! Router facade: resolves paths, builds screens and scenes, and moves them
//! between the main window and the spawned windows it tracks.
//!
//! Every public operation runs to completion before any navigation requested
//! by a screen (through its [`Navigator`]) is applied. Queued requests are
//! drained at the end of each operation, bounded by
//! [`RouterConfig::max_chained_requests`].

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use serde_json::{Value, json};

use crate::error::{Result, RouterError};
use crate::logging::{LogLevel, json_kv, json_str};
use crate::metrics::{MetricSnapshot, RouterMetrics};
use crate::route::{ResolvedRoute, RouteProps, RouteTable};
use crate::screen::{Scene, Screen, build_scene, guarded, instantiate};
use crate::stage::{ActiveWindow, ClosedWindow, SpawnedWindow, SpawnedWindowInfo, StageTracker};
use crate::toolkit::{Toolkit, WindowId};

pub mod audit;
mod config;
mod navigator;
mod telemetry;

#[cfg(test)]
mod tests;

pub use audit::{
    NullRouterAudit, RecordingAudit, RouterAudit, RouterAuditEvent, RouterAuditEventBuilder,
    RouterAuditStage,
};
pub use config::{DEFAULT_LOG_TARGET, DEFAULT_MAX_CHAINED_REQUESTS, QueuedPolicy, RouterConfig};
pub use navigator::{NavigationRequest, Navigator};

use telemetry::Telemetry;

/// What happens to a failure once the router has contained it.
///
/// Whatever the policy, a failed operation leaves window state untouched,
/// bumps the failure counter and records an audit event.
#[derive(Default)]
pub enum ErrorPolicy<'a> {
    /// Drop the error without logging it.
    #[default]
    Ignore,
    /// Emit an `operation_failed` warning through the configured logger.
    Log,
    /// Hand the error to the caller.
    Handler(&'a mut dyn FnMut(&RouterError)),
}

impl<'a> ErrorPolicy<'a> {
    pub fn handler(handler: &'a mut dyn FnMut(&RouterError)) -> Self {
        ErrorPolicy::Handler(handler)
    }
}

impl fmt::Debug for ErrorPolicy<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorPolicy::Ignore => f.write_str("Ignore"),
            ErrorPolicy::Log => f.write_str("Log"),
            ErrorPolicy::Handler(_) => f.write_str("Handler(..)"),
        }
    }
}

impl From<QueuedPolicy> for ErrorPolicy<'static> {
    fn from(policy: QueuedPolicy) -> Self {
        match policy {
            QueuedPolicy::Ignore => ErrorPolicy::Ignore,
            QueuedPolicy::Log => ErrorPolicy::Log,
        }
    }
}

/// Marks a drain in progress; the flag is cleared on drop, including while
/// unwinding out of a request that panicked.
struct DrainGuard(Rc<Cell<bool>>);

impl DrainGuard {
    fn enter(flag: &Rc<Cell<bool>>) -> Option<Self> {
        if flag.replace(true) {
            return None;
        }
        Some(Self(Rc::clone(flag)))
    }
}

impl Drop for DrainGuard {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Screen and scene built for a path, not yet attached to a window.
struct Prepared<N> {
    route_path: String,
    props: RouteProps,
    screen: Box<dyn Screen<N>>,
    scene: Scene<N>,
}

pub struct Router<T: Toolkit> {
    routes: RouteTable<T::Node>,
    toolkit: T,
    tracker: StageTracker<T::Node>,
    navigator: Navigator,
    config: RouterConfig,
    telemetry: Telemetry,
    started_at: Instant,
    draining: Rc<Cell<bool>>,
}

impl<T> Router<T>
where
    T: Toolkit,
    T::Node: 'static,
{
    /// Build a router and show `entrypoint` in `main`.
    pub fn new(
        routes: RouteTable<T::Node>,
        entrypoint: &str,
        toolkit: T,
        main: WindowId,
    ) -> Result<Self> {
        Self::with_config(routes, entrypoint, toolkit, main, RouterConfig::default())
    }

    /// Like [`Router::new`] with explicit configuration. A failing entrypoint
    /// is returned to the caller instead of being contained.
    pub fn with_config(
        routes: RouteTable<T::Node>,
        entrypoint: &str,
        toolkit: T,
        main: WindowId,
        config: RouterConfig,
    ) -> Result<Self> {
        let telemetry = Telemetry::from_config(&config);
        let mut router = Self {
            routes,
            toolkit,
            tracker: StageTracker::new(main),
            navigator: Navigator::detached(),
            config,
            telemetry,
            started_at: Instant::now(),
            draining: Rc::default(),
        };

        if let Err(err) = router.navigate_inner(entrypoint) {
            router.telemetry.failure("construct", entrypoint, &err);
            router.telemetry.log(
                LogLevel::Error,
                "router_start_failed",
                [
                    json_str("entrypoint", entrypoint),
                    json_str("error", err.kind()),
                    json_str("message", err.to_string()),
                ],
            );
            return Err(err);
        }

        router.telemetry.audit(
            RouterAuditEventBuilder::new(RouterAuditStage::RouterConstructed)
                .detail("entrypoint", entrypoint)
                .detail("routes", router.routes.len())
                .detail("main_window", main.raw())
                .finish(),
        );
        router.telemetry.log(
            LogLevel::Info,
            "router_started",
            [
                json_str("entrypoint", entrypoint),
                json_kv("routes", json!(router.routes.len())),
                json_kv("main_window", json!(main)),
            ],
        );
        router.process_pending();
        Ok(router)
    }

    /// Replace the scene of the active window with `path`'s screen.
    pub fn navigate_to(&mut self, path: &str, policy: ErrorPolicy<'_>) {
        if let Err(err) = self.try_navigate_to(path) {
            self.report("navigate_to", path, &err, policy);
        }
    }

    /// Fallible variant of [`Router::navigate_to`]. On error the active
    /// window keeps its previous scene.
    pub fn try_navigate_to(&mut self, path: &str) -> Result<()> {
        let result = self.navigate_inner(path);
        match &result {
            Ok(window) => {
                self.telemetry.metrics(RouterMetrics::record_navigation);
                self.telemetry.log(
                    LogLevel::Info,
                    "navigated",
                    [json_str("path", path), json_kv("window", json!(window))],
                );
            }
            Err(err) => self.telemetry.failure("navigate_to", path, err),
        }
        self.process_pending();
        result.map(|_| ())
    }

    /// Open a new window showing `path` and make it active.
    pub fn spawn_window(&mut self, path: &str, policy: ErrorPolicy<'_>) -> Option<WindowId> {
        match self.try_spawn_window(path) {
            Ok(window) => Some(window),
            Err(err) => {
                self.report("spawn_window", path, &err, policy);
                None
            }
        }
    }

    /// Fallible variant of [`Router::spawn_window`]. On error no window is
    /// registered and the active pointer is unchanged.
    pub fn try_spawn_window(&mut self, path: &str) -> Result<WindowId> {
        let result = self.spawn_inner(path);
        match &result {
            Ok(window) => {
                self.telemetry.metrics(RouterMetrics::record_spawn);
                self.telemetry.log(
                    LogLevel::Info,
                    "window_spawned",
                    [json_str("path", path), json_kv("window", json!(window))],
                );
                self.telemetry.audit(
                    RouterAuditEventBuilder::new(RouterAuditStage::WindowSpawned)
                        .detail("path", path)
                        .detail("window", window.raw())
                        .finish(),
                );
            }
            Err(err) => self.telemetry.failure("spawn_window", path, err),
        }
        self.process_pending();
        result
    }

    /// Close the most recently spawned window. No-op when none is open.
    pub fn close_spawn(&mut self) -> Option<WindowId> {
        let closed = self
            .tracker
            .pop_latest()
            .map(|closed| self.close_entry(closed, "close_spawn"));
        self.process_pending();
        closed
    }

    /// Close the first spawned window opened with request path `path`.
    pub fn close_spawn_by_path(&mut self, path: &str) -> Option<WindowId> {
        let closed = self
            .tracker
            .take_by_path(path)
            .map(|closed| self.close_entry(closed, "close_spawn_by_path"));
        self.process_pending();
        closed
    }

    /// Bring the main window forward and make it the navigation target.
    pub fn focus_main_stage(&mut self) {
        let main = self.tracker.main_window();
        self.toolkit.to_front(main);
        self.toolkit.request_focus(main);
        self.tracker.focus_main();

        self.telemetry.metrics(RouterMetrics::record_focus);
        self.telemetry.log(
            LogLevel::Info,
            "main_focused",
            [json_kv("window", json!(main))],
        );
        self.telemetry.audit(
            RouterAuditEventBuilder::new(RouterAuditStage::MainFocused)
                .detail("window", main.raw())
                .finish(),
        );
        self.process_pending();
    }

    /// Tell the router a window was hidden outside of its control. Toolkits
    /// that cannot hold observers call this directly; repeated calls are
    /// no-ops. Returns whether a spawned window was removed.
    pub fn window_hidden(&mut self, window: WindowId) -> bool {
        match self.tracker.deregister(window) {
            Some(closed) => {
                self.telemetry
                    .window_closed(closed.info(), closed.was_active, "host");
                true
            }
            None => false,
        }
    }

    /// Apply requests queued through the navigator. Returns how many ran.
    ///
    /// Requests queued while draining are picked up by the same pass; once
    /// `max_chained_requests` have run, whatever remains is dropped.
    pub fn process_pending(&mut self) -> usize {
        let Some(_guard) = DrainGuard::enter(&self.draining) else {
            return 0;
        };

        let mut processed = 0;
        while let Some(request) = self.navigator.pop() {
            if processed >= self.config.max_chained_requests {
                let dropped = self.navigator.clear() + 1;
                self.telemetry.log(
                    LogLevel::Warn,
                    "queued_requests_dropped",
                    [
                        json_kv("dropped", json!(dropped)),
                        json_kv("limit", json!(self.config.max_chained_requests)),
                        json_str("next", request.operation()),
                    ],
                );
                break;
            }
            processed += 1;
            self.telemetry.metrics(|metrics| metrics.record_queued(1));
            self.run_request(request);
        }

        processed
    }

    pub fn routes(&self) -> &RouteTable<T::Node> {
        &self.routes
    }

    pub fn resolve(&self, path: &str) -> Result<ResolvedRoute<'_, T::Node>> {
        self.routes.resolve(path)
    }

    pub fn active_window(&self) -> ActiveWindow {
        self.tracker.active()
    }

    pub fn active_window_id(&self) -> WindowId {
        self.tracker.active_window_id()
    }

    pub fn main_window(&self) -> WindowId {
        self.tracker.main_window()
    }

    /// Spawned windows in the order they were opened.
    pub fn spawned_windows(&self) -> Vec<SpawnedWindowInfo> {
        self.tracker.spawned()
    }

    pub fn spawned_count(&self) -> usize {
        self.tracker.spawned_count()
    }

    pub fn is_spawned(&self, window: WindowId) -> bool {
        self.tracker.is_spawned(window)
    }

    /// Handle sharing the router's request queue.
    pub fn navigator(&self) -> Navigator {
        self.navigator.clone()
    }

    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn metrics_snapshot(&self) -> Option<MetricSnapshot> {
        let metrics = self.telemetry.metrics_handle()?;
        let guard = metrics.lock().ok()?;
        Some(guard.snapshot(self.started_at.elapsed()))
    }

    /// Write the current counters through the logger, if both are configured.
    pub fn emit_metrics(&self) {
        let Some(logger) = self.telemetry.logger() else {
            return;
        };
        if let Some(snapshot) = self.metrics_snapshot() {
            let _ = logger.log_event(snapshot.to_log_event(self.telemetry.target()));
        }
    }

    fn navigate_inner(&mut self, path: &str) -> Result<WindowId> {
        let window = self.tracker.active_window_id();
        let prepared = self.prepare(path)?;
        self.apply(window, prepared)?;
        Ok(window)
    }

    fn spawn_inner(&mut self, path: &str) -> Result<WindowId> {
        let Prepared {
            route_path,
            props,
            mut screen,
            scene,
        } = self.prepare(path)?;

        let window = self
            .toolkit
            .create_window()
            .map_err(|err| RouterError::WindowApplication {
                window: None,
                reason: err.to_string(),
            })?;

        if let Err(err) = self.toolkit.set_scene(window, scene) {
            self.toolkit.close(window);
            return Err(RouterError::WindowApplication {
                window: Some(window),
                reason: err.to_string(),
            });
        }
        self.audit_scene_applied(window, &route_path);

        self.apply_window_props(window, &props);
        self.toolkit.show(window);

        let telemetry = self.telemetry.clone();
        let observer = self.tracker.hidden_observer(move |info, was_active| {
            telemetry.window_closed(info, was_active, "toolkit");
        });
        self.toolkit.on_hidden(window, observer);

        self.mount(window, screen.as_mut());
        let info = SpawnedWindowInfo {
            window,
            path: path.to_string(),
            route_path,
            props,
        };
        self.tracker.register(SpawnedWindow::new(info, screen));
        Ok(window)
    }

    fn prepare(&self, path: &str) -> Result<Prepared<T::Node>> {
        let resolved = self.routes.resolve(path)?;
        let route = resolved.route();
        self.telemetry.audit(
            RouterAuditEventBuilder::new(RouterAuditStage::RouteResolved)
                .detail("path", path)
                .detail("route", route.path())
                .detail(
                    "params",
                    serde_json::to_value(resolved.params()).unwrap_or(Value::Null),
                )
                .finish(),
        );

        let contain_panics = self.config.contain_panics;
        let mut screen = instantiate(
            route.factory(),
            resolved.params(),
            &self.navigator,
            path,
            contain_panics,
        )?;
        self.telemetry.audit(
            RouterAuditEventBuilder::new(RouterAuditStage::ScreenInstantiated)
                .detail("path", path)
                .detail("route", route.path())
                .finish(),
        );

        let scene = build_scene(screen.as_mut(), route.props(), path, contain_panics)?;
        Ok(Prepared {
            route_path: route.path().to_string(),
            props: route.props().clone(),
            screen,
            scene,
        })
    }

    /// Attach a prepared screen to an existing window.
    fn apply(&mut self, window: WindowId, prepared: Prepared<T::Node>) -> Result<()> {
        let Prepared {
            route_path,
            props,
            mut screen,
            scene,
        } = prepared;

        self.toolkit
            .set_scene(window, scene)
            .map_err(|err| RouterError::WindowApplication {
                window: Some(window),
                reason: err.to_string(),
            })?;
        self.audit_scene_applied(window, &route_path);

        self.apply_window_props(window, &props);
        self.mount(window, screen.as_mut());

        // Dropped only after the tracker borrow ends, so a screen's Drop may
        // query the router state safely.
        let replaced = self.tracker.replace_screen(window, screen);
        drop(replaced);
        Ok(())
    }

    /// Title falls back to the main window's, then stays as the toolkit has it.
    fn apply_window_props(&mut self, window: WindowId, props: &RouteProps) {
        let main = self.tracker.main_window();
        let title = props
            .title
            .clone()
            .or_else(|| self.toolkit.title(main));
        if let Some(title) = title {
            self.toolkit.set_title(window, &title);
        }
        self.toolkit.set_resizable(window, props.resizable);
    }

    fn mount(&self, window: WindowId, screen: &mut dyn Screen<T::Node>) {
        if let Err(reason) = guarded(self.config.contain_panics, || screen.on_mount()) {
            self.telemetry.log(
                LogLevel::Warn,
                "mount_failed",
                [json_kv("window", json!(window)), json_str("reason", reason)],
            );
        }
    }

    fn close_entry(&mut self, closed: ClosedWindow<T::Node>, cause: &str) -> WindowId {
        let window = closed.window();
        // Already deregistered, so the hidden observer this fires is a no-op.
        self.toolkit.close(window);
        self.telemetry
            .window_closed(closed.info(), closed.was_active, cause);
        window
    }

    fn run_request(&mut self, request: NavigationRequest) {
        let policy = ErrorPolicy::from(self.config.queued_policy);
        match request {
            NavigationRequest::NavigateTo(path) => self.navigate_to(&path, policy),
            NavigationRequest::SpawnWindow(path) => {
                self.spawn_window(&path, policy);
            }
            NavigationRequest::CloseSpawn => {
                self.close_spawn();
            }
            NavigationRequest::CloseSpawnByPath(path) => {
                self.close_spawn_by_path(&path);
            }
            NavigationRequest::FocusMainStage => self.focus_main_stage(),
        }
    }

    fn report(&self, operation: &str, path: &str, err: &RouterError, policy: ErrorPolicy<'_>) {
        match policy {
            ErrorPolicy::Ignore => {}
            ErrorPolicy::Log => self.telemetry.log(
                LogLevel::Warn,
                "operation_failed",
                [
                    json_str("operation", operation),
                    json_str("path", path),
                    json_str("error", err.kind()),
                    json_str("message", err.to_string()),
                ],
            ),
            ErrorPolicy::Handler(handler) => handler(err),
        }
    }

    fn audit_scene_applied(&self, window: WindowId, route_path: &str) {
        self.telemetry.audit(
            RouterAuditEventBuilder::new(RouterAuditStage::SceneApplied)
                .detail("window", window.raw())
                .detail("route", route_path)
                .finish(),
        );
    }
}

impl<T: Toolkit> fmt::Debug for Router<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes.len())
            .field("config", &self.config)
            .field("draining", &self.draining.get())
            .finish_non_exhaustive()
    }
}
