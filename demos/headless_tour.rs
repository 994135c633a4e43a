//! Walk through the router against the in-memory toolkit and print what the
//! windows end up showing, followed by the structured log.
//!
//! ```bash
//! cargo run --example headless_tour
//! ```

use std::sync::Arc;

use stage_router::{
    ErrorPolicy, HeadlessToolkit, Logger, MemorySink, Navigator, ReceivesRouteParams,
    RecordingAudit, Route, RouteParams, RouteProps, RouteTable, Router, RouterConfig, Screen,
    ScreenResult, Toolkit, screen_factory,
};

struct Dashboard;

impl Screen<String> for Dashboard {
    fn render(&mut self) -> ScreenResult<String> {
        Ok("[dashboard]".into())
    }
}

#[derive(Default)]
struct Profile {
    user: String,
}

impl Screen<String> for Profile {
    fn render(&mut self) -> ScreenResult<String> {
        Ok(format!("[profile {}]", self.user))
    }

    fn params_receiver(&mut self) -> Option<&mut dyn ReceivesRouteParams> {
        Some(self)
    }
}

impl ReceivesRouteParams for Profile {
    fn on_route_params(&mut self, params: &RouteParams) {
        self.user = params.get("user").cloned().unwrap_or_default();
    }
}

/// Asks for a profile window as soon as it is constructed.
struct Launcher;

impl Screen<String> for Launcher {
    fn render(&mut self) -> ScreenResult<String> {
        Ok("[launcher]".into())
    }
}

fn routes() -> RouteTable<String> {
    RouteTable::new(vec![
        Route::new(
            "dashboard",
            screen_factory(|_| Dashboard),
            RouteProps::new(1024, 768).with_title("Dashboard"),
        ),
        Route::new(
            "profile/${user}",
            screen_factory(|_| Profile::default()),
            RouteProps::new(480, 640),
        ),
        Route::new(
            "launcher",
            screen_factory(|navigator: &Navigator| {
                navigator.spawn_window("profile/ada");
                Launcher
            }),
            RouteProps::new(320, 200).with_title("Launcher").resizable(false),
        ),
    ])
}

fn describe(router: &Router<HeadlessToolkit<String>>) {
    let toolkit = router.toolkit();
    let main = router.main_window();
    println!(
        "main {main}: {} {:?} title={:?}",
        toolkit.scene_root(main).unwrap_or_default(),
        toolkit.scene_size(main),
        toolkit.title(main),
    );
    for info in router.spawned_windows() {
        println!(
            "  spawned {} ({}): {} title={:?}",
            info.window,
            info.path,
            toolkit.scene_root(info.window).unwrap_or_default(),
            toolkit.title(info.window),
        );
    }
    println!("  active -> {}", router.active_window_id());
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (toolkit, main) = HeadlessToolkit::with_main_window("Tour");
    let sink = MemorySink::new();
    let audit = Arc::new(RecordingAudit::new());
    let mut config = RouterConfig::default()
        .with_logger(Logger::new(sink.clone()))
        .with_audit(audit.clone());
    config.enable_metrics();

    let mut router = Router::with_config(routes(), "dashboard", toolkit.clone(), main, config)?;
    describe(&router);

    // Host event loop. UI callbacks only hold a Navigator, so their requests
    // sit in the queue until the loop drains it after each dispatched event.
    let navigator = router.navigator();
    let clicks: [(&str, &dyn Fn(&Navigator)); 2] = [
        ("open grace", &|nav: &Navigator| nav.navigate_to("profile/grace")),
        ("inspect linus", &|nav: &Navigator| nav.spawn_window("profile/linus")),
    ];
    for (label, on_click) in clicks {
        on_click(&navigator);
        let ran = router.process_pending();
        println!("event `{label}`: {ran} queued request(s) applied");
        describe(&router);
    }
    router.focus_main_stage();

    router.navigate_to("launcher", ErrorPolicy::Log);
    describe(&router);

    router.navigate_to("nowhere", ErrorPolicy::Log);
    if let Some(window) = router.spawned_windows().first().map(|info| info.window) {
        toolkit.user_close(window);
    }
    router.focus_main_stage();
    describe(&router);

    router.emit_metrics();
    println!("\nlog:");
    for event in sink.events() {
        println!("{}", serde_json::to_string(&event)?);
    }
    println!("\naudit stages: {:?}", audit.stages());
    Ok(())
}
