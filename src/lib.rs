//! Path-based screen router for desktop applications.
//!
//! Routes map path patterns such as `user/${id}` to screen factories and
//! window properties. The [`Router`] shows screens in the main window, spawns
//! secondary windows, and tracks which window navigation currently targets.
//! Windowing is abstracted behind the [`Toolkit`] trait; [`HeadlessToolkit`]
//! keeps everything in memory for tests and display-less hosts.
//!
//! Screens never call the router directly. They hold a [`Navigator`], which
//! only queues requests. The router drains that queue at the end of each of
//! its own operations, but a request made later, from a UI callback, waits
//! until the host calls [`Router::process_pending`]. Hosts should call it
//! after dispatching every toolkit event.

pub mod error;
pub mod logging;
pub mod metrics;
pub mod route;
pub mod router;
pub mod screen;
pub mod stage;
pub mod toolkit;

pub use error::{Result, RouterError, ScreenError, ScreenResult, ToolkitError};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink, NullSink,
};
pub use metrics::{MetricSnapshot, RouterMetrics};
pub use route::{PatternSegment, ResolvedRoute, Route, RouteParams, RouteProps, RouteTable, resolve};
pub use router::audit::{
    NullRouterAudit, RecordingAudit, RouterAudit, RouterAuditEvent, RouterAuditEventBuilder,
    RouterAuditStage,
};
pub use router::{
    ErrorPolicy, NavigationRequest, Navigator, QueuedPolicy, Router, RouterConfig,
};
pub use screen::{
    ReceivesRouteParams, Scene, Screen, ScreenFactory, fallible_screen_factory, screen_factory,
};
pub use stage::{ActiveWindow, SpawnedWindowInfo};
pub use toolkit::headless::{HeadlessToolkit, ToolkitCall};
pub use toolkit::{HiddenObserver, Toolkit, WindowId};
