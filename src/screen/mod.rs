//! Screen contracts and the invocation helpers the router drives them with.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use crate::error::{Result, RouterError, ScreenResult};
use crate::route::RouteParams;
use crate::router::Navigator;

mod scene;

pub use scene::{Scene, build_scene};

/// A screen produces a widget tree of type `N` when rendered.
pub trait Screen<N> {
    fn render(&mut self) -> ScreenResult<N>;

    /// Expose the params capability when the screen wants route params.
    fn params_receiver(&mut self) -> Option<&mut dyn ReceivesRouteParams> {
        None
    }

    /// Called once the rendered scene is attached to its window.
    fn on_mount(&mut self) {}
}

/// Optional capability for screens that consume placeholder captures.
pub trait ReceivesRouteParams {
    fn on_route_params(&mut self, params: &RouteParams);
}

/// Factory type responsible for creating a fresh screen for a route.
pub type ScreenFactory<N> =
    Arc<dyn Fn(&Navigator) -> ScreenResult<Box<dyn Screen<N>>> + Send + Sync>;

/// Wrap an infallible constructor into a [`ScreenFactory`].
pub fn screen_factory<N, S, F>(make: F) -> ScreenFactory<N>
where
    N: 'static,
    S: Screen<N> + 'static,
    F: Fn(&Navigator) -> S + Send + Sync + 'static,
{
    Arc::new(move |navigator: &Navigator| Ok(Box::new(make(navigator)) as Box<dyn Screen<N>>))
}

/// Wrap a constructor that may fail (e.g. a dependency could not be built).
pub fn fallible_screen_factory<N, S, F>(make: F) -> ScreenFactory<N>
where
    N: 'static,
    S: Screen<N> + 'static,
    F: Fn(&Navigator) -> ScreenResult<S> + Send + Sync + 'static,
{
    Arc::new(move |navigator: &Navigator| {
        make(navigator).map(|screen| Box::new(screen) as Box<dyn Screen<N>>)
    })
}

/// Build a fresh screen through `factory` and deliver `params` if the screen
/// accepts them. `path` is the requested path, used for error context.
pub fn instantiate<N>(
    factory: &ScreenFactory<N>,
    params: &RouteParams,
    navigator: &Navigator,
    path: &str,
    contain_panics: bool,
) -> Result<Box<dyn Screen<N>>> {
    let produced = guarded(contain_panics, || factory(navigator)).map_err(|reason| {
        RouterError::ScreenInstantiation {
            path: path.to_string(),
            reason,
        }
    })?;

    let mut screen = produced.map_err(|err| RouterError::ScreenInstantiation {
        path: path.to_string(),
        reason: err.to_string(),
    })?;

    if let Some(receiver) = screen.params_receiver() {
        receiver.on_route_params(params);
    }

    Ok(screen)
}

/// Run `f`, turning a panic into its message when containment is enabled.
pub(crate) fn guarded<T>(
    contain_panics: bool,
    f: impl FnOnce() -> T,
) -> std::result::Result<T, String> {
    if !contain_panics {
        return Ok(f());
    }
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(panic_reason)
}

fn panic_reason(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("panicked: {message}")
    } else {
        "panicked".to_string()
    }
}
