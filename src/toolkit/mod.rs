//! Boundary between the router and the windowing toolkit.
//!
//! The router never creates surfaces itself. Everything it needs from the
//! host toolkit is expressed through [`Toolkit`]; windows are referred to by
//! opaque [`WindowId`] handles issued by the implementation.

use std::fmt;

use serde::Serialize;

use crate::error::ToolkitError;
use crate::screen::Scene;

pub mod headless;

/// Opaque handle to a top-level window owned by the toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct WindowId(u64);

impl WindowId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// Callback fired when a window is hidden or closed.
///
/// Toolkits may fire it more than once for the same window.
pub type HiddenObserver = Box<dyn FnMut(WindowId)>;

/// Capabilities the router requires from a windowing toolkit.
pub trait Toolkit {
    /// Root of a rendered widget tree.
    type Node;

    fn create_window(&mut self) -> Result<WindowId, ToolkitError>;
    fn show(&mut self, window: WindowId);
    fn close(&mut self, window: WindowId);
    fn to_front(&mut self, window: WindowId);
    fn request_focus(&mut self, window: WindowId);
    fn set_title(&mut self, window: WindowId, title: &str);
    fn title(&self, window: WindowId) -> Option<String>;
    fn set_resizable(&mut self, window: WindowId, resizable: bool);
    fn set_scene(
        &mut self,
        window: WindowId,
        scene: Scene<Self::Node>,
    ) -> Result<(), ToolkitError>;
    fn on_hidden(&mut self, window: WindowId, observer: HiddenObserver);
}
