use thiserror::Error;

use crate::toolkit::WindowId;

/// Unified result type for router operations.
pub type Result<T> = std::result::Result<T, RouterError>;

/// Result type returned by screen factories and render contracts.
pub type ScreenResult<T> = std::result::Result<T, ScreenError>;

/// Errors surfaced by navigation, spawning and scene application.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    #[error("Route not found: {0}")]
    RouteNotFound(String),
    #[error("screen for `{path}` could not be instantiated: {reason}")]
    ScreenInstantiation { path: String, reason: String },
    #[error("screen for `{path}` failed to render: {reason}")]
    RenderInvocation { path: String, reason: String },
    #[error(
        "scene could not be applied to {}: {reason}",
        .window.map_or_else(|| "a new window".to_string(), |id| id.to_string())
    )]
    WindowApplication {
        /// `None` when the toolkit could not create the window at all.
        window: Option<WindowId>,
        reason: String,
    },
}

impl RouterError {
    /// Short stable label used in log fields and audit details.
    pub fn kind(&self) -> &'static str {
        match self {
            RouterError::RouteNotFound(_) => "route_not_found",
            RouterError::ScreenInstantiation { .. } => "screen_instantiation",
            RouterError::RenderInvocation { .. } => "render_invocation",
            RouterError::WindowApplication { .. } => "window_application",
        }
    }
}

/// Failure raised by a screen factory or a screen's render contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ScreenError(pub String);

impl ScreenError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl From<String> for ScreenError {
    fn from(message: String) -> Self {
        Self(message)
    }
}

impl From<&str> for ScreenError {
    fn from(message: &str) -> Self {
        Self(message.to_string())
    }
}

/// Failure reported by the windowing toolkit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ToolkitError(pub String);

impl ToolkitError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
