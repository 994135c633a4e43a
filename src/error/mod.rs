mod types;

pub use types::{Result, RouterError, ScreenError, ScreenResult, ToolkitError};
