mod core;
mod resolver;

pub use self::core::{PatternSegment, Route, RouteProps, RouteTable};
pub use resolver::{ResolvedRoute, RouteParams, resolve};
