use std::fmt;

use serde::{Deserialize, Serialize};

use crate::screen::ScreenFactory;

const PLACEHOLDER_OPEN: &str = "${";
const PLACEHOLDER_CLOSE: &str = "}";

/// Display metadata applied to the window that shows a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteProps {
    pub width: u32,
    pub height: u32,
    /// Window title. `None` inherits the main window's current title.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_resizable")]
    pub resizable: bool,
}

fn default_resizable() -> bool {
    true
}

impl RouteProps {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            title: None,
            resizable: true,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }
}

/// One `/`-separated piece of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSegment {
    Literal(String),
    /// `${name}`: binds whatever the request has at this position.
    Placeholder(String),
}

impl PatternSegment {
    pub fn parse(raw: &str) -> Self {
        match raw
            .strip_prefix(PLACEHOLDER_OPEN)
            .and_then(|rest| rest.strip_suffix(PLACEHOLDER_CLOSE))
        {
            Some(name) => PatternSegment::Placeholder(name.to_string()),
            None => PatternSegment::Literal(raw.to_string()),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, PatternSegment::Placeholder(_))
    }
}

/// Declarative route: a path pattern, the factory for its screen and the
/// window metadata used when it is shown.
pub struct Route<N> {
    path: String,
    segments: Vec<PatternSegment>,
    factory: ScreenFactory<N>,
    props: RouteProps,
}

impl<N> Route<N> {
    pub fn new(path: impl Into<String>, factory: ScreenFactory<N>, props: RouteProps) -> Self {
        let path = path.into();
        let segments = path.split('/').map(PatternSegment::parse).collect();
        Self {
            path,
            segments,
            factory,
            props,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn segments(&self) -> &[PatternSegment] {
        &self.segments
    }

    pub fn factory(&self) -> &ScreenFactory<N> {
        &self.factory
    }

    pub fn props(&self) -> &RouteProps {
        &self.props
    }

    pub fn is_dynamic(&self) -> bool {
        self.segments.iter().any(PatternSegment::is_placeholder)
    }
}

impl<N> Clone for Route<N> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            segments: self.segments.clone(),
            factory: self.factory.clone(),
            props: self.props.clone(),
        }
    }
}

impl<N> fmt::Debug for Route<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("path", &self.path)
            .field("props", &self.props)
            .finish_non_exhaustive()
    }
}

/// Ordered set of routes. Patterns may overlap; resolution walks the table
/// in registration order and the first structural match wins.
pub struct RouteTable<N> {
    routes: Vec<Route<N>>,
}

impl<N> RouteTable<N> {
    pub fn new(routes: impl IntoIterator<Item = Route<N>>) -> Self {
        Self {
            routes: routes.into_iter().collect(),
        }
    }

    pub fn with_route(mut self, route: Route<N>) -> Self {
        self.routes.push(route);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route<N>> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn paths(&self) -> Vec<&str> {
        self.routes.iter().map(Route::path).collect()
    }
}

impl<N> Default for RouteTable<N> {
    fn default() -> Self {
        Self { routes: Vec::new() }
    }
}

impl<N> FromIterator<Route<N>> for RouteTable<N> {
    fn from_iter<I: IntoIterator<Item = Route<N>>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<N> fmt::Debug for RouteTable<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.routes.iter()).finish()
    }
}
