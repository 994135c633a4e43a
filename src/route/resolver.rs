use std::collections::BTreeMap;
use std::fmt;

use crate::error::{Result, RouterError};

use super::core::{PatternSegment, Route, RouteTable};

/// Placeholder captures keyed by placeholder name. Values are raw segments.
pub type RouteParams = BTreeMap<String, String>;

/// A matched route together with the parameters captured from the request.
pub struct ResolvedRoute<'a, N> {
    route: &'a Route<N>,
    params: RouteParams,
}

impl<'a, N> ResolvedRoute<'a, N> {
    pub fn route(&self) -> &'a Route<N> {
        self.route
    }

    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    pub fn into_params(self) -> RouteParams {
        self.params
    }
}

impl<N> PartialEq for ResolvedRoute<'_, N> {
    fn eq(&self, other: &Self) -> bool {
        self.route.path() == other.route.path() && self.params == other.params
    }
}

impl<N> fmt::Debug for ResolvedRoute<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedRoute")
            .field("route", &self.route.path())
            .field("params", &self.params)
            .finish()
    }
}

impl<N> Clone for ResolvedRoute<'_, N> {
    fn clone(&self) -> Self {
        Self {
            route: self.route,
            params: self.params.clone(),
        }
    }
}

/// Find the first route in `table` whose pattern structurally matches `path`.
///
/// The path is split on `/` as-is: `"/a"` has two segments and `"a"` one.
/// Trailing empty segments are kept too, so `"home/"` does not match `home`.
pub fn resolve<'a, N>(table: &'a RouteTable<N>, path: &str) -> Result<ResolvedRoute<'a, N>> {
    let requested: Vec<&str> = path.split('/').collect();

    table
        .iter()
        .find_map(|route| {
            match_segments(route.segments(), &requested).map(|params| ResolvedRoute {
                route,
                params,
            })
        })
        .ok_or_else(|| RouterError::RouteNotFound(path.to_string()))
}

fn match_segments(pattern: &[PatternSegment], requested: &[&str]) -> Option<RouteParams> {
    if pattern.len() != requested.len() {
        return None;
    }

    let mut params = RouteParams::new();
    for (segment, value) in pattern.iter().zip(requested) {
        match segment {
            // Later captures with the same name overwrite earlier ones.
            PatternSegment::Placeholder(name) => {
                params.insert(name.clone(), (*value).to_string());
            }
            PatternSegment::Literal(literal) if literal == value => {}
            PatternSegment::Literal(_) => return None,
        }
    }
    Some(params)
}

impl<N> RouteTable<N> {
    pub fn resolve(&self, path: &str) -> Result<ResolvedRoute<'_, N>> {
        resolve(self, path)
    }
}
