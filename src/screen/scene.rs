use crate::error::{Result, RouterError};
use crate::route::RouteProps;

use super::{Screen, guarded};

/// Rendered widget tree sized for a window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scene<N> {
    root: N,
    width: u32,
    height: u32,
}

impl<N> Scene<N> {
    pub fn new(root: N, width: u32, height: u32) -> Self {
        Self {
            root,
            width,
            height,
        }
    }

    pub fn root(&self) -> &N {
        &self.root
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn into_root(self) -> N {
        self.root
    }
}

/// Render `screen` once and wrap the node at the route's dimensions.
pub fn build_scene<N>(
    screen: &mut dyn Screen<N>,
    props: &RouteProps,
    path: &str,
    contain_panics: bool,
) -> Result<Scene<N>> {
    let rendered = guarded(contain_panics, || screen.render()).map_err(|reason| {
        RouterError::RenderInvocation {
            path: path.to_string(),
            reason,
        }
    })?;

    let root = rendered.map_err(|err| RouterError::RenderInvocation {
        path: path.to_string(),
        reason: err.to_string(),
    })?;

    Ok(Scene::new(root, props.width, props.height))
}
