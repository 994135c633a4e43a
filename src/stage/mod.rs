//! Window lifecycle tracking: the main window, the spawned-window registry and
//! the single active-window pointer.
//!
//! State lives behind an `Rc<RefCell<_>>` so hidden-window observers handed to
//! the toolkit can deregister entries through a weak reference. Callers must
//! not hold a borrow across toolkit calls; every public method here borrows
//! only for its own duration.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::route::RouteProps;
use crate::screen::Screen;
use crate::toolkit::{HiddenObserver, WindowId};

/// Which window `navigate_to` currently targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveWindow {
    Main,
    Spawned(WindowId),
}

impl ActiveWindow {
    pub fn is_main(self) -> bool {
        matches!(self, ActiveWindow::Main)
    }
}

/// Read-only description of a spawned window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnedWindowInfo {
    pub window: WindowId,
    /// Request path the window was spawned with.
    pub path: String,
    /// Pattern of the route that matched it.
    pub route_path: String,
    pub props: RouteProps,
}

/// Registry entry: the window description plus the live screen it shows.
pub struct SpawnedWindow<N> {
    info: SpawnedWindowInfo,
    screen: Box<dyn Screen<N>>,
}

impl<N> SpawnedWindow<N> {
    pub fn new(info: SpawnedWindowInfo, screen: Box<dyn Screen<N>>) -> Self {
        Self { info, screen }
    }

    pub fn info(&self) -> &SpawnedWindowInfo {
        &self.info
    }

    pub fn window(&self) -> WindowId {
        self.info.window
    }

    pub fn into_screen(self) -> Box<dyn Screen<N>> {
        self.screen
    }
}

impl<N> fmt::Debug for SpawnedWindow<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpawnedWindow")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

/// A spawned window removed from the registry.
#[derive(Debug)]
pub struct ClosedWindow<N> {
    pub entry: SpawnedWindow<N>,
    /// Whether the window was the active one when it was removed.
    pub was_active: bool,
}

impl<N> ClosedWindow<N> {
    pub fn window(&self) -> WindowId {
        self.entry.window()
    }

    pub fn info(&self) -> &SpawnedWindowInfo {
        self.entry.info()
    }
}

struct TrackerState<N> {
    main: WindowId,
    main_screen: Option<Box<dyn Screen<N>>>,
    spawned: Vec<SpawnedWindow<N>>,
    active: ActiveWindow,
}

impl<N> TrackerState<N> {
    fn position(&self, window: WindowId) -> Option<usize> {
        self.spawned.iter().position(|entry| entry.window() == window)
    }

    fn remove_at(&mut self, index: usize) -> ClosedWindow<N> {
        let entry = self.spawned.remove(index);
        let was_active = self.active == ActiveWindow::Spawned(entry.window());
        if was_active {
            self.active = ActiveWindow::Main;
        }
        ClosedWindow { entry, was_active }
    }
}

/// Owns the main window handle, spawned-window registry and active pointer.
pub struct StageTracker<N> {
    state: Rc<RefCell<TrackerState<N>>>,
}

impl<N: 'static> StageTracker<N> {
    pub fn new(main: WindowId) -> Self {
        Self {
            state: Rc::new(RefCell::new(TrackerState {
                main,
                main_screen: None,
                spawned: Vec::new(),
                active: ActiveWindow::Main,
            })),
        }
    }

    pub fn main_window(&self) -> WindowId {
        self.state.borrow().main
    }

    pub fn active(&self) -> ActiveWindow {
        self.state.borrow().active
    }

    /// Concrete handle of the active window.
    pub fn active_window_id(&self) -> WindowId {
        let state = self.state.borrow();
        match state.active {
            ActiveWindow::Main => state.main,
            ActiveWindow::Spawned(window) => window,
        }
    }

    pub fn spawned(&self) -> Vec<SpawnedWindowInfo> {
        self.state
            .borrow()
            .spawned
            .iter()
            .map(|entry| entry.info.clone())
            .collect()
    }

    pub fn spawned_count(&self) -> usize {
        self.state.borrow().spawned.len()
    }

    pub fn is_spawned(&self, window: WindowId) -> bool {
        self.state.borrow().position(window).is_some()
    }

    /// Store `screen` as the one shown by `window`, returning the screen it
    /// replaces. Unknown windows hand the screen straight back.
    pub fn replace_screen(
        &self,
        window: WindowId,
        screen: Box<dyn Screen<N>>,
    ) -> Option<Box<dyn Screen<N>>> {
        let mut state = self.state.borrow_mut();
        if window == state.main {
            return state.main_screen.replace(screen);
        }
        match state.position(window) {
            Some(index) => Some(std::mem::replace(&mut state.spawned[index].screen, screen)),
            None => Some(screen),
        }
    }

    /// Add a freshly shown window and make it the active one.
    pub fn register(&self, entry: SpawnedWindow<N>) {
        let mut state = self.state.borrow_mut();
        state.active = ActiveWindow::Spawned(entry.window());
        state.spawned.push(entry);
    }

    /// Remove `window` from the registry. Repeated calls are no-ops.
    pub fn deregister(&self, window: WindowId) -> Option<ClosedWindow<N>> {
        let mut state = self.state.borrow_mut();
        let index = state.position(window)?;
        Some(state.remove_at(index))
    }

    /// Remove the most recently spawned window.
    pub fn pop_latest(&self) -> Option<ClosedWindow<N>> {
        let mut state = self.state.borrow_mut();
        let index = state.spawned.len().checked_sub(1)?;
        Some(state.remove_at(index))
    }

    /// Remove the first window spawned with request path `path`.
    pub fn take_by_path(&self, path: &str) -> Option<ClosedWindow<N>> {
        let mut state = self.state.borrow_mut();
        let index = state.spawned.iter().position(|entry| entry.info.path == path)?;
        Some(state.remove_at(index))
    }

    pub fn focus_main(&self) {
        self.state.borrow_mut().active = ActiveWindow::Main;
    }

    /// Observer for the toolkit that deregisters the window once hidden.
    ///
    /// `on_removed` runs only when an entry was actually removed, after the
    /// tracker borrow is released.
    pub fn hidden_observer<F>(&self, mut on_removed: F) -> HiddenObserver
    where
        F: FnMut(&SpawnedWindowInfo, bool) + 'static,
    {
        let weak: Weak<RefCell<TrackerState<N>>> = Rc::downgrade(&self.state);
        Box::new(move |window| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            let mut guard = state.borrow_mut();
            let Some(index) = guard.position(window) else {
                return;
            };
            let closed = guard.remove_at(index);
            drop(guard);
            on_removed(closed.info(), closed.was_active);
        })
    }
}
