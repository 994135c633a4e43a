//! In-memory toolkit that keeps window state in plain structs.
//!
//! Useful for tests and for hosts that drive the router without a display.
//! Clones share state, so a test can hand one clone to the router and keep
//! another to inspect windows or simulate the user closing them.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::ToolkitError;
use crate::screen::Scene;

use super::{HiddenObserver, Toolkit, WindowId};

/// Every toolkit call the router made, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolkitCall {
    Create(WindowId),
    Show(WindowId),
    Close(WindowId),
    ToFront(WindowId),
    RequestFocus(WindowId),
    SetTitle(WindowId, String),
    SetResizable(WindowId, bool),
    SetScene(WindowId),
    OnHidden(WindowId),
}

struct HeadlessWindow<N> {
    title: Option<String>,
    resizable: bool,
    visible: bool,
    focused: bool,
    scene: Option<Scene<N>>,
    observers: Vec<HiddenObserver>,
}

impl<N> HeadlessWindow<N> {
    fn new() -> Self {
        Self {
            title: None,
            resizable: true,
            visible: false,
            focused: false,
            scene: None,
            observers: Vec::new(),
        }
    }
}

struct HeadlessState<N> {
    next_id: u64,
    windows: BTreeMap<WindowId, HeadlessWindow<N>>,
    calls: Vec<ToolkitCall>,
    reject_next_scene: Option<String>,
    reject_next_create: Option<String>,
}

pub struct HeadlessToolkit<N> {
    state: Rc<RefCell<HeadlessState<N>>>,
}

impl<N> Clone for HeadlessToolkit<N> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<N> Default for HeadlessToolkit<N> {
    fn default() -> Self {
        Self {
            state: Rc::new(RefCell::new(HeadlessState {
                next_id: 1,
                windows: BTreeMap::new(),
                calls: Vec::new(),
                reject_next_scene: None,
                reject_next_create: None,
            })),
        }
    }
}

impl<N> HeadlessToolkit<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a toolkit with an already visible main window.
    pub fn with_main_window(title: &str) -> (Self, WindowId) {
        let toolkit = Self::new();
        let id = {
            let mut state = toolkit.state.borrow_mut();
            let id = WindowId::new(state.next_id);
            state.next_id += 1;
            let mut window = HeadlessWindow::new();
            window.title = Some(title.to_string());
            window.visible = true;
            state.windows.insert(id, window);
            id
        };
        (toolkit, id)
    }

    /// Make the next `set_scene` call fail with `reason`.
    pub fn reject_next_scene(&self, reason: impl Into<String>) {
        self.state.borrow_mut().reject_next_scene = Some(reason.into());
    }

    /// Make the next `create_window` call fail with `reason`.
    pub fn reject_next_create(&self, reason: impl Into<String>) {
        self.state.borrow_mut().reject_next_create = Some(reason.into());
    }

    /// Simulate the user closing a window through its decorations.
    pub fn user_close(&self, window: WindowId) {
        self.hide(window, false);
    }

    /// Fire the hidden observers of `window` even if it is already hidden.
    pub fn emit_hidden(&self, window: WindowId) {
        self.hide(window, true);
    }

    fn hide(&self, window: WindowId, force: bool) {
        let mut observers = {
            let mut state = self.state.borrow_mut();
            let Some(entry) = state.windows.get_mut(&window) else {
                return;
            };
            let was_visible = entry.visible;
            entry.visible = false;
            entry.focused = false;
            if !was_visible && !force {
                return;
            }
            std::mem::take(&mut entry.observers)
        };

        // Observers run without the state borrow so they may call back in.
        for observer in observers.iter_mut() {
            observer(window);
        }

        let mut state = self.state.borrow_mut();
        if let Some(entry) = state.windows.get_mut(&window) {
            observers.append(&mut entry.observers);
            entry.observers = observers;
        }
    }

    pub fn calls(&self) -> Vec<ToolkitCall> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn window_count(&self) -> usize {
        self.state.borrow().windows.len()
    }

    pub fn is_visible(&self, window: WindowId) -> bool {
        self.read(window, |w| w.visible).unwrap_or(false)
    }

    pub fn is_focused(&self, window: WindowId) -> bool {
        self.read(window, |w| w.focused).unwrap_or(false)
    }

    pub fn is_resizable(&self, window: WindowId) -> Option<bool> {
        self.read(window, |w| w.resizable)
    }

    pub fn observer_count(&self, window: WindowId) -> usize {
        self.read(window, |w| w.observers.len()).unwrap_or(0)
    }

    pub fn scene_size(&self, window: WindowId) -> Option<(u32, u32)> {
        self.read(window, |w| w.scene.as_ref().map(Scene::size))
            .flatten()
    }

    pub fn scene_root(&self, window: WindowId) -> Option<N>
    where
        N: Clone,
    {
        self.read(window, |w| w.scene.as_ref().map(|s| s.root().clone()))
            .flatten()
    }

    fn read<R>(&self, window: WindowId, f: impl FnOnce(&HeadlessWindow<N>) -> R) -> Option<R> {
        self.state.borrow().windows.get(&window).map(f)
    }

    fn write(&self, window: WindowId, call: ToolkitCall, f: impl FnOnce(&mut HeadlessWindow<N>)) {
        let mut state = self.state.borrow_mut();
        state.calls.push(call);
        if let Some(entry) = state.windows.get_mut(&window) {
            f(entry);
        }
    }
}

impl<N> Toolkit for HeadlessToolkit<N> {
    type Node = N;

    fn create_window(&mut self) -> Result<WindowId, ToolkitError> {
        let mut state = self.state.borrow_mut();
        if let Some(reason) = state.reject_next_create.take() {
            return Err(ToolkitError::new(reason));
        }
        let id = WindowId::new(state.next_id);
        state.next_id += 1;
        state.windows.insert(id, HeadlessWindow::new());
        state.calls.push(ToolkitCall::Create(id));
        Ok(id)
    }

    fn show(&mut self, window: WindowId) {
        self.write(window, ToolkitCall::Show(window), |w| w.visible = true);
    }

    fn close(&mut self, window: WindowId) {
        self.state.borrow_mut().calls.push(ToolkitCall::Close(window));
        self.hide(window, false);
    }

    fn to_front(&mut self, window: WindowId) {
        self.write(window, ToolkitCall::ToFront(window), |w| w.visible = true);
    }

    fn request_focus(&mut self, window: WindowId) {
        let mut state = self.state.borrow_mut();
        state.calls.push(ToolkitCall::RequestFocus(window));
        if !state.windows.contains_key(&window) {
            return;
        }
        for (id, entry) in state.windows.iter_mut() {
            entry.focused = *id == window;
        }
    }

    fn set_title(&mut self, window: WindowId, title: &str) {
        self.write(window, ToolkitCall::SetTitle(window, title.to_string()), |w| {
            w.title = Some(title.to_string())
        });
    }

    fn title(&self, window: WindowId) -> Option<String> {
        self.read(window, |w| w.title.clone()).flatten()
    }

    fn set_resizable(&mut self, window: WindowId, resizable: bool) {
        self.write(window, ToolkitCall::SetResizable(window, resizable), |w| {
            w.resizable = resizable
        });
    }

    fn set_scene(&mut self, window: WindowId, scene: Scene<N>) -> Result<(), ToolkitError> {
        let mut state = self.state.borrow_mut();
        if let Some(reason) = state.reject_next_scene.take() {
            return Err(ToolkitError::new(reason));
        }
        let entry = state
            .windows
            .get_mut(&window)
            .ok_or_else(|| ToolkitError::new(format!("{window} does not exist")))?;
        entry.scene = Some(scene);
        state.calls.push(ToolkitCall::SetScene(window));
        Ok(())
    }

    fn on_hidden(&mut self, window: WindowId, observer: HiddenObserver) {
        self.write(window, ToolkitCall::OnHidden(window), |w| {
            w.observers.push(observer)
        });
    }
}
