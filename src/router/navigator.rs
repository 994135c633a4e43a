use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Navigation work requested by a screen, executed later by the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationRequest {
    NavigateTo(String),
    SpawnWindow(String),
    CloseSpawn,
    CloseSpawnByPath(String),
    FocusMainStage,
}

impl NavigationRequest {
    pub fn operation(&self) -> &'static str {
        match self {
            NavigationRequest::NavigateTo(_) => "navigate_to",
            NavigationRequest::SpawnWindow(_) => "spawn_window",
            NavigationRequest::CloseSpawn => "close_spawn",
            NavigationRequest::CloseSpawnByPath(_) => "close_spawn_by_path",
            NavigationRequest::FocusMainStage => "focus_main_stage",
        }
    }
}

/// Capability handle handed to screen factories.
///
/// It does not own the router. Requests are queued and applied by the router
/// once its current operation finishes, or when the host calls
/// `Router::process_pending`.
#[derive(Debug, Clone, Default)]
pub struct Navigator {
    queue: Rc<RefCell<VecDeque<NavigationRequest>>>,
}

impl Navigator {
    /// A handle with its own queue, not connected to any router.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn navigate_to(&self, path: impl Into<String>) {
        self.push(NavigationRequest::NavigateTo(path.into()));
    }

    pub fn spawn_window(&self, path: impl Into<String>) {
        self.push(NavigationRequest::SpawnWindow(path.into()));
    }

    pub fn close_spawn(&self) {
        self.push(NavigationRequest::CloseSpawn);
    }

    pub fn close_spawn_by_path(&self, path: impl Into<String>) {
        self.push(NavigationRequest::CloseSpawnByPath(path.into()));
    }

    pub fn focus_main_stage(&self) {
        self.push(NavigationRequest::FocusMainStage);
    }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn pending_requests(&self) -> Vec<NavigationRequest> {
        self.queue.borrow().iter().cloned().collect()
    }

    fn push(&self, request: NavigationRequest) {
        self.queue.borrow_mut().push_back(request);
    }

    pub(crate) fn pop(&self) -> Option<NavigationRequest> {
        self.queue.borrow_mut().pop_front()
    }

    /// Drop everything still queued and report how many requests were lost.
    pub(crate) fn clear(&self) -> usize {
        let mut queue = self.queue.borrow_mut();
        let dropped = queue.len();
        queue.clear();
        dropped
    }
}
