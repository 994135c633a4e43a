//! Router lifecycle audit hooks.
//!
//! Records capture a stage identifier plus structured details so callers can
//! log, buffer, or assert on the router's progression without touching the
//! navigation path itself.

use std::sync::Mutex;
use std::time::SystemTime;

use serde_json::Value;

/// Checkpoints emitted while the router works.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterAuditStage {
    /// The entrypoint route was applied to the main window.
    RouterConstructed,
    /// A request path matched a registered route.
    RouteResolved,
    /// A factory produced a screen instance.
    ScreenInstantiated,
    /// A rendered scene was attached to a window.
    SceneApplied,
    /// A secondary window was shown and registered.
    WindowSpawned,
    /// A spawned window left the registry.
    WindowClosed,
    /// The main window was brought back to the front.
    MainFocused,
    /// An operation failed; the window state was left unchanged.
    OperationFailed,
}

#[derive(Debug, Clone)]
pub struct RouterAuditEvent {
    pub timestamp: SystemTime,
    pub stage: RouterAuditStage,
    pub details: Vec<(String, Value)>,
}

impl RouterAuditEvent {
    fn new(stage: RouterAuditStage) -> Self {
        Self {
            timestamp: SystemTime::now(),
            stage,
            details: Vec::new(),
        }
    }

    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }
}

pub struct RouterAuditEventBuilder {
    event: RouterAuditEvent,
}

impl RouterAuditEventBuilder {
    pub fn new(stage: RouterAuditStage) -> Self {
        Self {
            event: RouterAuditEvent::new(stage),
        }
    }

    pub fn detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.event.details.push((key.into(), value.into()));
        self
    }

    pub fn finish(self) -> RouterAuditEvent {
        self.event
    }
}

pub trait RouterAudit: Send + Sync {
    fn record(&self, event: RouterAuditEvent);
}

#[derive(Debug, Default)]
pub struct NullRouterAudit;

impl RouterAudit for NullRouterAudit {
    fn record(&self, _event: RouterAuditEvent) {}
}

/// Buffers every event in memory.
#[derive(Debug, Default)]
pub struct RecordingAudit {
    events: Mutex<Vec<RouterAuditEvent>>,
}

impl RecordingAudit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<RouterAuditEvent> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn stages(&self) -> Vec<RouterAuditStage> {
        self.events().into_iter().map(|event| event.stage).collect()
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.events.lock() {
            guard.clear();
        }
    }
}

impl RouterAudit for RecordingAudit {
    fn record(&self, event: RouterAuditEvent) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push(event);
        }
    }
}
