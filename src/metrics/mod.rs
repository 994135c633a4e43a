use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Counters accumulated by the router across its lifetime.
#[derive(Debug, Default, Clone)]
pub struct RouterMetrics {
    navigations: u64,
    spawns: u64,
    closes: u64,
    focus_requests: u64,
    failures: u64,
    queued_requests: u64,
}

impl RouterMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_navigation(&mut self) {
        self.navigations = self.navigations.saturating_add(1);
    }

    pub fn record_spawn(&mut self) {
        self.spawns = self.spawns.saturating_add(1);
    }

    pub fn record_close(&mut self) {
        self.closes = self.closes.saturating_add(1);
    }

    pub fn record_focus(&mut self) {
        self.focus_requests = self.focus_requests.saturating_add(1);
    }

    pub fn record_failure(&mut self) {
        self.failures = self.failures.saturating_add(1);
    }

    pub fn record_queued(&mut self, count: usize) {
        if count > 0 {
            self.queued_requests = self.queued_requests.saturating_add(count as u64);
        }
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            navigations: self.navigations,
            spawns: self.spawns,
            closes: self.closes,
            focus_requests: self.focus_requests,
            failures: self.failures,
            queued_requests: self.queued_requests,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub navigations: u64,
    pub spawns: u64,
    pub closes: u64,
    pub focus_requests: u64,
    pub failures: u64,
    pub queued_requests: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "router_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("navigations".to_string(), json!(self.navigations));
        map.insert("spawns".to_string(), json!(self.spawns));
        map.insert("closes".to_string(), json!(self.closes));
        map.insert("focus_requests".to_string(), json!(self.focus_requests));
        map.insert("failures".to_string(), json!(self.failures));
        map.insert("queued_requests".to_string(), json!(self.queued_requests));
        map
    }
}
