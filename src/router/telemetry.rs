use std::sync::{Arc, Mutex};

use serde_json::{Value, json};

use crate::error::RouterError;
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv, json_str};
use crate::metrics::RouterMetrics;
use crate::stage::SpawnedWindowInfo;

use super::audit::{RouterAudit, RouterAuditEvent, RouterAuditEventBuilder, RouterAuditStage};
use super::config::RouterConfig;

/// Logger, metrics and audit handles bundled so hidden-window observers can
/// own a copy independent of the router.
#[derive(Clone)]
pub(crate) struct Telemetry {
    logger: Option<Logger>,
    metrics: Option<Arc<Mutex<RouterMetrics>>>,
    audit: Arc<dyn RouterAudit>,
    target: String,
}

impl Telemetry {
    pub(crate) fn from_config(config: &RouterConfig) -> Self {
        Self {
            logger: config.logger.clone(),
            metrics: config.metrics_handle(),
            audit: Arc::clone(&config.audit),
            target: config.log_target.clone(),
        }
    }

    pub(crate) fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        if let Some(logger) = self.logger.as_ref() {
            let event = event_with_fields(level, &self.target, message, fields);
            let _ = logger.log_event(event);
        }
    }

    pub(crate) fn logger(&self) -> Option<&Logger> {
        self.logger.as_ref()
    }

    pub(crate) fn target(&self) -> &str {
        &self.target
    }

    pub(crate) fn metrics(&self, update: impl FnOnce(&mut RouterMetrics)) {
        if let Some(metrics) = self.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                update(&mut guard);
            }
        }
    }

    pub(crate) fn metrics_handle(&self) -> Option<&Arc<Mutex<RouterMetrics>>> {
        self.metrics.as_ref()
    }

    pub(crate) fn audit(&self, event: RouterAuditEvent) {
        self.audit.record(event);
    }

    pub(crate) fn failure(&self, operation: &str, path: &str, err: &RouterError) {
        self.metrics(RouterMetrics::record_failure);
        self.audit(
            RouterAuditEventBuilder::new(RouterAuditStage::OperationFailed)
                .detail("operation", operation)
                .detail("path", path)
                .detail("error", err.kind())
                .detail("message", err.to_string())
                .finish(),
        );
    }

    pub(crate) fn window_closed(&self, info: &SpawnedWindowInfo, was_active: bool, cause: &str) {
        self.metrics(RouterMetrics::record_close);
        self.log(
            LogLevel::Info,
            "window_closed",
            [
                json_kv("window", json!(info.window)),
                json_str("path", info.path.as_str()),
                json_kv("was_active", json!(was_active)),
                json_str("cause", cause),
            ],
        );
        self.audit(
            RouterAuditEventBuilder::new(RouterAuditStage::WindowClosed)
                .detail("window", info.window.raw())
                .detail("path", info.path.as_str())
                .detail("was_active", was_active)
                .detail("cause", cause)
                .finish(),
        );
    }
}
