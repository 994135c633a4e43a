use std::fmt;
use std::sync::{Arc, Mutex};

use crate::logging::Logger;
use crate::metrics::RouterMetrics;

use super::audit::{NullRouterAudit, RouterAudit};

pub const DEFAULT_LOG_TARGET: &str = "stage_router::router";
pub const DEFAULT_MAX_CHAINED_REQUESTS: usize = 32;

/// How failures of navigator-queued requests are reported. There is no
/// caller to hand them to, so only the non-callback policies apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueuedPolicy {
    #[default]
    Ignore,
    Log,
}

/// Configuration knobs for the router.
#[derive(Clone)]
pub struct RouterConfig {
    /// Optional structured logger used by the router.
    pub logger: Option<Logger>,
    /// Counters updated on every operation.
    pub metrics: Option<Arc<Mutex<RouterMetrics>>>,
    /// Lifecycle audit sink.
    pub audit: Arc<dyn RouterAudit>,
    /// Target field used on every log event.
    pub log_target: String,
    /// Upper bound on navigator requests drained in one pass.
    pub max_chained_requests: usize,
    /// Turn panics raised by factories, render or mount hooks into errors.
    pub contain_panics: bool,
    pub queued_policy: QueuedPolicy,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            logger: None,
            metrics: None,
            audit: Arc::new(NullRouterAudit),
            log_target: DEFAULT_LOG_TARGET.to_string(),
            max_chained_requests: DEFAULT_MAX_CHAINED_REQUESTS,
            contain_panics: true,
            queued_policy: QueuedPolicy::Ignore,
        }
    }
}

impl RouterConfig {
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_audit(mut self, audit: Arc<dyn RouterAudit>) -> Self {
        self.audit = audit;
        self
    }

    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(RouterMetrics::new())));
        }
    }

    pub fn disable_metrics(&mut self) {
        self.metrics = None;
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<RouterMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

impl fmt::Debug for RouterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterConfig")
            .field("logger", &self.logger.is_some())
            .field("metrics", &self.metrics.is_some())
            .field("log_target", &self.log_target)
            .field("max_chained_requests", &self.max_chained_requests)
            .field("contain_panics", &self.contain_panics)
            .field("queued_policy", &self.queued_policy)
            .finish_non_exhaustive()
    }
}
