use crate::core::Logger;

/// Forwards check outcomes to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn log(&self, message: &str) {
        tracing::info!(target: "fanout_redeem::coupon", "{}", message);
    }
}
