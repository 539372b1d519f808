use log::{debug, info};

/// Thin wrapper over the `log` facade so every component tags its records
/// with the stage that emitted them.
pub struct LogManager {
    stage: &'static str,
}

impl LogManager {
    pub fn new(stage: &'static str) -> Self {
        Self { stage }
    }

    pub fn record(&self, message: &str) {
        info!("[{}] {}", self.stage, message);
    }

    pub fn trace_step(&self, message: &str) {
        debug!("[{}] {}", self.stage, message);
    }
}
