// file: src/utils/telemetry.rs
// description: per-stage timing for the ingest pipeline
// reference: tracing spans and Instant-based timers

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Duration of one pipeline stage as reported to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTiming {
    pub stage: String,
    pub duration_us: u64,
    pub items: usize,
}

/// Records consecutive stage durations; each `lap` closes the current stage.
pub struct StageTimer {
    operation: String,
    started: Instant,
    lap_started: Instant,
    timings: Vec<StageTiming>,
}

impl StageTimer {
    pub fn new(operation: &str) -> Self {
        debug!("Starting {}", operation);
        let now = Instant::now();
        Self {
            operation: operation.to_string(),
            started: now,
            lap_started: now,
            timings: Vec::new(),
        }
    }

    pub fn lap(&mut self, stage: &str, items: usize) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.lap_started);
        self.lap_started = now;

        debug!(
            "[{}] {} finished: {} item(s) in {}us",
            self.operation,
            stage,
            items,
            elapsed.as_micros()
        );

        self.timings.push(StageTiming {
            stage: stage.to_string(),
            duration_us: elapsed.as_micros() as u64,
            items,
        });
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn warn_if_slow(&self, threshold: Duration) {
        let elapsed = self.elapsed();
        if elapsed > threshold {
            warn!(
                "Slow operation [{}]: took {:.2}s (threshold: {:.2}s)",
                self.operation,
                elapsed.as_secs_f64(),
                threshold.as_secs_f64()
            );
        }
    }

    pub fn finish(self) -> Vec<StageTiming> {
        debug!(
            "Completed {} in {:.3}s",
            self.operation,
            self.started.elapsed().as_secs_f64()
        );
        self.timings
    }
}
