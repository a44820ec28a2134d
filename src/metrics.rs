/// Metrics for catalog operations
///
/// Tracks call outcomes, failure kinds, entry counts and timings for each
/// operation (latest, recent, titles, search, categories)

use crate::error::ScrapeError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationMetrics {
    pub operation: String,
    pub total_calls: u64,
    pub successful_calls: u64,
    pub failed_calls: u64,
    pub render_timeouts: u64,
    pub navigation_failures: u64,
    pub entries_emitted: u64,
    pub entries_skipped: u64,
    pub last_success: Option<DateTime<Utc>>,
    pub last_failure: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
    pub average_duration_ms: f64,
    pub total_duration_ms: u64,
}

impl OperationMetrics {
    pub fn new(operation: String) -> Self {
        Self {
            operation,
            total_calls: 0,
            successful_calls: 0,
            failed_calls: 0,
            render_timeouts: 0,
            navigation_failures: 0,
            entries_emitted: 0,
            entries_skipped: 0,
            last_success: None,
            last_failure: None,
            last_error: None,
            average_duration_ms: 0.0,
            total_duration_ms: 0,
        }
    }

    pub fn success_rate(&self) -> f64 {
        if self.total_calls == 0 {
            0.0
        } else {
            (self.successful_calls as f64 / self.total_calls as f64) * 100.0
        }
    }

    pub fn record_success(&mut self, duration: Duration, emitted: usize, skipped: usize) {
        self.total_calls += 1;
        self.successful_calls += 1;
        self.entries_emitted += emitted as u64;
        self.entries_skipped += skipped as u64;
        self.last_success = Some(Utc::now());

        self.total_duration_ms += duration.as_millis() as u64;
        self.average_duration_ms = self.total_duration_ms as f64 / self.successful_calls as f64;
    }

    pub fn record_failure(&mut self, error: &ScrapeError) {
        self.total_calls += 1;
        self.failed_calls += 1;
        self.last_failure = Some(Utc::now());
        self.last_error = Some(error.to_string());

        match error {
            ScrapeError::RenderTimeout { .. } => self.render_timeouts += 1,
            ScrapeError::NavigationFailure { .. } => self.navigation_failures += 1,
            _ => {}
        }
    }
}

/// Process-wide metrics, keyed by operation name
#[derive(Default)]
pub struct MetricsTracker {
    metrics: Mutex<HashMap<String, OperationMetrics>>,
}

impl MetricsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, OperationMetrics>> {
        // Counters stay usable even if a holder panicked
        self.metrics.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn record_success(&self, operation: &str, duration: Duration, emitted: usize, skipped: usize) {
        let mut metrics = self.lock();
        let op = metrics
            .entry(operation.to_string())
            .or_insert_with(|| OperationMetrics::new(operation.to_string()));
        op.record_success(duration, emitted, skipped);

        log::info!(
            "[{}] {} entries ({} skipped) in {}ms - Success rate: {:.2}%",
            operation,
            emitted,
            skipped,
            duration.as_millis(),
            op.success_rate()
        );
    }

    pub fn record_failure(&self, operation: &str, error: &ScrapeError) {
        let mut metrics = self.lock();
        let op = metrics
            .entry(operation.to_string())
            .or_insert_with(|| OperationMetrics::new(operation.to_string()));
        op.record_failure(error);

        log::warn!(
            "[{}] Failure - Error: {} - Success rate: {:.2}%",
            operation,
            error,
            op.success_rate()
        );
    }

    pub fn get_metrics(&self, operation: &str) -> Option<OperationMetrics> {
        self.lock().get(operation).cloned()
    }

    /// Snapshot of every operation seen so far, sorted by name
    pub fn get_all_metrics(&self) -> Vec<OperationMetrics> {
        let mut all: Vec<_> = self.lock().values().cloned().collect();
        all.sort_by(|a, b| a.operation.cmp(&b.operation));
        all
    }
}
