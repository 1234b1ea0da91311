/*!
 * Cost accounting for external translation calls.
 *
 * The ledger is a monotonically non-decreasing accumulator shared across
 * the whole job; it is never reset mid-session and supports concurrent
 * increments should independent parts ever be pipelined.
 */

use std::sync::Arc;
use parking_lot::Mutex;

use crate::errors::AppError;

/// Running total of external-call cost for one job
pub struct CostLedger {
    total: Arc<Mutex<f64>>,
}

impl CostLedger {
    /// Create a ledger starting at zero
    pub fn new() -> Self {
        Self {
            total: Arc::new(Mutex::new(0.0)),
        }
    }

    /// Add the cost of one external call.
    ///
    /// Negative or non-finite increments violate the monotonicity contract
    /// and fail fast.
    pub fn add(&self, cost: f64) {
        assert!(
            cost.is_finite() && cost >= 0.0,
            "cost increments must be finite and non-negative, got {}",
            cost
        );

        let mut total = self.total.lock();
        *total += cost;
    }

    /// Current accumulated total
    pub fn total(&self) -> f64 {
        *self.total.lock()
    }
}

impl Default for CostLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CostLedger {
    fn clone(&self) -> Self {
        Self {
            total: self.total.clone(),
        }
    }
}

/// End-of-job usage metrics handed to billing/reporting collaborators
#[derive(Debug, Clone, PartialEq)]
pub struct UsageReport {
    pairs: Vec<(String, f64)>,
}

impl UsageReport {
    /// Build a report from parallel key and value lists.
    ///
    /// Mismatched list lengths are a programming-contract violation and
    /// surface as an error rather than a silently truncated report.
    pub fn from_pairs(keys: &[&str], values: &[f64]) -> Result<Self, AppError> {
        if keys.len() != values.len() {
            return Err(AppError::InvalidArgument(format!(
                "usage report got {} keys but {} values",
                keys.len(),
                values.len()
            )));
        }

        Ok(Self {
            pairs: keys
                .iter()
                .zip(values.iter())
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        })
    }

    /// The recorded metric pairs in insertion order
    pub fn pairs(&self) -> &[(String, f64)] {
        &self.pairs
    }

    /// One-line human-readable summary
    pub fn summary(&self) -> String {
        self.pairs
            .iter()
            .map(|(key, value)| format!("{}: {:.4}", key, value))
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
