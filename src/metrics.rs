//! Pipeline metrics.
//!
//! Recorded through the `metrics` facade. Nothing is exported unless the embedding
//! application installs a recorder.

use crate::types::MetaMethod;
use metrics::{counter, histogram};

/// Record a multicall invocation carrying `calls` calls.
pub(crate) fn record_batch(calls: usize) {
    counter!("balances_multicall_batches_total").increment(1);
    histogram!("balances_multicall_calls").record(calls as f64);
}

/// Record a balance result dropped by the non-zero filter.
pub(crate) fn record_dropped(reason: &'static str) {
    counter!("balances_dropped_results_total", "reason" => reason).increment(1);
}

/// Record a metadata value recovered through the `bytes32` fallback.
pub(crate) fn record_fallback(method: MetaMethod) {
    counter!("balances_decode_fallbacks_total", "method" => method.name()).increment(1);
}

/// Record a metadata value that could not be decoded at all.
pub(crate) fn record_undecodable(method: MetaMethod) {
    counter!("balances_undecodable_total", "method" => method.name()).increment(1);
}
