//! Memoization of pipeline results keyed on the structure of the input.
//!
//! A cached result is always identical to a fresh run, so callers may re-invoke
//! on every UI refresh and only pay for specs that actually changed.

use ahash::AHashMap;
use std::collections::VecDeque;

use super::derive_chart;
use super::types::{DerivedChart, LegendConfig};
use crate::models::ChartSpec;

/// Default number of distinct charts remembered.
pub const DEFAULT_CAPACITY: usize = 32;

/// Bounded cache of derived charts; the oldest insertion is evicted first.
#[derive(Debug, Clone)]
pub struct LegendCache {
    capacity: usize,
    entries: AHashMap<String, Option<DerivedChart>>,
    order: VecDeque<String>,
    hits: u64,
    misses: u64,
}

impl Default for LegendCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl LegendCache {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: AHashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Derive (or recall) the chart for `spec` under `config`.
    pub fn derive(&mut self, spec: &ChartSpec, config: &LegendConfig) -> Option<DerivedChart> {
        let key = match cache_key(spec, config) {
            Some(k) => k,
            None => return derive_chart(spec, config),
        };
        if let Some(hit) = self.entries.get(&key) {
            self.hits += 1;
            return hit.clone();
        }
        self.misses += 1;
        let derived = derive_chart(spec, config);
        if self.order.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, derived.clone());
        derived
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `(hits, misses)` since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

/// Canonical JSON of the spec plus the guardrail; object keys serialize in sorted order.
///
/// The locale only affects formatting after derivation, so it is not part of the key.
fn cache_key(spec: &ChartSpec, config: &LegendConfig) -> Option<String> {
    let spec = serde_json::to_string(spec).ok()?;
    Some(format!("{}|{}", config.guardrail, spec))
}
