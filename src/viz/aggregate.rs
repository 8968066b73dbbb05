//! Category aggregation for pie traces.

use std::collections::HashMap;

/// Unique labels in first-seen order with their summed values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Aggregated {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl Aggregated {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Sum over all aggregated values. May be infinite when finite values overflow.
    pub fn total(&self) -> f64 {
        self.values.iter().copied().map(finite_or_zero).sum()
    }

    /// Each value's share of the total in percent; all zero unless the total is positive.
    ///
    /// A total beyond `f64::MAX` is handled by rescaling the values before dividing.
    pub fn shares(&self) -> Vec<f64> {
        let total = self.total();
        let (scale, total) = if total.is_finite() {
            (1.0, total)
        } else {
            let scale = self.values.iter().fold(0.0_f64, |m, v| m.max(v.abs()));
            (scale, self.values.iter().map(|v| v / scale).sum::<f64>())
        };
        self.values
            .iter()
            .map(|v| if total > 0.0 { v / scale / total * 100.0 } else { 0.0 })
            .collect()
    }
}

/// Missing and non-finite values count as zero.
#[inline]
pub fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// Collapse duplicate labels, summing their values.
///
/// Pairs beyond the shorter of the two inputs are ignored; callers validate
/// equal lengths before getting here.
pub fn aggregate_categories(labels: &[String], values: &[Option<f64>]) -> Aggregated {
    let mut out = Aggregated::default();
    let mut slot: HashMap<&str, usize> = HashMap::with_capacity(labels.len());

    for (label, value) in labels.iter().zip(values) {
        let v = value.map(finite_or_zero).unwrap_or(0.0);
        match slot.get(label.as_str()) {
            Some(&i) => out.values[i] = (out.values[i] + v).clamp(-f64::MAX, f64::MAX),
            None => {
                slot.insert(label.as_str(), out.labels.len());
                out.labels.push(label.clone());
                out.values.push(v);
            }
        }
    }
    out
}
