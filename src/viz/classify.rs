//! Primary-trace selection and shape validation.

use crate::models::{Trace, TraceKind, Visibility};
use serde_json::Value;
use thiserror::Error;

/// Why a trace cannot take the custom-legend path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidTrace {
    #[error("unsupported trace type: {0}")]
    UnsupportedType(String),
    #[error("trace has no category array")]
    MissingCategories,
    #[error("trace has no value array")]
    MissingValues,
    #[error("category/value length mismatch: {categories} categories, {values} values")]
    LengthMismatch { categories: usize, values: usize },
}

/// A bar or pie trace whose shape has been checked.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidTrace {
    pub kind: TraceKind,
    /// Category keys in string form.
    pub labels: Vec<String>,
    /// Values aligned with `labels`; `None` where the entry was not numeric.
    pub values: Vec<Option<f64>>,
    pub explicit_colors: Option<Vec<Value>>,
}

/// The trace chosen to drive the legend, with its position in the spec.
#[derive(Debug, Clone, Copy)]
pub struct Primary<'a> {
    pub index: usize,
    pub trace: &'a Trace,
}

/// First trace that is shown (or has no visibility flag); else the first trace.
///
/// Returns `None` for an empty trace list.
pub fn select_primary(traces: &[Trace]) -> Option<Primary<'_>> {
    let index = traces
        .iter()
        .position(|t| t.visibility() == Visibility::Shown)
        .unwrap_or(0);
    traces.get(index).map(|trace| Primary { index, trace })
}

/// Check that the trace is a bar or pie with aligned category and value arrays.
pub fn validate(trace: &Trace) -> Result<ValidTrace, InvalidTrace> {
    let kind = trace.kind();
    if kind == TraceKind::Other {
        let tag = trace.type_tag().unwrap_or("<none>");
        return Err(InvalidTrace::UnsupportedType(tag.to_string()));
    }
    let labels = trace
        .category_labels()
        .ok_or(InvalidTrace::MissingCategories)?;
    let values = trace.numeric_values().ok_or(InvalidTrace::MissingValues)?;
    if labels.len() != values.len() {
        return Err(InvalidTrace::LengthMismatch {
            categories: labels.len(),
            values: values.len(),
        });
    }
    Ok(ValidTrace {
        kind,
        labels,
        values,
        explicit_colors: trace.explicit_colors().cloned(),
    })
}
