//! Legend decision policy: custom legend or the plotting library's native one.
//!
//! | primary trace | condition                                   | legend            | native |
//! |---------------|---------------------------------------------|-------------------|--------|
//! | bar           | at most `guardrail` labels, all distinct    | one per category  | hidden |
//! | bar           | otherwise                                   | none              | shown  |
//! | pie           | always (after aggregation)                  | first `guardrail` | hidden |
//! | other/invalid | always                                      | none              | shown  |

use crate::models::{LegendEntry, Trace, TraceKind};
use serde_json::Value;
use std::collections::HashSet;

use super::aggregate::{aggregate_categories, finite_or_zero};
use super::classify::{InvalidTrace, ValidTrace};
use super::palette::{assign_colors, well_formed_colors};

/// What the policy decided for one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyOutcome {
    /// Original traces, with the primary one replaced by its annotated version.
    pub traces: Vec<Trace>,
    pub legend: Vec<LegendEntry>,
    pub show_native_legend: bool,
}

impl PolicyOutcome {
    fn native(traces: &[Trace]) -> Self {
        Self {
            traces: traces.to_vec(),
            legend: Vec::new(),
            show_native_legend: true,
        }
    }
}

/// Apply the policy table to the primary trace at `index`.
pub fn decide(
    traces: &[Trace],
    index: usize,
    primary: Result<ValidTrace, InvalidTrace>,
    guardrail: usize,
) -> PolicyOutcome {
    let valid = match primary {
        Ok(v) => v,
        Err(reason) => {
            log::debug!("trace {index}: native legend ({reason})");
            return PolicyOutcome::native(traces);
        }
    };
    match valid.kind {
        TraceKind::Bar => bar_legend(traces, index, valid, guardrail),
        TraceKind::Pie => pie_legend(traces, index, valid, guardrail),
        TraceKind::Other => PolicyOutcome::native(traces),
    }
}

fn all_distinct(labels: &[String]) -> bool {
    let mut seen = HashSet::with_capacity(labels.len());
    labels.iter().all(|l| seen.insert(l.as_str()))
}

fn bar_legend(traces: &[Trace], index: usize, valid: ValidTrace, guardrail: usize) -> PolicyOutcome {
    if valid.labels.len() > guardrail {
        log::debug!(
            "trace {index}: {} bar categories exceed guardrail {guardrail}, native legend",
            valid.labels.len()
        );
        return PolicyOutcome::native(traces);
    }
    if !all_distinct(&valid.labels) {
        log::debug!("trace {index}: duplicate bar categories, native legend");
        return PolicyOutcome::native(traces);
    }

    let colors = assign_colors(&valid.labels, valid.explicit_colors.as_deref());
    let legend = valid
        .labels
        .iter()
        .zip(&valid.values)
        .zip(&colors)
        .map(|((label, value), color)| LegendEntry {
            label: label.clone(),
            value: value.map(finite_or_zero).unwrap_or(0.0),
            percent: None,
            color: color.clone(),
        })
        .collect();

    let mut out = traces.to_vec();
    out[index].set_marker_field("color", string_array(&colors));
    PolicyOutcome {
        traces: out,
        legend,
        show_native_legend: false,
    }
}

fn pie_legend(traces: &[Trace], index: usize, valid: ValidTrace, guardrail: usize) -> PolicyOutcome {
    let agg = aggregate_categories(&valid.labels, &valid.values);
    let shares = agg.shares();

    // Explicit colors are aligned with the raw labels; keep the first color seen per group.
    let explicit = valid
        .explicit_colors
        .as_deref()
        .map(|ex| match well_formed_colors(ex, valid.labels.len()) {
            Some(colors) if valid.labels.len() != agg.len() => {
                first_color_per_label(&valid.labels, &colors, &agg.labels)
            }
            _ => ex.to_vec(),
        });
    let colors = assign_colors(&agg.labels, explicit.as_deref());

    if agg.len() > guardrail {
        log::debug!(
            "trace {index}: {} pie categories, legend truncated to {guardrail}",
            agg.len()
        );
    }
    let legend = agg
        .labels
        .iter()
        .zip(&agg.values)
        .zip(&colors)
        .zip(&shares)
        .take(guardrail)
        .map(|(((label, &value), color), &share)| LegendEntry {
            label: label.clone(),
            value,
            percent: Some(share),
            color: color.clone(),
        })
        .collect();

    let mut out = traces.to_vec();
    let trace = &mut out[index];
    if let Some(obj) = trace.raw.as_object_mut() {
        obj.insert("labels".into(), string_array(&agg.labels));
        obj.insert(
            "values".into(),
            Value::Array(agg.values.iter().map(|&v| Value::from(v)).collect()),
        );
    }
    trace.set_marker_field("colors", string_array(&colors));

    PolicyOutcome {
        traces: out,
        legend,
        show_native_legend: false,
    }
}

fn first_color_per_label(raw_labels: &[String], colors: &[String], unique: &[String]) -> Vec<Value> {
    unique
        .iter()
        .map(|u| {
            raw_labels
                .iter()
                .position(|l| l == u)
                .map(|i| Value::String(colors[i].clone()))
                .unwrap_or(Value::Null)
        })
        .collect()
}

fn string_array(items: &[String]) -> Value {
    Value::Array(items.iter().cloned().map(Value::String).collect())
}
