//! Public types and constants for the legend pipeline.

use crate::models::{LegendEntry, RenderSpec, TraceKind};
use serde::{Deserialize, Serialize};

/// Maximum number of distinct categories that still receive a custom legend.
pub const GUARDRAIL: usize = 20;

/// Locale used for value formatting unless configured otherwise.
pub const DEFAULT_LOCALE: &str = "en";

/// Caller-tunable knobs for legend derivation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LegendConfig {
    /// Category cap before falling back to the native legend (bar) or truncating (pie).
    pub guardrail: usize,
    /// Locale tag for legend value strings (`en`, `de`, ...).
    pub locale: String,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            guardrail: GUARDRAIL,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl LegendConfig {
    pub fn with_guardrail(mut self, guardrail: usize) -> Self {
        self.guardrail = guardrail;
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }
}

/// Result of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedChart {
    pub render: RenderSpec,
    /// Custom legend; empty when the native legend is used.
    pub legend: Vec<LegendEntry>,
    /// Kind of the primary trace as classified (before validation).
    pub primary_kind: TraceKind,
    /// Position of the primary trace in the original trace sequence.
    pub primary_index: usize,
}

impl DerivedChart {
    pub fn show_native_legend(&self) -> bool {
        self.render.show_native_legend
    }
}
