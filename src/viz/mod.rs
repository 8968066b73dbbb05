//! Legend derivation: turn a backend chart description into a render spec plus
//! an optional custom legend.
//!
//! - Primary trace selection (first shown trace, else the first one)
//! - Bar traces: per-category legend when labels are few and distinct
//! - Pie traces: duplicate categories summed, legend with percentages, truncated at the guardrail
//! - Anything else: the plotting library's native legend
//! - Deterministic colors (Microsoft Office palette) unless the chart brings its own

pub mod aggregate;
pub mod classify;
pub mod display;
pub mod legend;
pub mod memo;
pub mod palette;
pub mod types;

// Re-export types for public API
pub use classify::{InvalidTrace, ValidTrace};
pub use display::{PlotConfig, apply_display_overrides};
pub use memo::LegendCache;
pub use palette::{PALETTE, assign_colors};
pub use types::{DEFAULT_LOCALE, DerivedChart, GUARDRAIL, LegendConfig};

use crate::format::format_legend_line;
use crate::models::{ChartSpec, RenderSpec};
use serde_json::{Value, json};

use classify::{select_primary, validate};
use legend::decide;

/// Run the pipeline with default settings.
pub fn derive(spec: &ChartSpec) -> Option<DerivedChart> {
    derive_chart(spec, &LegendConfig::default())
}

/// Run the pipeline. Returns `None` when the spec has no traces ("no visualization").
pub fn derive_chart(spec: &ChartSpec, config: &LegendConfig) -> Option<DerivedChart> {
    let Some(primary) = select_primary(&spec.traces) else {
        log::debug!("chart spec has no traces, nothing to render");
        return None;
    };
    let primary_kind = primary.trace.kind();
    let outcome = decide(
        &spec.traces,
        primary.index,
        validate(primary.trace),
        config.guardrail,
    );
    log::debug!(
        "primary trace {} ({:?}): {} legend entries, native legend {}",
        primary.index,
        primary_kind,
        outcome.legend.len(),
        if outcome.show_native_legend { "shown" } else { "hidden" }
    );

    Some(DerivedChart {
        render: RenderSpec {
            traces: outcome.traces,
            layout: spec.layout.clone(),
            show_native_legend: outcome.show_native_legend,
        },
        legend: outcome.legend,
        primary_kind,
        primary_index: primary.index,
    })
}

/// Formatted legend lines (`"label: value (p%)"`) for the legend renderer.
pub fn legend_lines(derived: &DerivedChart, locale_tag: &str) -> Vec<String> {
    derived
        .legend
        .iter()
        .map(|e| format_legend_line(e, locale_tag))
        .collect()
}

/// Figure object for the plotting collaborator: traces, overridden layout, and config.
pub fn plot_payload(derived: &DerivedChart) -> Value {
    json!({
        "data": derived.render.traces,
        "layout": apply_display_overrides(&derived.render.layout, derived.render.show_native_legend),
        "config": PlotConfig::default(),
    })
}
