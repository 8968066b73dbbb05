//! vizlegend
//!
//! A small Rust library for turning the loosely-typed chart descriptions an analysis
//! backend sends along with its chat replies into something ready to draw.
//! Pairs with the `vizlegend` CLI.
//!
//! ### Features
//! - Pick the primary trace of a chart (first visible one)
//! - Synthesize a custom legend for bar and pie traces, with deterministic colors
//! - Sum duplicate pie categories and show each slice's share
//! - Abbreviate legend values (`1.5M`, `2B`, `3k`) with locale-aware separators
//! - Fall back to the plotting library's native legend for everything else
//! - Export legends as CSV or JSON
//!
//! ### Example
//! ```
//! use vizlegend::models::{ChartSpec, Trace};
//!
//! let spec = ChartSpec::new(vec![Trace::pie(["x", "x", "y"], [5, 5, 10])]);
//! let chart = vizlegend::viz::derive(&spec).expect("spec has traces");
//! assert!(!chart.show_native_legend());
//! for line in vizlegend::viz::legend_lines(&chart, "en") {
//!     println!("{line}");
//! }
//! ```

pub mod format;
pub mod models;
pub mod storage;
pub mod viz;

pub use models::{ChartSpec, LegendEntry, RenderSpec, Trace, TraceKind};
pub use viz::{DerivedChart, LegendCache, LegendConfig, derive, derive_chart};
