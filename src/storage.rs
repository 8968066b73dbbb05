use crate::format::{format_legend_line, format_quantity_locale};
use crate::models::LegendEntry;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Prefix cells that a spreadsheet would evaluate as a formula.
fn sanitize_cell(s: &str) -> String {
    if s.starts_with(['=', '+', '-', '@']) {
        format!("'{s}")
    } else {
        s.to_string()
    }
}

/// Save legend entries as CSV with header (`label,value,percent,color,value_display,display`).
pub fn save_legend_csv<P: AsRef<Path>>(entries: &[LegendEntry], path: P, locale_tag: &str) -> Result<()> {
    let path = path.as_ref();
    let mut wtr = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;
    wtr.serialize(("label", "value", "percent", "color", "value_display", "display"))?;
    for e in entries {
        wtr.serialize((
            sanitize_cell(&e.label),
            e.value,
            e.percent,
            sanitize_cell(&e.color),
            sanitize_cell(&format_quantity_locale(Some(e.value), locale_tag)),
            sanitize_cell(&format_legend_line(e, locale_tag)),
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save legend entries as a pretty JSON array.
pub fn save_legend_json<P: AsRef<Path>>(entries: &[LegendEntry], path: P) -> Result<()> {
    let path = path.as_ref();
    let mut f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let s = serde_json::to_string_pretty(entries)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
