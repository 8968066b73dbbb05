//! Display overrides applied on top of the backend layout before plotting.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Mode-bar tools that are never offered.
pub const REMOVED_MODEBAR_BUTTONS: [&str; 3] = ["pan2d", "lasso2d", "select2d"];

/// Interaction config handed to the plotting collaborator alongside the render spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    #[serde(rename = "displayModeBar")]
    pub display_mode_bar: bool,
    #[serde(rename = "displaylogo")]
    pub display_logo: bool,
    #[serde(rename = "modeBarButtonsToRemove")]
    pub mode_bar_buttons_to_remove: Vec<String>,
    pub responsive: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            display_mode_bar: true,
            display_logo: false,
            mode_bar_buttons_to_remove: REMOVED_MODEBAR_BUTTONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            responsive: true,
        }
    }
}

/// Merge the fixed display settings into `layout` and set `showlegend`.
///
/// Fields the overrides do not touch pass through unchanged. A plain string
/// title is promoted to `{ "text": ... }` so it can carry a font.
pub fn apply_display_overrides(layout: &Value, show_native_legend: bool) -> Value {
    let mut out: Map<String, Value> = layout.as_object().cloned().unwrap_or_default();

    out.insert("autosize".into(), Value::Bool(true));
    out.insert("margin".into(), json!({ "t": 40, "b": 40, "l": 40, "r": 40 }));
    out.insert("paper_bgcolor".into(), json!("rgba(0,0,0,0)"));
    out.insert("plot_bgcolor".into(), json!("rgba(0,0,0,0)"));
    out.insert(
        "font".into(),
        json!({ "color": "#333", "family": "Inter, sans-serif" }),
    );

    let mut title = match out.remove("title") {
        Some(Value::Object(t)) => t,
        Some(Value::String(s)) => {
            let mut t = Map::new();
            t.insert("text".into(), Value::String(s));
            t
        }
        _ => Map::new(),
    };
    title.insert("font".into(), json!({ "size": 18, "color": "#333" }));
    out.insert("title".into(), Value::Object(title));

    out.insert("showlegend".into(), Value::Bool(show_native_legend));
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_unrelated_fields() {
        let layout = json!({ "xaxis": { "title": "Year" }, "margin": { "t": 100 } });
        let out = apply_display_overrides(&layout, false);
        assert_eq!(out["xaxis"], json!({ "title": "Year" }));
        assert_eq!(out["margin"]["t"], json!(40));
        assert_eq!(out["showlegend"], json!(false));
        assert_eq!(out["autosize"], json!(true));
    }

    #[test]
    fn title_gets_font() {
        let out = apply_display_overrides(&json!({ "title": { "text": "Sales", "x": 0.5 } }), true);
        assert_eq!(out["title"]["text"], json!("Sales"));
        assert_eq!(out["title"]["x"], json!(0.5));
        assert_eq!(out["title"]["font"]["size"], json!(18));

        let out = apply_display_overrides(&json!({ "title": "Plain" }), true);
        assert_eq!(out["title"]["text"], json!("Plain"));
    }

    #[test]
    fn null_layout_becomes_object() {
        let out = apply_display_overrides(&Value::Null, true);
        assert!(out.is_object());
        assert_eq!(out["showlegend"], json!(true));
    }

    #[test]
    fn default_config_removes_tools() {
        let cfg = serde_json::to_value(PlotConfig::default()).unwrap();
        assert_eq!(cfg["displaylogo"], json!(false));
        assert_eq!(cfg["modeBarButtonsToRemove"], json!(["pan2d", "lasso2d", "select2d"]));
    }
}
