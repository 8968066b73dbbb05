use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Declarative chart description as produced by the analysis backend.
///
/// Follows the plotting library's figure convention: `data` holds the traces,
/// `layout` is an opaque object forwarded untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// Ordered traces; order is z-order and is never changed.
    #[serde(
        rename = "data",
        alias = "traces",
        default,
        deserialize_with = "de_vec_or_null"
    )]
    pub traces: Vec<Trace>,
    #[serde(default)]
    pub layout: Value,
}

impl ChartSpec {
    pub fn new(traces: Vec<Trace>) -> Self {
        Self {
            traces,
            layout: Value::Null,
        }
    }

    pub fn with_layout(mut self, layout: Value) -> Self {
        self.layout = layout;
        self
    }
}

/// Serde helper: treat an explicit `null` the same as a missing array.
fn de_vec_or_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Chart type of a trace as far as legend derivation is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    Bar,
    Pie,
    /// Anything else, including a missing `type`.
    Other,
}

impl TraceKind {
    /// Map a `type` tag onto a kind. Unknown tags are valid input and become `Other`.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "bar" => TraceKind::Bar,
            "pie" => TraceKind::Pie,
            _ => TraceKind::Other,
        }
    }

    /// Field holding the category keys for this kind (`x` for bar, `labels` for pie).
    pub fn categories_field(self) -> Option<&'static str> {
        match self {
            TraceKind::Bar => Some("x"),
            TraceKind::Pie => Some("labels"),
            TraceKind::Other => None,
        }
    }

    /// Field holding the numeric values for this kind (`y` for bar, `values` for pie).
    pub fn values_field(self) -> Option<&'static str> {
        match self {
            TraceKind::Bar => Some("y"),
            TraceKind::Pie => Some("values"),
            TraceKind::Other => None,
        }
    }

    /// Key under `marker` carrying per-category colors.
    pub fn colors_field(self) -> Option<&'static str> {
        match self {
            TraceKind::Bar => Some("color"),
            TraceKind::Pie => Some("colors"),
            TraceKind::Other => None,
        }
    }
}

/// Tri-state trace visibility. A missing flag means `Shown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden,
    LegendOnly,
}

/// One data series, kept as the raw JSON object so fields this crate does not
/// inspect survive into the render spec unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Trace {
    pub raw: Value,
}

impl Trace {
    pub fn from_value(raw: Value) -> Self {
        Self { raw }
    }

    /// Bar trace with `x` categories and `y` values.
    pub fn bar<C, V>(categories: C, values: V) -> Self
    where
        C: IntoIterator,
        C::Item: Into<Value>,
        V: IntoIterator,
        V::Item: Into<Value>,
    {
        Self::with_series("bar", "x", "y", categories, values)
    }

    /// Pie trace with `labels` categories and `values`.
    pub fn pie<C, V>(categories: C, values: V) -> Self
    where
        C: IntoIterator,
        C::Item: Into<Value>,
        V: IntoIterator,
        V::Item: Into<Value>,
    {
        Self::with_series("pie", "labels", "values", categories, values)
    }

    fn with_series<C, V>(kind: &str, cat_key: &str, val_key: &str, categories: C, values: V) -> Self
    where
        C: IntoIterator,
        C::Item: Into<Value>,
        V: IntoIterator,
        V::Item: Into<Value>,
    {
        let mut obj = Map::new();
        obj.insert("type".into(), Value::from(kind));
        obj.insert(
            cat_key.into(),
            Value::Array(categories.into_iter().map(Into::into).collect()),
        );
        obj.insert(
            val_key.into(),
            Value::Array(values.into_iter().map(Into::into).collect()),
        );
        Self {
            raw: Value::Object(obj),
        }
    }

    /// Set (or overwrite) a top-level field.
    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        if let Some(obj) = self.raw.as_object_mut() {
            obj.insert(key.to_string(), value.into());
        }
        self
    }

    pub fn with_visibility(self, visibility: Visibility) -> Self {
        let flag = match visibility {
            Visibility::Shown => Value::Bool(true),
            Visibility::Hidden => Value::Bool(false),
            Visibility::LegendOnly => Value::from("legendonly"),
        };
        self.with_field("visible", flag)
    }

    /// Attach explicit per-category colors under the kind's marker key.
    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let colors: Vec<Value> = colors.into_iter().map(|c| Value::String(c.into())).collect();
        if let Some(key) = self.kind().colors_field() {
            self.set_marker_field(key, Value::Array(colors));
        }
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.raw.get(key)
    }

    pub fn kind(&self) -> TraceKind {
        match self.field("type").and_then(Value::as_str) {
            Some(tag) => TraceKind::from_tag(tag),
            None => TraceKind::Other,
        }
    }

    /// The raw `type` tag, if present.
    pub fn type_tag(&self) -> Option<&str> {
        self.field("type").and_then(Value::as_str)
    }

    pub fn visibility(&self) -> Visibility {
        match self.field("visible") {
            Some(Value::Bool(false)) => Visibility::Hidden,
            Some(Value::String(s)) if s.eq_ignore_ascii_case("legendonly") => {
                Visibility::LegendOnly
            }
            _ => Visibility::Shown,
        }
    }

    /// Category keys in their string form, if the kind has a category field holding an array.
    pub fn category_labels(&self) -> Option<Vec<String>> {
        let key = self.kind().categories_field()?;
        let arr = self.field(key)?.as_array()?;
        Some(arr.iter().map(category_key).collect())
    }

    /// Values aligned with the categories; entries that are not numbers read as `None`.
    pub fn numeric_values(&self) -> Option<Vec<Option<f64>>> {
        let key = self.kind().values_field()?;
        let arr = self.field(key)?.as_array()?;
        Some(arr.iter().map(numeric_value).collect())
    }

    /// Explicit colors under `marker`, if the marker carries an array.
    pub fn explicit_colors(&self) -> Option<&Vec<Value>> {
        let key = self.kind().colors_field()?;
        self.field("marker")?.get(key)?.as_array()
    }

    /// Set a key inside `marker`, creating the object when absent.
    pub fn set_marker_field(&mut self, key: &str, value: Value) {
        let Some(obj) = self.raw.as_object_mut() else {
            return;
        };
        let marker = obj
            .entry("marker")
            .or_insert_with(|| Value::Object(Map::new()));
        if !marker.is_object() {
            *marker = Value::Object(Map::new());
        }
        if let Some(m) = marker.as_object_mut() {
            m.insert(key.to_string(), value);
        }
    }
}

/// String form of a category key, the grouping key for aggregation and the legend label.
///
/// Integral numbers print without a fractional part (`1`, not `1.0`).
pub fn category_key(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    format!("{}", f as i64)
                } else {
                    format!("{}", f)
                }
            }
        }
        other => other.to_string(),
    }
}

/// Numeric reading of a value entry. Numeric strings are accepted, anything else is missing.
pub fn numeric_value(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// One row of a synthesized legend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub value: f64,
    /// Share of the total, only for pie-derived entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percent: Option<f64>,
    pub color: String,
}

/// Render-ready chart handed to the plotting collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSpec {
    pub traces: Vec<Trace>,
    pub layout: Value,
    pub show_native_legend: bool,
}

/// A chat message from the backend transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Backend chat reply. Only `visualization` is consumed by the legend pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default, deserialize_with = "de_vec_or_null")]
    pub chat_history: Vec<ChatMessage>,
    #[serde(default)]
    pub visualization: Option<ChartSpec>,
}

/// Parse either a bare chart spec or a chat response carrying `visualization`.
///
/// Returns `Ok(None)` when the payload is a chat response without a chart.
pub fn parse_chart_payload(text: &str) -> Result<Option<ChartSpec>> {
    let v: Value = serde_json::from_str(text).context("decode json")?;
    let is_response = v
        .as_object()
        .map(|o| o.contains_key("visualization") || o.contains_key("response"))
        .unwrap_or(false);
    if is_response {
        // Only the chart is read; transcript fields may be in any shape.
        match v.get("visualization") {
            None | Some(Value::Null) => Ok(None),
            Some(viz) => {
                let spec: ChartSpec = serde_json::from_value(viz.clone())
                    .context("parse visualization in chat response")?;
                Ok(Some(spec))
            }
        }
    } else {
        let spec: ChartSpec = serde_json::from_value(v).context("parse chart spec")?;
        Ok(Some(spec))
    }
}
