//! Deterministic color assignment for legend categories.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// Microsoft Office (2013+) chart series palette.
/// Order: Blue, Orange, Gray, Gold, Light Blue, Green, Dark Blue, Dark Orange, Dark Gray, Brownish Gold.
pub const PALETTE: [&str; 10] = [
    "#4472C4", // blue
    "#ED7D31", // orange
    "#A5A5A5", // gray
    "#FFC000", // gold
    "#5B9BD5", // light blue
    "#70AD47", // green
    "#264478", // dark blue
    "#9E480E", // dark orange
    "#636363", // dark gray
    "#997300", // brownish gold
];

/// CSS color forms accepted as explicit overrides: hex or functional notation.
static CSS_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s*(?:#(?:[0-9a-f]{3}|[0-9a-f]{4}|[0-9a-f]{6}|[0-9a-f]{8})|(?:rgba?|hsla?)\([^()]*\))\s*$",
    )
    .expect("valid color regex")
});

/// CSS named colors plus `transparent`, sorted for binary search.
const NAMED_COLORS: [&str; 149] = [
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue",
    "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
    "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
    "gray", "green", "greenyellow", "grey", "honeydew", "hotpink", "indianred", "indigo",
    "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
    "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta",
    "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple",
    "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod",
    "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink",
    "plum", "powderblue", "purple", "rebeccapurple", "red", "rosybrown", "royalblue",
    "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna", "silver",
    "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen", "steelblue", "tan",
    "teal", "thistle", "tomato", "transparent", "turquoise", "violet", "wheat", "white",
    "whitesmoke", "yellow", "yellowgreen",
];

/// Get a color from the palette; cycles after ten entries.
#[inline]
pub fn palette_color(idx: usize) -> &'static str {
    PALETTE[idx % PALETTE.len()]
}

/// `true` if `s` looks like a CSS color the plotting library will accept.
pub fn is_css_color(s: &str) -> bool {
    if CSS_COLOR.is_match(s) {
        return true;
    }
    let name = s.trim().to_ascii_lowercase();
    NAMED_COLORS.binary_search(&name.as_str()).is_ok()
}

/// Explicit colors as strings, but only if every entry is a color and the count matches.
pub fn well_formed_colors(explicit: &[Value], expected: usize) -> Option<Vec<String>> {
    if explicit.len() != expected {
        return None;
    }
    explicit
        .iter()
        .map(|c| c.as_str().filter(|s| is_css_color(s)).map(str::to_string))
        .collect()
}

/// Assign one color per label.
///
/// Well-formed explicit colors pass through unchanged; otherwise the palette is
/// cycled by ordinal position.
pub fn assign_colors(labels: &[String], explicit: Option<&[Value]>) -> Vec<String> {
    if let Some(explicit) = explicit {
        match well_formed_colors(explicit, labels.len()) {
            Some(colors) => return colors,
            None => log::warn!(
                "ignoring {} explicit colors for {} categories (count mismatch or malformed entry)",
                explicit.len(),
                labels.len()
            ),
        }
    }
    (0..labels.len()).map(|i| palette_color(i).to_string()).collect()
}
