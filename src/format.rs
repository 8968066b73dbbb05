//! Human-readable quantity formatting for legend values.
//!
//! Large magnitudes are abbreviated (`1.5M`, `2B`, `3k`); small ones are rendered
//! with locale-aware separators. The sign survives scaling.

use crate::models::LegendEntry;
use num_format::{Locale, ToFormattedString};

/// Text shown for a missing quantity.
pub const MISSING: &str = "N/A";

const BILLION: f64 = 1.0e9;
const MILLION: f64 = 1.0e6;
const THOUSAND: f64 = 1.0e3;

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'), // default
    }
}

/// Format a quantity with the default English locale.
///
/// ```
/// use vizlegend::format::format_quantity;
/// assert_eq!(format_quantity(Some(1_500_000.0)), "1.5M");
/// assert_eq!(format_quantity(None), "N/A");
/// ```
pub fn format_quantity(value: Option<f64>) -> String {
    format_quantity_locale(value, "en")
}

/// Format a quantity using the separators of `locale_tag`.
pub fn format_quantity_locale(value: Option<f64>, locale_tag: &str) -> String {
    let v = match value {
        Some(v) if v.is_finite() => v,
        _ => return MISSING.to_string(),
    };
    let (_, dec_sep) = map_locale(locale_tag);
    let a = v.abs();
    if a >= BILLION {
        format!("{}B", one_decimal(v / BILLION, dec_sep))
    } else if a >= MILLION {
        format!("{}M", one_decimal(v / MILLION, dec_sep))
    } else if a >= THOUSAND {
        format!("{}k", (v / THOUSAND).round() as i64)
    } else {
        format_grouped(v, locale_tag)
    }
}

/// One fractional digit with a trailing zero digit dropped (`2.0` -> `2`).
fn one_decimal(v: f64, dec_sep: char) -> String {
    let s = format!("{:.1}", v);
    let s = s.strip_suffix(".0").unwrap_or(&s);
    if dec_sep == '.' {
        s.to_string()
    } else {
        s.replace('.', &dec_sep.to_string())
    }
}

/// Full rendering with thousands separators and up to three fractional digits.
pub fn format_grouped(v: f64, locale_tag: &str) -> String {
    if !v.is_finite() {
        return MISSING.to_string();
    }
    let (num_locale, dec_sep) = map_locale(locale_tag);
    let fixed = format!("{:.3}", v.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let grouped = match int_part.parse::<u64>() {
        Ok(n) => n.to_formatted_string(num_locale),
        Err(_) => int_part.to_string(),
    };

    let is_zero = int_part.chars().all(|c| c == '0') && frac.is_empty();
    let sign = if v < 0.0 && !is_zero { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}{dec_sep}{frac}")
    }
}

/// `"label: value"` plus `" (p%)"` for entries carrying a share.
pub fn format_legend_line(entry: &LegendEntry, locale_tag: &str) -> String {
    let value = format_quantity_locale(Some(entry.value), locale_tag);
    match entry.percent {
        Some(p) => {
            let (_, dec_sep) = map_locale(locale_tag);
            let pct = format!("{:.1}", p);
            let pct = if dec_sep == '.' {
                pct
            } else {
                pct.replace('.', &dec_sep.to_string())
            };
            format!("{}: {} ({}%)", entry.label, value, pct)
        }
        None => format!("{}: {}", entry.label, value),
    }
}
