//! Human-readable counters for cards, tables and popups.

use num_format::{Locale, ToFormattedString};

/// Map a user-provided locale tag to a num-format Locale.
/// Supported tags (case-insensitive): "en", "us", "en_US", "de", "de_DE", "german", "fr", "es", "it", "pt", "nl"
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en,
    }
}

/// `1234567` -> `"1,234,567"`; absent -> `"0"`.
pub fn format_count(value: Option<u64>) -> String {
    format_count_locale(value, "en")
}

/// Like [`format_count`] with the grouping separator of `locale_tag`.
pub fn format_count_locale(value: Option<u64>, locale_tag: &str) -> String {
    value
        .unwrap_or(0)
        .to_formatted_string(map_locale(locale_tag))
}

/// Format a raw string counter; anything that is not a non-negative integer counts as absent.
pub fn format_count_str(raw: &str) -> String {
    format_count(raw.trim().parse::<u64>().ok())
}

const SUFFIXES: [(f64, &str); 4] = [(1e12, "t"), (1e9, "b"), (1e6, "m"), (1e3, "k")];

/// Compact delta for the card header: `+0`, `+999`, `+1.2k`, `+3.5m`.
pub fn pretty_print_stat(value: Option<u64>) -> String {
    let n = match value {
        Some(n) if n > 0 => n,
        _ => return "+0".to_string(),
    };
    if n < 1_000 {
        return format!("+{}", n);
    }
    let x = n as f64;
    // Walk from the smallest suffix up so 999_960 rounds to "1.0m" rather than "1000.0k".
    let mut out = None;
    for (scale, suffix) in SUFFIXES.iter().rev() {
        let scaled = (x / scale * 10.0).round() / 10.0;
        if scaled < 1.0 {
            break;
        }
        out = Some(format!("+{:.1}{}", scaled, suffix));
        if scaled < 1000.0 {
            break;
        }
    }
    out.unwrap_or_else(|| format!("+{}", n))
}
