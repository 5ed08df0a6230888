// Shared numeric helpers.
//
// Every rate in the program goes through `pct` so the zero-denominator
// policy cannot drift between calculators.
use num_format::{Locale, ToFormattedString};

/// Percentage of `part` over `whole`. A zero denominator yields 0.0:
/// every display surface treats rates as bounded gauge figures, so an
/// unset plan/target reads as "no progress expressed".
pub fn pct(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    (part / whole) * 100.0
}

/// Round to one decimal place, half away from zero. Idempotent.
pub fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

pub fn mean(v: &[f64]) -> f64 {
    // Arithmetic mean; 0 for an empty slice so no NaN reaches a display row.
    if v.is_empty() {
        return 0.0;
    }
    let sum: f64 = v.iter().copied().sum();
    sum / v.len() as f64
}

/// Fixed-decimal string with locale thousands separators, e.g. `1,943,720,000.00`.
pub fn format_number(n: f64, decimals: usize) -> String {
    let neg = n.is_sign_negative();
    let fixed = format!("{:.*}", decimals, n.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut out = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    if neg {
        format!("-{}", out)
    } else {
        out
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Counts and MGA amounts in console messages (`76,541 children`).
    n.to_formatted_string(&Locale::en)
}
