//! Numeric extraction from free-text answers.
//!
//! Answer strings often carry more than one number ("25 (125^(1/3) = 5,
//! then 5² = 25)"), so extraction tries a sequence of interpretations in
//! priority order and the first one that parses wins.

use once_cell::sync::Lazy;
use regex::Regex;

/// Number at the very start, terminated before any explanation.
static LEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(-?\d[\d.,]*)(?:[\s(]|$)").unwrap());

/// Value preceded by an approximation marker.
static APPROX: Lazy<Regex> = Lazy::new(|| Regex::new(r"[≈~]\s*[$€£]?\s*(-?\d[\d.,]*)").unwrap());

/// Fraction a/b.
static FRACTION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(-?\d+(?:[.,]\d+)?)\s*/\s*(-?\d+(?:[.,]\d+)?)").unwrap());

/// Percentage at the start of the string.
static PERCENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(-?\d[\d.,]*)\s*%").unwrap());

/// Currency amount followed by a scale word.
static SCALED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[$€£]?\s*(-?\d[\d.,]*)\s*(thousand|million|billion)\b").unwrap());

/// Any number-like substring, used as the last resort.
static ANY_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"-?\d[\d.,]*").unwrap());

/// Extract a single representative numeric value from free text.
///
/// Returns `None` when no interpretation succeeds. Never panics on
/// malformed input.
pub fn extract_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(caps) = LEADING.captures(text) {
        if let Some(value) = parse_decimal(&caps[1]) {
            return Some(value);
        }
    }

    if let Some(caps) = APPROX.captures(text) {
        if let Some(value) = parse_decimal(&caps[1]) {
            return Some(value);
        }
    }

    if let Some(caps) = FRACTION.captures(text) {
        // A matched fraction is authoritative: a zero denominator or an
        // unparseable side means no numeric reading, not a weaker one.
        return match (parse_decimal(&caps[1]), parse_decimal(&caps[2])) {
            (Some(_), Some(d)) if d == 0.0 => None,
            (Some(n), Some(d)) => Some(n / d),
            _ => None,
        };
    }

    if let Some(caps) = PERCENT.captures(text) {
        if let Some(value) = parse_decimal(&caps[1]) {
            return Some(value / 100.0);
        }
    }

    if let Some(caps) = SCALED.captures(text) {
        if let Some(value) = parse_decimal(&caps[1]) {
            let factor = match caps[2].to_ascii_lowercase().as_str() {
                "thousand" => 1_000.0,
                "million" => 1_000_000.0,
                _ => 1_000_000_000.0,
            };
            return Some(value * factor);
        }
    }

    if let Some(m) = ANY_NUMBER.find(text) {
        if let Some(value) = parse_decimal(m.as_str()) {
            return Some(value);
        }
    }

    None
}

/// Parse a numeric token with locale-ambiguous separators.
///
/// When both `.` and `,` appear, the one occurring later is the decimal
/// point and the other is grouping. With a single separator type, the
/// trailing digit count decides: a lone comma followed by exactly three
/// digits reads as grouping, otherwise as a decimal point; a lone dot is
/// always a decimal point, repeated dots are grouping.
fn parse_decimal(token: &str) -> Option<f64> {
    let token = token.trim();
    let (sign, digits) = match token.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, token),
    };

    let dots = digits.matches('.').count();
    let commas = digits.matches(',').count();

    let cleaned: String = if dots > 0 && commas > 0 {
        let decimal = if digits.rfind('.') > digits.rfind(',') { '.' } else { ',' };
        digits
            .chars()
            .filter_map(|c| match c {
                '.' | ',' if c != decimal => None,
                c if c == decimal => Some('.'),
                c => Some(c),
            })
            .collect()
    } else if commas > 0 {
        let trailing = digits.rsplit(',').next().unwrap_or("");
        if commas > 1 || (trailing.len() == 3 && trailing.chars().all(|c| c.is_ascii_digit())) {
            digits.replace(',', "")
        } else {
            digits.replace(',', ".")
        }
    } else if dots > 1 {
        digits.replace('.', "")
    } else {
        digits.to_string()
    };

    let cleaned = cleaned.trim_end_matches('.');
    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok().map(|value| sign * value)
}
