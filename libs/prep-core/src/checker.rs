//! Answer equivalence checking for graded practice questions.
//!
//! A deliberately lenient heuristic: it is tuned to reduce learner friction
//! (accepting "8" for "The answer is 8") at the cost of the occasional
//! false positive. A wrong answer is a normal `false`, never an error.

use crate::numeric::extract_number;

/// Relative tolerance applied to the magnitude of the correct value.
const RELATIVE_TOLERANCE: f64 = 0.001;

/// Absolute floor of the tolerance window, for values near zero.
const ABSOLUTE_TOLERANCE: f64 = 0.01;

/// Color words accepted as short keyword answers (card and die puzzles).
const COLOR_KEYWORDS: &[&str] = &[
    "red", "black", "green", "blue", "white", "yellow", "orange", "purple",
];

/// Decide whether a typed answer matches the stored correct answer.
pub fn check_answer(correct: &str, user: &str) -> bool {
    let correct_value = extract_number(correct);
    let user_value = extract_number(user);

    if let (Some(c), Some(u)) = (correct_value, user_value) {
        if within_tolerance(c, u) {
            return true;
        }
    }

    // A bare numeric reply still matches a longer worked answer when the
    // same token shows up standalone in the text.
    if user_value.is_some() {
        let user_token = user.trim();
        let correct_text = correct.trim();
        if !user_token.is_empty()
            && correct_text.len() > user_token.len()
            && (correct_text.starts_with(user_token) || contains_token(correct_text, user_token))
        {
            return true;
        }
    }

    let correct_norm = normalize(correct);
    let user_norm = normalize(user);
    if correct_norm == user_norm {
        return true;
    }

    if let (Some(a), Some(b)) = (keyword_of(&correct_norm), keyword_of(&user_norm)) {
        if a == b {
            return true;
        }
    }

    let (shorter, longer) = if correct_norm.len() <= user_norm.len() {
        (&correct_norm, &user_norm)
    } else {
        (&user_norm, &correct_norm)
    };
    shorter.len() >= 2 && longer.contains(shorter.as_str())
}

/// Relative-or-absolute tolerance, whichever is larger.
fn within_tolerance(correct: f64, user: f64) -> bool {
    let tolerance = (correct.abs() * RELATIVE_TOLERANCE).max(ABSOLUTE_TOLERANCE);
    (correct - user).abs() <= tolerance
}

/// Lowercase and collapse whitespace.
fn normalize(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// True when `token` occurs in `text` bounded by start/end of string,
/// whitespace, or punctuation.
fn contains_token(text: &str, token: &str) -> bool {
    for (idx, _) in text.match_indices(token) {
        let before_ok = text[..idx]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let after_ok = text[idx + token.len()..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if before_ok && after_ok {
            return true;
        }
    }
    false
}

/// First short keyword in a normalized string: a known color word or an
/// integer token.
fn keyword_of(normalized: &str) -> Option<&str> {
    normalized
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .find(|t| COLOR_KEYWORDS.contains(t) || t.chars().all(|c| c.is_ascii_digit()))
}
