//! Evaluator response parsing.
//!
//! These functions extract structured decisions from free-form LLM replies.
//! They are pure domain logic — no I/O, no session management, just text
//! pattern matching.
//!
//! | Function | Use Case | Recognized shapes |
//! |----------|----------|-------------------|
//! | [`parse_score`] | Item quality scoring | JSON `{"score": n}`, `n/100`, standalone number |
//! | [`parse_applicability`] | Old-item validation | APPLICABLE / OUTDATED tokens |

/// Verdict from an applicability check on a previously accepted item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicabilityVerdict {
    /// Exact affirmative token — keep the item
    Applicable,
    /// Exact negative token — drop the item
    Outdated,
    /// Anything else — the signal is not trustworthy either way
    Ambiguous,
}

impl ApplicabilityVerdict {
    /// Whether the item should be retained.
    ///
    /// Ambiguous replies retain: a temporarily stale item reappearing costs
    /// less than discarding a good one on noise.
    pub fn retains(&self) -> bool {
        !matches!(self, ApplicabilityVerdict::Outdated)
    }
}

/// Affirmative token the validator asks the model to emit
pub const APPLICABLE_TOKEN: &str = "APPLICABLE";
/// Negative token the validator asks the model to emit
pub const OUTDATED_TOKEN: &str = "OUTDATED";

/// Parse an applicability reply into a verdict.
///
/// Only the two exact tokens are recognized (leading/trailing whitespace and
/// trailing punctuation ignored); everything else is [`Ambiguous`]
/// and therefore retained by the caller.
///
/// [`Ambiguous`]: ApplicabilityVerdict::Ambiguous
pub fn parse_applicability(response: &str) -> ApplicabilityVerdict {
    let token = response
        .trim()
        .trim_end_matches(['.', '!'])
        .to_uppercase();

    match token.as_str() {
        APPLICABLE_TOKEN => ApplicabilityVerdict::Applicable,
        OUTDATED_TOKEN => ApplicabilityVerdict::Outdated,
        _ => ApplicabilityVerdict::Ambiguous,
    }
}

/// Parse a scoring reply into a number in `[0, 100]`.
///
/// # Supported Formats
///
/// 1. **JSON** (preferred): `{"score": 85, "reasoning": "..."}`
/// 2. **Fraction**: `85/100` or `Score: 85/100`
/// 3. **Standalone number**: `85`
///
/// Parseable values outside `[0, 100]` clamp into range. Returns `None`
/// when no number can be extracted; the caller substitutes a randomized
/// fallback and counts the failure, it never propagates.
pub fn parse_score(response: &str) -> Option<f64> {
    // Try to find JSON in the response
    if let Some(start) = response.find('{') {
        if let Some(end) = response[start..].rfind('}') {
            let json_str = &response[start..start + end + 1];
            if let Ok(parsed) = serde_json::from_str::<serde_json::Value>(json_str) {
                if let Some(score) = parsed.get("score").and_then(|v| v.as_f64()) {
                    return Some(score.clamp(0.0, 100.0));
                }
            }
        }
    }

    // Fallback: look for "N/100" or a standalone number
    for word in response.split_whitespace() {
        if let Some(num_str) = word.strip_suffix("/100") {
            if let Ok(num) = num_str.parse::<f64>() {
                return Some(num.clamp(0.0, 100.0));
            }
        }
        if let Ok(num) = word
            .trim_matches(|c: char| !c.is_ascii_digit() && c != '.' && c != '-')
            .parse::<f64>()
        {
            return Some(num.clamp(0.0, 100.0));
        }
    }

    None
}
