//! Inbound submission record and normalization.
//!
//! Normalization never fails: unparsable numerics resolve to `0`, absent
//! free text becomes empty, oversized free text is truncated. The primary
//! feeling is validated by the HTTP handler before the engine runs; the
//! normalizer itself tolerates its absence.

use serde::Deserialize;
use serde_json::Value;

/// Free text is truncated to this many characters before classification.
pub const DETAILS_MAX_CHARS: usize = 1000;

/// Raw wire shape of an analyze request.
///
/// Numeric fields are accepted as JSON numbers or numeric strings, so
/// `"intensity": "7"` and `"intensity": 7` behave identically.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub primary_feeling: Option<String>,
    #[serde(default)]
    pub intensity: Option<Value>,
    #[serde(default)]
    pub days_feeling: Option<Value>,
    #[serde(default)]
    pub details: Option<String>,
}

/// A normalized submission, the shape both classifier paths consume.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub primary_feeling: String,
    /// Expected range 0-10, but out-of-range values pass through unchanged.
    pub intensity: f64,
    pub days_feeling: f64,
    pub details: String,
}

impl Submission {
    /// Coerce and clamp a raw request into classifier shape.
    pub fn normalize(raw: AnalyzeRequest) -> Submission {
        Submission {
            primary_feeling: raw.primary_feeling.unwrap_or_default(),
            intensity: coerce_number(raw.intensity.as_ref()),
            days_feeling: coerce_number(raw.days_feeling.as_ref()),
            details: truncate_chars(raw.details.unwrap_or_default(), DETAILS_MAX_CHARS),
        }
    }
}

fn coerce_number(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

fn truncate_chars(s: String, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s,
    }
}
