//! External-model classification adapter.
//!
//! Best-effort enrichment: build a constrained instruction, ask the
//! provider, and accept the reply only if it passes the validation gate
//! below. Every failure mode (transport, malformed JSON, out-of-catalog
//! rule id, unknown severity) collapses to `None`, which sends the caller
//! to the deterministic rule engine. The model is never a trust boundary.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::llm::LlmProvider;

use super::classification::{Classification, RuleId, Severity, Source};
use super::submission::Submission;

/// Ask the external model to classify `submission`.
pub async fn classify(provider: &LlmProvider, submission: &Submission) -> Option<Classification> {
    let instruction = build_instruction(submission);
    match provider.complete(&instruction).await {
        Ok(text) => {
            let classification = parse_reply(&text);
            if classification.is_none() {
                debug!("model reply rejected by validation gate, falling back");
            }
            classification
        }
        Err(e) => {
            debug!(error = %e, "model request failed, falling back");
            None
        }
    }
}

/// Build the single free-form instruction: rule catalog plus the normalized
/// submission, with the exact JSON shape the reply must take.
pub(crate) fn build_instruction(submission: &Submission) -> String {
    let catalog = RuleId::ALL
        .iter()
        .map(|rule| format!("- {}: {}", rule.as_str(), rule.summary()))
        .collect::<Vec<_>>()
        .join("\n");

    let details = if submission.details.is_empty() { "(none)" } else { submission.details.as_str() };

    format!(
        "You triage emotional wellness inputs. Pick the best fitting rule ID from the list and assign a severity level.\n\
Allowed severity levels: critical, high, moderate, low, positive.\n\
Respond ONLY with strict JSON:\n\
{{\n  \"ruleId\": \"<id from list>\",\n  \"level\": \"<severity>\",\n  \"reasoning\": \"<one sentence>\",\n  \"reassurance\": \"<empathetic sentence>\",\n  \"microSteps\": [\"<tip 1>\", \"<tip 2>\"]\n}}\n\n\
Rules:\n{catalog}\n\n\
User submission:\n\
Primary feeling: {}\n\
Intensity (0-10): {}\n\
Days feeling this way: {}\n\
Free text: {}\n",
        submission.primary_feeling, submission.intensity, submission.days_feeling, details,
    )
}

// ── Validation gate ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelReply {
    rule_id: String,
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    reasoning: Option<String>,
    #[serde(default)]
    reassurance: Option<String>,
    #[serde(default)]
    micro_steps: Option<Value>,
}

/// Validate a raw model reply into a classification.
///
/// The gate: the first balanced `{...}` span must parse as JSON, `ruleId`
/// must be a catalog member, and `level` must be a known severity. Any
/// violation discards the entire reply. `microSteps` is lenient the other
/// way: anything that is not an array of strings degrades to empty.
pub(crate) fn parse_reply(text: &str) -> Option<Classification> {
    let span = extract_json_object(text)?;
    let reply: ModelReply = serde_json::from_str(span).ok()?;
    let rule = RuleId::parse(&reply.rule_id)?;
    let level = Severity::parse(reply.level.as_deref()?)?;

    let micro_steps = match reply.micro_steps {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };

    Some(Classification {
        rule,
        level,
        source: Source::ExternalModel,
        reasoning: reply.reasoning,
        reassurance: reply.reassurance,
        micro_steps,
    })
}

/// Locate the first balanced `{...}` span in `text`, tolerating surrounding
/// prose. String literals are respected so braces inside values don't skew
/// the depth count.
fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, b) in text.bytes().enumerate().skip(start) {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..=i]);
                }
            }
            _ => {}
        }
    }
    None
}
