//! Response assembly — merges a classification with the content library.
//!
//! Total: every classification becomes a fully-populated [`Guidance`].
//! Optional enrichment fields get fixed defaults, breathing falls back to
//! the process-wide pair, and the bundle lookup itself is total.

use serde::Serialize;

use crate::content::{BreathingGuide, ContentBundle, ContentLibrary, default_breathing_guides};

use super::classification::{Classification, RuleId, Severity, Source};

/// Reassurance used when the classifier supplied none.
pub const DEFAULT_REASSURANCE: &str =
    "Thanks for sharing honestly. Let's take the next small step together.";

/// Micro-steps used when the classifier supplied none.
pub fn default_micro_steps() -> Vec<String> {
    vec![
        "Take one slow inhale and exhale before the next action.".to_string(),
        "Message someone you trust to let them know how you're doing.".to_string(),
    ]
}

/// The complete guidance payload, the service's sole per-request artifact.
///
/// Every field is populated; consumers never branch on missingness beyond
/// the optional image reference inside `multimedia`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Guidance {
    pub rule_id: RuleId,
    pub level: Severity,
    pub source: Source,
    /// May be empty on the fallback path.
    pub reasoning: String,
    pub reassurance: String,
    pub micro_steps: Vec<String>,
    pub multimedia: ContentBundle,
    pub breathing: Vec<BreathingGuide>,
}

/// Merge a classification with its content bundle, defaulting every
/// optional field.
pub fn assemble(library: &ContentLibrary, classification: Classification) -> Guidance {
    let bundle = library.bundle(classification.rule).clone();
    let breathing = bundle.breathing.clone().unwrap_or_else(default_breathing_guides);

    Guidance {
        rule_id: classification.rule,
        level: classification.level,
        source: classification.source,
        reasoning: classification.reasoning.unwrap_or_default(),
        reassurance: classification
            .reassurance
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_REASSURANCE.to_string()),
        micro_steps: if classification.micro_steps.is_empty() {
            default_micro_steps()
        } else {
            classification.micro_steps
        },
        multimedia: bundle,
        breathing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(rule: RuleId, level: Severity) -> Classification {
        Classification {
            rule,
            level,
            source: Source::Fallback,
            reasoning: None,
            reassurance: None,
            micro_steps: Vec::new(),
        }
    }

    #[test]
    fn bare_classification_is_fully_defaulted() {
        let library = ContentLibrary::standard();
        let g = assemble(&library, bare(RuleId::MildSadness, Severity::Low));
        assert_eq!(g.reassurance, DEFAULT_REASSURANCE);
        assert_eq!(g.micro_steps.len(), 2);
        assert_eq!(g.breathing.len(), 2);
        assert_eq!(g.reasoning, "");
        assert!(!g.multimedia.resources.is_empty());
    }

    #[test]
    fn every_rule_assembles_non_empty_guidance() {
        let library = ContentLibrary::standard();
        for rule in RuleId::ALL {
            let g = assemble(&library, bare(rule, Severity::Moderate));
            assert!(!g.reassurance.is_empty());
            assert!(!g.micro_steps.is_empty());
            assert!(!g.breathing.is_empty());
        }
    }

    #[test]
    fn bundle_guides_win_over_default_pair() {
        let library = ContentLibrary::standard();
        let g = assemble(&library, bare(RuleId::SleepTrouble, Severity::Moderate));
        assert_eq!(g.breathing.len(), 1);
        assert_eq!(g.breathing[0].title, "Progressive Relaxation");
    }

    #[test]
    fn enrichment_fields_pass_through() {
        let library = ContentLibrary::standard();
        let c = Classification {
            rule: RuleId::AnxietyRelief,
            level: Severity::High,
            source: Source::ExternalModel,
            reasoning: Some("anxious wording".into()),
            reassurance: Some("You are doing fine.".into()),
            micro_steps: vec!["breathe".into()],
        };
        let g = assemble(&library, c);
        assert_eq!(g.source, Source::ExternalModel);
        assert_eq!(g.reasoning, "anxious wording");
        assert_eq!(g.reassurance, "You are doing fine.");
        assert_eq!(g.micro_steps, vec!["breathe".to_string()]);
    }

    #[test]
    fn empty_reassurance_string_is_replaced() {
        let library = ContentLibrary::standard();
        let mut c = bare(RuleId::MildSadness, Severity::Low);
        c.reassurance = Some(String::new());
        let g = assemble(&library, c);
        assert_eq!(g.reassurance, DEFAULT_REASSURANCE);
    }

    #[test]
    fn wire_shape_uses_camel_case() {
        let library = ContentLibrary::standard();
        let g = assemble(&library, bare(RuleId::HappyCelebration, Severity::Positive));
        let json = serde_json::to_value(&g).unwrap();
        assert_eq!(json["ruleId"], "happy_celebration");
        assert_eq!(json["level"], "positive");
        assert_eq!(json["source"], "fallback");
        assert!(json["microSteps"].is_array());
        assert!(json["breathing"].is_array());
        assert!(json["multimedia"]["headline"].is_string());
    }
}
