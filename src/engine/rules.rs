//! Deterministic fallback classifier.
//!
//! Ordered keyword predicates over the combined submission text; the first
//! match wins. Order is the tie-break contract: crisis rules sit above
//! everything else, extended sadness above mild sadness.

use super::classification::{Classification, RuleId, Severity, Source};
use super::submission::Submission;

/// Classify a submission without any external help. Total: every input
/// resolves to a catalog rule, defaulting to mild sadness.
pub fn classify(submission: &Submission) -> Classification {
    let text = format!("{} {}", submission.primary_feeling, submission.details).to_lowercase();
    let primary = submission.primary_feeling.as_str();
    let days = submission.days_feeling;

    let (rule, level) = if text.contains("help") || primary == "help" {
        (RuleId::HelpRequest, Severity::Critical)
    } else if text.contains("suicide") || text.contains("self-harm") || primary == "self_harm" {
        (RuleId::SelfHarm, Severity::Critical)
    } else if primary == "anxious" || text.contains("anxious") {
        (RuleId::AnxietyRelief, Severity::High)
    } else if primary == "sleep" || text.contains("sleep") {
        (RuleId::SleepTrouble, Severity::Moderate)
    } else if primary == "work_stress" || text.contains("work") {
        (RuleId::WorkStress, Severity::Moderate)
    } else if primary == "relationship" || text.contains("friend") || text.contains("relationship") {
        (RuleId::RelationshipSupport, Severity::Moderate)
    } else if primary == "happy" || text.contains("happy") {
        (RuleId::HappyCelebration, Severity::Positive)
    } else if primary == "burnout" || text.contains("burnout") || text.contains("motivation") {
        (RuleId::BurnoutMotivation, Severity::High)
    } else if (primary == "sad" || primary == "down") && days >= 3.0 {
        (RuleId::SadnessMultipleDays, Severity::High)
    } else if primary == "sad" || primary == "down" || text.contains("down") {
        (RuleId::MildSadness, Severity::Low)
    } else {
        (RuleId::MildSadness, Severity::Low)
    };

    Classification {
        rule,
        level,
        source: Source::Fallback,
        reasoning: None,
        reassurance: None,
        micro_steps: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(primary: &str, days: f64, details: &str) -> Submission {
        Submission {
            primary_feeling: primary.to_string(),
            intensity: 5.0,
            days_feeling: days,
            details: details.to_string(),
        }
    }

    #[test]
    fn help_outranks_anxiety() {
        let c = classify(&submission("anxious", 0.0, "please help, I feel anxious"));
        assert_eq!(c.rule, RuleId::HelpRequest);
        assert_eq!(c.level, Severity::Critical);
    }

    #[test]
    fn self_harm_primary_is_critical() {
        let c = classify(&submission("self_harm", 0.0, ""));
        assert_eq!(c.rule, RuleId::SelfHarm);
        assert_eq!(c.level, Severity::Critical);
    }

    #[test]
    fn suicide_keyword_in_details_is_critical() {
        let c = classify(&submission("sad", 1.0, "thinking about suicide"));
        assert_eq!(c.rule, RuleId::SelfHarm);
        assert_eq!(c.level, Severity::Critical);
    }

    #[test]
    fn extended_sadness_needs_three_days() {
        let c = classify(&submission("sad", 5.0, ""));
        assert_eq!(c.rule, RuleId::SadnessMultipleDays);
        assert_eq!(c.level, Severity::High);

        let c = classify(&submission("sad", 2.0, ""));
        assert_eq!(c.rule, RuleId::MildSadness);
        assert_eq!(c.level, Severity::Low);
    }

    #[test]
    fn happy_is_positive() {
        let c = classify(&submission("happy", 0.0, ""));
        assert_eq!(c.rule, RuleId::HappyCelebration);
        assert_eq!(c.level, Severity::Positive);
    }

    #[test]
    fn sleep_signal_in_details() {
        let c = classify(&submission("tired", 0.0, "I cannot sleep at night"));
        assert_eq!(c.rule, RuleId::SleepTrouble);
        assert_eq!(c.level, Severity::Moderate);
    }

    #[test]
    fn work_and_relationship_signals() {
        assert_eq!(classify(&submission("stressed", 0.0, "too much work")).rule, RuleId::WorkStress);
        assert_eq!(
            classify(&submission("upset", 0.0, "fight with my friend")).rule,
            RuleId::RelationshipSupport
        );
    }

    #[test]
    fn burnout_and_motivation_signals() {
        assert_eq!(classify(&submission("burnout", 0.0, "")).rule, RuleId::BurnoutMotivation);
        let c = classify(&submission("flat", 0.0, "no motivation lately"));
        assert_eq!(c.rule, RuleId::BurnoutMotivation);
        assert_eq!(c.level, Severity::High);
    }

    #[test]
    fn unmatched_input_defaults_to_mild_sadness() {
        let c = classify(&submission("confuzzled", 0.0, "nothing in particular"));
        assert_eq!(c.rule, RuleId::MildSadness);
        assert_eq!(c.level, Severity::Low);
    }

    #[test]
    fn fallback_leaves_enrichment_fields_empty() {
        let c = classify(&submission("sad", 0.0, ""));
        assert_eq!(c.source, Source::Fallback);
        assert!(c.reasoning.is_none());
        assert!(c.reassurance.is_none());
        assert!(c.micro_steps.is_empty());
    }

    #[test]
    fn classification_is_deterministic() {
        let s = submission("down", 4.0, "grey week");
        assert_eq!(classify(&s), classify(&s));
    }
}
