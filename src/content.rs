//! Content library — the static rule-to-guidance mapping.
//!
//! Built once at startup and shared read-only across requests. Each
//! [`RuleId`] maps to one [`ContentBundle`]; lookups are total, falling back
//! to the mild-sadness bundle for anything unresolvable.

use std::collections::HashMap;

use serde::Serialize;

use crate::engine::classification::RuleId;

// ── Wire types ────────────────────────────────────────────────────────────────

/// A curated external resource link.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceLink {
    pub label: String,
    pub url: String,
}

/// A named breathing exercise: title plus ordered step instructions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreathingGuide {
    pub title: String,
    pub steps: Vec<String>,
}

/// The guidance bundle attached to one rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBundle {
    pub label: String,
    pub headline: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_label: Option<String>,
    pub resources: Vec<ResourceLink>,
    /// Bundle-specific breathing guides. `None` means the caller supplies
    /// the process-wide default pair.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breathing: Option<Vec<BreathingGuide>>,
}

// ── Defaults ──────────────────────────────────────────────────────────────────

/// The process-wide default breathing pair, used whenever a bundle defines
/// no guides of its own.
pub fn default_breathing_guides() -> Vec<BreathingGuide> {
    vec![
        guide(
            "Box Breathing (4x4)",
            &[
                "Inhale through the nose for 4 seconds",
                "Hold the breath gently for 4 seconds",
                "Exhale through the mouth for 4 seconds",
                "Pause for 4 seconds before repeating",
            ],
        ),
        guide(
            "4-7-8 Reset",
            &[
                "Inhale quietly through your nose for 4 seconds",
                "Hold for a steady 7-count",
                "Purse your lips and exhale for 8 seconds with a soft whoosh",
                "Repeat up to 4 cycles to calm the nervous system",
            ],
        ),
    ]
}

// ── Library ───────────────────────────────────────────────────────────────────

/// Read-only rule-to-bundle mapping with a guaranteed fallback entry.
pub struct ContentLibrary {
    entries: HashMap<RuleId, ContentBundle>,
    fallback: ContentBundle,
}

impl ContentLibrary {
    /// Resolve the bundle for `rule`. Total: unresolvable ids get the
    /// mild-sadness bundle.
    pub fn bundle(&self, rule: RuleId) -> &ContentBundle {
        self.entries.get(&rule).unwrap_or(&self.fallback)
    }

    /// The standard curated library, one bundle per catalog rule.
    pub fn standard() -> Self {
        let mild_sadness = ContentBundle {
            label: "Gentle Encouragement".into(),
            headline: "Let's brighten the moment a little.".into(),
            body: "Feeling a bit down happens to everyone. Small sparks of color, light, and self-kindness can lift your mood.".into(),
            image_url: Some("https://images.unsplash.com/photo-1500534314209-a25ddb2bd429?auto=format&fit=crop&w=1200&q=80".into()),
            image_label: Some("Warm sunrise over rolling hills".into()),
            resources: vec![
                link("Mini gratitude journaling prompts", "https://www.dailygreatness.co/blogs/news/10-gratitude-journal-prompts"),
                link("Uplifting photo gallery", "https://unsplash.com/collections/1591470/bright-colors"),
            ],
            breathing: None,
        };

        let entries = HashMap::from([
            (RuleId::SadnessMultipleDays, ContentBundle {
                label: "Extended Sadness".into(),
                headline: "You deserve immediate, compassionate support.".into(),
                body: "When sadness stretches on for days, reaching out is a sign of strength. Consider connecting with a licensed professional or trusted support immediately.".into(),
                image_url: Some("https://images.unsplash.com/photo-1500530855697-b586d89ba3ee?auto=format&fit=crop&w=1200&q=80".into()),
                image_label: Some("Quiet misty valley at dawn".into()),
                resources: vec![
                    link("988 Suicide & Crisis Lifeline (US)", "https://988lifeline.org/"),
                    link("Find a therapist via Psychology Today", "https://www.psychologytoday.com/us/therapists"),
                ],
                breathing: Some(default_breathing_guides()),
            }),
            (RuleId::MildSadness, mild_sadness.clone()),
            (RuleId::AnxietyRelief, ContentBundle {
                label: "Anxiety Relief".into(),
                headline: "Let's slow things down together.".into(),
                body: "Anxiety signals your body needs a reset. Try grounding breathwork and gentle movement to release the tension.".into(),
                image_url: Some("https://images.unsplash.com/photo-1506126613408-eca07ce68773?auto=format&fit=crop&w=1200&q=80".into()),
                image_label: Some("Calm meditation by the sea".into()),
                resources: vec![
                    link("Guided calm visual", "https://www.youtube.com/watch?v=aNXKjTFs4ag"),
                    link("Two-minute grounding audio", "https://www.headspace.com/meditation/meditation-for-anxiety"),
                ],
                breathing: Some(default_breathing_guides()),
            }),
            (RuleId::HelpRequest, ContentBundle {
                label: "Immediate Help".into(),
                headline: "Pause everything - help is available right now.".into(),
                body: "If you're in danger or need urgent help, please contact emergency services or a trusted crisis line immediately.".into(),
                image_url: Some("https://images.unsplash.com/photo-1527236438218-d82077ae1f85?auto=format&fit=crop&w=1200&q=80".into()),
                image_label: Some("Hand reaching out in support".into()),
                resources: vec![
                    link("Emergency Services", "tel:911"),
                    link("International hotlines", "https://www.opencounseling.com/suicide-hotlines"),
                ],
                breathing: None,
            }),
            (RuleId::WorkStress, ContentBundle {
                label: "Work Stress".into(),
                headline: "Small resets prevent burnout.".into(),
                body: "Break tasks into manageable pieces, set micro-breaks, and use breathwork to keep your nervous system steady.".into(),
                image_url: Some("https://images.unsplash.com/photo-1504384308090-c894fdcc538d?auto=format&fit=crop&w=1200&q=80".into()),
                image_label: Some("Tidy desk with a notebook and coffee".into()),
                resources: vec![
                    link("Pomodoro flow timer", "https://pomofocus.io/"),
                    link("Stress management strategies", "https://www.apa.org/topics/stress/tips"),
                ],
                breathing: Some(default_breathing_guides()),
            }),
            (RuleId::RelationshipSupport, ContentBundle {
                label: "Relationship Support".into(),
                headline: "Let's navigate the tough conversation.".into(),
                body: "Healthy communication looks like listening fully, sharing feelings with 'I' statements, and agreeing on one small next step.".into(),
                image_url: Some("https://images.unsplash.com/photo-1500648767791-00dcc994a43e?auto=format&fit=crop&w=1200&q=80".into()),
                image_label: Some("Two friends talking over coffee".into()),
                resources: vec![
                    link("Guide to compassionate communication", "https://www.gottman.com/blog/relationship-resources/"),
                    link("Conflict resolution worksheet", "https://www.therapistaid.com/worksheets/fair-fighting-rules"),
                ],
                breathing: None,
            }),
            (RuleId::HappyCelebration, ContentBundle {
                label: "Celebrate Joy".into(),
                headline: "Let's amplify the good!".into(),
                body: "Document what's making you smile, share it with someone you care about, and soak in the moment.".into(),
                image_url: Some("https://images.unsplash.com/photo-1511988617509-a57c8a288659?auto=format&fit=crop&w=1200&q=80".into()),
                image_label: Some("Confetti against a bright sky".into()),
                resources: vec![
                    link("Feel-good playlist", "https://open.spotify.com/playlist/37i9dQZF1DX3rxVfibe1L0"),
                    link("Capture your wins", "https://www.canva.com/create/journals/gratitude-journal/"),
                ],
                breathing: None,
            }),
            (RuleId::SleepTrouble, ContentBundle {
                label: "Sleep Support".into(),
                headline: "Let's cue your body for rest.".into(),
                body: "Calming visuals, soft audio, and light stretches signal to your mind it's safe to power down.".into(),
                image_url: Some("https://images.unsplash.com/photo-1500534314210-0882f88b353b?auto=format&fit=crop&w=1200&q=80".into()),
                image_label: Some("Starry night sky over mountains".into()),
                resources: vec![
                    link("10-minute sleep meditation", "https://www.youtube.com/watch?v=ZPZQX-6Ig1c"),
                    link("Nighttime sky visuals", "https://www.youtube.com/watch?v=3NoXThL_afM"),
                ],
                breathing: Some(vec![guide(
                    "Progressive Relaxation",
                    &[
                        "Tense your toes for 5 seconds, then release",
                        "Work up through legs, torso, hands, jaw, and eyes",
                        "End with a long exhale and soft focus",
                    ],
                )]),
            }),
            (RuleId::BurnoutMotivation, ContentBundle {
                label: "Motivation Reboot".into(),
                headline: "Tiny steps restart momentum.".into(),
                body: "Set a micro-goal, celebrate it loudly, and stack from there. Progress counts even when it's small.".into(),
                image_url: Some("https://images.unsplash.com/photo-1500534311224-2024c6b73392?auto=format&fit=crop&w=1200&q=80".into()),
                image_label: Some("Sunlit path through a forest".into()),
                resources: vec![
                    link("2-minute motivation video", "https://www.youtube.com/watch?v=mgmVOuLgFB0"),
                    link("Tiny habit starter", "https://tinyhabits.com/start/"),
                ],
                breathing: Some(default_breathing_guides()),
            }),
            (RuleId::SelfHarm, ContentBundle {
                label: "Crisis Support".into(),
                headline: "Your safety matters more than anything.".into(),
                body: "Please reach professional help immediately. You never have to face this alone.".into(),
                image_url: Some("https://images.unsplash.com/photo-1500534314210-0882f88b353b?auto=format&fit=crop&w=1200&q=80".into()),
                image_label: Some("Soft light through a window".into()),
                resources: vec![
                    link("988 Suicide & Crisis Lifeline (US)", "https://988lifeline.org/"),
                    link("Crisis Text Line (Text HOME to 741741)", "https://www.crisistextline.org/"),
                    link("International hotlines", "https://www.opencounseling.com/suicide-hotlines"),
                ],
                breathing: None,
            }),
        ]);

        Self { entries, fallback: mild_sadness }
    }
}

fn link(label: &str, url: &str) -> ResourceLink {
    ResourceLink { label: label.to_string(), url: url.to_string() }
}

fn guide(title: &str, steps: &[&str]) -> BreathingGuide {
    BreathingGuide {
        title: title.to_string(),
        steps: steps.iter().map(|s| s.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_rule_resolves_to_a_bundle() {
        let library = ContentLibrary::standard();
        for rule in RuleId::ALL {
            let bundle = library.bundle(rule);
            assert!(!bundle.label.is_empty(), "{rule:?} has no label");
            assert!(!bundle.headline.is_empty(), "{rule:?} has no headline");
            assert!(!bundle.body.is_empty(), "{rule:?} has no body");
        }
    }

    #[test]
    fn crisis_bundles_carry_hotlines() {
        let library = ContentLibrary::standard();
        let self_harm = library.bundle(RuleId::SelfHarm);
        assert!(
            self_harm.resources.iter().any(|r| r.url.contains("988lifeline")),
            "self-harm bundle must link a crisis lifeline"
        );
        let help = library.bundle(RuleId::HelpRequest);
        assert!(help.resources.iter().any(|r| r.url.starts_with("tel:")));
    }

    #[test]
    fn default_breathing_is_the_fixed_pair() {
        let guides = default_breathing_guides();
        assert_eq!(guides.len(), 2);
        assert_eq!(guides[0].title, "Box Breathing (4x4)");
        assert_eq!(guides[1].title, "4-7-8 Reset");
        assert!(guides.iter().all(|g| !g.steps.is_empty()));
    }

    #[test]
    fn sleep_bundle_keeps_its_own_guides() {
        let library = ContentLibrary::standard();
        let sleep = library.bundle(RuleId::SleepTrouble);
        let guides = sleep.breathing.as_ref().unwrap();
        assert_eq!(guides.len(), 1);
        assert_eq!(guides[0].title, "Progressive Relaxation");
    }

    #[test]
    fn bundle_serializes_with_camel_case_keys() {
        let library = ContentLibrary::standard();
        let json = serde_json::to_value(library.bundle(RuleId::MildSadness)).unwrap();
        assert!(json.get("imageUrl").is_some());
        assert!(json.get("image_url").is_none());
    }
}
