//! Classification vocabulary — the closed rule catalog, severity levels,
//! and provenance tags shared by both classifier paths.

use serde::{Deserialize, Serialize};

// ── Rule catalog ──────────────────────────────────────────────────────────────

/// The fixed catalog of guidance rules. Every classification that reaches
/// the assembler names one of these; the wire form is the snake_case id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleId {
    SadnessMultipleDays,
    MildSadness,
    AnxietyRelief,
    HelpRequest,
    WorkStress,
    RelationshipSupport,
    HappyCelebration,
    SleepTrouble,
    BurnoutMotivation,
    SelfHarm,
}

impl RuleId {
    pub const ALL: [RuleId; 10] = [
        RuleId::SadnessMultipleDays,
        RuleId::MildSadness,
        RuleId::AnxietyRelief,
        RuleId::HelpRequest,
        RuleId::WorkStress,
        RuleId::RelationshipSupport,
        RuleId::HappyCelebration,
        RuleId::SleepTrouble,
        RuleId::BurnoutMotivation,
        RuleId::SelfHarm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::SadnessMultipleDays => "sadness_multiple_days",
            RuleId::MildSadness => "mild_sadness",
            RuleId::AnxietyRelief => "anxiety_relief",
            RuleId::HelpRequest => "help_request",
            RuleId::WorkStress => "work_stress",
            RuleId::RelationshipSupport => "relationship_support",
            RuleId::HappyCelebration => "happy_celebration",
            RuleId::SleepTrouble => "sleep_trouble",
            RuleId::BurnoutMotivation => "burnout_motivation",
            RuleId::SelfHarm => "self_harm",
        }
    }

    /// Parse a wire identifier. Unknown ids are rejected, which is the
    /// membership gate for model-produced classifications.
    pub fn parse(s: &str) -> Option<RuleId> {
        Self::ALL.iter().find(|r| r.as_str() == s).copied()
    }

    /// One-line summary used in the external-model instruction catalog.
    pub fn summary(&self) -> &'static str {
        match self {
            RuleId::SadnessMultipleDays => "User sad multiple days in row → urge professional help",
            RuleId::MildSadness => "User slightly down → uplifting imagery and text",
            RuleId::AnxietyRelief => "User anxious → breathing guidance",
            RuleId::HelpRequest => "User explicitly requests HELP → emergency info",
            RuleId::WorkStress => "User stressed from work → stress management tips",
            RuleId::RelationshipSupport => "User struggles with friends/relationships → tailored advice",
            RuleId::HappyCelebration => "User happy → reinforce joy with multimedia",
            RuleId::SleepTrouble => "User can't sleep due to stress → calming visuals/audio",
            RuleId::BurnoutMotivation => "User burned out/lacks motivation → motivation + small tasks",
            RuleId::SelfHarm => "User mentions self-harm → crisis hotlines and urge emergency care",
        }
    }
}

// ── Severity ──────────────────────────────────────────────────────────────────

/// Coarse urgency tag informing presentation emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Moderate,
    Low,
    Positive,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Moderate => "moderate",
            Severity::Low => "low",
            Severity::Positive => "positive",
        }
    }

    pub fn parse(s: &str) -> Option<Severity> {
        match s {
            "critical" => Some(Severity::Critical),
            "high" => Some(Severity::High),
            "moderate" => Some(Severity::Moderate),
            "low" => Some(Severity::Low),
            "positive" => Some(Severity::Positive),
            _ => None,
        }
    }
}

// ── Provenance ────────────────────────────────────────────────────────────────

/// Which classifier path produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Source {
    #[serde(rename = "external-model")]
    ExternalModel,
    #[serde(rename = "fallback")]
    Fallback,
}

// ── Classification ────────────────────────────────────────────────────────────

/// Output of exactly one classifier path, consumed by the assembler.
///
/// `reasoning`/`reassurance`/`micro_steps` are only populated on the
/// external-model path; the assembler supplies defaults for the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub rule: RuleId,
    pub level: Severity,
    pub source: Source,
    pub reasoning: Option<String>,
    pub reassurance: Option<String>,
    pub micro_steps: Vec<String>,
}
