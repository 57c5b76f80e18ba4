//! Classification-and-response-assembly engine.
//!
//! Control flow per request:
//!
//! ```text
//! raw request → Submission::normalize → external adapter (best effort)
//!             → deterministic rules on None → assemble → Guidance
//! ```
//!
//! The engine holds no mutable state; one instance is shared behind `Arc`
//! across all concurrent requests. The adapter call is the only await
//! point, bounded by the provider's own HTTP timeout.

pub mod adapter;
pub mod assemble;
pub mod classification;
pub mod rules;
pub mod submission;

use crate::content::ContentLibrary;
use crate::llm::LlmProvider;

use assemble::Guidance;
use submission::Submission;

pub struct Engine {
    /// `None` runs the deterministic path only (no key, provider disabled).
    provider: Option<LlmProvider>,
    library: ContentLibrary,
}

impl Engine {
    pub fn new(provider: Option<LlmProvider>, library: ContentLibrary) -> Self {
        Self { provider, library }
    }

    /// Whether the external classification path is configured at all.
    pub fn provider_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Run the full pipeline. Total: every submission yields a complete
    /// guidance payload regardless of external-model availability.
    pub async fn analyze(&self, submission: &Submission) -> Guidance {
        let external = match &self.provider {
            Some(provider) => adapter::classify(provider, submission).await,
            None => None,
        };
        let classification = external.unwrap_or_else(|| rules::classify(submission));
        assemble::assemble(&self.library, classification)
    }
}
