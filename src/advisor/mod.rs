//! Advisor prompts for a third-party text-generation API.
//!
//! The crate builds the prompt and hands it to a [`TextGenerator`]; the HTTP
//! client that talks to the actual API lives with the caller.

pub mod prompt;

pub use prompt::AdvisorPrompt;

use crate::errors::{BuddyError, Result};

/// Produces a free-text answer for a prompt.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Asks the generator for advice grounded in the user's own numbers.
pub struct Advisor<G> {
    generator: G,
}

impl<G: TextGenerator> Advisor<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    /// Renders `prompt`, forwards it, and returns the trimmed reply verbatim.
    pub fn ask(&self, prompt: &AdvisorPrompt<'_>) -> Result<String> {
        let rendered = prompt.render();
        tracing::debug!(chars = rendered.len(), "sending advisor prompt");
        let reply = self.generator.generate(&rendered)?;
        let reply = reply.trim();
        if reply.is_empty() {
            tracing::warn!("advisor returned an empty reply");
            return Err(BuddyError::Advisor("empty response from generator".into()));
        }
        Ok(reply.to_string())
    }
}
