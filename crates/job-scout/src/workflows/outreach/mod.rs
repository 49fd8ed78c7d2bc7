//! Outreach email drafting through a text-generation service.

pub mod anthropic;
mod prompt;

pub use anthropic::AnthropicDraftWriter;
pub use prompt::{CandidateProfile, OutreachPrompt};

use async_trait::async_trait;

/// Text-generation seam: prompt in, free-text draft out.
#[async_trait]
pub trait DraftWriter: Send + Sync {
    async fn draft(&self, prompt: &OutreachPrompt) -> Result<String, DraftError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DraftError {
    #[error("email drafting not configured: ANTHROPIC_API_KEY is not set")]
    NotConfigured,
    #[error("drafting request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("drafting service error (status {status}): {message}")]
    Api { status: u16, message: String },
    #[error("drafting service returned no text")]
    EmptyContent,
}
