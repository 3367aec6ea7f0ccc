use async_trait::async_trait;

use crate::error::Result;
use crate::language::Language;

/// Text-to-speech backend. Returns encoded audio bytes for `text` read
/// aloud in `language`, or `FaqError::Synthesis` when the backend cannot
/// produce it.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, language: Language) -> Result<Vec<u8>>;
}
