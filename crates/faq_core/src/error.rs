use std::io;

use thiserror::Error;

use crate::language::Language;

#[derive(Error, Debug)]
pub enum FaqError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid FAQ data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("FAQ corpus contains no question phrasings")]
    EmptyCorpus,

    #[error("FAQ corpus contains no indexable terms")]
    EmptyVocabulary,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Query is required")]
    MissingQuery,

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    #[error("Answer has no text for language {language}")]
    MissingTranslation { language: Language },

    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),
}

impl FaqError {
    /// True for errors caused by the caller's input, which are rejected
    /// before any matching or synthesis work happens.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            FaqError::InvalidRequest(_) | FaqError::MissingQuery | FaqError::UnsupportedLanguage(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, FaqError>;
