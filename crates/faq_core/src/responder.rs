use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{FaqError, Result};
use crate::language::{localized_text, Language, DEFAULT_LANGUAGE};
use crate::model::Decision;
use crate::retrieval::QueryMatcher;
use crate::speech::SpeechSynthesizer;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub audio: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
}

/// Stateless request handler over a shared, read-only matcher.
#[derive(Clone)]
pub struct Responder {
    matcher: Arc<QueryMatcher>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
}

impl Responder {
    pub fn new(matcher: Arc<QueryMatcher>, synthesizer: Arc<dyn SpeechSynthesizer>) -> Self {
        Self {
            matcher,
            synthesizer,
        }
    }

    pub fn matcher(&self) -> &QueryMatcher {
        &self.matcher
    }

    pub async fn respond(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let query = match request.query.as_deref() {
            Some(q) if !q.is_empty() => q,
            _ => return Err(FaqError::MissingQuery),
        };
        let language: Language = match request.language.as_deref() {
            Some(code) => code.parse()?,
            None => DEFAULT_LANGUAGE,
        };

        let text = self.answer_text(query, language)?;

        let audio = if request.audio {
            let bytes = self
                .synthesizer
                .synthesize(&text, language)
                .await
                .inspect_err(|err| warn!(%language, error = %err, "Speech synthesis failed"))?;
            Some(STANDARD.encode(bytes))
        } else {
            None
        };

        Ok(QueryResponse { text, audio })
    }

    fn answer_text(&self, query: &str, language: Language) -> Result<String> {
        let outcome = self.matcher.decide(query);
        info!(
            %language,
            decision = ?outcome.decision,
            score = outcome.score,
            phrasing = outcome.phrasing.as_deref().unwrap_or("null"),
            "Matched query"
        );

        let answer = match outcome.decision {
            Decision::Hit => outcome
                .phrasing
                .as_deref()
                .and_then(|p| self.matcher.answer_for(p)),
            Decision::Miss => None,
        };
        let Some(answer) = answer else {
            return Ok(language.not_found_message().to_string());
        };

        localized_text(answer, language).map(str::to_string)
    }
}
