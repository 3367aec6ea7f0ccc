//! Speech synthesis through the Google Translate text-to-speech endpoint.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use faq_core::{FaqError, Language, SpeechSynthesizer};
use tracing::debug;

pub const DEFAULT_TTS_BASE_URL: &str = "https://translate.google.com";

/// The endpoint refuses longer inputs.
pub const MAX_CHUNK_CHARS: usize = 100;

/// Splits `text` at whitespace into chunks of at most `max_chars`
/// characters. Words longer than the limit are cut.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let mut chars: Vec<char> = word.chars().collect();
        while chars.len() > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            chunks.push(chars.drain(..max_chars).collect());
        }

        let word_len = chars.len();
        let needed = if current.is_empty() {
            word_len
        } else {
            current_len + 1 + word_len
        };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.extend(chars);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

pub struct GoogleTranslateTts {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslateTts {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("faq-server/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build TTS http client")?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    async fn fetch_chunk(
        &self,
        chunk: &str,
        idx: usize,
        total: usize,
        language: Language,
    ) -> Result<Vec<u8>, FaqError> {
        let url = format!("{}/translate_tts", self.base_url);
        let idx = idx.to_string();
        let total = total.to_string();
        let textlen = chunk.chars().count().to_string();

        let resp = self
            .client
            .get(&url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language.code()),
                ("q", chunk),
                ("total", total.as_str()),
                ("idx", idx.as_str()),
                ("textlen", textlen.as_str()),
            ])
            .send()
            .await
            .map_err(|err| FaqError::Synthesis(err.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FaqError::Synthesis(format!(
                "TTS endpoint returned {status} for language {language}"
            )));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|err| FaqError::Synthesis(err.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTranslateTts {
    async fn synthesize(&self, text: &str, language: Language) -> faq_core::Result<Vec<u8>> {
        let chunks = chunk_text(text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(FaqError::Synthesis("no text to speak".to_string()));
        }

        let mut audio = Vec::new();
        for (idx, chunk) in chunks.iter().enumerate() {
            audio.extend(self.fetch_chunk(chunk, idx, chunks.len(), language).await?);
        }

        if audio.is_empty() {
            return Err(FaqError::Synthesis(format!(
                "TTS endpoint returned no audio for language {language}"
            )));
        }

        debug!(%language, chunks = chunks.len(), bytes = audio.len(), "Synthesized speech");
        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::extract::{Query, State};
    use axum::http::StatusCode;
    use axum::routing::get;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    type Seen = Arc<Mutex<Vec<HashMap<String, String>>>>;

    async fn stub_endpoint(status: StatusCode) -> (String, Seen) {
        let seen: Seen = Arc::default();
        let app = Router::new()
            .route(
                "/translate_tts",
                get(
                    move |State(seen): State<Seen>, Query(params): Query<HashMap<String, String>>| async move {
                        let body = format!("[{}]", params.get("idx").cloned().unwrap_or_default());
                        seen.lock().unwrap().push(params);
                        (status, body.into_bytes())
                    },
                ),
            )
            .with_state(seen.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}/"), seen)
    }

    #[test]
    fn chunks_respect_limit_and_word_boundaries() {
        let text = "one two three four";
        assert_eq!(chunk_text(text, 9), vec!["one two", "three", "four"]);
        assert_eq!(chunk_text(text, 100), vec!["one two three four"]);
        assert!(chunk_text("   ", 100).is_empty());
    }

    #[test]
    fn long_words_are_cut() {
        assert_eq!(chunk_text("ab abcdefg", 3), vec!["ab", "abc", "def", "g"]);
    }

    #[test]
    fn chunk_limit_counts_characters_not_bytes() {
        let text = "क्षमा करें";
        assert_eq!(chunk_text(text, 10), vec![text.to_string()]);
    }

    #[tokio::test]
    async fn concatenates_audio_from_every_chunk() {
        let (base, seen) = stub_endpoint(StatusCode::OK).await;
        let tts = GoogleTranslateTts::new(base, Duration::from_secs(5)).unwrap();

        let text = "word ".repeat(30);
        let audio = tts.synthesize(&text, Language::Hi).await.unwrap();
        assert_eq!(audio, b"[0][1]");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0]["tl"], "hi");
        assert_eq!(seen[0]["client"], "tw-ob");
        assert_eq!(seen[1]["total"], "2");
    }

    #[tokio::test]
    async fn error_status_is_synthesis_failure() {
        let (base, _) = stub_endpoint(StatusCode::INTERNAL_SERVER_ERROR).await;
        let tts = GoogleTranslateTts::new(base, Duration::from_secs(5)).unwrap();

        let err = tts.synthesize("hello", Language::Kn).await.unwrap_err();
        assert!(matches!(err, FaqError::Synthesis(ref msg) if msg.contains("kn")));
    }

    #[tokio::test]
    async fn empty_text_is_rejected() {
        let tts = GoogleTranslateTts::new(DEFAULT_TTS_BASE_URL, Duration::from_secs(5)).unwrap();
        let err = tts.synthesize("  ", Language::En).await.unwrap_err();
        assert!(matches!(err, FaqError::Synthesis(_)));
    }
}
