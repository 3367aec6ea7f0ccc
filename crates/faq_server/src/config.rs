use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use faq_core::DEFAULT_SIMILARITY_THRESHOLD;

use crate::tts::DEFAULT_TTS_BASE_URL;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "faq-server",
    version,
    about = "Answer FAQ queries over HTTP, optionally as speech"
)]
pub struct ServerConfig {
    #[arg(long, env = "FAQ_BIND", default_value = "0.0.0.0:8000")]
    pub bind: SocketAddr,

    #[arg(long, env = "FAQ_DATA_PATH", default_value = "faq_data.json")]
    pub faq_path: PathBuf,

    /// Minimum cosine similarity for a query to match a known question.
    #[arg(long, env = "FAQ_THRESHOLD", default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
    pub threshold: f32,

    #[arg(long, env = "FAQ_TTS_BASE_URL", default_value = DEFAULT_TTS_BASE_URL)]
    pub tts_base_url: String,

    #[arg(long, env = "FAQ_TTS_TIMEOUT", default_value = "30s")]
    pub tts_timeout: humantime::Duration,
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(format!(
                "threshold must be within [0, 1], got {}",
                self.threshold
            ));
        }

        if self.tts_timeout.as_ref().is_zero() {
            return Err("tts-timeout must be > 0".to_string());
        }

        if !self.tts_base_url.starts_with("http://") && !self.tts_base_url.starts_with("https://")
        {
            return Err(format!(
                "tts-base-url must be an http(s) URL, got {}",
                self.tts_base_url
            ));
        }

        Ok(())
    }
}
