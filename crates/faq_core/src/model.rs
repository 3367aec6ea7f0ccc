use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Localized answer text keyed by language code.
pub type Answer = BTreeMap<String, String>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub questions: Vec<String>,
    pub answer: Answer,
}

/// Top-level layout of the FAQ data file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FaqData {
    pub faqs: Vec<FaqEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Hit,
    Miss,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchOutcome {
    /// Nearest stored phrasing, reported on below-threshold misses too.
    /// `None` when the query shares no term with the corpus.
    pub phrasing: Option<String>,
    pub score: f32,
    pub decision: Decision,
}

impl MatchOutcome {
    pub fn hit(&self) -> Option<&str> {
        match self.decision {
            Decision::Hit => self.phrasing.as_deref(),
            Decision::Miss => None,
        }
    }
}
