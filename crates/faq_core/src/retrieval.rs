use std::collections::HashMap;

use tracing::debug;

use crate::error::Result;
use crate::model::{Answer, Decision, FaqEntry, MatchOutcome};
use crate::tfidf::{cosine_similarity, SparseVector, TfidfVectorizer};

/// Minimum cosine similarity for a query to count as a match (inclusive).
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.30;

/// Index and value of the largest score. Ties keep the earliest index.
pub fn best_index(scores: impl IntoIterator<Item = f32>) -> Option<(usize, f32)> {
    scores
        .into_iter()
        .enumerate()
        .fold(None, |best, (idx, score)| match best {
            Some((_, top)) if score <= top => best,
            _ => Some((idx, score)),
        })
}

pub fn passes_threshold(score: f32, threshold: f32) -> bool {
    score >= threshold
}

/// Fitted question index: every phrasing of every FAQ entry, its TF-IDF
/// vector, and the answer it resolves to. Immutable once built.
#[derive(Debug, Clone)]
pub struct QueryMatcher {
    phrasings: Vec<String>,
    matrix: Vec<SparseVector>,
    answers: HashMap<String, Answer>,
    vectorizer: TfidfVectorizer,
    threshold: f32,
}

impl QueryMatcher {
    pub fn build(entries: &[FaqEntry], threshold: f32) -> Result<Self> {
        let mut phrasings = Vec::new();
        let mut answers = HashMap::new();
        for entry in entries {
            for question in &entry.questions {
                let lowered = question.to_lowercase();
                answers.insert(lowered.clone(), entry.answer.clone());
                phrasings.push(lowered);
            }
        }

        let (vectorizer, matrix) = TfidfVectorizer::fit_transform(&phrasings)?;
        debug!(
            phrasings = phrasings.len(),
            vocabulary = vectorizer.vocabulary_size(),
            "Built question index"
        );

        Ok(Self {
            phrasings,
            matrix,
            answers,
            vectorizer,
            threshold,
        })
    }

    pub fn with_default_threshold(entries: &[FaqEntry]) -> Result<Self> {
        Self::build(entries, DEFAULT_SIMILARITY_THRESHOLD)
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    pub fn phrasings(&self) -> &[String] {
        &self.phrasings
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vectorizer.vocabulary_size()
    }

    /// Nearest phrasing and its similarity, without applying the threshold.
    /// `None` when the query shares no term with any phrasing.
    pub fn score(&self, query: &str) -> Option<(usize, f32)> {
        let query_vector = self.vectorizer.transform(&query.to_lowercase());
        if query_vector.is_zero() {
            return None;
        }
        best_index(
            self.matrix
                .iter()
                .map(|row| cosine_similarity(&query_vector, row)),
        )
        .filter(|(_, score)| *score > 0.0)
    }

    pub fn decide(&self, query: &str) -> MatchOutcome {
        match self.score(query) {
            Some((idx, score)) => MatchOutcome {
                phrasing: Some(self.phrasings[idx].clone()),
                score,
                decision: if passes_threshold(score, self.threshold) {
                    Decision::Hit
                } else {
                    Decision::Miss
                },
            },
            None => MatchOutcome {
                phrasing: None,
                score: 0.0,
                decision: Decision::Miss,
            },
        }
    }

    pub fn find_best_match(&self, query: &str) -> Option<&str> {
        self.score(query)
            .filter(|(_, score)| passes_threshold(*score, self.threshold))
            .map(|(idx, _)| self.phrasings[idx].as_str())
    }

    pub fn answer_for(&self, phrasing: &str) -> Option<&Answer> {
        self.answers.get(&phrasing.to_lowercase())
    }
}
