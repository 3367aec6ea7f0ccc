//! Term-frequency / inverse-document-frequency vector space.
//!
//! Weighting follows the common smoothed variant: `idf(t) = ln((1 + n) /
//! (1 + df(t))) + 1`, raw counts for term frequency, and L2 normalisation
//! of every document vector.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::{FaqError, Result};

/// Lower-cases `text` and splits it into runs of word characters, keeping
/// tokens of at least two characters.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= 2)
        .map(str::to_owned)
        .collect()
}

/// Sparse vector stored as `(column, weight)` pairs sorted by column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f32)>,
}

impl SparseVector {
    /// Builds a vector from arbitrary pairs. Zero weights are dropped and
    /// repeated columns are summed.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (usize, f32)>) -> Self {
        let mut merged: BTreeMap<usize, f32> = BTreeMap::new();
        for (col, w) in pairs {
            *merged.entry(col).or_insert(0.0) += w;
        }
        Self {
            entries: merged.into_iter().filter(|(_, w)| *w != 0.0).collect(),
        }
    }

    fn l2_normalized(mut self) -> Self {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, w) in &mut self.entries {
                *w /= norm;
            }
        }
        self
    }

    pub fn entries(&self) -> &[(usize, f32)] {
        &self.entries
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt()
    }

    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (mut i, mut j) = (0, 0);
        let mut acc = 0.0f32;
        while i < self.entries.len() && j < other.entries.len() {
            let (ca, wa) = self.entries[i];
            let (cb, wb) = other.entries[j];
            if ca == cb {
                acc += wa * wb;
                i += 1;
                j += 1;
            } else if ca < cb {
                i += 1;
            } else {
                j += 1;
            }
        }
        acc
    }
}

/// Cosine of the angle between `a` and `b`; 0 when either is the zero vector.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f32 {
    let (na, nb) = (a.norm(), b.norm());
    if na == 0.0 || nb == 0.0 {
        0.0
    } else {
        a.dot(b) / (na * nb)
    }
}

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Fits the vocabulary and IDF weights over `documents`. Columns are
    /// assigned in lexical order of the terms.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Result<Self> {
        if documents.is_empty() {
            return Err(FaqError::EmptyCorpus);
        }

        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for doc in documents {
            let unique: BTreeSet<String> = tokenize(doc.as_ref()).into_iter().collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }
        if document_frequency.is_empty() {
            return Err(FaqError::EmptyVocabulary);
        }

        let n = documents.len() as f32;
        let mut vocabulary = HashMap::with_capacity(document_frequency.len());
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (col, (term, df)) in document_frequency.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + df as f32)).ln() + 1.0);
            vocabulary.insert(term, col);
        }

        Ok(Self { vocabulary, idf })
    }

    pub fn fit_transform<S: AsRef<str>>(documents: &[S]) -> Result<(Self, Vec<SparseVector>)> {
        let vectorizer = Self::fit(documents)?;
        let matrix = documents
            .iter()
            .map(|doc| vectorizer.transform(doc.as_ref()))
            .collect();
        Ok((vectorizer, matrix))
    }

    /// Projects `text` into the fitted space. Unknown terms are ignored, so
    /// text with no known terms becomes the zero vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        let counts = tokenize(text)
            .into_iter()
            .filter_map(|token| self.vocabulary.get(&token).copied())
            .map(|col| (col, 1.0f32));
        let raw = SparseVector::from_pairs(counts);
        SparseVector {
            entries: raw
                .entries
                .into_iter()
                .map(|(col, tf)| (col, tf * self.idf[col]))
                .collect(),
        }
        .l2_normalized()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    #[cfg(test)]
    fn column(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    #[cfg(test)]
    fn idf(&self, term: &str) -> Option<f32> {
        self.column(term).map(|col| self.idf[col])
    }
}
