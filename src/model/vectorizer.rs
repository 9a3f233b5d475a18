use std::borrow::Cow;
use std::collections::{BTreeMap, HashSet};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Token pattern used when an artifact does not specify one: runs of two or
/// more word characters.
pub const DEFAULT_TOKEN_PATTERN: &str = r"(?u)\b\w\w+\b";

/// Row normalization applied after weighting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    #[default]
    L2,
    #[serde(rename = "none")]
    Off,
}

/// Persisted form of a fitted TF-IDF vectorizer.
///
/// Field names and defaults follow the conventional TF-IDF parameter set so
/// that an exported model maps onto this struct one-to-one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerState {
    /// Term → feature index. Indices must cover `0..vocabulary.len()` exactly once.
    pub vocabulary: BTreeMap<String, usize>,
    /// Inverse document frequency per feature index.
    #[serde(default)]
    pub idf: Vec<f64>,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default = "default_token_pattern")]
    pub token_pattern: String,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub stop_words: Vec<String>,
    #[serde(default)]
    pub binary: bool,
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_true")]
    pub use_idf: bool,
    #[serde(default)]
    pub norm: Norm,
}

fn default_true() -> bool {
    true
}

fn default_token_pattern() -> String {
    DEFAULT_TOKEN_PATTERN.to_string()
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

/// Sparse feature vector with entries sorted by ascending index.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    dimension: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    /// Build a vector from `(index, weight)` pairs. Zero weights and indices
    /// outside `0..dimension` are dropped; repeated indices are summed.
    pub fn from_entries(dimension: usize, entries: impl IntoIterator<Item = (usize, f64)>) -> Self {
        let mut merged: BTreeMap<usize, f64> = BTreeMap::new();
        for (index, weight) in entries {
            if index < dimension {
                *merged.entry(index).or_insert(0.0) += weight;
            }
        }
        Self {
            dimension,
            entries: merged.into_iter().filter(|(_, w)| *w != 0.0).collect(),
        }
    }

    pub fn zeros(dimension: usize) -> Self {
        Self {
            dimension,
            entries: Vec::new(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of non-zero entries.
    pub fn nnz(&self) -> usize {
        self.entries.len()
    }

    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |(i, _)| *i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// Dot product with a dense weight row, accumulated in index order.
    /// Indices beyond `weights` contribute nothing.
    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.iter()
            .map(|(i, x)| weights.get(i).copied().unwrap_or(0.0) * x)
            .sum()
    }
}

/// A fitted TF-IDF vectorizer, immutable after construction.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    state: VectorizerState,
    token_pattern: Regex,
    stop_words: HashSet<String>,
}

impl TfidfVectorizer {
    /// Validate a persisted state and compile its token pattern.
    pub fn from_state(state: VectorizerState) -> Result<Self, LoadError> {
        let dimension = state.vocabulary.len();

        let mut seen = vec![false; dimension];
        for (term, &index) in &state.vocabulary {
            if index >= dimension {
                return Err(LoadError::Corrupt(format!(
                    "vocabulary index {index} for {term:?} is outside 0..{dimension}"
                )));
            }
            if std::mem::replace(&mut seen[index], true) {
                return Err(LoadError::Corrupt(format!(
                    "vocabulary index {index} is assigned more than once"
                )));
            }
        }

        if state.use_idf {
            if state.idf.len() != dimension {
                return Err(LoadError::Corrupt(format!(
                    "idf has {} weights for a vocabulary of {dimension}",
                    state.idf.len()
                )));
            }
            if let Some(pos) = state.idf.iter().position(|w| !w.is_finite()) {
                return Err(LoadError::Corrupt(format!("idf weight {pos} is not finite")));
            }
        }

        let (min_n, max_n) = state.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(LoadError::Corrupt(format!(
                "invalid ngram_range ({min_n}, {max_n})"
            )));
        }

        let token_pattern = Regex::new(&state.token_pattern).map_err(|e| {
            LoadError::Corrupt(format!("token_pattern {:?}: {e}", state.token_pattern))
        })?;
        let stop_words = state.stop_words.iter().cloned().collect();

        Ok(Self {
            state,
            token_pattern,
            stop_words,
        })
    }

    pub fn state(&self) -> &VectorizerState {
        &self.state
    }

    /// Number of features every produced vector has.
    pub fn dimension(&self) -> usize {
        self.state.vocabulary.len()
    }

    /// Map text to its TF-IDF vector. Never fails; text with no known terms
    /// produces the zero vector.
    pub fn vectorize(&self, text: &str) -> FeatureVector {
        let text: Cow<'_, str> = if self.state.lowercase {
            Cow::Owned(text.to_lowercase())
        } else {
            Cow::Borrowed(text)
        };

        let tokens = self.tokenize(&text);
        let terms = self.ngrams(tokens);

        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in &terms {
            if let Some(&index) = self.state.vocabulary.get(term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(index, count)| (index, self.weight(index, count)))
            .collect();
        normalize(&mut entries, self.state.norm);

        FeatureVector {
            dimension: self.dimension(),
            entries,
        }
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        let tokens: Vec<String> = if self.token_pattern.captures_len() > 1 {
            // With a capture group, the first group is the token.
            self.token_pattern
                .captures_iter(text)
                .filter_map(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
                .collect()
        } else {
            self.token_pattern
                .find_iter(text)
                .map(|m| m.as_str().to_string())
                .collect()
        };

        if self.stop_words.is_empty() {
            return tokens;
        }
        tokens
            .into_iter()
            .filter(|t| !self.stop_words.contains(t))
            .collect()
    }

    fn ngrams(&self, tokens: Vec<String>) -> Vec<String> {
        let (min_n, max_n) = self.state.ngram_range;
        if max_n == 1 {
            return tokens;
        }

        let mut terms = Vec::new();
        let mut min_n = min_n;
        if min_n == 1 {
            terms.extend(tokens.iter().cloned());
            min_n = 2;
        }
        let upper = max_n.min(tokens.len());
        for n in min_n..=upper {
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }

    fn weight(&self, index: usize, count: f64) -> f64 {
        let tf = if self.state.binary {
            1.0
        } else if self.state.sublinear_tf {
            1.0 + count.ln()
        } else {
            count
        };
        if self.state.use_idf {
            tf * self.state.idf[index]
        } else {
            tf
        }
    }
}

fn normalize(entries: &mut [(usize, f64)], norm: Norm) {
    let total = match norm {
        Norm::Off => return,
        Norm::L1 => entries.iter().map(|(_, w)| w.abs()).sum::<f64>(),
        Norm::L2 => entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt(),
    };
    if total == 0.0 {
        return;
    }
    for (_, w) in entries.iter_mut() {
        *w /= total;
    }
}
