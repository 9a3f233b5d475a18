//! Pre-trained model components and how they are loaded.
//!
//! - [`vectorizer`] — TF-IDF transform from text to a sparse [`FeatureVector`](vectorizer::FeatureVector).
//! - [`classifier`] — binary classifiers scoring a feature vector into a
//!   [`Prediction`](classifier::Prediction).
//! - [`loader`] — the [`ArtifactLoader`](loader::ArtifactLoader) seam with JSON
//!   and bincode implementations.

pub mod classifier;
pub mod loader;
pub mod vectorizer;
