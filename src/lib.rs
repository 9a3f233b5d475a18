//! `fraudulink` — classify call transcripts as scam or safe.
//!
//! # Flow
//! 1. Strip ASCII punctuation ([`preprocess`]).
//! 2. Map the text to a TF-IDF vector ([`model::vectorizer`]).
//! 3. Score the vector with the pre-trained classifier ([`model::classifier`]).
//! 4. Bucket the confidence into a risk level ([`risk`]).
//! 5. Return an immutable [`models::Verdict`] ([`detector::ScamDetector::analyze`]).
//!
//! Artifacts are loaded once through [`model::loader::ArtifactLoader`] and the
//! resulting [`detector::ScamDetector`] is passed explicitly to its callers.

pub mod config;
pub mod detector;
pub mod error;
pub mod model;
pub mod models;
pub mod preprocess;
pub mod report;
pub mod risk;
pub mod transcript;

pub use detector::{detect_scam, ScamDetector};
pub use error::{DetectorError, LoadError};
pub use models::{Label, RiskLevel, Verdict};
