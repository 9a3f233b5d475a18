use tracing::{debug, info};

use crate::error::{DetectorError, LoadError};
use crate::model::classifier::{Classifier, Prediction};
use crate::model::loader::{ArtifactFormat, ArtifactLoader, ArtifactPaths};
use crate::model::vectorizer::{FeatureVector, TfidfVectorizer};
use crate::models::Verdict;
use crate::preprocess::strip_punctuation;
use crate::risk::risk_level;

/// Scam classifier over a loaded vectorizer/classifier pair.
///
/// Holds no mutable state once constructed, so one instance can be shared by
/// reference (or behind an `Arc`) across any number of threads.
#[derive(Debug)]
pub struct ScamDetector {
    vectorizer: TfidfVectorizer,
    classifier: Classifier,
}

impl ScamDetector {
    /// Assemble a detector from components that are already in memory.
    pub fn new(vectorizer: TfidfVectorizer, classifier: Classifier) -> Result<Self, LoadError> {
        if vectorizer.dimension() != classifier.n_features() {
            return Err(LoadError::DimensionMismatch {
                vectorizer: vectorizer.dimension(),
                classifier: classifier.n_features(),
            });
        }
        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Load both artifacts through `loader`. Either one failing is fatal.
    pub fn load(paths: &ArtifactPaths, loader: &dyn ArtifactLoader) -> Result<Self, LoadError> {
        Self::load_each(paths, loader, loader)
    }

    /// Load both artifacts, choosing each one's loader from `format` or, when
    /// that is `None`, from that file's own extension (JSON if unrecognised).
    pub fn from_paths(paths: &ArtifactPaths, format: Option<ArtifactFormat>) -> Result<Self, LoadError> {
        let vectorizer_format = ArtifactFormat::resolve(format, &paths.vectorizer);
        let model_format = ArtifactFormat::resolve(format, &paths.model);
        Self::load_each(
            paths,
            vectorizer_format.loader().as_ref(),
            model_format.loader().as_ref(),
        )
    }

    fn load_each(
        paths: &ArtifactPaths,
        vectorizer_loader: &dyn ArtifactLoader,
        model_loader: &dyn ArtifactLoader,
    ) -> Result<Self, LoadError> {
        let vectorizer = vectorizer_loader.load_vectorizer(&paths.vectorizer)?;
        info!(
            path = %paths.vectorizer.display(),
            vocabulary = vectorizer.dimension(),
            "loaded vectorizer"
        );

        let classifier = model_loader.load_classifier(&paths.model)?;
        info!(
            path = %paths.model.display(),
            kind = %classifier.kind(),
            probabilities = classifier.has_probabilities(),
            "loaded classifier"
        );

        Self::new(vectorizer, classifier)
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Strip punctuation the same way [`analyze`](Self::analyze) does.
    pub fn preprocess(&self, text: &str) -> String {
        strip_punctuation(text)
    }

    pub fn vectorize(&self, processed: &str) -> FeatureVector {
        self.vectorizer.vectorize(processed)
    }

    pub fn classify(&self, features: &FeatureVector) -> Prediction {
        self.classifier.classify(features)
    }

    /// Classify a transcript.
    ///
    /// Rejects empty or whitespace-only text; any other input yields a verdict.
    pub fn analyze(&self, text: &str) -> Result<Verdict, DetectorError> {
        if text.trim().is_empty() {
            return Err(DetectorError::EmptyInput);
        }

        let processed_text = self.preprocess(text);
        let features = self.vectorize(&processed_text);
        let prediction = self.classify(&features);

        let confidence = prediction.confidence();
        let is_scam = prediction.label.is_scam();
        let risk = risk_level(confidence, is_scam);

        debug!(
            label = %prediction.label,
            confidence,
            risk = %risk,
            features = features.nnz(),
            "analyzed transcript"
        );

        Ok(Verdict {
            is_scam,
            confidence,
            label: prediction.label,
            risk_level: risk,
            original_text: text.to_string(),
            processed_text,
        })
    }
}

/// One-off analysis with artifacts from the default location.
///
/// Loads both artifacts on every call; hold a [`ScamDetector`] for repeated use.
pub fn detect_scam(text: &str) -> Result<Verdict, DetectorError> {
    let detector = ScamDetector::from_paths(&ArtifactPaths::default(), None)?;
    detector.analyze(text)
}
