use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::model::vectorizer::FeatureVector;
use crate::models::Label;

/// Which decision function a persisted classifier uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    LogisticRegression,
    LinearSvc,
    MultinomialNb,
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelKind::LogisticRegression => write!(f, "logistic_regression"),
            ModelKind::LinearSvc => write!(f, "linear_svc"),
            ModelKind::MultinomialNb => write!(f, "multinomial_nb"),
        }
    }
}

/// Persisted form of a fitted binary classifier.
///
/// Linear models use `coef` and `intercept`; naive Bayes uses
/// `class_log_prior` and `feature_log_prob`, one row per class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierState {
    pub kind: ModelKind,
    #[serde(default)]
    pub coef: Vec<f64>,
    #[serde(default)]
    pub intercept: f64,
    #[serde(default)]
    pub class_log_prior: Vec<f64>,
    #[serde(default)]
    pub feature_log_prob: Vec<Vec<f64>>,
}

/// Output of a single classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub label: Label,
    /// Raw decision score; positive favours class 1 (`Safe`).
    pub score: f64,
    /// Per-class probabilities `[scam, safe]`, when the model has a probability estimate.
    pub probabilities: Option<[f64; 2]>,
}

impl Prediction {
    /// Probability of the predicted class.
    ///
    /// Models without a probability estimate report exactly 1.0, which callers
    /// cannot tell apart from a fully confident calibrated model.
    pub fn confidence(&self) -> f64 {
        match self.probabilities {
            Some(probs) => probs[self.label.class_index()],
            None => 1.0,
        }
    }
}

/// A fitted binary classifier, immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub enum Classifier {
    LogisticRegression { coef: Vec<f64>, intercept: f64 },
    LinearSvc { coef: Vec<f64>, intercept: f64 },
    MultinomialNb {
        class_log_prior: [f64; 2],
        feature_log_prob: [Vec<f64>; 2],
    },
}

impl Classifier {
    pub fn from_state(state: ClassifierState) -> Result<Self, LoadError> {
        match state.kind {
            ModelKind::LogisticRegression | ModelKind::LinearSvc => {
                if state.coef.is_empty() {
                    return Err(LoadError::Corrupt(format!(
                        "{} artifact has no coefficients",
                        state.kind
                    )));
                }
                ensure_finite("coef", &state.coef)?;
                ensure_finite("intercept", &[state.intercept])?;
                let kind = state.kind;
                let ClassifierState {
                    coef, intercept, ..
                } = state;
                Ok(if kind == ModelKind::LinearSvc {
                    Classifier::LinearSvc { coef, intercept }
                } else {
                    Classifier::LogisticRegression { coef, intercept }
                })
            }
            ModelKind::MultinomialNb => {
                let class_log_prior: [f64; 2] =
                    state.class_log_prior.as_slice().try_into().map_err(|_| {
                        LoadError::Corrupt(format!(
                            "class_log_prior has {} entries, expected 2",
                            state.class_log_prior.len()
                        ))
                    })?;
                ensure_finite("class_log_prior", &class_log_prior)?;

                let rows = state.feature_log_prob.len();
                let [scam, safe]: [Vec<f64>; 2] =
                    state.feature_log_prob.try_into().map_err(|_| {
                        LoadError::Corrupt(format!(
                            "feature_log_prob has {rows} rows, expected 2"
                        ))
                    })?;
                if scam.is_empty() || scam.len() != safe.len() {
                    return Err(LoadError::Corrupt(format!(
                        "feature_log_prob rows have lengths {} and {}",
                        scam.len(),
                        safe.len()
                    )));
                }
                ensure_finite("feature_log_prob", &scam)?;
                ensure_finite("feature_log_prob", &safe)?;

                Ok(Classifier::MultinomialNb {
                    class_log_prior,
                    feature_log_prob: [scam, safe],
                })
            }
        }
    }

    pub fn kind(&self) -> ModelKind {
        match self {
            Classifier::LogisticRegression { .. } => ModelKind::LogisticRegression,
            Classifier::LinearSvc { .. } => ModelKind::LinearSvc,
            Classifier::MultinomialNb { .. } => ModelKind::MultinomialNb,
        }
    }

    /// Number of input features the model was fitted on.
    pub fn n_features(&self) -> usize {
        match self {
            Classifier::LogisticRegression { coef, .. } | Classifier::LinearSvc { coef, .. } => {
                coef.len()
            }
            Classifier::MultinomialNb {
                feature_log_prob, ..
            } => feature_log_prob[0].len(),
        }
    }

    /// Whether [`Prediction::probabilities`] is populated by this model.
    pub fn has_probabilities(&self) -> bool {
        !matches!(self, Classifier::LinearSvc { .. })
    }

    pub fn to_state(&self) -> ClassifierState {
        let mut state = ClassifierState {
            kind: self.kind(),
            coef: Vec::new(),
            intercept: 0.0,
            class_log_prior: Vec::new(),
            feature_log_prob: Vec::new(),
        };
        match self {
            Classifier::LogisticRegression { coef, intercept }
            | Classifier::LinearSvc { coef, intercept } => {
                state.coef = coef.clone();
                state.intercept = *intercept;
            }
            Classifier::MultinomialNb {
                class_log_prior,
                feature_log_prob,
            } => {
                state.class_log_prior = class_log_prior.to_vec();
                state.feature_log_prob = feature_log_prob.to_vec();
            }
        }
        state
    }

    /// Score a feature vector. Never fails on a vector of any dimension.
    pub fn classify(&self, features: &FeatureVector) -> Prediction {
        match self {
            Classifier::LogisticRegression { coef, intercept } => {
                let score = features.dot(coef) + intercept;
                let safe = sigmoid(score);
                Prediction {
                    label: linear_label(score),
                    score,
                    probabilities: Some([1.0 - safe, safe]),
                }
            }
            Classifier::LinearSvc { coef, intercept } => {
                let score = features.dot(coef) + intercept;
                Prediction {
                    label: linear_label(score),
                    score,
                    probabilities: None,
                }
            }
            Classifier::MultinomialNb {
                class_log_prior,
                feature_log_prob,
            } => {
                let jll = [
                    class_log_prior[0] + features.dot(&feature_log_prob[0]),
                    class_log_prior[1] + features.dot(&feature_log_prob[1]),
                ];
                // Ties go to the lower class index.
                let label = if jll[1] > jll[0] {
                    Label::Safe
                } else {
                    Label::Scam
                };
                let max = jll[0].max(jll[1]);
                let log_norm = max + ((jll[0] - max).exp() + (jll[1] - max).exp()).ln();
                Prediction {
                    label,
                    score: jll[1] - jll[0],
                    probabilities: Some([(jll[0] - log_norm).exp(), (jll[1] - log_norm).exp()]),
                }
            }
        }
    }
}

fn linear_label(score: f64) -> Label {
    if score > 0.0 {
        Label::Safe
    } else {
        Label::Scam
    }
}

fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

fn ensure_finite(field: &str, values: &[f64]) -> Result<(), LoadError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(pos) => Err(LoadError::Corrupt(format!(
            "{field}[{pos}] is not a finite number"
        ))),
        None => Ok(()),
    }
}
