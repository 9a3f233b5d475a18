use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::LoadError;
use crate::model::classifier::{Classifier, ClassifierState};
use crate::model::vectorizer::{TfidfVectorizer, VectorizerState};

/// Directory searched for artifacts when no path is configured.
///
/// Relative, so it is tried against the working directory first and then
/// next to the running executable (see [`ArtifactPaths::default`]).
pub const DEFAULT_ARTIFACT_DIR: &str = "ml_model";

/// Locations of the two persisted artifacts a detector needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactPaths {
    pub vectorizer: PathBuf,
    pub model: PathBuf,
}

impl ArtifactPaths {
    /// `vectorizer.json` and `model.json` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            vectorizer: dir.join("vectorizer.json"),
            model: dir.join("model.json"),
        }
    }

    /// The first of `dirs` holding both artifacts, falling back to the first of `dirs`.
    pub fn discover(dirs: &[PathBuf]) -> Self {
        dirs.iter()
            .map(Self::in_dir)
            .find(ArtifactPaths::exists)
            .or_else(|| dirs.first().map(Self::in_dir))
            .unwrap_or_else(|| Self::in_dir(DEFAULT_ARTIFACT_DIR))
    }

    fn exists(&self) -> bool {
        self.vectorizer.is_file() && self.model.is_file()
    }
}

/// Candidate locations for [`DEFAULT_ARTIFACT_DIR`]: the working directory,
/// then the directory containing the executable.
pub fn default_search_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![PathBuf::from(DEFAULT_ARTIFACT_DIR)];
    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir.join(DEFAULT_ARTIFACT_DIR));
    }
    dirs
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::discover(&default_search_dirs())
    }
}

/// Encoding of a persisted artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    Json,
    Bincode,
}

impl ArtifactFormat {
    /// Guess the format from a file extension.
    pub fn infer(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "json" => Some(ArtifactFormat::Json),
            "bin" | "bincode" => Some(ArtifactFormat::Bincode),
            _ => None,
        }
    }

    /// `explicit` when given, else the format of `path`'s extension, else JSON.
    pub fn resolve(explicit: Option<Self>, path: &Path) -> Self {
        if let Some(format) = explicit {
            return format;
        }
        Self::infer(path).unwrap_or_else(|| {
            warn!(path = %path.display(), "unrecognised artifact extension, assuming json");
            ArtifactFormat::Json
        })
    }

    pub fn loader(self) -> Box<dyn ArtifactLoader> {
        match self {
            ArtifactFormat::Json => Box::new(JsonLoader),
            ArtifactFormat::Bincode => Box::new(BincodeLoader),
        }
    }
}

impl std::fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactFormat::Json => write!(f, "json"),
            ArtifactFormat::Bincode => write!(f, "bincode"),
        }
    }
}

/// Turns persisted artifacts into ready-to-use model components.
///
/// Implementations only decide how bytes become state; validation is shared
/// through [`TfidfVectorizer::from_state`] and [`Classifier::from_state`].
pub trait ArtifactLoader {
    fn load_vectorizer(&self, path: &Path) -> Result<TfidfVectorizer, LoadError>;
    fn load_classifier(&self, path: &Path) -> Result<Classifier, LoadError>;
}

/// Artifacts stored as JSON documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonLoader;

impl ArtifactLoader for JsonLoader {
    fn load_vectorizer(&self, path: &Path) -> Result<TfidfVectorizer, LoadError> {
        let state: VectorizerState = read_with(path, |bytes| {
            serde_json::from_slice(bytes).map_err(|e| e.to_string())
        })?;
        TfidfVectorizer::from_state(state)
    }

    fn load_classifier(&self, path: &Path) -> Result<Classifier, LoadError> {
        let state: ClassifierState = read_with(path, |bytes| {
            serde_json::from_slice(bytes).map_err(|e| e.to_string())
        })?;
        Classifier::from_state(state)
    }
}

/// Artifacts stored in bincode's compact binary encoding.
#[derive(Debug, Default, Clone, Copy)]
pub struct BincodeLoader;

impl ArtifactLoader for BincodeLoader {
    fn load_vectorizer(&self, path: &Path) -> Result<TfidfVectorizer, LoadError> {
        let state: VectorizerState = read_with(path, |bytes| {
            bincode::deserialize(bytes).map_err(|e| e.to_string())
        })?;
        TfidfVectorizer::from_state(state)
    }

    fn load_classifier(&self, path: &Path) -> Result<Classifier, LoadError> {
        let state: ClassifierState = read_with(path, |bytes| {
            bincode::deserialize(bytes).map_err(|e| e.to_string())
        })?;
        Classifier::from_state(state)
    }
}

/// Read `path` in full, closing it before decoding.
fn read_with<T, F>(path: &Path, decode: F) -> Result<T, LoadError>
where
    T: DeserializeOwned,
    F: FnOnce(&[u8]) -> Result<T, String>,
{
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&bytes).map_err(|message| LoadError::Decode {
        path: path.to_path_buf(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::classifier::ModelKind;

    fn fixtures() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
    }

    #[test]
    fn test_json_fixtures_load() {
        let paths = ArtifactPaths::in_dir(fixtures());
        let vectorizer = JsonLoader.load_vectorizer(&paths.vectorizer).unwrap();
        let classifier = JsonLoader.load_classifier(&paths.model).unwrap();
        assert!(vectorizer.dimension() > 0);
        assert_eq!(classifier.n_features(), vectorizer.dimension());
        assert_eq!(classifier.kind(), ModelKind::LogisticRegression);
    }

    #[test]
    fn test_bincode_matches_json() {
        let paths = ArtifactPaths::in_dir(fixtures());
        let vectorizer = JsonLoader.load_vectorizer(&paths.vectorizer).unwrap();
        let classifier = JsonLoader.load_classifier(&paths.model).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let vec_path = dir.path().join("vectorizer.bin");
        let model_path = dir.path().join("model.bin");
        std::fs::write(&vec_path, bincode::serialize(vectorizer.state()).unwrap()).unwrap();
        std::fs::write(&model_path, bincode::serialize(&classifier.to_state()).unwrap()).unwrap();

        let vectorizer_bin = BincodeLoader.load_vectorizer(&vec_path).unwrap();
        let classifier_bin = BincodeLoader.load_classifier(&model_path).unwrap();
        assert_eq!(vectorizer_bin.state(), vectorizer.state());
        assert_eq!(classifier_bin, classifier);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = JsonLoader
            .load_classifier(Path::new("/nonexistent/model.json"))
            .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "not json at all").unwrap();
        assert!(matches!(
            JsonLoader.load_classifier(&path),
            Err(LoadError::Decode { .. })
        ));
        assert!(matches!(
            BincodeLoader.load_vectorizer(&path),
            Err(LoadError::Decode { .. })
        ));
    }

    #[test]
    fn test_semantically_invalid_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vectorizer.json");
        std::fs::write(&path, r#"{"vocabulary": {"pay": 0, "now": 1}, "idf": [1.0]}"#).unwrap();
        assert!(matches!(
            JsonLoader.load_vectorizer(&path),
            Err(LoadError::Corrupt(_))
        ));
    }

    #[test]
    fn test_format_inference() {
        assert_eq!(
            ArtifactFormat::infer(Path::new("ml_model/model.json")),
            Some(ArtifactFormat::Json)
        );
        assert_eq!(
            ArtifactFormat::infer(Path::new("model.bincode")),
            Some(ArtifactFormat::Bincode)
        );
        assert_eq!(ArtifactFormat::infer(Path::new("model.pkl")), None);
        assert_eq!(ArtifactFormat::infer(Path::new("model")), None);
    }

    #[test]
    fn test_resolve_prefers_explicit_then_extension() {
        let bin = Path::new("vectorizer.bin");
        assert_eq!(ArtifactFormat::resolve(None, bin), ArtifactFormat::Bincode);
        assert_eq!(
            ArtifactFormat::resolve(Some(ArtifactFormat::Json), bin),
            ArtifactFormat::Json
        );
        assert_eq!(
            ArtifactFormat::resolve(None, Path::new("model.pkl")),
            ArtifactFormat::Json
        );
    }

    #[test]
    fn test_discover_skips_incomplete_dirs() {
        let missing = tempfile::tempdir().unwrap();
        let partial = tempfile::tempdir().unwrap();
        std::fs::write(partial.path().join("model.json"), "{}").unwrap();

        let dirs = vec![
            missing.path().to_path_buf(),
            partial.path().to_path_buf(),
            fixtures(),
        ];
        assert_eq!(ArtifactPaths::discover(&dirs), ArtifactPaths::in_dir(fixtures()));

        let none = vec![missing.path().to_path_buf(), partial.path().to_path_buf()];
        assert_eq!(
            ArtifactPaths::discover(&none),
            ArtifactPaths::in_dir(missing.path())
        );
    }

    #[test]
    fn test_default_search_starts_at_working_directory() {
        let dirs = default_search_dirs();
        assert_eq!(dirs[0], PathBuf::from(DEFAULT_ARTIFACT_DIR));
        assert!(dirs.iter().skip(1).all(|d| d.ends_with(DEFAULT_ARTIFACT_DIR)));
    }

    #[test]
    fn test_default_paths() {
        let paths = ArtifactPaths::default();
        assert_eq!(paths.vectorizer, PathBuf::from("ml_model/vectorizer.json"));
        assert_eq!(paths.model, PathBuf::from("ml_model/model.json"));
    }
}
