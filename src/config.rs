use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::model::loader::{ArtifactFormat, ArtifactPaths};
use crate::models::{RiskLevel, Verdict};

/// Root configuration structure, deserialized from `.fraudulink/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Where the pre-trained artifacts live.
    #[serde(default)]
    pub artifacts: ArtifactsConfig,
    /// How verdicts affect the exit status.
    #[serde(default)]
    pub policy: PolicyConfig,
}

#[derive(Debug, Deserialize)]
pub struct ArtifactsConfig {
    #[serde(default = "default_vectorizer_path")]
    pub vectorizer: PathBuf,
    #[serde(default = "default_model_path")]
    pub model: PathBuf,
    /// Artifact encoding for both files. When absent, each file's format is
    /// inferred from its own extension.
    pub format: Option<ArtifactFormat>,
}

fn default_vectorizer_path() -> PathBuf {
    ArtifactPaths::default().vectorizer
}

fn default_model_path() -> PathBuf {
    ArtifactPaths::default().model
}

impl Default for ArtifactsConfig {
    fn default() -> Self {
        let paths = ArtifactPaths::default();
        ArtifactsConfig {
            vectorizer: paths.vectorizer,
            model: paths.model,
            format: None,
        }
    }
}

impl ArtifactsConfig {
    pub fn paths(&self) -> ArtifactPaths {
        ArtifactPaths {
            vectorizer: self.vectorizer.clone(),
            model: self.model.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PolicyConfig {
    /// Lowest risk level that fails a run. Defaults to `high`.
    #[serde(default = "default_fail_on")]
    pub fail_on: FailOn,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyConfig {
            fail_on: default_fail_on(),
        }
    }
}

fn default_fail_on() -> FailOn {
    FailOn::High
}

/// Threshold at which a verdict makes the CLI exit with code 1.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FailOn {
    /// Never fail.
    None,
    Low,
    Medium,
    High,
}

impl FailOn {
    /// Whether `verdict` reaches this threshold. Only scam verdicts can fail a run.
    pub fn is_triggered_by(&self, verdict: &Verdict) -> bool {
        let threshold = match self {
            FailOn::None => return false,
            FailOn::Low => RiskLevel::Low,
            FailOn::Medium => RiskLevel::Medium,
            FailOn::High => RiskLevel::High,
        };
        verdict.is_scam && verdict.risk_level >= threshold
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<base_dir>/.fraudulink/config.toml`
/// 3. `~/.config/fraudulink/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(base_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let local_config = base_dir.join(".fraudulink").join("config.toml");
    if local_config.exists() {
        return read_config(&local_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("fraudulink").join("config.toml");
        if home_config.exists() {
            return read_config(&home_config);
        }
    }

    debug!("no config file found, using built-in defaults");
    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("parsing config {}", path.display()))?;
    debug!(path = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Label;

    fn verdict(is_scam: bool, risk_level: RiskLevel) -> Verdict {
        Verdict {
            is_scam,
            confidence: 0.5,
            label: if is_scam { Label::Scam } else { Label::Safe },
            risk_level,
            original_text: String::new(),
            processed_text: String::new(),
        }
    }

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.artifacts.paths(), ArtifactPaths::default());
        assert_eq!(cfg.artifacts.format, None);
        assert_eq!(cfg.policy.fail_on, FailOn::High);
    }

    #[test]
    fn test_parse_full_config() {
        let cfg: Config = toml::from_str(
            r#"
[artifacts]
vectorizer = "/opt/models/vec.bin"
model = "/opt/models/clf.bin"
format = "bincode"

[policy]
fail_on = "medium"
"#,
        )
        .unwrap();
        assert_eq!(cfg.artifacts.vectorizer, PathBuf::from("/opt/models/vec.bin"));
        assert_eq!(cfg.artifacts.format, Some(ArtifactFormat::Bincode));
        assert_eq!(cfg.policy.fail_on, FailOn::Medium);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let cfg: Config = toml::from_str("[artifacts]\nmodel = \"m.json\"\n").unwrap();
        assert_eq!(cfg.artifacts.model, PathBuf::from("m.json"));
        assert_eq!(cfg.artifacts.vectorizer, ArtifactPaths::default().vectorizer);
        assert_eq!(cfg.policy.fail_on, FailOn::High);
    }

    #[test]
    fn test_override_and_local_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join(".fraudulink");
        std::fs::create_dir_all(&local).unwrap();
        std::fs::write(local.join("config.toml"), "[policy]\nfail_on = \"low\"\n").unwrap();
        let cfg = load_config(dir.path(), None).unwrap();
        assert_eq!(cfg.policy.fail_on, FailOn::Low);

        let other = dir.path().join("other.toml");
        std::fs::write(&other, "[policy]\nfail_on = \"none\"\n").unwrap();
        let cfg = load_config(dir.path(), Some(&other)).unwrap();
        assert_eq!(cfg.policy.fail_on, FailOn::None);
    }

    #[test]
    fn test_invalid_config_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[policy]\nfail_on = \"sometimes\"\n").unwrap();
        assert!(load_config(dir.path(), Some(&path)).is_err());
    }

    #[test]
    fn test_fail_on_thresholds() {
        assert!(FailOn::High.is_triggered_by(&verdict(true, RiskLevel::High)));
        assert!(!FailOn::High.is_triggered_by(&verdict(true, RiskLevel::Medium)));
        assert!(FailOn::Medium.is_triggered_by(&verdict(true, RiskLevel::Medium)));
        assert!(FailOn::Low.is_triggered_by(&verdict(true, RiskLevel::Low)));
        assert!(!FailOn::Low.is_triggered_by(&verdict(false, RiskLevel::Low)));
        assert!(!FailOn::None.is_triggered_by(&verdict(true, RiskLevel::High)));
    }
}
