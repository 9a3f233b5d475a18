use std::path::PathBuf;

use clap::Parser;

use fraudulink::config::FailOn;
use fraudulink::model::loader::ArtifactFormat;

#[derive(Parser, Debug)]
#[command(
    name = "fraudulink",
    about = "Classify call transcripts as scam or safe",
    version
)]
pub struct Cli {
    /// Transcript text to analyze (repeatable); reads stdin when omitted and no --file is given
    pub texts: Vec<String>,

    /// File with one transcript per line
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Config file [default: ./.fraudulink/config.toml, fallback ~/.config/fraudulink/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Classifier artifact [default: ml_model/model.json, searched in the working directory, then next to the executable]
    #[arg(long, value_name = "FILE")]
    pub model: Option<PathBuf>,

    /// Vectorizer artifact [default: ml_model/vectorizer.json, searched like --model]
    #[arg(long, value_name = "FILE")]
    pub vectorizer: Option<PathBuf>,

    /// Artifact encoding for both files; inferred from each file's extension when omitted
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<FormatArg>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Exit with code 1 when a scam verdict reaches this risk level
    #[arg(long, value_name = "LEVEL")]
    pub fail_on: Option<FailOnArg>,

    /// Show processed text and log artifact loading
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum FormatArg {
    Json,
    Bincode,
}

impl From<FormatArg> for ArtifactFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => ArtifactFormat::Json,
            FormatArg::Bincode => ArtifactFormat::Bincode,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum FailOnArg {
    None,
    Low,
    Medium,
    High,
}

impl From<FailOnArg> for FailOn {
    fn from(arg: FailOnArg) -> Self {
        match arg {
            FailOnArg::None => FailOn::None,
            FailOnArg::Low => FailOn::Low,
            FailOnArg::Medium => FailOn::Medium,
            FailOnArg::High => FailOn::High,
        }
    }
}
