//! `fraudulink` — classify call transcripts as scam or safe from the command line.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Install the tracing subscriber.
//! 3. Load config ([`config::load_config`]) and apply command-line overrides.
//! 4. Load the vectorizer and classifier; a missing or corrupt artifact is fatal.
//! 5. Collect transcripts from arguments, `--file`, or stdin ([`transcript::collect`]).
//! 6. Analyze each transcript ([`ScamDetector::analyze`]).
//! 7. Render the requested report ([`report`]).
//! 8. Exit `0`, or `1` when a scam verdict reaches the `fail_on` risk level.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cli::{Cli, ReportFormat};
use fraudulink::config::{load_config, FailOn};
use fraudulink::{report, transcript, ScamDetector, Verdict};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let cwd = std::env::current_dir().context("resolving working directory")?;
    let config = load_config(&cwd, cli.config.as_deref())?;

    let mut paths = config.artifacts.paths();
    if let Some(model) = &cli.model {
        paths.model = model.clone();
    }
    if let Some(vectorizer) = &cli.vectorizer {
        paths.vectorizer = vectorizer.clone();
    }
    let format = cli.format.map(Into::into).or(config.artifacts.format);

    let detector = ScamDetector::from_paths(&paths, format).context("loading model artifacts")?;

    let transcripts = transcript::collect(&cli.texts, cli.file.as_deref(), std::io::stdin().lock())?;
    let verdicts = analyze_all(&detector, &transcripts, cli.quiet)?;

    match cli.report {
        ReportFormat::Terminal => report::terminal::render(&verdicts, cli.verbose, cli.quiet)?,
        ReportFormat::Json => report::json::render(&verdicts)?,
    }

    let fail_on: FailOn = cli.fail_on.map(Into::into).unwrap_or(config.policy.fail_on);
    if verdicts.iter().any(|v| fail_on.is_triggered_by(v)) {
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn analyze_all(detector: &ScamDetector, transcripts: &[String], quiet: bool) -> Result<Vec<Verdict>> {
    let pb = if !quiet && transcripts.len() > 1 {
        let pb = ProgressBar::new(transcripts.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        Some(pb)
    } else {
        None
    };

    let mut verdicts = Vec::with_capacity(transcripts.len());
    for (line, text) in transcripts.iter().enumerate() {
        let verdict = detector
            .analyze(text)
            .with_context(|| format!("transcript {}", line + 1))?;
        verdicts.push(verdict);
        if let Some(pb) = &pb {
            pb.inc(1);
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    Ok(verdicts)
}
