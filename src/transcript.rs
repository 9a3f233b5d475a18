use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// Collect the transcripts to analyze.
///
/// Explicit `texts` come first, then the lines of `file`. With neither, the
/// whole of `stdin` is one transcript.
pub fn collect(texts: &[String], file: Option<&Path>, stdin: impl Read) -> Result<Vec<String>> {
    let mut transcripts: Vec<String> = texts.to_vec();

    if let Some(path) = file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading transcripts from {}", path.display()))?;
        transcripts.extend(parse_lines(&content));
    }

    if texts.is_empty() && file.is_none() {
        transcripts.push(read_all(stdin)?);
    }

    Ok(transcripts)
}

/// One transcript per line. Blank lines and `#` comment lines are skipped.
pub fn parse_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
        .map(String::from)
        .collect()
}

fn read_all(mut reader: impl Read) -> Result<String> {
    let mut buf = String::new();
    reader
        .read_to_string(&mut buf)
        .context("reading transcript from stdin")?;
    Ok(buf)
}
