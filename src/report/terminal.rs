use anyhow::Result;
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::models::{Label, RiskLevel, Verdict};

/// Characters of the original transcript shown per table row.
const PREVIEW_CHARS: usize = 50;

/// Render a colored terminal report.
pub fn render(verdicts: &[Verdict], verbose: bool, quiet: bool) -> Result<()> {
    let summary = Summary::of(verdicts);

    if quiet {
        println!(
            "Total: {}  Scam: {}  Safe: {}  High: {}  Medium: {}  Low: {}",
            summary.total,
            summary.scam.to_string().red(),
            summary.safe.to_string().green(),
            summary.high.to_string().red(),
            summary.medium.to_string().yellow(),
            summary.low,
        );
        return Ok(());
    }

    println!("\n {} v{}\n", "fraudulink".bold(), env!("CARGO_PKG_VERSION"));

    println!(" ┌────────────────────────────────────────────────────┐");
    println!(" │  {:<48} │", "SUMMARY".bold());
    println!(" │  {:<48} │", format!("Transcripts analyzed : {}", summary.total));
    println!(
        " │  {:<48} │",
        format!(
            "{}  Scam            : {:>4}  [high {}, medium {}]",
            "✗".red(),
            summary.scam,
            summary.high,
            summary.medium
        )
    );
    println!(
        " │  {:<48} │",
        format!("{}  Safe            : {:>4}", "✓".green(), summary.safe)
    );
    println!(" └────────────────────────────────────────────────────┘\n");

    if !verdicts.is_empty() {
        println!("{}", table(verdicts, verbose));
        println!();
    }

    Ok(())
}

#[derive(Debug, Default, PartialEq)]
struct Summary {
    total: usize,
    scam: usize,
    safe: usize,
    high: usize,
    medium: usize,
    low: usize,
}

impl Summary {
    fn of(verdicts: &[Verdict]) -> Self {
        let mut summary = Summary {
            total: verdicts.len(),
            ..Summary::default()
        };
        for v in verdicts {
            match v.label {
                Label::Scam => summary.scam += 1,
                Label::Safe => summary.safe += 1,
            }
            match v.risk_level {
                RiskLevel::High => summary.high += 1,
                RiskLevel::Medium => summary.medium += 1,
                RiskLevel::Low => summary.low += 1,
            }
        }
        summary
    }
}

fn table(verdicts: &[Verdict], verbose: bool) -> Table {
    let mut header = vec![
        Cell::new("Transcript").add_attribute(Attribute::Bold),
        Cell::new("Label").add_attribute(Attribute::Bold),
        Cell::new("Risk").add_attribute(Attribute::Bold),
        Cell::new("Confidence").add_attribute(Attribute::Bold),
    ];
    if verbose {
        header.push(Cell::new("Processed").add_attribute(Attribute::Bold));
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);

    for v in verdicts {
        let (label_str, label_color) = match v.label {
            Label::Scam => ("✗ SCAM", Color::Red),
            Label::Safe => ("✓ SAFE", Color::Green),
        };
        let risk_color = match v.risk_level {
            RiskLevel::High => Color::Red,
            RiskLevel::Medium => Color::Yellow,
            RiskLevel::Low => Color::Green,
        };

        let mut row = vec![
            Cell::new(preview(&v.original_text)),
            Cell::new(label_str).fg(label_color),
            Cell::new(v.risk_level.to_string())
                .fg(risk_color)
                .set_alignment(CellAlignment::Center),
            Cell::new(format_percent(v.confidence)).set_alignment(CellAlignment::Right),
        ];
        if verbose {
            row.push(Cell::new(&v.processed_text));
        }
        table.add_row(row);
    }

    table
}

/// First [`PREVIEW_CHARS`] characters, with an ellipsis when truncated.
fn preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= PREVIEW_CHARS {
        return flat;
    }
    let head: String = flat.chars().take(PREVIEW_CHARS).collect();
    format!("{head}...")
}

fn format_percent(confidence: f64) -> String {
    format!("{:.2}%", confidence * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verdict(label: Label, risk_level: RiskLevel) -> Verdict {
        Verdict {
            is_scam: label.is_scam(),
            confidence: 0.9,
            label,
            risk_level,
            original_text: "text".to_string(),
            processed_text: "text".to_string(),
        }
    }

    #[test]
    fn test_summary_counts() {
        let verdicts = vec![
            verdict(Label::Scam, RiskLevel::High),
            verdict(Label::Scam, RiskLevel::Medium),
            verdict(Label::Safe, RiskLevel::Low),
        ];
        assert_eq!(
            Summary::of(&verdicts),
            Summary {
                total: 3,
                scam: 2,
                safe: 1,
                high: 1,
                medium: 1,
                low: 1,
            }
        );
    }

    #[test]
    fn test_preview_truncates_on_char_boundary() {
        assert_eq!(preview("short\n call"), "short call");
        let long = "é".repeat(60);
        let shown = preview(&long);
        assert!(shown.ends_with("..."));
        assert_eq!(shown.chars().count(), PREVIEW_CHARS + 3);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.96959), "96.96%");
        assert_eq!(format_percent(1.0), "100.00%");
    }
}
