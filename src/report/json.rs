use anyhow::Result;

use crate::models::Verdict;

pub fn to_string(verdicts: &[Verdict]) -> Result<String> {
    Ok(serde_json::to_string_pretty(verdicts)?)
}

pub fn render(verdicts: &[Verdict]) -> Result<()> {
    println!("{}", to_string(verdicts)?);
    Ok(())
}
