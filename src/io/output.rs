use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use crate::models::AnalysisReport;

/// Write the analysis payload as pretty-printed JSON
pub fn write_report_json(path: &Path, report: &AnalysisReport) -> Result<()> {
    let json =
        serde_json::to_string_pretty(report).context("Failed to serialize analysis report")?;
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create output file: {:?}", path))?;
    file.write_all(json.as_bytes())
        .with_context(|| format!("Failed to write output file: {:?}", path))?;
    Ok(())
}

/// Write the plain-text summary report
pub fn write_summary_text(path: &Path, summary: &str) -> Result<()> {
    std::fs::write(path, summary)
        .with_context(|| format!("Failed to write summary file: {:?}", path))?;
    Ok(())
}
