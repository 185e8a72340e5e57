use thiserror::Error;

/// Errors produced by the analysis engine.
///
/// Policy-driven gaps (a word missing from the pronunciation dictionary, an
/// unparseable feature value) are deliberately not errors; they surface as
/// logged omissions or explicit missing sentinels instead.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A retained segment has an inverted time interval
    #[error("invalid segment '{label}': end {end} precedes start {start}")]
    InvalidSegment { label: String, start: f64, end: f64 },

    /// Assembler inputs reference a unit id outside the analyzed sequence
    #[error("unit id '{unit_id}' is not part of the analyzed sequence")]
    InconsistentUnitSet { unit_id: String },
}
