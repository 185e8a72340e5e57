use crate::error::AnalysisError;
use crate::models::{Unit, UnitSequence, UnitSource};

/// A raw (label, start, end) triple as delivered by a collaborator, before
/// any canonicalization
#[derive(Debug, Clone)]
pub struct RawSegment {
    pub label: String,
    pub start: f64,
    pub end: f64,
}

impl RawSegment {
    pub fn new(label: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            label: label.into(),
            start,
            end,
        }
    }
}

/// Canonicalize a raw segment list into a `UnitSequence`.
///
/// Labels are lower-cased and trimmed; entries whose normalized label is
/// empty are dropped (silence and pause markers carry no comparison value).
/// A retained entry with `end < start` indicates corrupt upstream data and
/// fails the whole call. Zero-duration entries are retained.
pub fn normalize_segments(
    segments: &[RawSegment],
    source: UnitSource,
) -> Result<UnitSequence, AnalysisError> {
    let mut units = Vec::with_capacity(segments.len());

    for segment in segments {
        let label = segment.label.trim().to_lowercase();
        if label.is_empty() {
            continue;
        }
        if segment.end < segment.start {
            return Err(AnalysisError::InvalidSegment {
                label,
                start: segment.start,
                end: segment.end,
            });
        }
        units.push(Unit {
            label,
            start: segment.start,
            end: segment.end,
            source,
        });
    }

    Ok(UnitSequence::new(units))
}
