use serde::{Deserialize, Serialize};

use super::{EditScript, TemporalAnalysis};

/// Per-word result of comparing the dictionary pronunciation against the
/// phones recovered from forced alignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MispronunciationVerdict {
    /// Positional id of the word in the analyzed sequence
    pub unit_id: String,
    /// The word as spoken (normalized)
    pub word: String,
    /// Start of the word's span in the source audio, seconds
    pub start: f64,
    /// End of the word's span in the source audio, seconds
    pub end: f64,
    /// Dictionary phonemes (first pronunciation variant)
    pub expected_units: Vec<String>,
    /// Aligned phones strictly contained in the word's span
    pub observed_units: Vec<String>,
    /// Levenshtein distance between expected and observed
    pub edit_distance: usize,
    /// Whether the flagging policy fired for this word
    pub is_flagged: bool,
    /// Operations explaining the divergence
    pub edit_script: EditScript,
}

/// The merged payload handed to the downstream text-generation collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// All verdicts in word order (flagged and unflagged)
    pub mispronunciations: Vec<MispronunciationVerdict>,
    /// Trajectories and speaking rate for the same unit sequence
    pub temporal_features: TemporalAnalysis,
    /// Plain-text summary for human readers and prompt construction
    pub summary: String,
}

impl AnalysisReport {
    /// Verdicts the flagging policy fired for
    pub fn flagged(&self) -> impl Iterator<Item = &MispronunciationVerdict> {
        self.mispronunciations.iter().filter(|v| v.is_flagged)
    }

    pub fn flagged_count(&self) -> usize {
        self.flagged().count()
    }
}
