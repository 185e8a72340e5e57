use std::collections::HashSet;

use crate::engine::classifier::render_report;
use crate::engine::temporal::render_trajectory_summary;
use crate::error::AnalysisError;
use crate::models::{AnalysisReport, MispronunciationVerdict, TemporalAnalysis};

/// Merge classifier verdicts and temporal analysis into the final payload.
///
/// Pure composition: no new computation beyond rendering the summary text.
/// `unit_ids` is the canonical ordered id list of the underlying word
/// sequence; any id referenced by either input that is not drawn from it
/// fails the assembly with `InconsistentUnitSet`.
pub fn assemble(
    verdicts: Vec<MispronunciationVerdict>,
    temporal: TemporalAnalysis,
    unit_ids: &[String],
    flag_threshold: usize,
) -> Result<AnalysisReport, AnalysisError> {
    let known: HashSet<&str> = unit_ids.iter().map(String::as_str).collect();

    for verdict in &verdicts {
        if !known.contains(verdict.unit_id.as_str()) {
            return Err(AnalysisError::InconsistentUnitSet {
                unit_id: verdict.unit_id.clone(),
            });
        }
    }
    for unit_id in &temporal.word_sequence {
        if !known.contains(unit_id.as_str()) {
            return Err(AnalysisError::InconsistentUnitSet {
                unit_id: unit_id.clone(),
            });
        }
    }

    let mut summary = render_report(&verdicts, flag_threshold);
    summary.push('\n');
    summary.push_str(&render_trajectory_summary(&temporal));

    Ok(AnalysisReport {
        mispronunciations: verdicts,
        temporal_features: temporal,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FeatureVector;

    fn verdict(unit_id: &str, word: &str, flagged: bool) -> MispronunciationVerdict {
        MispronunciationVerdict {
            unit_id: unit_id.to_string(),
            word: word.to_string(),
            start: 0.0,
            end: 0.5,
            expected_units: vec!["k".to_string()],
            observed_units: vec![],
            edit_distance: 1,
            is_flagged: flagged,
            edit_script: vec![],
        }
    }

    fn temporal(ids: &[&str]) -> TemporalAnalysis {
        TemporalAnalysis {
            word_sequence: ids.iter().map(|s| s.to_string()).collect(),
            temporal_features: ids
                .iter()
                .map(|s| (s.to_string(), FeatureVector::default()))
                .collect(),
            feature_trajectories: Default::default(),
            speaking_rate: 1.5,
        }
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_assemble_consistent_inputs() {
        let unit_ids = ids(&["word_0_cat", "word_1_dog"]);
        let report = assemble(
            vec![verdict("word_0_cat", "cat", true)],
            temporal(&["word_0_cat", "word_1_dog"]),
            &unit_ids,
            3,
        )
        .unwrap();

        assert_eq!(report.mispronunciations.len(), 1);
        assert_eq!(report.flagged_count(), 1);
        assert!(report.summary.contains("Word: 'cat'"));
        assert!(report.summary.contains("Speaking rate: 1.50"));
    }

    #[test]
    fn test_foreign_verdict_id_is_rejected() {
        let unit_ids = ids(&["word_0_cat"]);
        let err = assemble(
            vec![verdict("word_9_dog", "dog", false)],
            temporal(&["word_0_cat"]),
            &unit_ids,
            3,
        )
        .unwrap_err();

        match err {
            AnalysisError::InconsistentUnitSet { unit_id } => {
                assert_eq!(unit_id, "word_9_dog");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_foreign_temporal_id_is_rejected() {
        let unit_ids = ids(&["word_0_cat"]);
        let err = assemble(vec![], temporal(&["word_5_bird"]), &unit_ids, 3).unwrap_err();

        assert!(matches!(
            err,
            AnalysisError::InconsistentUnitSet { unit_id } if unit_id == "word_5_bird"
        ));
    }

    #[test]
    fn test_no_flagged_words_is_valid() {
        let unit_ids = ids(&["word_0_cat"]);
        let report = assemble(
            vec![verdict("word_0_cat", "cat", false)],
            temporal(&["word_0_cat"]),
            &unit_ids,
            3,
        )
        .unwrap();

        assert_eq!(report.flagged_count(), 0);
        assert!(report.summary.contains("No mispronunciations detected."));
    }
}
