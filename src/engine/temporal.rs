use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{FeatureTrajectory, FeatureVector, TemporalAnalysis, Trend, UnitSequence};

/// The openSMILE eGeMAPS functionals tracked by default
pub const DEFAULT_TRACKED_ATTRIBUTES: [&str; 5] = [
    "F0semitoneFrom27.5Hz_sma3nz_amean",
    "loudness_sma3_amean",
    "mfcc1_sma3_amean",
    "jitterLocal_sma3nz_amean",
    "shimmerLocaldB_sma3nz_amean",
];

/// Configuration for temporal aggregation
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Attribute names to build trajectories for
    pub tracked_attributes: Vec<String>,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            tracked_attributes: DEFAULT_TRACKED_ATTRIBUTES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Build per-attribute trajectories from per-segment feature vectors.
///
/// `segments` must be in temporal order; the unit id of each pair keys the
/// per-unit feature map and the trajectory positions. Attributes with no
/// non-missing value anywhere are omitted rather than reported as empty
/// trajectories, so zero-valued trend claims cannot arise. The speaking rate
/// comes from the global word sequence, not the feature segments.
pub fn aggregate(
    segments: &[(String, FeatureVector)],
    words: &UnitSequence,
    config: &AggregatorConfig,
) -> TemporalAnalysis {
    let word_sequence: Vec<String> = segments.iter().map(|(id, _)| id.clone()).collect();
    let temporal_features: BTreeMap<String, FeatureVector> = segments.iter().cloned().collect();

    let mut feature_trajectories = BTreeMap::new();
    for attribute in &config.tracked_attributes {
        if let Some(trajectory) = build_trajectory(segments, attribute) {
            feature_trajectories.insert(attribute.clone(), trajectory);
        } else {
            debug!(%attribute, "no non-missing values, trajectory omitted");
        }
    }

    TemporalAnalysis {
        word_sequence,
        temporal_features,
        feature_trajectories,
        speaking_rate: speaking_rate(words),
    }
}

/// Trajectory for one attribute, or None when every value is missing
fn build_trajectory(
    segments: &[(String, FeatureVector)],
    attribute: &str,
) -> Option<FeatureTrajectory> {
    let mut values = Vec::new();
    let mut word_positions = Vec::new();

    for (unit_id, vector) in segments {
        if let Some(value) = vector.get(attribute).and_then(|v| v.as_number()) {
            values.push(value);
            word_positions.push(unit_id.clone());
        }
    }

    if values.is_empty() {
        return None;
    }

    let first = values[0];
    let last = values[values.len() - 1];
    // Strict comparison: a tie labels decreasing (documented policy)
    let trend = if last > first {
        Trend::Increasing
    } else {
        Trend::Decreasing
    };

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    Some(FeatureTrajectory {
        trend,
        variability: sample_std_dev(&values),
        range: max - min,
        values,
        word_positions,
    })
}

/// Sample standard deviation (ddof = 1); 0.0 below two samples
fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values
        .iter()
        .map(|v| (v - mean).powi(2))
        .sum::<f64>()
        / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Words per second across the whole utterance.
///
/// Derived from the first word's start and the last word's end; a
/// non-positive duration yields 0.0 as a defined floor, not an error.
pub fn speaking_rate(words: &UnitSequence) -> f64 {
    let (Some(first), Some(last)) = (words.units.first(), words.units.last()) else {
        return 0.0;
    };
    let duration = last.end - first.start;
    if duration > 0.0 {
        words.len() as f64 / duration
    } else {
        0.0
    }
}

/// Short human-readable lines describing each trajectory, for the summary
pub fn render_trajectory_summary(analysis: &TemporalAnalysis) -> String {
    let mut out = String::new();
    for (attribute, trajectory) in &analysis.feature_trajectories {
        let trend = match trajectory.trend {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
        };
        out.push_str(&format!(
            "{}: trend {}, variability {:.4}, range {:.4}\n",
            attribute, trend, trajectory.variability, trajectory.range
        ));
    }
    out.push_str(&format!(
        "Speaking rate: {:.2} words/sec\n",
        analysis.speaking_rate
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FeatureValue, Unit, UnitSource};

    fn vector(entries: &[(&str, FeatureValue)]) -> FeatureVector {
        FeatureVector {
            values: entries
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        }
    }

    fn words(spans: &[(f64, f64)]) -> UnitSequence {
        UnitSequence::new(
            spans
                .iter()
                .enumerate()
                .map(|(i, (start, end))| Unit {
                    label: format!("w{i}"),
                    start: *start,
                    end: *end,
                    source: UnitSource::Expected,
                })
                .collect(),
        )
    }

    fn tracking(attributes: &[&str]) -> AggregatorConfig {
        AggregatorConfig {
            tracked_attributes: attributes.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_pitch_trajectory_decreasing() {
        let segments = vec![
            ("word_0_a".to_string(), vector(&[("pitch", FeatureValue::Number(100.0))])),
            ("word_1_b".to_string(), vector(&[("pitch", FeatureValue::Number(110.0))])),
            ("word_2_c".to_string(), vector(&[("pitch", FeatureValue::Number(95.0))])),
        ];

        let analysis = aggregate(&segments, &words(&[(0.0, 1.0)]), &tracking(&["pitch"]));
        let trajectory = &analysis.feature_trajectories["pitch"];

        assert_eq!(trajectory.trend, Trend::Decreasing);
        assert!((trajectory.range - 15.0).abs() < 1e-9);
        assert_eq!(trajectory.values, vec![100.0, 110.0, 95.0]);
        assert_eq!(
            trajectory.word_positions,
            vec!["word_0_a", "word_1_b", "word_2_c"]
        );
    }

    #[test]
    fn test_trend_tie_is_decreasing() {
        let segments = vec![
            ("word_0_a".to_string(), vector(&[("pitch", FeatureValue::Number(100.0))])),
            ("word_1_b".to_string(), vector(&[("pitch", FeatureValue::Number(100.0))])),
        ];

        let analysis = aggregate(&segments, &words(&[(0.0, 1.0)]), &tracking(&["pitch"]));
        assert_eq!(
            analysis.feature_trajectories["pitch"].trend,
            Trend::Decreasing
        );
    }

    #[test]
    fn test_all_missing_attribute_is_omitted() {
        let segments = vec![
            ("word_0_a".to_string(), vector(&[("pitch", FeatureValue::Missing)])),
            ("word_1_b".to_string(), vector(&[("pitch", FeatureValue::Missing)])),
        ];

        let analysis = aggregate(&segments, &words(&[(0.0, 1.0)]), &tracking(&["pitch"]));
        assert!(analysis.feature_trajectories.is_empty());
        // The per-unit vectors keep the sentinel, only the trajectory is gone
        assert_eq!(analysis.temporal_features.len(), 2);
    }

    #[test]
    fn test_missing_values_are_skipped_not_zeroed() {
        let segments = vec![
            ("word_0_a".to_string(), vector(&[("pitch", FeatureValue::Number(90.0))])),
            ("word_1_b".to_string(), vector(&[("pitch", FeatureValue::Missing)])),
            ("word_2_c".to_string(), vector(&[("pitch", FeatureValue::Number(95.0))])),
        ];

        let analysis = aggregate(&segments, &words(&[(0.0, 1.0)]), &tracking(&["pitch"]));
        let trajectory = &analysis.feature_trajectories["pitch"];

        assert_eq!(trajectory.values, vec![90.0, 95.0]);
        assert_eq!(trajectory.word_positions, vec!["word_0_a", "word_2_c"]);
        assert_eq!(trajectory.trend, Trend::Increasing);
    }

    #[test]
    fn test_variability_zero_for_constant_values() {
        let segments = vec![
            ("word_0_a".to_string(), vector(&[("pitch", FeatureValue::Number(50.0))])),
            ("word_1_b".to_string(), vector(&[("pitch", FeatureValue::Number(50.0))])),
            ("word_2_c".to_string(), vector(&[("pitch", FeatureValue::Number(50.0))])),
        ];

        let analysis = aggregate(&segments, &words(&[(0.0, 1.0)]), &tracking(&["pitch"]));
        assert_eq!(analysis.feature_trajectories["pitch"].variability, 0.0);
    }

    #[test]
    fn test_sample_std_dev() {
        // Sample (ddof=1) standard deviation of [2, 4, 4, 4, 5, 5, 7, 9]
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((sample_std_dev(&values) - 2.138089935).abs() < 1e-6);
        assert_eq!(sample_std_dev(&[42.0]), 0.0);
    }

    #[test]
    fn test_speaking_rate() {
        assert!((speaking_rate(&words(&[(0.0, 1.0), (1.0, 2.0)])) - 1.0).abs() < 1e-9);
        assert_eq!(speaking_rate(&words(&[])), 0.0);
        // Degenerate duration: last end equals first start
        assert_eq!(speaking_rate(&words(&[(1.0, 1.0)])), 0.0);
    }

    #[test]
    fn test_word_sequence_preserves_segment_order() {
        let segments = vec![
            ("word_0_b".to_string(), FeatureVector::default()),
            ("word_1_a".to_string(), FeatureVector::default()),
        ];

        let analysis = aggregate(&segments, &words(&[(0.0, 1.0)]), &tracking(&[]));
        assert_eq!(analysis.word_sequence, vec!["word_0_b", "word_1_a"]);
    }
}
