use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single acoustic attribute value.
///
/// An attribute present in the schema but unparseable as a number is kept as
/// an explicit `Missing` sentinel rather than dropped, so its absence stays
/// visible to aggregate statistics. Serializes as a JSON number or null.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Number(f64),
    Missing,
}

impl FeatureValue {
    /// Parse a raw string field; anything non-numeric becomes `Missing`
    pub fn from_raw(raw: &str) -> Self {
        match raw.trim().parse::<f64>() {
            Ok(v) => FeatureValue::Number(v),
            Err(_) => FeatureValue::Missing,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FeatureValue::Number(v) => Some(*v),
            FeatureValue::Missing => None,
        }
    }
}

/// Mapping from attribute name to value for one audio segment.
///
/// Ordered map so serialized output is deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector {
    pub values: BTreeMap<String, FeatureValue>,
}

impl FeatureVector {
    /// Build from raw string fields, excluding categorical attributes
    pub fn from_raw_fields<'a, I>(fields: I, excluded: &[&str]) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let values = fields
            .into_iter()
            .filter(|(name, _)| !excluded.contains(name))
            .map(|(name, raw)| (name.to_string(), FeatureValue::from_raw(raw)))
            .collect();
        Self { values }
    }

    pub fn get(&self, attribute: &str) -> Option<FeatureValue> {
        self.values.get(attribute).copied()
    }
}

/// Direction of an attribute's change across the utterance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Increasing,
    /// Also the tie result: `last == first` labels decreasing, preserved as
    /// documented policy from the source pipeline's strict comparison
    Decreasing,
}

/// Time-ordered series of one attribute's non-missing values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureTrajectory {
    /// Non-missing values in temporal order
    pub values: Vec<f64>,
    /// Unit ids the values belong to, same order
    pub word_positions: Vec<String>,
    /// Last value compared to first value
    pub trend: Trend,
    /// Sample standard deviation of the values (0.0 below two samples)
    pub variability: f64,
    /// max - min of the values
    pub range: f64,
}

/// Aggregate temporal result for one utterance
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemporalAnalysis {
    /// Unit ids in temporal order
    pub word_sequence: Vec<String>,
    /// Per-unit feature vectors, keyed by unit id
    pub temporal_features: BTreeMap<String, FeatureVector>,
    /// One trajectory per tracked attribute with at least one value
    pub feature_trajectories: BTreeMap<String, FeatureTrajectory>,
    /// Words per second over the whole utterance
    pub speaking_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_parses_numbers_and_sentinels() {
        let v = FeatureValue::from_raw(" 12.5 ");
        assert_eq!(v, FeatureValue::Number(12.5));
        assert_eq!(FeatureValue::from_raw("unknown"), FeatureValue::Missing);
        assert_eq!(FeatureValue::from_raw(""), FeatureValue::Missing);
    }

    #[test]
    fn test_from_raw_fields_excludes_categoricals() {
        let vector = FeatureVector::from_raw_fields(
            vec![
                ("name", "'chunk_0'"),
                ("loudness_sma3_amean", "0.42"),
                ("class", "?"),
            ],
            &["name", "class"],
        );

        assert_eq!(vector.values.len(), 1);
        assert_eq!(
            vector.get("loudness_sma3_amean"),
            Some(FeatureValue::Number(0.42))
        );
        assert_eq!(vector.get("name"), None);
    }

    #[test]
    fn test_missing_serializes_as_null() {
        let mut vector = FeatureVector::default();
        vector
            .values
            .insert("jitterLocal_sma3nz_amean".to_string(), FeatureValue::Missing);
        let json = serde_json::to_string(&vector).unwrap();
        assert_eq!(json, r#"{"jitterLocal_sma3nz_amean":null}"#);
    }
}
