use serde::{Deserialize, Serialize};

/// Which side of the comparison a unit came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitSource {
    /// From the reference transcript / pronunciation dictionary
    Expected,
    /// Recovered from forced alignment of the actual audio
    Observed,
}

/// An atomic comparison token: a word or a phoneme with its time interval.
///
/// Immutable once created; the normalizer is the only constructor path used
/// by the engine, so labels are always lower-cased and trimmed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Unit {
    /// Normalized label text
    pub label: String,
    /// Start timestamp in seconds
    pub start: f64,
    /// End timestamp in seconds (half-open interval)
    pub end: f64,
    /// Where this unit came from
    pub source: UnitSource,
}

impl Unit {
    /// Duration of this unit in seconds
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// An ordered sequence of units, order = temporal order of occurrence.
///
/// Repeated labels are legal and distinguished by position only, which is why
/// unit ids are positional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitSequence {
    /// All units in temporal order
    pub units: Vec<Unit>,
}

impl UnitSequence {
    pub fn new(units: Vec<Unit>) -> Self {
        Self { units }
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Stable identifier for the unit at `index`
    pub fn unit_id(&self, index: usize) -> Option<String> {
        self.units
            .get(index)
            .map(|u| format!("word_{}_{}", index, u.label))
    }

    /// Identifiers for every unit, in temporal order
    pub fn unit_ids(&self) -> Vec<String> {
        self.units
            .iter()
            .enumerate()
            .map(|(i, u)| format!("word_{}_{}", i, u.label))
            .collect()
    }

    /// Labels only, in temporal order
    pub fn labels(&self) -> Vec<String> {
        self.units.iter().map(|u| u.label.clone()).collect()
    }

    /// Append another sequence, preserving order
    pub fn extend(&mut self, other: UnitSequence) {
        self.units.extend(other.units);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(label: &str, start: f64, end: f64) -> Unit {
        Unit {
            label: label.to_string(),
            start,
            end,
            source: UnitSource::Observed,
        }
    }

    #[test]
    fn test_unit_ids_are_positional() {
        let seq = UnitSequence::new(vec![
            unit("the", 0.0, 0.2),
            unit("cat", 0.2, 0.5),
            unit("the", 0.5, 0.7),
        ]);

        assert_eq!(
            seq.unit_ids(),
            vec!["word_0_the", "word_1_cat", "word_2_the"]
        );
        assert_eq!(seq.unit_id(1).as_deref(), Some("word_1_cat"));
        assert_eq!(seq.unit_id(3), None);
    }

    #[test]
    fn test_duration() {
        assert!((unit("cat", 0.2, 0.5).duration() - 0.3).abs() < 1e-9);
    }
}
