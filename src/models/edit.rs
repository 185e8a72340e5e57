use serde::{Deserialize, Serialize};

/// A single step of an edit script transforming reference into hypothesis
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    /// Labels are equal at these positions
    Match {
        ref_index: usize,
        hyp_index: usize,
        label: String,
    },
    /// Reference label replaced by a different hypothesis label
    Substitute {
        ref_index: usize,
        hyp_index: usize,
        expected: String,
        observed: String,
    },
    /// Reference label absent from the hypothesis
    Delete { ref_index: usize, label: String },
    /// Hypothesis label absent from the reference
    Insert { hyp_index: usize, label: String },
}

impl EditOp {
    /// Cost of this operation under the unit-cost model
    pub fn cost(&self) -> usize {
        match self {
            EditOp::Match { .. } => 0,
            _ => 1,
        }
    }
}

/// Ordered list of edit operations.
///
/// Invariant: replaying the script against the reference sequence
/// reconstructs the hypothesis sequence exactly (see `replay`).
pub type EditScript = Vec<EditOp>;

/// Replay an edit script over a reference sequence, producing the hypothesis
/// it encodes.
pub fn replay(script: &EditScript, reference: &[String]) -> Vec<String> {
    let mut hypothesis = Vec::new();
    for op in script {
        match op {
            EditOp::Match { ref_index, .. } => {
                hypothesis.push(reference[*ref_index].clone());
            }
            EditOp::Substitute { observed, .. } => {
                hypothesis.push(observed.clone());
            }
            EditOp::Delete { .. } => {}
            EditOp::Insert { label, .. } => {
                hypothesis.push(label.clone());
            }
        }
    }
    hypothesis
}
