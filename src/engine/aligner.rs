use crate::models::{EditOp, EditScript};

/// Result of aligning a hypothesis sequence against a reference sequence
#[derive(Debug, Clone)]
pub struct Alignment {
    /// Minimum number of substitutions, deletions, and insertions
    pub distance: usize,
    /// One minimum-cost edit script, deterministic under the tie-break
    /// match > substitute > delete > insert
    pub script: EditScript,
}

/// Classic dynamic-programming edit distance over label equality, unit costs,
/// with backtracking to recover the edit script.
///
/// Empty sequences are valid: the distance is the length of the other
/// sequence and the script is all inserts or all deletes. O(n*m) time and
/// space; utterances are tens to low hundreds of units, so the full table is
/// kept for the backtrack.
pub fn align(reference: &[String], hypothesis: &[String]) -> Alignment {
    let n = reference.len();
    let m = hypothesis.len();

    let mut table = vec![vec![0usize; m + 1]; n + 1];
    for (i, row) in table.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=m {
        table[0][j] = j;
    }

    for i in 1..=n {
        for j in 1..=m {
            let cost = if reference[i - 1] == hypothesis[j - 1] {
                0
            } else {
                1
            };
            table[i][j] = (table[i - 1][j] + 1)
                .min(table[i][j - 1] + 1)
                .min(table[i - 1][j - 1] + cost);
        }
    }

    let script = backtrack(&table, reference, hypothesis);

    Alignment {
        distance: table[n][m],
        script,
    }
}

/// Walk the table from the final cell back to the origin, preferring
/// match, then substitute, then delete, then insert whenever paths tie.
fn backtrack(table: &[Vec<usize>], reference: &[String], hypothesis: &[String]) -> EditScript {
    let mut ops = Vec::new();
    let mut i = reference.len();
    let mut j = hypothesis.len();

    while i > 0 || j > 0 {
        if i > 0 && j > 0 && reference[i - 1] == hypothesis[j - 1] && table[i][j] == table[i - 1][j - 1]
        {
            ops.push(EditOp::Match {
                ref_index: i - 1,
                hyp_index: j - 1,
                label: reference[i - 1].clone(),
            });
            i -= 1;
            j -= 1;
        } else if i > 0 && j > 0 && table[i][j] == table[i - 1][j - 1] + 1 {
            ops.push(EditOp::Substitute {
                ref_index: i - 1,
                hyp_index: j - 1,
                expected: reference[i - 1].clone(),
                observed: hypothesis[j - 1].clone(),
            });
            i -= 1;
            j -= 1;
        } else if i > 0 && table[i][j] == table[i - 1][j] + 1 {
            ops.push(EditOp::Delete {
                ref_index: i - 1,
                label: reference[i - 1].clone(),
            });
            i -= 1;
        } else {
            ops.push(EditOp::Insert {
                hyp_index: j - 1,
                label: hypothesis[j - 1].clone(),
            });
            j -= 1;
        }
    }

    ops.reverse();
    ops
}
