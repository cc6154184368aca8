use serde::{Deserialize, Serialize};

/// Outcome of the row-count comparison for one table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Match,
    Mismatch,
}

/// Compare source and target row counts. Equality is the only success
/// criterion; a mismatch is a signal for manual follow-up, never a retry
/// trigger.
pub fn verify(source_rows: usize, target_rows: usize) -> Verdict {
    if source_rows == target_rows {
        Verdict::Match
    } else {
        Verdict::Mismatch
    }
}
