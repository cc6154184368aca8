use crate::verify::Verdict;
use serde::{Deserialize, Serialize};

/// Row counts observed for one copied table. Logged and surfaced in the
/// run summary; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyResult {
    pub table: String,
    pub source_rows: usize,
    pub target_rows: usize,
    pub verdict: Verdict,
}

/// What happened to one stage of a chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StageOutcome {
    Copied(CopyResult),
    /// The stage's filter key-set was empty: no select, no insert, no
    /// verification. Reported distinctly from a genuine zero-row copy.
    Skipped { table: String, key_set: String },
}

impl StageOutcome {
    pub fn table(&self) -> &str {
        match self {
            StageOutcome::Copied(result) => &result.table,
            StageOutcome::Skipped { table, .. } => table,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, StageOutcome::Skipped { .. })
    }
}

/// Per-chain roll-up handed back to the driver layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainSummary {
    pub chain: String,
    pub run_id: String,
    pub outcomes: Vec<StageOutcome>,
}

impl ChainSummary {
    pub fn mismatches(&self) -> Vec<&CopyResult> {
        self.outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                StageOutcome::Copied(result) if result.verdict == Verdict::Mismatch => Some(result),
                _ => None,
            })
            .collect()
    }

    pub fn has_mismatch(&self) -> bool {
        !self.mismatches().is_empty()
    }
}
