use connectors::error::ClientError;
use thiserror::Error;

/// Failure of a single table-copy stage. Every variant names the table so
/// the operator can see exactly which copy to re-run.
#[derive(Error, Debug)]
pub enum CopyError {
    #[error("source select failed for table '{table}': {source}")]
    SourceSelect {
        table: String,
        #[source]
        source: ClientError,
    },

    #[error("target insert failed for table '{table}': {source}")]
    TargetInsert {
        table: String,
        #[source]
        source: ClientError,
    },

    #[error("target re-select failed for table '{table}': {source}")]
    TargetSelect {
        table: String,
        #[source]
        source: ClientError,
    },
}

/// Failure that aborts the remaining stages of one chain. Never fatal to
/// the process: other chains queued alongside keep running.
#[derive(Error, Debug)]
pub enum ChainError {
    #[error(
        "chain '{chain}' is mis-ordered: stage '{table}' filters by key-set '{key_set}', \
         which no seed or earlier stage provides"
    )]
    UnresolvedDependency {
        chain: String,
        table: String,
        key_set: String,
    },

    #[error("chain '{chain}': key-set '{key_set}' is written by more than one stage")]
    DuplicateKeySet { chain: String, key_set: String },

    #[error("chain '{chain}': stage '{table}' references undeclared column '{column}'")]
    UnknownColumn {
        chain: String,
        table: String,
        column: String,
    },

    #[error("chain '{chain}' aborted at table '{table}': {source}")]
    Stage {
        chain: String,
        table: String,
        #[source]
        source: CopyError,
    },

    #[error("chain '{chain}' exceeded its deadline of {seconds}s")]
    DeadlineExceeded { chain: String, seconds: u64 },
}
