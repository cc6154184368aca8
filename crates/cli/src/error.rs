use engine::error::ChainError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("the principals chain needs a tenant_alias in the run config")]
    MissingTenantAlias,

    #[error("invalid chain: {0}")]
    Chain(#[from] ChainError),

    #[error("failed to serialize the report: {0}")]
    ReportSerialize(serde_json::Error),

    #[error("{0} chain(s) aborted; see the log for the failing table")]
    ChainsAborted(usize),
}
