use crate::error::ClientError;
use async_trait::async_trait;
use model::{row::Row, value::Value};
use serde::{Deserialize, Serialize};

/// Pass-through query options applied to every statement.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExecOptions {
    /// Row ceiling applied to every select. A safety cap, not pagination:
    /// results beyond it are silently truncated.
    pub fetch_size: u32,
    /// Ask the cluster to prepare statements before execution.
    pub prepare: bool,
}

impl Default for ExecOptions {
    fn default() -> Self {
        ExecOptions {
            fetch_size: 999_999,
            prepare: true,
        }
    }
}

/// One statement with positional binds, as submitted to `batch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub query: String,
    pub params: Vec<Value>,
}

impl Statement {
    pub fn new(query: impl Into<String>, params: Vec<Value>) -> Self {
        Statement {
            query: query.into(),
            params,
        }
    }
}

/// Rows returned by a select.
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    pub rows: Vec<Row>,
}

/// The capability the copier needs from a cluster connection: positional
/// statement execution and batched writes. Nothing else about the store's
/// API is assumed.
#[async_trait]
pub trait ClusterClient: Send + Sync {
    async fn execute(
        &self,
        query: &str,
        params: &[Value],
        options: &ExecOptions,
    ) -> Result<QueryResult, ClientError>;

    /// Apply a batch of write statements. All-or-nothing: implementations
    /// must not report success when any statement in the batch failed.
    async fn batch(&self, statements: &[Statement], options: &ExecOptions)
    -> Result<(), ClientError>;
}
