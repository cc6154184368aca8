use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    /// The cluster could not be reached at all.
    #[error("cluster unreachable: {0}")]
    Connectivity(String),

    /// The cluster rejected a statement (malformed query, unknown table,
    /// bind mismatch).
    #[error("query failed: {message} (statement: {query})")]
    Query { query: String, message: String },
}

impl ClientError {
    pub fn query(query: impl Into<String>, message: impl Into<String>) -> Self {
        ClientError::Query {
            query: query.into(),
            message: message.into(),
        }
    }
}
