//! In-memory wide-column store.
//!
//! Backs the engine's tests and the CLI's fixture-driven runs. It interprets
//! only the statement shapes the copier emits:
//!
//! - `SELECT * FROM "t" [WHERE "c" = ? | WHERE "c" IN ?] LIMIT n`
//! - `INSERT INTO "t" ("a", "b", ...) VALUES (?, ?, ...)`
//!
//! Anything else is rejected as a query error.

use crate::{
    client::{ClusterClient, ExecOptions, QueryResult, Statement},
    error::ClientError,
};
use async_trait::async_trait;
use model::{row::Row, value::Value};
use std::{collections::HashMap, sync::RwLock};
use tracing::debug;

#[derive(Debug, Default)]
pub struct MemoryCluster {
    tables: RwLock<HashMap<String, Vec<Row>>>,
}

impl MemoryCluster {
    pub fn new() -> Self {
        MemoryCluster::default()
    }

    /// Seed a table with rows, appending to whatever is already there.
    pub fn load(&self, table: &str, rows: Vec<Row>) {
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        tables.entry(table.to_string()).or_default().extend(rows);
    }

    pub fn rows(&self, table: &str) -> Vec<Row> {
        let tables = self.tables.read().unwrap_or_else(|e| e.into_inner());
        tables.get(table).cloned().unwrap_or_default()
    }

    pub fn row_count(&self, table: &str) -> usize {
        let tables = self.tables.read().unwrap_or_else(|e| e.into_inner());
        tables.get(table).map(Vec::len).unwrap_or(0)
    }

    fn select(&self, query: &str, params: &[Value]) -> Result<Vec<Row>, ClientError> {
        let shape = parse_select(query)?;
        let tables = self.tables.read().unwrap_or_else(|e| e.into_inner());
        let mut rows: Vec<Row> = tables
            .get(&shape.table)
            .map(|rows| {
                rows.iter()
                    .filter(|row| shape.predicate.matches(row, params))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        if let Some(limit) = shape.limit {
            rows.truncate(limit);
        }
        Ok(rows)
    }

    fn stage_insert(&self, statement: &Statement) -> Result<(String, Row), ClientError> {
        let (table, columns) = parse_insert(&statement.query)?;
        if columns.len() != statement.params.len() {
            return Err(ClientError::query(
                &statement.query,
                format!(
                    "{} columns declared but {} values bound",
                    columns.len(),
                    statement.params.len()
                ),
            ));
        }
        let row = Row::from_pairs(columns.into_iter().zip(statement.params.iter().cloned()));
        Ok((table, row))
    }
}

#[async_trait]
impl ClusterClient for MemoryCluster {
    async fn execute(
        &self,
        query: &str,
        params: &[Value],
        _options: &ExecOptions,
    ) -> Result<QueryResult, ClientError> {
        let trimmed = query.trim();
        if trimmed.len() >= 6 && trimmed[..6].eq_ignore_ascii_case("SELECT") {
            let rows = self.select(trimmed, params)?;
            debug!(rows = rows.len(), "memory select");
            return Ok(QueryResult { rows });
        }
        if trimmed.len() >= 6 && trimmed[..6].eq_ignore_ascii_case("INSERT") {
            let statement = Statement::new(trimmed, params.to_vec());
            let (table, row) = self.stage_insert(&statement)?;
            let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
            tables.entry(table).or_default().push(row);
            return Ok(QueryResult::default());
        }
        Err(ClientError::query(query, "unsupported statement"))
    }

    async fn batch(
        &self,
        statements: &[Statement],
        _options: &ExecOptions,
    ) -> Result<(), ClientError> {
        // Stage every insert before applying any, so a malformed statement
        // rejects the whole batch instead of leaving part of it behind.
        let staged = statements
            .iter()
            .map(|s| self.stage_insert(s))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(statements = staged.len(), "memory batch");
        let mut tables = self.tables.write().unwrap_or_else(|e| e.into_inner());
        for (table, row) in staged {
            tables.entry(table).or_default().push(row);
        }
        Ok(())
    }
}

enum Predicate {
    All,
    Eq { column: String },
    In { column: String },
}

impl Predicate {
    fn matches(&self, row: &Row, params: &[Value]) -> bool {
        match self {
            Predicate::All => true,
            Predicate::Eq { column } => params
                .first()
                .map(|expected| &row.value(column) == expected)
                .unwrap_or(false),
            Predicate::In { column } => match params.first() {
                Some(Value::TextList(keys)) => row
                    .text(column)
                    .map(|v| keys.iter().any(|k| k == v))
                    .unwrap_or(false),
                _ => false,
            },
        }
    }
}

struct SelectShape {
    table: String,
    predicate: Predicate,
    limit: Option<usize>,
}

fn unquote(ident: &str) -> String {
    ident.trim_matches('"').to_string()
}

fn parse_select(query: &str) -> Result<SelectShape, ClientError> {
    let tokens: Vec<&str> = query.split_whitespace().collect();
    let (table, rest) = match tokens.as_slice() {
        ["SELECT", "*", "FROM", table, rest @ ..] => (unquote(table), rest),
        _ => return Err(ClientError::query(query, "unsupported select shape")),
    };

    let (predicate, rest) = match rest {
        ["WHERE", column, "=", "?", rest @ ..] => (
            Predicate::Eq {
                column: unquote(column),
            },
            rest,
        ),
        ["WHERE", column, "IN", "?", rest @ ..] => (
            Predicate::In {
                column: unquote(column),
            },
            rest,
        ),
        rest => (Predicate::All, rest),
    };

    let limit = match rest {
        [] => None,
        ["LIMIT", n] => Some(n.parse::<usize>().map_err(|_| {
            ClientError::query(query, format!("invalid LIMIT operand '{n}'"))
        })?),
        _ => return Err(ClientError::query(query, "unsupported select shape")),
    };

    Ok(SelectShape {
        table,
        predicate,
        limit,
    })
}

fn parse_insert(query: &str) -> Result<(String, Vec<String>), ClientError> {
    let rest = query
        .trim()
        .strip_prefix("INSERT INTO ")
        .ok_or_else(|| ClientError::query(query, "unsupported insert shape"))?;
    let open = rest
        .find('(')
        .ok_or_else(|| ClientError::query(query, "missing column list"))?;
    let close = rest
        .find(')')
        .ok_or_else(|| ClientError::query(query, "missing column list"))?;
    if close < open {
        return Err(ClientError::query(query, "missing column list"));
    }
    let table = unquote(rest[..open].trim());
    let columns = rest[open + 1..close]
        .split(',')
        .map(|c| unquote(c.trim()))
        .filter(|c| !c.is_empty())
        .collect::<Vec<_>>();
    if columns.is_empty() {
        return Err(ClientError::query(query, "empty column list"));
    }
    Ok((table, columns))
}
