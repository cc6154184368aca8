use crate::error::CliError;
use connectors::memory::MemoryCluster;
use model::{row::Row, value::Value};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

/// Column name -> JSON scalar.
pub type FixtureRow = BTreeMap<String, serde_json::Value>;

/// Seed rows for both clusters, loaded from JSON.
#[derive(Debug, Default, Deserialize)]
pub struct Fixture {
    #[serde(default)]
    pub source: HashMap<String, Vec<FixtureRow>>,
    #[serde(default)]
    pub target: HashMap<String, Vec<FixtureRow>>,
}

pub async fn load(path: &str) -> Result<Fixture, CliError> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}

pub fn seed(cluster: &MemoryCluster, tables: &HashMap<String, Vec<FixtureRow>>) {
    for (table, rows) in tables {
        cluster.load(table, rows.iter().map(row_from_fixture).collect());
    }
}

fn row_from_fixture(fixture_row: &FixtureRow) -> Row {
    Row::from_pairs(
        fixture_row
            .iter()
            .map(|(column, value)| (column.clone(), to_value(value))),
    )
}

fn to_value(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::String(s) => Value::Text(s.clone()),
        serde_json::Value::Bool(b) => Value::Boolean(*b),
        serde_json::Value::Number(n) => n
            .as_i64()
            .map(Value::Int)
            .unwrap_or_else(|| Value::Text(n.to_string())),
        serde_json::Value::Null => Value::Null,
        other => Value::Text(other.to_string()),
    }
}
