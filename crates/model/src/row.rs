use crate::value::Value;
use serde::{Deserialize, Serialize};

/// One named cell within a row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cell {
    pub column: String,
    pub value: Value,
}

/// A row fetched from a wide-column table.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Row { cells }
    }

    /// Build a row from `(column, value)` pairs.
    pub fn from_pairs<C, I>(pairs: I) -> Self
    where
        C: Into<String>,
        I: IntoIterator<Item = (C, Value)>,
    {
        Row {
            cells: pairs
                .into_iter()
                .map(|(column, value)| Cell {
                    column: column.into(),
                    value,
                })
                .collect(),
        }
    }

    pub fn cell(&self, column: &str) -> Option<&Cell> {
        self.cells
            .iter()
            .find(|c| c.column.eq_ignore_ascii_case(column))
    }

    /// The value under `column`, or `Null` when the row does not carry it.
    pub fn value(&self, column: &str) -> Value {
        self.cell(column)
            .map(|c| c.value.clone())
            .unwrap_or(Value::Null)
    }

    pub fn text(&self, column: &str) -> Option<&str> {
        self.cell(column).and_then(|c| c.value.as_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        let row = Row::from_pairs([("resourceId", Value::from("c:t1:abc"))]);
        assert_eq!(row.text("resourceid"), Some("c:t1:abc"));
        assert_eq!(row.text("resourceId"), Some("c:t1:abc"));
    }

    #[test]
    fn missing_column_is_null() {
        let row = Row::from_pairs([("email", Value::from("a@x.com"))]);
        assert_eq!(row.value("token"), Value::Null);
        assert_eq!(row.text("token"), None);
    }
}
