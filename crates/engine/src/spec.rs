//! Declarative description of what one chain copies.

use crate::error::ChainError;
use model::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Restricts a stage's source select.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum StageFilter {
    /// Unconditional bounded select, for root tables.
    All,
    /// Equality on one column, e.g. a root table keyed by tenant alias.
    Eq { column: String, value: Value },
    /// `IN (...)` over a key-set discovered by a seed or an earlier stage.
    InKeySet { column: String, key_set: String },
}

impl StageFilter {
    pub fn eq(column: impl Into<String>, value: impl Into<Value>) -> Self {
        StageFilter::Eq {
            column: column.into(),
            value: value.into(),
        }
    }

    pub fn in_key_set(column: impl Into<String>, key_set: impl Into<String>) -> Self {
        StageFilter::InKeySet {
            column: column.into(),
            key_set: key_set.into(),
        }
    }

    fn column(&self) -> Option<&str> {
        match self {
            StageFilter::All => None,
            StageFilter::Eq { column, .. } | StageFilter::InKeySet { column, .. } => Some(column),
        }
    }
}

/// Plucks one column from every fetched source row into a named key-set.
///
/// Extraction runs over the source result, before any insert, so later
/// stages never wait on (or suffer from) this stage's write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExtractSpec {
    pub column: String,
    pub into: String,
}

/// One table's select/insert shape within a chain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSpec {
    pub table: String,
    pub filter: StageFilter,
    /// Column order is part of the contract: insert parameters bind in
    /// exactly this order. A mismatched order would silently corrupt the
    /// target, so the catalog tests pin it per table.
    pub columns: Vec<String>,
    pub extract: Option<ExtractSpec>,
}

impl TableSpec {
    pub fn new<C, I>(table: impl Into<String>, filter: StageFilter, columns: I) -> Self
    where
        C: Into<String>,
        I: IntoIterator<Item = C>,
    {
        TableSpec {
            table: table.into(),
            filter,
            columns: columns.into_iter().map(Into::into).collect(),
            extract: None,
        }
    }

    pub fn with_extract(mut self, column: impl Into<String>, into: impl Into<String>) -> Self {
        self.extract = Some(ExtractSpec {
            column: column.into(),
            into: into.into(),
        });
        self
    }

    fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c.eq_ignore_ascii_case(column))
    }
}

/// An ordered list of table-copy stages where later stages filter by
/// identifiers discovered in earlier ones.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Chain {
    pub name: String,
    /// Key-sets expected in the store before the chain starts, provided by
    /// the caller rather than by any stage of this chain.
    pub seeds: Vec<String>,
    pub stages: Vec<TableSpec>,
}

impl Chain {
    pub fn new<S, C, I, J>(name: impl Into<String>, seeds: I, stages: J) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
        C: Into<TableSpec>,
        J: IntoIterator<Item = C>,
    {
        Chain {
            name: name.into(),
            seeds: seeds.into_iter().map(Into::into).collect(),
            stages: stages.into_iter().map(Into::into).collect(),
        }
    }

    /// Check the dependency ordering invariant by construction: every
    /// `InKeySet` filter must name a seed or a key-set written by an
    /// earlier stage of this chain, and no key-set may have two writers.
    pub fn validate(&self) -> Result<(), ChainError> {
        let mut available: HashSet<&str> = self.seeds.iter().map(String::as_str).collect();

        for stage in &self.stages {
            if let Some(column) = stage.filter.column() {
                if !stage.has_column(column) {
                    return Err(ChainError::UnknownColumn {
                        chain: self.name.clone(),
                        table: stage.table.clone(),
                        column: column.to_string(),
                    });
                }
            }

            if let StageFilter::InKeySet { key_set, .. } = &stage.filter {
                if !available.contains(key_set.as_str()) {
                    return Err(ChainError::UnresolvedDependency {
                        chain: self.name.clone(),
                        table: stage.table.clone(),
                        key_set: key_set.clone(),
                    });
                }
            }

            if let Some(extract) = &stage.extract {
                if !stage.has_column(&extract.column) {
                    return Err(ChainError::UnknownColumn {
                        chain: self.name.clone(),
                        table: stage.table.clone(),
                        column: extract.column.clone(),
                    });
                }
                if !available.insert(extract.into.as_str()) {
                    return Err(ChainError::DuplicateKeySet {
                        chain: self.name.clone(),
                        key_set: extract.into.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(table: &str, filter: StageFilter) -> TableSpec {
        TableSpec::new(table, filter, ["id", "email", "token"])
    }

    #[test]
    fn filter_referencing_later_key_set_is_rejected() {
        let chain = Chain::new(
            "bad",
            Vec::<String>::new(),
            [
                stage("A", StageFilter::in_key_set("email", "emails")),
                stage("B", StageFilter::All).with_extract("email", "emails"),
            ],
        );

        let err = chain.validate().unwrap_err();
        assert!(matches!(
            err,
            ChainError::UnresolvedDependency { key_set, .. } if key_set == "emails"
        ));
    }

    #[test]
    fn seeded_key_set_satisfies_a_root_filter() {
        let chain = Chain::new(
            "good",
            ["ids"],
            [
                stage("A", StageFilter::in_key_set("id", "ids")).with_extract("email", "emails"),
                stage("B", StageFilter::in_key_set("email", "emails")),
            ],
        );
        chain.validate().unwrap();
    }

    #[test]
    fn two_writers_of_one_key_set_are_rejected() {
        let chain = Chain::new(
            "dup",
            Vec::<String>::new(),
            [
                stage("A", StageFilter::All).with_extract("email", "emails"),
                stage("B", StageFilter::All).with_extract("email", "emails"),
            ],
        );

        let err = chain.validate().unwrap_err();
        assert!(matches!(err, ChainError::DuplicateKeySet { key_set, .. } if key_set == "emails"));
    }

    #[test]
    fn filter_column_must_be_declared() {
        let chain = Chain::new(
            "cols",
            ["ids"],
            [stage("A", StageFilter::in_key_set("resourceId", "ids"))],
        );

        let err = chain.validate().unwrap_err();
        assert!(matches!(err, ChainError::UnknownColumn { column, .. } if column == "resourceId"));
    }
}
