//! Renders the two statement shapes the copier issues.

use crate::spec::{StageFilter, TableSpec};
use connectors::client::{ExecOptions, Statement};
use model::{row::Row, value::Value};

fn quote(ident: &str) -> String {
    format!("\"{ident}\"")
}

/// Bounded select for a stage. A key-set filter binds as one list
/// parameter; the LIMIT is a safety ceiling, so a result exactly at the cap
/// is treated as complete and anything beyond it is silently truncated.
pub fn select_statement(spec: &TableSpec, keys: &[String], options: &ExecOptions) -> Statement {
    let mut query = format!("SELECT * FROM {}", quote(&spec.table));
    let mut params = Vec::new();

    match &spec.filter {
        StageFilter::All => {}
        StageFilter::Eq { column, value } => {
            query.push_str(&format!(" WHERE {} = ?", quote(column)));
            params.push(value.clone());
        }
        StageFilter::InKeySet { column, .. } => {
            query.push_str(&format!(" WHERE {} IN ?", quote(column)));
            params.push(Value::TextList(keys.to_vec()));
        }
    }

    query.push_str(&format!(" LIMIT {}", options.fetch_size));
    Statement::new(query, params)
}

/// One insert per source row, parameters bound in the spec's declared
/// column order. A cell the source row does not carry binds as null.
pub fn insert_statements(spec: &TableSpec, rows: &[Row]) -> Vec<Statement> {
    let columns = spec
        .columns
        .iter()
        .map(|c| quote(c))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; spec.columns.len()].join(", ");
    let query = format!(
        "INSERT INTO {} ({columns}) VALUES ({placeholders})",
        quote(&spec.table)
    );

    rows.iter()
        .map(|row| {
            let params = spec.columns.iter().map(|c| row.value(c)).collect();
            Statement::new(query.clone(), params)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::StageFilter;

    fn options() -> ExecOptions {
        ExecOptions::default()
    }

    #[test]
    fn root_select_is_bounded() {
        let spec = TableSpec::new("Principals", StageFilter::All, ["principalId"]);
        let statement = select_statement(&spec, &[], &options());
        assert_eq!(statement.query, "SELECT * FROM \"Principals\" LIMIT 999999");
        assert!(statement.params.is_empty());
    }

    #[test]
    fn eq_select_binds_the_value() {
        let spec = TableSpec::new(
            "Principals",
            StageFilter::eq("tenantAlias", "t1"),
            ["principalId", "tenantAlias"],
        );
        let statement = select_statement(&spec, &[], &options());
        assert_eq!(
            statement.query,
            "SELECT * FROM \"Principals\" WHERE \"tenantAlias\" = ? LIMIT 999999"
        );
        assert_eq!(statement.params, vec![Value::from("t1")]);
    }

    #[test]
    fn key_set_select_binds_one_list() {
        let spec = TableSpec::new(
            "AuthzInvitations",
            StageFilter::in_key_set("resourceId", "allResourceIds"),
            ["resourceId", "email"],
        );
        let keys = vec!["c:t1:a".to_string(), "c:t1:b".to_string()];
        let statement = select_statement(&spec, &keys, &options());
        assert_eq!(
            statement.query,
            "SELECT * FROM \"AuthzInvitations\" WHERE \"resourceId\" IN ? LIMIT 999999"
        );
        assert_eq!(statement.params, vec![Value::TextList(keys)]);
    }

    #[test]
    fn insert_params_follow_declared_column_order() {
        let spec = TableSpec::new(
            "AuthzInvitations",
            StageFilter::All,
            ["resourceId", "email", "inviterUserId", "role"],
        );
        // Cells deliberately out of declared order.
        let row = Row::from_pairs([
            ("role", Value::from("viewer")),
            ("email", Value::from("a@x.com")),
            ("resourceId", Value::from("c:t1:abc")),
            ("inviterUserId", Value::from("u:t1:inviter")),
        ]);

        let statements = insert_statements(&spec, &[row]);
        assert_eq!(statements.len(), 1);
        assert_eq!(
            statements[0].query,
            "INSERT INTO \"AuthzInvitations\" (\"resourceId\", \"email\", \"inviterUserId\", \
             \"role\") VALUES (?, ?, ?, ?)"
        );
        assert_eq!(
            statements[0].params,
            vec![
                Value::from("c:t1:abc"),
                Value::from("a@x.com"),
                Value::from("u:t1:inviter"),
                Value::from("viewer"),
            ]
        );
    }

    #[test]
    fn missing_cells_bind_as_null() {
        let spec = TableSpec::new("T", StageFilter::All, ["a", "b"]);
        let row = Row::from_pairs([("a", Value::from("x"))]);

        let statements = insert_statements(&spec, &[row]);
        assert_eq!(
            statements[0].params,
            vec![Value::from("x"), Value::Null]
        );
    }
}
