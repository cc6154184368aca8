//! One table's select -> insert -> extract -> verify unit of work.

use crate::{
    context::RunContext,
    error::CopyError,
    query,
    report::{CopyResult, StageOutcome},
    spec::{StageFilter, TableSpec},
    verify::{Verdict, verify},
};
use tracing::{info, warn};

/// Copy one table from source to target.
///
/// An empty filter key-set skips the stage entirely; that is expected
/// emptiness propagating down the chain, not an error. Identifier
/// extraction always runs against the fetched source rows before any
/// insert, so a later stage's filter is complete even when this stage's
/// write fails.
pub async fn copy_table(ctx: &RunContext, spec: &TableSpec) -> Result<StageOutcome, CopyError> {
    let keys = match &spec.filter {
        StageFilter::InKeySet { key_set, .. } => {
            let keys = ctx.keys.get(key_set);
            if keys.is_empty() {
                info!(
                    table = %spec.table,
                    key_set = %key_set,
                    "skipped: filter key-set is empty"
                );
                if let Some(extract) = &spec.extract {
                    ctx.keys.set(&extract.into, Vec::<String>::new());
                }
                let outcome = StageOutcome::Skipped {
                    table: spec.table.clone(),
                    key_set: key_set.clone(),
                };
                ctx.record(outcome.clone());
                return Ok(outcome);
            }
            keys
        }
        _ => Vec::new(),
    };

    let select = query::select_statement(spec, &keys, &ctx.options);
    let fetched = ctx
        .source
        .execute(&select.query, &select.params, &ctx.options)
        .await
        .map_err(|source| CopyError::SourceSelect {
            table: spec.table.clone(),
            source,
        })?;
    let source_rows = fetched.rows.len();
    info!(table = %spec.table, rows = source_rows, "fetched rows from source");

    // Derive downstream filters from the source result, pre-insert.
    if let Some(extract) = &spec.extract {
        let values: Vec<String> = fetched
            .rows
            .iter()
            .filter_map(|row| row.text(&extract.column).map(str::to_string))
            .collect();
        ctx.keys.set(&extract.into, values);
    }

    if fetched.rows.is_empty() {
        info!(table = %spec.table, "no rows found");
        let result = CopyResult {
            table: spec.table.clone(),
            source_rows: 0,
            target_rows: 0,
            verdict: Verdict::Match,
        };
        ctx.record(StageOutcome::Copied(result.clone()));
        return Ok(StageOutcome::Copied(result));
    }

    let inserts = query::insert_statements(spec, &fetched.rows);
    info!(table = %spec.table, statements = inserts.len(), "inserting rows into target");
    ctx.target
        .batch(&inserts, &ctx.options)
        .await
        .map_err(|source| CopyError::TargetInsert {
            table: spec.table.clone(),
            source,
        })?;

    // Re-issue the same filtered select against the target. The key-set is
    // never mutated mid-chain, so this compares exactly the rows this stage
    // was responsible for.
    let recheck = ctx
        .target
        .execute(&select.query, &select.params, &ctx.options)
        .await
        .map_err(|source| CopyError::TargetSelect {
            table: spec.table.clone(),
            source,
        })?;
    let target_rows = recheck.rows.len();

    let verdict = verify(source_rows, target_rows);
    match verdict {
        Verdict::Match => {
            info!(table = %spec.table, rows = source_rows, "row counts match");
        }
        Verdict::Mismatch => {
            warn!(
                table = %spec.table,
                source_rows,
                target_rows,
                "row count mismatch; copy needs manual follow-up"
            );
        }
    }

    let result = CopyResult {
        table: spec.table.clone(),
        source_rows,
        target_rows,
        verdict,
    };
    ctx.record(StageOutcome::Copied(result.clone()));
    Ok(StageOutcome::Copied(result))
}
