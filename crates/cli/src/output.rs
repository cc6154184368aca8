use crate::error::CliError;
use engine::{
    report::{ChainSummary, StageOutcome},
    spec::{Chain, StageFilter},
    verify::Verdict,
};

pub fn print_plan(chain: &Chain) {
    println!("Chain '{}' ({} stages):", chain.name, chain.stages.len());
    if !chain.seeds.is_empty() {
        println!("  seeds: {}", chain.seeds.join(", "));
    }
    for (idx, stage) in chain.stages.iter().enumerate() {
        let filter = match &stage.filter {
            StageFilter::All => "all rows".to_string(),
            StageFilter::Eq { column, value } => format!("{column} = {value}"),
            StageFilter::InKeySet { column, key_set } => format!("{column} IN '{key_set}'"),
        };
        let extract = stage
            .extract
            .as_ref()
            .map(|e| format!("  => {} into '{}'", e.column, e.into))
            .unwrap_or_default();
        println!("  {}. {}  [{}]{}", idx + 1, stage.table, filter, extract);
    }
    println!();
}

pub fn print_report(summaries: &[ChainSummary]) {
    for summary in summaries {
        println!("Chain '{}' (run {}):", summary.chain, summary.run_id);
        println!("{:<40} {:>8} {:>8}  verdict", "table", "source", "target");
        for outcome in &summary.outcomes {
            match outcome {
                StageOutcome::Copied(result) => {
                    let verdict = match result.verdict {
                        Verdict::Match => "match",
                        Verdict::Mismatch => "MISMATCH",
                    };
                    println!(
                        "{:<40} {:>8} {:>8}  {verdict}",
                        result.table, result.source_rows, result.target_rows
                    );
                }
                StageOutcome::Skipped { table, key_set } => {
                    println!("{table:<40} skipped (key-set '{key_set}' empty)");
                }
            }
        }
        println!();
    }
}

pub async fn write_report(summaries: &[ChainSummary], path: &str) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(summaries).map_err(CliError::ReportSerialize)?;
    tokio::fs::write(path, json).await?;
    Ok(())
}
