//! Sequences the stages of one dependency chain.

use crate::{
    context::RunContext, copier::copy_table, error::ChainError, report::ChainSummary, spec::Chain,
};
use std::time::Duration;
use tracing::{error, info};

/// Defensive per-chain bound; no single chain of these tables should run
/// anywhere near this long.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(900);

/// Run one chain's stages in declared order, threading the context's key
/// store between them.
///
/// A client error aborts the remaining stages of this chain (the caller's
/// other chains are unaffected); a count mismatch is recorded and the chain
/// continues. The whole invocation runs under `deadline`.
pub async fn run_chain(
    ctx: &RunContext,
    chain: &Chain,
    deadline: Duration,
) -> Result<ChainSummary, ChainError> {
    chain.validate()?;
    info!(
        chain = %chain.name,
        run = %ctx.run_id(),
        stages = chain.stages.len(),
        "starting chain"
    );

    match tokio::time::timeout(deadline, run_stages(ctx, chain)).await {
        Ok(result) => result,
        Err(_) => {
            error!(
                chain = %chain.name,
                seconds = deadline.as_secs(),
                "chain deadline exceeded"
            );
            Err(ChainError::DeadlineExceeded {
                chain: chain.name.clone(),
                seconds: deadline.as_secs(),
            })
        }
    }
}

async fn run_stages(ctx: &RunContext, chain: &Chain) -> Result<ChainSummary, ChainError> {
    let mut outcomes = Vec::with_capacity(chain.stages.len());

    for spec in &chain.stages {
        match copy_table(ctx, spec).await {
            Ok(outcome) => outcomes.push(outcome),
            Err(source) => {
                error!(
                    chain = %chain.name,
                    table = %spec.table,
                    error = %source,
                    "stage failed; aborting remaining stages of this chain"
                );
                return Err(ChainError::Stage {
                    chain: chain.name.clone(),
                    table: spec.table.clone(),
                    source,
                });
            }
        }
    }

    let summary = ChainSummary {
        chain: chain.name.clone(),
        run_id: ctx.run_id().to_string(),
        outcomes,
    };
    info!(
        chain = %chain.name,
        mismatches = summary.mismatches().len(),
        "chain finished"
    );
    Ok(summary)
}

/// Run independent chains concurrently over one context. Chains name their
/// key-sets distinctly, so the store's lock is the only shared state. A
/// failed chain does not stop the others.
pub async fn run_chains(
    ctx: &RunContext,
    chains: &[Chain],
    deadline: Duration,
) -> Vec<Result<ChainSummary, ChainError>> {
    futures::future::join_all(chains.iter().map(|chain| run_chain(ctx, chain, deadline))).await
}
