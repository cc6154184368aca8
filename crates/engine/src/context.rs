use crate::{keystore::KeyStore, report::StageOutcome};
use connectors::client::{ClusterClient, ExecOptions};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Everything one migration run owns: the two cluster connections, the
/// shared key store, and the outcomes recorded so far.
///
/// Constructed per invocation and owned by the orchestrator for its
/// duration. Concurrent runs get separate contexts, so their key-sets
/// cannot interfere; chains within one run share the store under distinct
/// key-set names.
pub struct RunContext {
    pub source: Arc<dyn ClusterClient>,
    pub target: Arc<dyn ClusterClient>,
    pub options: ExecOptions,
    pub keys: KeyStore,
    run_id: String,
    outcomes: Mutex<Vec<StageOutcome>>,
}

impl RunContext {
    pub fn new(
        source: Arc<dyn ClusterClient>,
        target: Arc<dyn ClusterClient>,
        options: ExecOptions,
    ) -> Self {
        let run_id = format!("run-{}", &Uuid::new_v4().simple().to_string()[..16]);
        RunContext {
            source,
            target,
            options,
            keys: KeyStore::new(),
            run_id,
            outcomes: Mutex::new(Vec::new()),
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn record(&self, outcome: StageOutcome) {
        let mut outcomes = self.outcomes.lock().unwrap_or_else(|e| e.into_inner());
        outcomes.push(outcome);
    }

    /// All outcomes recorded so far, across every chain of this run.
    pub fn outcomes(&self) -> Vec<StageOutcome> {
        let outcomes = self.outcomes.lock().unwrap_or_else(|e| e.into_inner());
        outcomes.clone()
    }
}
