use crate::error::CliError;
use connectors::client::ExecOptions;
use engine::{catalog, spec::Chain};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChainSelector {
    Invitations,
    Principals,
}

/// Run configuration, loaded from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Chains to run, in order.
    pub chains: Vec<ChainSelector>,
    /// Tenant being moved; required by the principals chain.
    #[serde(default)]
    pub tenant_alias: Option<String>,
    /// Key-sets seeded into the store before any chain runs.
    #[serde(default)]
    pub seeds: HashMap<String, Vec<String>>,
    #[serde(default = "default_fetch_size")]
    pub fetch_size: u32,
    #[serde(default = "default_prepare")]
    pub prepare: bool,
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,
}

fn default_fetch_size() -> u32 {
    999_999
}

fn default_prepare() -> bool {
    true
}

fn default_deadline_secs() -> u64 {
    engine::chain::DEFAULT_DEADLINE.as_secs()
}

impl RunConfig {
    /// Resolve the selected chains from the catalog, in config order.
    pub fn resolve(&self) -> Result<Vec<Chain>, CliError> {
        self.chains
            .iter()
            .map(|selector| match selector {
                ChainSelector::Invitations => Ok(catalog::invitations_chain()),
                ChainSelector::Principals => {
                    let alias = self
                        .tenant_alias
                        .as_deref()
                        .ok_or(CliError::MissingTenantAlias)?;
                    Ok(catalog::principals_chain(alias))
                }
            })
            .collect()
    }

    pub fn exec_options(&self) -> ExecOptions {
        ExecOptions {
            fetch_size: self.fetch_size,
            prepare: self.prepare,
        }
    }
}

pub async fn load(path: &str) -> Result<RunConfig, CliError> {
    let raw = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&raw)?)
}
