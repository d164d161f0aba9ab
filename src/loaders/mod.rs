use std::fs;

use anyhow::{Context, Result};

use crate::models::{Communities, Network, NetworkRecord, Secrets};

/// Load and validate the network topology from the source-of-truth export.
/// Validation errors propagate as-is; run policy belongs to the caller.
pub fn load_topology(path: &str) -> Result<Network> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read topology file '{}'", path))?;
    let record: NetworkRecord = serde_yaml::from_str(&text)
        .with_context(|| format!("failed to parse topology file '{}'", path))?;
    let network = Network::from_record(record)?;
    Ok(network)
}

/// Load the routing-policy community set
pub fn load_communities(path: &str) -> Result<Communities> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read communities file '{}'", path))?;
    let communities = serde_yaml::from_str(&text)
        .with_context(|| format!("failed to parse communities file '{}'", path))?;
    Ok(communities)
}

/// Load the secrets bundle (stand-in for the vault client)
pub fn load_secrets(path: &str) -> Result<Secrets> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read secrets file '{}'", path))?;
    let secrets = serde_yaml::from_str(&text)
        .with_context(|| format!("failed to parse secrets file '{}'", path))?;
    Ok(secrets)
}
