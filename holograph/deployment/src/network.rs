use {
    crate::error::{DeploymentError, Result},
    serde::{Deserialize, Serialize},
};

/// Chain identifier used by Holograph contracts, distinct from the EVM chain id.
pub type HolographChainId = u32;

/// Holograph chain id the messaging module uses to refer to its own chain.
pub const SELF_CHAIN_ID: HolographChainId = 0;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum NetworkType {
    Mainnet,
    Testnet,
    Local,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Network {
    /// Registry key, e.g. `ethereumTestnetGoerli`.
    pub key: String,
    /// Human readable name.
    pub name: String,
    /// EVM chain id.
    pub chain_id: u64,
    pub holograph_id: HolographChainId,
    pub active: bool,
    #[serde(rename = "type")]
    pub network_type: NetworkType,
}

/// Returns the network registered under `key`.
pub fn find_network<'a>(networks: &'a [Network], key: &str) -> Result<&'a Network> {
    networks
        .iter()
        .find(|network| network.key == key)
        .ok_or_else(|| DeploymentError::UnknownNetwork(key.to_string()))
}

/// Active networks sharing the type of `local`, in registry order.
pub fn supported_networks<'a>(networks: &'a [Network], local: &Network) -> Vec<&'a Network> {
    networks
        .iter()
        .filter(|network| network.active && network.network_type == local.network_type)
        .collect()
}

// ----------------------------------- tests -----------------------------------
