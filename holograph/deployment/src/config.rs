use {
    crate::{
        error::Result,
        gas::GasConfig,
        network::{Network, find_network},
        signer::SignerConfig,
    },
    alloy::primitives::FixedBytes,
    config::{Config, Environment, File},
    serde::{Deserialize, Serialize},
    std::path::{Path, PathBuf},
};

/// Prefix of environment variables overriding the config file, e.g.
/// `HOLOGRAPH_RPC_URL` or `HOLOGRAPH_SIGNER__TYPE`.
pub const ENV_PREFIX: &str = "HOLOGRAPH";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DeployConfig {
    /// Key of the network being deployed to.
    pub network: String,
    pub rpc_url: String,
    /// Deployment salt, combined with the deployer address by the genesis
    /// contract.
    pub salt: FixedBytes<12>,
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,
    #[serde(default = "default_deployments_file")]
    pub deployments_file: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub signer: SignerConfig,
    #[serde(default)]
    pub tx: TxConfig,
    #[serde(default)]
    pub gas: GasConfig,
    pub networks: Vec<Network>,
}

impl DeployConfig {
    /// The entry of the network being deployed to.
    pub fn local_network(&self) -> Result<&Network> {
        find_network(&self.networks, &self.network)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TxConfig {
    /// Percentage added on top of the estimated gas limit.
    pub gas_limit_buffer_percent: u64,
    /// Fixed gas price; the node's suggestion is used when unset.
    pub gas_price_gwei: Option<u64>,
}

impl Default for TxConfig {
    fn default() -> Self {
        Self {
            gas_limit_buffer_percent: 25,
            gas_price_gwei: None,
        }
    }
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("artifacts")
}

fn default_deployments_file() -> PathBuf {
    PathBuf::from("deployments/holograph.json")
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Reads the config file at `path`, with `HOLOGRAPH_*` environment variables
/// taking precedence.
pub fn load_config(path: impl AsRef<Path>) -> Result<DeployConfig> {
    let env_override = Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__");

    let config = Config::builder()
        .add_source(File::from(path.as_ref()))
        .add_source(env_override)
        .build()?;

    Ok(config.try_deserialize()?)
}

// ----------------------------------- tests -----------------------------------
