use {
    crate::error::{DeploymentError, Result},
    alloy::primitives::Address,
    serde::{Deserialize, Serialize},
    std::{
        collections::BTreeMap,
        fs,
        path::{Path, PathBuf},
    },
};

type NetworkDeployments = BTreeMap<String, Address>;

/// Addresses of deployed contracts, per network key, persisted as JSON.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct Deployments {
    #[serde(skip)]
    path: PathBuf,
    #[serde(flatten)]
    networks: BTreeMap<String, NetworkDeployments>,
}

impl Deployments {
    /// Loads the record at `path`, or starts an empty one if the file does not
    /// exist yet.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut deployments = if path.exists() {
            serde_json::from_slice::<Self>(&fs::read(path)?)?
        } else {
            Self::default()
        };

        deployments.path = path.to_path_buf();

        Ok(deployments)
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.path, serde_json::to_string_pretty(self)?)?;

        Ok(())
    }

    pub fn get(&self, network: &str, contract: &str) -> Option<Address> {
        self.networks.get(network)?.get(contract).copied()
    }

    pub fn address(&self, network: &str, contract: &str) -> Result<Address> {
        self.get(network, contract)
            .ok_or_else(|| DeploymentError::MissingDeployment {
                network: network.to_string(),
                contract: contract.to_string(),
            })
    }

    /// Records `address` for `contract`, returning whether the record changed.
    pub fn record(&mut self, network: &str, contract: &str, address: Address) -> bool {
        self.networks
            .entry(network.to_string())
            .or_default()
            .insert(contract.to_string(), address)
            != Some(address)
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, alloy::primitives::address, assertor::*};

    #[test]
    fn record_and_reload() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("deployments/holograph.json");
        let genesis = address!("0x4c3BA951A7ea09b5BB57230F63a89D36A07B2992");

        let mut deployments = Deployments::load(&path).unwrap();
        assert!(deployments.record("localhost", "HolographGenesis", genesis));
        assert!(!deployments.record("localhost", "HolographGenesis", genesis));
        deployments.save().unwrap();

        let reloaded = Deployments::load(&path).unwrap();

        assert_that!(reloaded.address("localhost", "HolographGenesis").unwrap())
            .is_equal_to(genesis);
        assert!(matches!(
            reloaded.address("localhost2", "HolographGenesis"),
            Err(DeploymentError::MissingDeployment { .. })
        ));
    }
}
