use {
    crate::{
        artifacts::Artifacts,
        config::{DeployConfig, load_config},
        deployments::Deployments,
        genesis::{GENESIS_CONTRACT, Genesis},
        network::Network,
        signer::Deployer,
    },
    alloy::primitives::Address,
    std::path::Path,
    tracing::metadata::LevelFilter,
};

pub fn setup_tracing(log_level: &str) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(log_level.parse::<LevelFilter>()?)
        .init();

    Ok(())
}

/// Everything a deployment step needs: the parsed config, the network being
/// deployed to, a signing provider and the record of earlier deployments.
pub struct Context {
    pub config: DeployConfig,
    pub network: Network,
    pub deployer: Deployer,
    pub artifacts: Artifacts,
    pub deployments: Deployments,
}

impl Context {
    /// Parses the config file, installs the tracing subscriber and connects the
    /// deployer.
    pub fn load(config_path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config = load_config(config_path)?;

        setup_tracing(&config.log_level)?;

        let network = config.local_network()?.clone();
        let deployer = Deployer::connect(&config.rpc_url, &config.signer)?;
        let artifacts = Artifacts::new(&config.artifacts_dir);
        let deployments = Deployments::load(&config.deployments_file)?;

        tracing::info!(
            network = %network.key,
            holograph_id = network.holograph_id,
            deployer = %deployer.address(),
            "Loaded deployment context"
        );

        Ok(Self {
            config,
            network,
            deployer,
            artifacts,
            deployments,
        })
    }

    /// Address of `contract` as recorded for the current network.
    pub fn contract(&self, contract: &str) -> anyhow::Result<Address> {
        Ok(self.deployments.address(&self.network.key, contract)?)
    }

    pub fn genesis(&self) -> anyhow::Result<Genesis<'_>> {
        Ok(Genesis {
            deployer: &self.deployer,
            address: self.contract(GENESIS_CONTRACT)?,
            salt: self.config.salt,
            artifacts: &self.artifacts,
            tx: &self.config.tx,
        })
    }

    /// Records a deployed address and persists the record if it changed.
    pub fn record(&mut self, contract: &str, address: Address) -> anyhow::Result<()> {
        if self.deployments.record(&self.network.key, contract, address) {
            self.deployments.save()?;
        }

        Ok(())
    }
}
