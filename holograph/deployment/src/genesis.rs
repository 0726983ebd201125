use {
    crate::{
        artifacts::Artifacts,
        config::TxConfig,
        contract_bindings::genesis::HolographGenesis,
        signer::Deployer,
        tx::{send_call, tx_params},
    },
    alloy::{
        network::{ReceiptResponse, TransactionBuilder},
        primitives::{Address, B256, Bytes, FixedBytes, U256},
        providers::Provider,
        rpc::types::{TransactionReceipt, TransactionRequest},
    },
    anyhow::{anyhow, ensure},
};

pub const GENESIS_CONTRACT: &str = "HolographGenesis";

/// The CREATE2 salt the genesis contract uses: the deployer address followed by
/// the 12 byte deployment salt.
pub fn genesis_salt(deployer: Address, salt: FixedBytes<12>) -> B256 {
    let mut full = [0u8; 32];
    full[..20].copy_from_slice(deployer.as_slice());
    full[20..].copy_from_slice(salt.as_slice());
    B256::from(full)
}

/// Address at which `genesis` places a contract with the given creation code
/// when `deployer` deploys it with `salt`.
pub fn derive_future_address(
    genesis: Address,
    deployer: Address,
    salt: FixedBytes<12>,
    creation_code: &[u8],
) -> Address {
    genesis.create2_from_code(genesis_salt(deployer, salt), creation_code)
}

/// Whether any bytecode is deployed at `address`.
pub async fn is_contract(provider: &impl Provider, address: Address) -> anyhow::Result<bool> {
    let code = provider.get_code_at(address).await?;
    Ok(!code.is_empty())
}

/// Deploys the genesis contract itself with a plain CREATE from the deployer.
pub async fn deploy_genesis(
    deployer: &Deployer,
    artifacts: &Artifacts,
    config: &TxConfig,
) -> anyhow::Result<Address> {
    let code = artifacts.bytecode(GENESIS_CONTRACT)?;

    let tx = TransactionRequest::default()
        .with_from(deployer.address())
        .with_deploy_code(code);
    let tx = tx_params(deployer.provider(), tx, config).await?;

    let receipt = deployer
        .provider()
        .send_transaction(tx)
        .await?
        .get_receipt()
        .await?;
    tracing::info!(hash = %receipt.transaction_hash, "Transaction mined");

    let address = created_address(&receipt)?;

    ensure!(
        is_contract(deployer.provider(), address).await?,
        "{GENESIS_CONTRACT} not found at {address} after deployment"
    );

    Ok(address)
}

/// Address created by a successful contract creation transaction.
///
/// A reverted creation still reports the address it would have used.
pub fn created_address(receipt: &TransactionReceipt) -> anyhow::Result<Address> {
    ensure!(
        receipt.status(),
        "contract creation {} reverted",
        receipt.transaction_hash
    );

    receipt
        .contract_address
        .ok_or_else(|| anyhow!("no contract address in receipt {}", receipt.transaction_hash))
}

/// Deterministic deployments through an existing genesis contract.
pub struct Genesis<'a> {
    pub deployer: &'a Deployer,
    pub address: Address,
    pub salt: FixedBytes<12>,
    pub artifacts: &'a Artifacts,
    pub tx: &'a TxConfig,
}

impl Genesis<'_> {
    /// Deploys contract `name` initialized with `init_code`, unless bytecode
    /// already exists at its future address. Returns that address either way.
    pub async fn get_or_deploy(&self, name: &str, init_code: Bytes) -> anyhow::Result<Address> {
        let code = self.artifacts.bytecode(name)?;
        let address =
            derive_future_address(self.address, self.deployer.address(), self.salt, &code);
        tracing::info!(contract = name, %address, "Derived future address");

        if is_contract(self.deployer.provider(), address).await? {
            tracing::info!(contract = name, "Already deployed");
            return Ok(address);
        }

        tracing::info!(contract = name, "Bytecode not found, need to deploy");

        let chain_id = self.deployer.provider().get_chain_id().await?;

        send_call(
            self.deployer,
            self.address,
            &HolographGenesis::deployCall {
                chainId: U256::from(chain_id),
                saltHash: self.salt,
                sourceCode: code,
                initCode: init_code,
            },
            self.tx,
        )
        .await?;

        ensure!(
            is_contract(self.deployer.provider(), address).await?,
            "{name} not found at {address} after deployment"
        );
        tracing::info!(contract = name, %address, "Deployed");

        Ok(address)
    }
}

// ----------------------------------- tests -----------------------------------
