use {
    crate::{
        genesis::{GENESIS_CONTRACT, deploy_genesis, is_contract},
        setup::Context,
    },
    alloy::primitives::Address,
};

/// Makes sure the genesis contract exists on the current network, deploying it
/// when nothing is recorded or the recorded address holds no bytecode.
pub async fn ensure_genesis(ctx: &mut Context) -> anyhow::Result<Address> {
    if let Some(address) = ctx.deployments.get(&ctx.network.key, GENESIS_CONTRACT) {
        if is_contract(ctx.deployer.provider(), address).await? {
            tracing::info!(%address, "{GENESIS_CONTRACT} is already deployed");
            return Ok(address);
        }

        tracing::warn!(%address, "No bytecode at recorded {GENESIS_CONTRACT} address");
    }

    tracing::info!("Deploying {GENESIS_CONTRACT}...");
    let address = deploy_genesis(&ctx.deployer, &ctx.artifacts, &ctx.config.tx).await?;
    tracing::info!(%address, "Deployed {GENESIS_CONTRACT}");

    ctx.record(GENESIS_CONTRACT, address)?;

    Ok(address)
}
