use {
    crate::{
        contract_bindings::{
            holograph::Holograph, layer_zero_module::LayerZeroModule,
            operator::HolographOperator,
        },
        gas::{GasParameterBatch, ParameterTable, gwei},
        network::supported_networks,
        reconcile::reconcile,
        setup::Context,
        tx::{Dispatch, dispatch},
    },
    alloy::{
        primitives::{Address, Bytes, U256},
        sol_types::SolValue,
    },
};

pub const HOLOGRAPH_CONTRACT: &str = "Holograph";
pub const OPTIMISM_GAS_PRICE_ORACLE: &str = "OVM_GasPriceOracle";
pub const LAYER_ZERO_MODULE: &str = "LayerZeroModule";

/// Constructor arguments of the Optimism gas price oracle: gas price, L1 base
/// fee, overhead, scalar and decimals.
pub fn gas_price_oracle_init_code() -> Bytes {
    (
        U256::from(1_000_000),
        U256::from(gwei(100)),
        U256::from(2_100),
        U256::from(1_000_000),
        U256::from(6),
    )
        .abi_encode_params()
        .into()
}

fn log_dispatch(what: &str, outcome: &Dispatch) {
    match outcome {
        Dispatch::Sent(hash) => {
            tracing::info!(%hash, "Updated {what}");
        },
        Dispatch::Proposed(_) => {
            tracing::info!("Update of {what} proposed to the admin");
        },
    }
}

/// Deploys the messaging module and its Optimism gas price oracle if missing,
/// wires the module into the operator and brings its gas parameters in line
/// with the config.
pub async fn deploy_layer_zero_module(ctx: &mut Context) -> anyhow::Result<Address> {
    let local = ctx.network.clone();
    let supported = supported_networks(&ctx.config.networks, &local);

    let holograph = Holograph::new(ctx.contract(HOLOGRAPH_CONTRACT)?, ctx.deployer.provider());
    let bridge = holograph.getBridge().call().await?;
    let interfaces = holograph.getInterfaces().call().await?;
    let operator = holograph.getOperator().call().await?;

    let (oracle, module) = {
        let genesis = ctx.genesis()?;

        let oracle = genesis
            .get_or_deploy(OPTIMISM_GAS_PRICE_ORACLE, gas_price_oracle_init_code())
            .await?;

        let (chain_ids, gas_parameters) = GasParameterBatch::initial(
            supported.iter().copied(),
            local.holograph_id,
            &ctx.config.gas,
        )
        .into_call_args();

        let init_code = (
            bridge,
            interfaces,
            operator,
            oracle,
            chain_ids,
            gas_parameters,
        )
            .abi_encode_params();

        let module = genesis
            .get_or_deploy(LAYER_ZERO_MODULE, init_code.into())
            .await?;

        (oracle, module)
    };

    ctx.record(OPTIMISM_GAS_PRICE_ORACLE, oracle)?;
    ctx.record(LAYER_ZERO_MODULE, module)?;

    let current = HolographOperator::new(operator, ctx.deployer.provider())
        .getMessagingModule()
        .call()
        .await?;

    if current != module {
        tracing::info!(%current, %module, "Messaging module out of date");

        let outcome = dispatch(
            &ctx.deployer,
            operator,
            &HolographOperator::setMessagingModuleCall {
                messagingModule: module,
            },
            &ctx.config.tx,
        )
        .await?;
        log_dispatch("messaging module", &outcome);
    }

    let current = LayerZeroModule::new(module, ctx.deployer.provider())
        .getOptimismGasPriceOracle()
        .call()
        .await?;

    if current != oracle {
        tracing::info!(%current, %oracle, "Optimism gas price oracle out of date");

        let outcome = dispatch(
            &ctx.deployer,
            module,
            &LayerZeroModule::setOptimismGasPriceOracleCall {
                optimismGasPriceOracle: oracle,
            },
            &ctx.config.tx,
        )
        .await?;
        log_dispatch("Optimism gas price oracle", &outcome);
    }

    update_gas_parameters(ctx, module).await?;

    Ok(module)
}

/// Computes the gas parameter updates `module` needs without sending anything.
pub async fn check_gas_parameters(
    ctx: &Context,
    module: Address,
) -> anyhow::Result<GasParameterBatch> {
    let supported = supported_networks(&ctx.config.networks, &ctx.network);
    let desired = ParameterTable::desired(supported.iter().copied(), &ctx.config.gas);
    let module = LayerZeroModule::new(module, ctx.deployer.provider());

    tracing::info!(networks = supported.len(), "Checking existing gas parameters");

    let batch = reconcile(
        &desired,
        &module,
        supported.iter().copied(),
        ctx.network.holograph_id,
    )
    .await?;

    Ok(batch)
}

/// Reconciles the module's gas parameters and submits one update covering
/// every out of date chain.
pub async fn update_gas_parameters(
    ctx: &Context,
    module: Address,
) -> anyhow::Result<Option<Dispatch>> {
    let batch = check_gas_parameters(ctx, module).await?;

    if batch.is_empty() {
        tracing::info!("Gas parameters are up to date");
        return Ok(None);
    }

    tracing::info!(
        chain_ids = ?batch.chain_ids(),
        "Found gas parameter inconsistencies"
    );

    let (chain_ids, gas_parameters) = batch.into_call_args();

    let outcome = dispatch(
        &ctx.deployer,
        module,
        &LayerZeroModule::setGasParametersCall {
            chainIds: chain_ids,
            gasParameters: gas_parameters,
        },
        &ctx.config.tx,
    )
    .await?;
    log_dispatch("gas parameters", &outcome);

    Ok(Some(outcome))
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oracle_init_code_is_five_words() {
        let code = gas_price_oracle_init_code();

        assert_eq!(code.len(), 5 * 32);

        let decoded = <(U256, U256, U256, U256, U256)>::abi_decode_params(&code).unwrap();
        assert_eq!(decoded.0, U256::from(1_000_000));
        assert_eq!(decoded.1, U256::from(100_000_000_000_u64));
        assert_eq!(decoded.2, U256::from(2_100));
        assert_eq!(decoded.4, U256::from(6));
    }
}
