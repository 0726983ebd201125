use {
    crate::{
        contract_bindings::{
            factory::HolographFactory, holograph::Holograph, registry::HolographRegistry,
        },
        holographable::{
            Erc20Event, Erc20Params, Erc721Event, Erc721Params, HolographableConfig,
            configure_events, padded_name, verification,
        },
        network::NetworkType,
        setup::Context,
        steps::layer_zero_module::HOLOGRAPH_CONTRACT,
        tx::send_call,
    },
    alloy::{
        primitives::{Address, B256, Bytes},
        sol_types::SolValue,
    },
    anyhow::anyhow,
};

const SAMPLE_ERC20: &str = "SampleERC20";
const SAMPLE_ERC721: &str = "SampleERC721";
const CXIP_ERC721_PROXY: &str = "CxipERC721Proxy";

/// Deploys the sample holographable contracts on local networks, reusing any
/// the registry already knows about.
pub async fn deploy_samples(ctx: &Context) -> anyhow::Result<()> {
    if ctx.network.network_type != NetworkType::Local {
        tracing::info!(network = %ctx.network.key, "Samples are only deployed on local networks");
        return Ok(());
    }

    let holograph = Holograph::new(ctx.contract(HOLOGRAPH_CONTRACT)?, ctx.deployer.provider());
    let factory = holograph.getFactory().call().await?;
    let registry = holograph.getRegistry().call().await?;

    let deployer = ctx.deployer.address();
    let chain_type = ctx.network.holograph_id;
    let salt = B256::left_padding_from(ctx.config.salt.as_slice());
    let network = &ctx.network.key;

    let erc20 = HolographableConfig::erc20(
        chain_type,
        salt,
        ctx.artifacts.bytecode(SAMPLE_ERC20)?,
        Erc20Params {
            name: &format!("Sample ERC20 Token ({network})"),
            symbol: "SMPL",
            decimals: 18,
            event_config: configure_events([
                Erc20Event::BridgeIn as u8,
                Erc20Event::BridgeOut as u8,
            ]),
            domain_separator: "Sample ERC20 Token",
            domain_version: "1",
            init_code: (deployer, 0_u16).abi_encode_params().into(),
        },
        deployer,
    );
    get_or_deploy_holographable(ctx, factory, registry, SAMPLE_ERC20, &erc20).await?;

    let erc721_events = configure_events([
        Erc721Event::BridgeIn as u8,
        Erc721Event::BridgeOut as u8,
        Erc721Event::AfterBurn as u8,
    ]);

    let erc721 = HolographableConfig::erc721(
        chain_type,
        salt,
        ctx.artifacts.bytecode(SAMPLE_ERC721)?,
        Erc721Params {
            name: &format!("Sample ERC721 Contract ({network})"),
            symbol: "SMPLR",
            royalty_bps: 1000,
            event_config: erc721_events,
            init_code: (deployer,).abi_encode_params().into(),
        },
        deployer,
    );
    get_or_deploy_holographable(ctx, factory, registry, SAMPLE_ERC721, &erc721).await?;

    let cxip_init = (
        padded_name("CxipERC721"),
        registry,
        Bytes::from((deployer,).abi_encode_params()),
    )
        .abi_encode_params();

    let cxip = HolographableConfig::erc721(
        chain_type,
        salt,
        ctx.artifacts.bytecode(CXIP_ERC721_PROXY)?,
        Erc721Params {
            name: &format!("CXIP ERC721 Collection ({network})"),
            symbol: "CXIP",
            royalty_bps: 1000,
            event_config: erc721_events,
            init_code: cxip_init.into(),
        },
        deployer,
    );
    get_or_deploy_holographable(ctx, factory, registry, CXIP_ERC721_PROXY, &cxip).await?;

    Ok(())
}

async fn get_or_deploy_holographable(
    ctx: &Context,
    factory: Address,
    registry: Address,
    name: &str,
    config: &HolographableConfig,
) -> anyhow::Result<Address> {
    let existing = HolographRegistry::new(registry, ctx.deployer.provider())
        .getHolographedHashAddress(config.hash)
        .call()
        .await?;

    if existing != Address::ZERO {
        tracing::info!(contract = name, address = %existing, "Reusing existing deployment");
        return Ok(existing);
    }

    tracing::info!(
        contract = name,
        chain_type = %format!("{:#010x}", config.config.chainType),
        hash = %config.hash,
        "Deploying holographable contract"
    );

    let signature = ctx
        .deployer
        .signer()
        .sign_message(config.hash.as_slice())
        .await?;

    let receipt = send_call(
        &ctx.deployer,
        factory,
        &HolographFactory::deployHolographableContractCall {
            config: config.config.clone(),
            signature: verification(&signature),
            signer: ctx.deployer.address(),
        },
        &ctx.config.tx,
    )
    .await?;

    let address = receipt
        .inner
        .logs()
        .iter()
        .find_map(|log| {
            log.log_decode::<HolographFactory::BridgeableContractDeployed>()
                .ok()
        })
        .map(|log| log.inner.data.contractAddress)
        .ok_or_else(|| anyhow!("{name} deployment emitted no BridgeableContractDeployed event"))?;

    tracing::info!(contract = name, %address, "Deployed holographable contract");

    Ok(address)
}
