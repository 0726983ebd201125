use {
    alloy::primitives::Address,
    clap::Parser,
    dotenvy::dotenv,
    holograph_deployment::{
        gas::GasParameters,
        setup::Context,
        steps::layer_zero_module::{LAYER_ZERO_MODULE, check_gas_parameters},
    },
    std::path::PathBuf,
};

#[derive(Parser)]
#[command(name = "check_gas_parameters")]
#[command(about = "Prints the gas parameter updates the LayerZero module needs")]
struct Args {
    /// Path to the deployment config file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Module address, if not the one in the deployments file
    #[arg(long)]
    module: Option<Address>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let args = Args::parse();
    let ctx = Context::load(&args.config)?;

    let module = match args.module {
        Some(module) => module,
        None => ctx.contract(LAYER_ZERO_MODULE)?,
    };

    let batch = check_gas_parameters(&ctx, module).await?;

    if batch.is_empty() {
        println!("All gas parameters of {module} are up to date");
        return Ok(());
    }

    println!("{} gas parameter entries of {module} need updating:", batch.len());

    for (chain_id, params) in batch.iter() {
        let values = params
            .to_array()
            .iter()
            .zip(GasParameters::FIELDS)
            .map(|(value, field)| format!("{field}={value}"))
            .collect::<Vec<_>>()
            .join(" ");

        println!("  {chain_id:>10}  {values}");
    }

    Ok(())
}
