//! Deploys the LayerZero messaging module and its Optimism gas price oracle
//! through the genesis contract, then registers the module with the operator
//! and brings its per-chain gas parameters up to date.

use {
    clap::Parser,
    dotenvy::dotenv,
    holograph_deployment::{setup::Context, steps::layer_zero_module::deploy_layer_zero_module},
    std::path::PathBuf,
};

#[derive(Parser)]
#[command(name = "deploy_layer_zero_module")]
#[command(about = "Deploys and configures the LayerZero messaging module")]
struct Args {
    /// Path to the deployment config file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let args = Args::parse();
    let mut ctx = Context::load(&args.config)?;

    let module = deploy_layer_zero_module(&mut ctx).await?;

    println!("LayerZeroModule: {module}");

    Ok(())
}
