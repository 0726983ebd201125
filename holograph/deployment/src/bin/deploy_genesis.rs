//! Deploys the `HolographGenesis` contract on the configured network, unless
//! the deployments file already points at a live instance.
//!
//! The deployer is derived from `EVM_MNEMONIC`, which can be set in a `.env`
//! file at the repository root.

use {
    clap::Parser,
    dotenvy::dotenv,
    holograph_deployment::{setup::Context, steps::genesis::ensure_genesis},
    std::path::PathBuf,
};

#[derive(Parser)]
#[command(name = "deploy_genesis")]
#[command(about = "Deploys the Holograph genesis contract")]
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

    let address = ensure_genesis(&mut ctx).await?;

    println!("HolographGenesis: {address}");

    Ok(())
}
