//! Deploys the sample holographable contracts (`SampleERC20`, `SampleERC721`
//! and `CxipERC721Proxy`) through the Holograph factory. Only runs against
//! local networks.

use {
    clap::Parser,
    dotenvy::dotenv,
    holograph_deployment::{setup::Context, steps::samples::deploy_samples},
    std::path::PathBuf,
};

#[derive(Parser)]
#[command(name = "deploy_samples")]
#[command(about = "Deploys sample holographable contracts on a local network")]
struct Args {
    /// Path to the deployment config file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let args = Args::parse();
    let ctx = Context::load(&args.config)?;

    deploy_samples(&ctx).await
}
