use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use moonshot_smoke::{
    config::parse_commitment,
    constants::{ANCHOR_PROVIDER_URL_ENV, ANCHOR_TOML, ANCHOR_WALLET_ENV, MOONSHOT_PROGRAM_NAME},
    AnchorToml, ProgramRegistry, ProviderConfig, RpcConnector, SmokeRunner,
};

/// Initialize the moonshot program and print the transaction signature.
///
/// Flags fall back to the Anchor provider environment, then to the
/// `[provider]` section of `Anchor.toml`.
#[derive(Debug, Parser)]
#[command(name = "moonshot-smoke", version)]
struct Cli {
    /// Cluster moniker (localnet, devnet, ...) or RPC URL.
    #[arg(short = 'u', long, env = ANCHOR_PROVIDER_URL_ENV)]
    url: Option<String>,
    /// Path to the signer keypair.
    #[arg(short, long, env = ANCHOR_WALLET_ENV)]
    wallet: Option<String>,
    /// Commitment level to confirm at.
    #[arg(long, default_value = "confirmed")]
    commitment: String,
    /// Workspace manifest. Defaults to `Anchor.toml` in the current directory.
    #[arg(long)]
    anchor_toml: Option<PathBuf>,
    /// Workspace name of the program to initialize.
    #[arg(long, default_value = MOONSHOT_PROGRAM_NAME)]
    program: String,
    /// Fetch and print the global settings account after initializing.
    #[arg(long)]
    show_global: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let cli = Cli::parse();

    let manifest = match &cli.anchor_toml {
        Some(path) => Some(AnchorToml::load(path)?),
        None => AnchorToml::discover(std::env::current_dir()?)
            .with_context(|| format!("reading {ANCHOR_TOML}"))?,
    };
    let provider = manifest.as_ref().and_then(|m| m.provider.as_ref());

    let config = ProviderConfig::layered(cli.url.as_deref(), cli.wallet.as_deref(), provider)?
        .with_commitment(parse_commitment(&cli.commitment)?);
    let registry = match &manifest {
        Some(manifest) => ProgramRegistry::from_anchor_toml(manifest, &config.cluster)?,
        None => ProgramRegistry::default(),
    };

    let runner = SmokeRunner::new(config, RpcConnector)
        .with_registry(registry)
        .with_program(cli.program);

    // The signature is reported by the runner's INFO log line
    runner.run().await?;

    if cli.show_global {
        match runner.inspect_global().await? {
            Some(global) => println!("{global:#?}"),
            None => println!("global settings account not found"),
        }
    }

    Ok(())
}
