use anyhow::Result;
use clap::Parser;
use devtools_scout::cli::Args;
use devtools_scout::{Config, launch};
use tracing_subscriber::prelude::*;

/// Filter used when `RUST_LOG` is not set
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "devtools_scout=debug"
    } else {
        "devtools_scout=info"
    }
}

fn init_tracing(verbose: bool) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(verbose).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let query = args.query();

    // verbose may come from the flag or from the config file
    let file_config = Config::load(args.config.as_deref())?;
    init_tracing(args.verbose || file_config.verbose);
    let config = args.apply_overrides(file_config);

    launch(&config, &query).await?;
    Ok(())
}
