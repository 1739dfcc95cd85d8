use anyhow::Result;
use clap::Parser;
use helpdeck::{config, remote, tui};

#[derive(Parser, Debug)]
#[command(name = "helpdeck")]
#[command(about = "Terminal dashboard for a helpdesk ticket queue")]
#[command(version)]
struct Args {
    /// Initialize configuration
    #[arg(long)]
    init: bool,

    /// Check that the ticket service is reachable, then exit
    #[arg(long)]
    check: bool,

    /// Path to config file
    #[arg(long, short)]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("helpdeck=info".parse()?),
        )
        .init();

    if args.init {
        config::init_wizard().await?;
        return Ok(());
    }

    let config = config::load(args.config.as_deref())?;

    if args.check {
        remote::check_health(&config)
            .await
            .map_err(|e| anyhow::anyhow!("health check failed: {}", e))?;
        println!("ok: {} is reachable", config.server.base_url);
        return Ok(());
    }

    // Run TUI
    tui::run(config).await
}
