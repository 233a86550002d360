// File: snapshot/src/main.rs
use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use snapshot::http::AgentBootstrap;
use snapshot::progress::ConsoleComponents;
use snapshot::{Cli, CommandContext, CommandTable, ConfigManager, SnapshotError, TargetLock};

fn init_logging(trace: bool) -> Result<()> {
    let crate_level = if trace { "snapshot=debug" } else { "snapshot=info" };
    let env_filter = EnvFilter::from_default_env()
        .add_directive(crate_level.parse()?)
        .add_directive("hyper=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    fmt().with_env_filter(env_filter).with_target(false).init();
    Ok(())
}

async fn run(cli: Cli) -> Result<(), SnapshotError> {
    let config_manager = ConfigManager::new(&cli.config).await?;
    let config = config_manager.get_current_config();

    let bootstrap = AgentBootstrap::new(&config.agent)?;
    let context = CommandContext::new(
        Arc::new(bootstrap),
        Arc::new(ConsoleComponents),
        TargetLock::new(config.lock_dir.clone()),
        config.agent.storage_target(),
    );
    let table = CommandTable::new();

    let (name, mut raw) = cli.command.into_invocation();
    if raw.network.is_none() {
        raw.network = config.default_network.map(|network| network.to_string());
    }

    table.dispatch(name, &context, raw).await
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.command.trace()) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    let command = cli.command.name();
    match run(cli).await {
        Ok(()) => {
            info!("{} finished successfully", command);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(kind = e.kind(), "{}", e);
            ExitCode::FAILURE
        }
    }
}
