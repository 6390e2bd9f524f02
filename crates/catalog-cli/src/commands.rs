use std::path::Path;

use anyhow::Context;
use colored::Colorize;

use catalog_server::{CatalogServer, ServerConfig};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    match cli.command {
        Command::Serve(args) => cmd_serve(config, args).await,
        Command::Config => cmd_config(&config),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ServerConfig> {
    match path {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(ServerConfig::default()),
    }
}

fn apply_overrides(mut config: ServerConfig, args: &ServeArgs) -> ServerConfig {
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    config
}

async fn cmd_serve(config: ServerConfig, args: ServeArgs) -> anyhow::Result<()> {
    let config = apply_overrides(config, &args);
    println!(
        "{} Catalog server on {}",
        "✓".green().bold(),
        config.bind_addr.to_string().bold()
    );
    println!("  API: {}", format!("http://{}/api/products", config.bind_addr).blue());
    CatalogServer::new(config)
        .serve()
        .await
        .context("server stopped with an error")
}

fn cmd_config(config: &ServerConfig) -> anyhow::Result<()> {
    print!("{}", config.to_toml_string()?);
    Ok(())
}
