mod cli;

use clap::Parser;
use cli::{Cli, Commands, IndexArgs, ServeArgs};
use html_import::{server, IndexBuilder, IndexConfig, ServerConfig};
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging on stderr; RUST_LOG overrides the verbosity flag
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Commands::Serve(args) => handle_serve_command(args).await,
        Commands::Index(args) => handle_index_command(args),
    };

    if let Err(e) = result {
        error!("Operation failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

async fn handle_serve_command(args: &ServeArgs) -> anyhow::Result<()> {
    let config = ServerConfig {
        host: args.host.clone(),
        port: args.port,
        export_root: args.export_dir.clone(),
    };

    server::run_server(config).await
}

fn handle_index_command(args: &IndexArgs) -> anyhow::Result<()> {
    let root = PathBuf::from(shellexpand::tilde(&args.root).into_owned());
    info!("Indexing markdown under {}", root.display());

    let config = IndexConfig {
        root,
        max_depth: args.max_depth,
        index_name: args.index_name.clone(),
    };

    let report = IndexBuilder::build(&config)?;

    println!("{}", IndexBuilder::render_report(&report));

    Ok(())
}
