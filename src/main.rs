mod cli;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use rr_core::config::Config;
use tokio_util::sync::CancellationToken;

async fn start_server(
    config_path: Option<&Path>,
    root: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let mut config = Config::load_or_default(config_path);

    // CLI flags win over the file
    if let Some(root) = root {
        config.library.root = root;
    }
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    tracing::info!("Starting reelroom");
    tracing::info!(
        "Server will listen on {}:{}",
        config.server.host,
        config.server.port
    );

    rr_server::start(config, CancellationToken::new()).await?;
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = Config::load(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            Config::default()
        }
    };

    println!("  Server: {}:{}", config.server.host, config.server.port);
    println!("  Library root: {}", config.library.root.display());
    println!(
        "  Extensions: {}",
        config.library.extension_set().iter().collect::<Vec<_>>().join(", ")
    );
    match config.library.max_depth {
        Some(depth) => println!("  Max depth: {depth}"),
        None => println!("  Max depth: unbounded"),
    }
    println!("  Chunk size: {} bytes", config.stream.effective_chunk_size());

    let warnings = config.validate();
    for warning in &warnings {
        println!("⚠ {warning}");
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "reelroom=trace,rr_server=trace,rr_library=debug,rr_core=debug,tower_http=debug"
                .to_string()
        } else {
            "reelroom=info,rr_server=info,rr_library=info,rr_core=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .init();

    match cli.command {
        Commands::Start { root, host, port } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(start_server(cli.config.as_deref(), root, host, port))
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Version => {
            println!("reelroom {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
