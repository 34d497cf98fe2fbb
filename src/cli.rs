use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "reelroom")]
#[command(author, version, about = "Browse a local media tree and stream it over HTTP")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the media library
    Start {
        /// Library root to serve (overrides `library.root`)
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Host to bind to (overrides `server.host`)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides `server.port`)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn start_overrides_are_optional() {
        let cli = Cli::try_parse_from(["reelroom", "start"]).unwrap();
        match cli.command {
            Commands::Start { root, host, port } => {
                assert!(root.is_none());
                assert!(host.is_none());
                assert!(port.is_none());
            }
            _ => panic!("expected start"),
        }
    }

    #[test]
    fn start_parses_overrides() {
        let cli = Cli::try_parse_from([
            "reelroom", "-v", "start", "--root", "/srv/media", "--host", "127.0.0.1", "-p", "8080",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Start { root, host, port } => {
                assert_eq!(root, Some(PathBuf::from("/srv/media")));
                assert_eq!(host.as_deref(), Some("127.0.0.1"));
                assert_eq!(port, Some(8080));
            }
            _ => panic!("expected start"),
        }
    }
}
