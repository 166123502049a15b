//! CLI argument definitions using clap
//!
//! Commands:
//! - storefront serve --config <path> [--seed <file>]
//! - storefront query --config <path> --seed <file> --prefix <q> [--limit N] [--offset N]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Marketplace catalog service with prefix autocomplete
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the catalog, build the index and serve HTTP until Ctrl-C
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./storefront.json")]
        config: PathBuf,

        /// Seed catalog; overrides `seed_path` from the config file
        #[arg(long)]
        seed: Option<PathBuf>,
    },

    /// Index a seed catalog, run one autocomplete query and print JSON
    Query {
        /// Path to configuration file
        #[arg(long, default_value = "./storefront.json")]
        config: PathBuf,

        /// Seed catalog to index before querying
        #[arg(long)]
        seed: PathBuf,

        /// Text typed by the user
        #[arg(long)]
        prefix: String,

        #[arg(long, default_value_t = 10)]
        limit: usize,

        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["storefront", "serve", "--config", "c.json"]).unwrap();
        match cli.command {
            Command::Serve { config, seed } => {
                assert_eq!(config, PathBuf::from("c.json"));
                assert!(seed.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_query_defaults() {
        let cli = Cli::try_parse_from([
            "storefront", "query", "--seed", "s.json", "--prefix", "red",
        ])
        .unwrap();
        match cli.command {
            Command::Query {
                config,
                prefix,
                limit,
                offset,
                ..
            } => {
                assert_eq!(config, PathBuf::from("./storefront.json"));
                assert_eq!(prefix, "red");
                assert_eq!((limit, offset), (10, 0));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_query_requires_prefix() {
        assert!(Cli::try_parse_from(["storefront", "query", "--seed", "s.json"]).is_err());
    }
}
