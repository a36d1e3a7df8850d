use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "habitat",
    version,
    about = "Ecosystem health scoring and risk advisory service"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default)
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Assess one site and print the report as JSON
    Assess {
        #[arg(long, allow_hyphen_values = true)]
        lat: String,
        #[arg(long, allow_hyphen_values = true)]
        lng: String,
    },
    /// Validate config and test upstream connections
    Check,
    /// Re-run interactive setup
    Init,
}

impl Cli {
    /// Log filter for the requested verbosity, used when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "habitat=info,tower_http=info,warn",
            1 => "habitat=debug,tower_http=debug,warn",
            _ => "habitat=trace,tower_http=trace,info",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::parse_from(["habitat"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.default_log_filter(), "habitat=info,tower_http=info,warn");
    }

    #[test]
    fn assess_accepts_negative_coordinates() {
        let cli = Cli::parse_from(["habitat", "assess", "--lat", "-3.46", "--lng", "-62.21"]);
        match cli.command {
            Some(Commands::Assess { lat, lng }) => {
                assert_eq!(lat, "-3.46");
                assert_eq!(lng, "-62.21");
            }
            _ => panic!("expected assess"),
        }
    }

    #[test]
    fn verbosity_raises_filter() {
        let cli = Cli::parse_from(["habitat", "-vv", "check"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.default_log_filter().starts_with("habitat=trace"));
    }
}
