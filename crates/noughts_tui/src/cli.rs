//! Command-line interface for noughts.

use crate::config::ConfigOverrides;
use clap::Parser;
use noughts::PlayerKind;
use std::path::PathBuf;

/// Noughts - tic-tac-toe in the terminal
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Tic-tac-toe for humans and a greedy computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (optional)
    #[arg(short, long, default_value = "noughts.toml")]
    pub config: PathBuf,

    /// Name of the X player
    #[arg(long)]
    pub x_name: Option<String>,

    /// Kind of the X player (human, scripted or computer)
    #[arg(long)]
    pub x_kind: Option<PlayerKind>,

    /// Name of the O player
    #[arg(long)]
    pub o_name: Option<String>,

    /// Kind of the O player (human, scripted or computer)
    #[arg(long)]
    pub o_kind: Option<PlayerKind>,

    /// Delay before a scripted player moves, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// File receiving log output
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Flags that replace config file values.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            x_name: self.x_name.clone(),
            x_kind: self.x_kind,
            o_name: self.o_name.clone(),
            o_kind: self.o_kind,
            delay_ms: self.delay_ms,
            log_file: self.log_file.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["noughts"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("noughts.toml"));
        assert_eq!(cli.overrides(), ConfigOverrides::default());
    }

    #[test]
    fn test_kind_flags_parse_case_insensitively() {
        let cli = Cli::try_parse_from([
            "noughts", "--x-kind", "Computer", "--o-kind", "HUMAN", "--o-name", "Ada",
            "--delay-ms", "50",
        ])
        .unwrap();
        let overrides = cli.overrides();
        assert_eq!(overrides.x_kind, Some(PlayerKind::Scripted));
        assert_eq!(overrides.o_kind, Some(PlayerKind::Human));
        assert_eq!(overrides.o_name.as_deref(), Some("Ada"));
        assert_eq!(overrides.delay_ms, Some(50));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(Cli::try_parse_from(["noughts", "--x-kind", "robot"]).is_err());
    }
}
