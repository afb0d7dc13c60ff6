//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// hexsphere command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "hexsphere", about = "Geodesic hex grid tools")]
pub struct CliArgs {
    /// Grid subdivision frequency.
    #[arg(long)]
    pub frequency: Option<u32>,

    /// Cell inset blend for the projected mesh (0.0 - 1.0).
    #[arg(long)]
    pub cell_inset: Option<f32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(frequency) = args.frequency {
            self.grid.frequency = frequency;
        }
        if let Some(inset) = args.cell_inset {
            self.grid.cell_inset = inset;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
