//! Command-line argument parsing for the strata server.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Strata server command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "strata", about = "Strata voxel world server")]
pub struct CliArgs {
    /// Maximum light radius in cells.
    #[arg(long)]
    pub max_light_radius: Option<u32>,

    /// Recompute visibility whenever chunk data is loaded.
    #[arg(long)]
    pub visibility_on_load: Option<bool>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Dump occupied chunk coordinates after each step.
    #[arg(long)]
    pub dump_world: Option<bool>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(radius) = args.max_light_radius {
            self.world.max_light_radius = radius;
        }
        if let Some(on_load) = args.visibility_on_load {
            self.world.visibility_on_load = on_load;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if let Some(dump) = args.dump_world {
            self.debug.dump_world = dump;
        }
    }
}
