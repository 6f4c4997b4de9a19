use clap::{Parser, Subcommand};
use std::{num::NonZeroU32, path::PathBuf};

use crate::output::OutputFormat;

/// Generates synthetic transit timetables.
///
/// With no subcommand, the built-in Chuo line network is written as JSON.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json, global = true)]
    pub format: OutputFormat,

    /// Write to this file instead of stdout
    #[arg(long, short, global = true)]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Hops for every consecutive station pair of a set of lines
    Lines {
        /// TOML file replacing the built-in network
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Volume-test data: stations S0..S{n-1} with random destinations
    Random {
        #[arg(long, default_value_t = 10_000)]
        stations: usize,

        /// Minutes between departures
        #[arg(long, default_value = "5")]
        interval: NonZeroU32,

        /// Minutes per hop
        #[arg(long, default_value = "3")]
        travel_time: NonZeroU32,

        #[arg(long)]
        seed: Option<u64>,
    },
}
