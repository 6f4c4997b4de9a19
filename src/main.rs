use clap::Parser;
use std::{
    fs::File,
    io::{self, BufWriter},
    process::ExitCode,
};
use tracing::{error, info, warn};

use crate::{
    cli::{Cli, Command},
    config::NetworkConfig,
    error::GenerationError,
    output::write_schedule,
    random::RandomNetwork,
    timetable::ServiceHours,
};

mod cli;
mod config;
mod data;
mod error;
mod logger;
mod output;
mod random;
mod time;
mod timetable;

fn main() -> ExitCode {
    logger::init_logger();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), GenerationError> {
    let schedule = match cli.command {
        None | Some(Command::Lines { config: None }) => {
            info!("Using built-in network");
            NetworkConfig::default().build()
        }
        Some(Command::Lines { config: Some(path) }) => {
            info!(path = %path.display(), "Loading network config");
            NetworkConfig::from_path(&path)?.build()
        }
        Some(Command::Random {
            stations,
            interval,
            travel_time,
            seed,
        }) => RandomNetwork {
            stations,
            interval,
            travel_time,
            seed,
        }
        .build(&ServiceHours::default())?,
    };

    if schedule.is_empty() {
        warn!("No hops generated; writing an empty timetable");
    }
    info!(
        stations = schedule.len(),
        hops = schedule.hop_count(),
        format = ?cli.format,
        "Writing schedule"
    );
    match &cli.output {
        Some(path) => write_schedule(&schedule, cli.format, BufWriter::new(File::create(path)?)),
        None => write_schedule(&schedule, cli.format, BufWriter::new(io::stdout().lock())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{env, fs, path::PathBuf, process};

    fn scratch_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!("timetable-gen-{}-{name}", process::id()))
    }

    fn run_with(args: &[&str]) -> Result<(), GenerationError> {
        let args: Vec<&str> = std::iter::once("timetable-gen")
            .chain(args.iter().copied())
            .collect();
        run(Cli::try_parse_from(args).unwrap())
    }

    #[test]
    fn missing_config_report_names_the_file() {
        let err = run_with(&["lines", "--config", "does/not/exist.toml"]).unwrap_err();

        let report = err.to_string();
        assert!(report.starts_with("Could not read network config \"does/not/exist.toml\": "));
        assert!(!report.contains("Os {"));
    }

    #[test]
    fn network_without_lines_writes_empty_array() {
        let config = scratch_path("empty.toml");
        let output = scratch_path("empty.json");
        fs::write(&config, "lines = []\n").unwrap();

        run_with(&[
            "lines",
            "--config",
            config.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
        ])
        .unwrap();

        assert_eq!(fs::read_to_string(&output).unwrap(), "[]");
        fs::remove_file(config).unwrap();
        fs::remove_file(output).unwrap();
    }

    #[test]
    fn overflowing_travel_time_fails_cleanly() {
        let err =
            run_with(&["random", "--stations", "2", "--travel-time", "4294967295"]).unwrap_err();

        assert!(matches!(err, GenerationError::LineTooLong { .. }));
    }
}
