use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

use crate::{data::Schedule, error::GenerationError, time::Time};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Array of `{ station, rows }` objects
    #[default]
    Json,
    /// One flat record per hop
    Csv,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    station: &'a str,
    station_to: &'a str,
    line: &'a str,
    depart_time: Time,
    arrive_time: Time,
}

pub fn write_schedule<W: Write>(
    schedule: &Schedule,
    format: OutputFormat,
    mut writer: W,
) -> Result<(), GenerationError> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer(&mut writer, schedule)?;
            writer.flush()?;
        }
        OutputFormat::Csv => {
            let mut csv_writer = csv::Writer::from_writer(writer);
            for timetable in schedule.iter() {
                for hop in &timetable.rows {
                    csv_writer.serialize(CsvRow {
                        station: &timetable.station,
                        station_to: &hop.station_to,
                        line: &hop.line,
                        depart_time: hop.depart_time,
                        arrive_time: hop.arrive_time,
                    })?;
                }
            }
            csv_writer.flush()?;
        }
    }
    Ok(())
}
