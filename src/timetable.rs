use itertools::Itertools;
use serde::Deserialize;
use std::{num::NonZeroU32, ops::RangeInclusive, sync::Arc};

use crate::{
    data::{Hop, Schedule, Station},
    error::GenerationError,
    time::Time,
};

/// Latest hour a service day may run to; keeps `HHMM` readings printable.
pub const MAX_SERVICE_HOUR: u32 = 99;

/// Hours of the operating day that get departures, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceHours {
    pub first: u32,
    pub last: u32,
}

impl Default for ServiceHours {
    fn default() -> Self {
        Self { first: 4, last: 24 }
    }
}

impl ServiceHours {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.first > self.last {
            return Err(GenerationError::InvalidServiceHours {
                first: self.first,
                last: self.last,
            });
        }
        if self.last > MAX_SERVICE_HOUR {
            return Err(GenerationError::ServiceHoursOutOfRange {
                last: self.last,
                max: MAX_SERVICE_HOUR,
            });
        }
        Ok(())
    }

    pub fn hours(&self) -> RangeInclusive<u32> {
        self.first..=self.last
    }
}

/// Departure offsets within an hour: 0, interval, 2 * interval, ... up to 59.
pub fn minute_steps(interval: NonZeroU32) -> impl Iterator<Item = u32> + Clone {
    (0..60).step_by(interval.get() as usize)
}

/// A line running every `interval` minutes, taking `speed` minutes per hop.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LineConfig {
    pub name: String,
    pub stations: Vec<String>,
    pub interval: NonZeroU32,
    pub speed: NonZeroU32,
}

impl LineConfig {
    pub fn new(name: &str, stations: &[&str], interval: NonZeroU32, speed: NonZeroU32) -> Self {
        Self {
            name: name.to_owned(),
            stations: stations.iter().map(|&station| station.to_owned()).collect(),
            interval,
            speed,
        }
    }

    /// Rejects lines whose last arrival offset does not fit in a `u32`.
    pub fn validate(&self) -> Result<(), GenerationError> {
        let hops = self.stations.len().saturating_sub(1);
        u32::try_from(hops)
            .ok()
            .and_then(|hops| hops.checked_mul(self.speed.get()))
            .and_then(|offset| offset.checked_add(59))
            .map(|_| ())
            .ok_or_else(|| GenerationError::LineTooLong {
                line: self.name.clone(),
                speed: self.speed.get(),
                hops,
            })
    }

    /// Appends every hop of this line to `schedule`, keeping whatever it
    /// already holds.
    pub fn generate(&self, service_hours: &ServiceHours, schedule: &mut Schedule) {
        let line: Arc<str> = Arc::from(self.name.as_str());
        let stations: Vec<Station> = self
            .stations
            .iter()
            .map(|station| Arc::from(station.as_str()))
            .collect();
        let speed = self.speed.get();

        for hour in service_hours.hours() {
            for min in minute_steps(self.interval) {
                for (i, (from, to)) in stations
                    .iter()
                    .tuple_windows::<(&Station, &Station)>()
                    .enumerate()
                {
                    let i = i as u32;
                    schedule.push(
                        from,
                        Hop {
                            station_to: Arc::clone(to),
                            line: Arc::clone(&line),
                            depart_time: Time::normalize(hour, min + i * speed),
                            arrive_time: Time::normalize(hour, min + (i + 1) * speed),
                        },
                    );
                }
            }
        }
    }
}
