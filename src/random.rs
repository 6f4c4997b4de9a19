use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{num::NonZeroU32, sync::Arc};
use tracing::{debug, info};

use crate::{
    data::{Hop, Schedule, Station},
    error::GenerationError,
    time::Time,
    timetable::{minute_steps, ServiceHours},
};

pub const RANDOM_LINE: &str = "random";

/// A volume-test network of stations `S0..S{n-1}` with arbitrary connections.
#[derive(Debug, Clone)]
pub struct RandomNetwork {
    pub stations: usize,
    pub interval: NonZeroU32,
    pub travel_time: NonZeroU32,
    pub seed: Option<u64>,
}

impl Default for RandomNetwork {
    fn default() -> Self {
        Self {
            stations: 10_000,
            interval: NonZeroU32::new(5).unwrap_or(NonZeroU32::MIN),
            travel_time: NonZeroU32::new(3).unwrap_or(NonZeroU32::MIN),
            seed: None,
        }
    }
}

impl RandomNetwork {
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.travel_time.get().checked_add(59).is_none() {
            return Err(GenerationError::LineTooLong {
                line: RANDOM_LINE.to_owned(),
                speed: self.travel_time.get(),
                hops: 1,
            });
        }
        Ok(())
    }

    pub fn build(&self, service_hours: &ServiceHours) -> Result<Schedule, GenerationError> {
        service_hours.validate()?;
        self.validate()?;

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        info!(
            stations = self.stations,
            interval = self.interval.get(),
            seed = ?self.seed,
            "Generating random network"
        );

        let mut schedule = Schedule::new();
        self.generate(service_hours, &mut rng, &mut schedule);
        debug!(hops = schedule.hop_count(), "Schedule built");
        Ok(schedule)
    }

    /// For every departure slot, every station gets one hop to a station
    /// drawn uniformly from the whole label space (itself included).
    pub fn generate<R: Rng>(
        &self,
        service_hours: &ServiceHours,
        rng: &mut R,
        schedule: &mut Schedule,
    ) {
        if self.stations == 0 {
            return;
        }

        let labels: Vec<Station> = (0..self.stations)
            .map(|i| Arc::from(format!("S{i}")))
            .collect();
        let line: Arc<str> = Arc::from(RANDOM_LINE);
        let travel_time = self.travel_time.get();

        for hour in service_hours.hours() {
            for min in minute_steps(self.interval) {
                for from in &labels {
                    let to = &labels[rng.random_range(0..labels.len())];
                    schedule.push(
                        from,
                        Hop {
                            station_to: Arc::clone(to),
                            line: Arc::clone(&line),
                            depart_time: Time::normalize(hour, min),
                            arrive_time: Time::normalize(hour, min + travel_time),
                        },
                    );
                }
            }
        }
    }
}
