use serde::{ser::SerializeSeq, Deserialize, Deserializer, Serialize, Serializer};
use std::{collections::HashMap, sync::Arc};

use crate::time::Time;

pub type Station = Arc<str>;

/// One scheduled movement to the next station of a line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hop {
    pub station_to: Station,
    pub line: Arc<str>,
    pub depart_time: Time,
    pub arrive_time: Time,
}

/// Every hop departing from one station, in generation order.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationTimetable {
    pub station: Station,
    pub rows: Vec<Hop>,
}

impl StationTimetable {
    fn new(station: Station) -> Self {
        Self {
            station,
            rows: Vec::default(),
        }
    }
}

/// Hops grouped by origin station.
///
/// Stations keep the order in which their first hop was pushed, and rows are
/// only ever appended, so several lines sharing a station end up in one list.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Schedule {
    stations: Vec<StationTimetable>,
    index: HashMap<Station, usize>,
}

impl Schedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows for `station`, starting an empty list when the station is new.
    pub fn rows_mut(&mut self, station: &Station) -> &mut Vec<Hop> {
        let stations = &mut self.stations;
        let position = *self
            .index
            .entry(Arc::clone(station))
            .or_insert_with(|| {
                stations.push(StationTimetable::new(Arc::clone(station)));
                stations.len() - 1
            });

        &mut self.stations[position].rows
    }

    pub fn push(&mut self, from: &Station, hop: Hop) {
        self.rows_mut(from).push(hop);
    }

    #[cfg(test)]
    pub fn station(&self, station: &str) -> Option<&[Hop]> {
        self.index
            .get(station)
            .map(|&position| self.stations[position].rows.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &StationTimetable> {
        self.stations.iter()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    pub fn hop_count(&self) -> usize {
        self.stations.iter().map(|station| station.rows.len()).sum()
    }
}

impl Serialize for Schedule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.stations.len()))?;
        for station in &self.stations {
            seq.serialize_element(station)?;
        }
        seq.end()
    }
}

/// Reads the `[{ station, rows }]` array back; repeated stations merge.
impl<'de> Deserialize<'de> for Schedule {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut schedule = Schedule::new();
        for timetable in Vec::<StationTimetable>::deserialize(deserializer)? {
            schedule
                .rows_mut(&timetable.station)
                .extend(timetable.rows);
        }
        Ok(schedule)
    }
}
