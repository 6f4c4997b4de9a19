use std::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::GenerationError;

/// A clock reading within one operating day.
///
/// Hours are not wrapped at midnight: the last departures of a day run as
/// `2400`, `2405`, ... just like printed transit timetables do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time {
    pub hour: u32,
    pub min: u32,
}

impl Time {
    /// Carries whole hours out of `min`, so `(4, 65)` becomes 05:05.
    pub fn normalize(hour: u32, min: u32) -> Self {
        Self {
            hour: hour + min / 60,
            min: min % 60,
        }
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}", self.hour, self.min)
    }
}

impl FromStr for Time {
    type Err = GenerationError;

    /// Reads `HHMM`; the hour part may be longer than two digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GenerationError::InvalidTime(s.to_owned());
        if s.len() < 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let (hour, min) = s.split_at(s.len() - 2);
        let hour: u32 = hour.parse().map_err(|_| invalid())?;
        let min: u32 = min.parse().map_err(|_| invalid())?;
        if min >= 60 {
            return Err(invalid());
        }
        Ok(Self { hour, min })
    }
}

impl Serialize for Time {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Time {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(de::Error::custom)
    }
}
