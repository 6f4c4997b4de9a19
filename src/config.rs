use serde::Deserialize;
use std::{fs, num::NonZeroU32, path::Path};
use tracing::{debug, info};

use crate::{
    data::Schedule,
    error::GenerationError,
    timetable::{LineConfig, ServiceHours},
};

/// The lines to generate and the hours they run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkConfig {
    #[serde(default)]
    pub service_hours: ServiceHours,
    pub lines: Vec<LineConfig>,
}

fn every(minutes: u32) -> NonZeroU32 {
    NonZeroU32::new(minutes).unwrap_or(NonZeroU32::MIN)
}

impl Default for NetworkConfig {
    /// Inbound Chuo line services into Shinjuku, plus the Tozai and Yamanote
    /// segments that link them.
    fn default() -> Self {
        let lines = vec![
            LineConfig::new(
                "中央線快速（上り）",
                &[
                    "立川",
                    "国立",
                    "西国分寺",
                    "国分寺",
                    "武蔵小金井",
                    "東小金井",
                    "武蔵境",
                    "三鷹",
                    "吉祥寺",
                    "西荻窪",
                    "荻窪",
                    "阿佐ヶ谷",
                    "高円寺",
                    "中野",
                    "新宿",
                ],
                every(10),
                every(3),
            ),
            LineConfig::new(
                "中央特快（上り）",
                &["立川", "国分寺", "三鷹", "中野", "新宿"],
                every(25),
                every(6),
            ),
            LineConfig::new("東西線", &["中野", "落合", "高田馬場"], every(10), every(5)),
            LineConfig::new(
                "山手線（内回り）",
                &[
                    "高田馬場",
                    "新大久保",
                    "新宿",
                    "代々木",
                    "原宿",
                    "渋谷",
                    "恵比寿",
                    "目黒",
                ],
                every(5),
                every(3),
            ),
        ];

        Self {
            service_hours: ServiceHours::default(),
            lines,
        }
    }
}

impl NetworkConfig {
    pub fn from_toml(source: &str) -> Result<Self, GenerationError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        self.service_hours.validate()?;
        self.lines.iter().try_for_each(LineConfig::validate)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, GenerationError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| GenerationError::ReadConfig {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&source)
    }

    /// Runs every line, in order, into one schedule.
    pub fn build(&self) -> Schedule {
        let mut schedule = Schedule::new();
        for line in &self.lines {
            info!(
                line = %line.name,
                stations = line.stations.len(),
                interval = line.interval.get(),
                speed = line.speed.get(),
                "Generating line"
            );
            line.generate(&self.service_hours, &mut schedule);
        }
        debug!(
            stations = schedule.len(),
            hops = schedule.hop_count(),
            "Schedule built"
        );
        schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_network_matches_known_counts() {
        let config = NetworkConfig::default();
        assert_eq!(config.lines.len(), 4);
        assert_eq!(config.service_hours, ServiceHours::default());

        let schedule = config.build();
        // 14 hops * 6 steps + 4 * 3 + 2 * 6 + 7 * 12, over 21 hours
        assert_eq!(schedule.hop_count(), 21 * (14 * 6 + 4 * 3 + 2 * 6 + 7 * 12));

        let first = schedule.iter().next().unwrap();
        assert_eq!(first.station.as_ref(), "立川");
        assert!(schedule.station("目黒").is_none());
    }

    #[test]
    fn interchange_stations_collect_every_line() {
        let schedule = NetworkConfig::default().build();

        let nakano = schedule.station("中野").unwrap();
        let lines: Vec<&str> = nakano.iter().map(|hop| hop.line.as_ref()).collect();
        assert!(lines.contains(&"中央線快速（上り）"));
        assert!(lines.contains(&"中央特快（上り）"));
        assert!(lines.contains(&"東西線"));
        assert_eq!(nakano.len(), 21 * (6 + 3 + 6));

        let shinjuku = schedule.station("新宿").unwrap();
        assert!(shinjuku
            .iter()
            .all(|hop| hop.line.as_ref() == "山手線（内回り）"));
    }

    #[test]
    fn parses_toml_network() {
        let config = NetworkConfig::from_toml(
            r#"
            [service_hours]
            first = 5
            last = 6

            [[lines]]
            name = "東西線"
            stations = ["中野", "落合", "高田馬場"]
            interval = 10
            speed = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.service_hours, ServiceHours { first: 5, last: 6 });
        assert_eq!(config.lines[0].stations, ["中野", "落合", "高田馬場"]);
        assert_eq!(config.build().hop_count(), 2 * 6 * 2);
    }

    #[test]
    fn service_hours_default_when_omitted() {
        let config = NetworkConfig::from_toml(
            r#"
            [[lines]]
            name = "L"
            stations = ["A", "B"]
            interval = 30
            speed = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.service_hours, ServiceHours::default());
    }

    #[test]
    fn rejects_zero_interval() {
        let result = NetworkConfig::from_toml(
            r#"
            [[lines]]
            name = "L"
            stations = ["A", "B"]
            interval = 0
            speed = 2
            "#,
        );

        assert!(matches!(result, Err(GenerationError::ParseConfig(_))));
    }

    #[test]
    fn rejects_inverted_service_hours() {
        let result = NetworkConfig::from_toml(
            r#"
            lines = []

            [service_hours]
            first = 20
            last = 4
            "#,
        );

        assert!(matches!(
            result,
            Err(GenerationError::InvalidServiceHours { first: 20, last: 4 })
        ));
    }

    #[test]
    fn rejects_speed_that_overflows_minutes() {
        let result = NetworkConfig::from_toml(
            r#"
            [service_hours]
            first = 4
            last = 4

            [[lines]]
            name = "L"
            stations = ["A", "B", "C"]
            interval = 30
            speed = 3000000000
            "#,
        );

        match result {
            Err(GenerationError::LineTooLong { line, hops, .. }) => {
                assert_eq!(line, "L");
                assert_eq!(hops, 2);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn rejects_service_hours_near_u32_max() {
        let result = NetworkConfig::from_toml(
            r#"
            [service_hours]
            first = 4294967295
            last = 4294967295

            [[lines]]
            name = "L"
            stations = ["A", "B"]
            interval = 30
            speed = 60
            "#,
        );

        assert!(matches!(
            result,
            Err(GenerationError::ServiceHoursOutOfRange {
                last: 4294967295,
                max: 99
            })
        ));
    }

    #[test]
    fn builtin_network_is_valid() {
        assert!(NetworkConfig::default().validate().is_ok());
    }

    #[test]
    fn missing_file_reports_path() {
        let result = NetworkConfig::from_path("does/not/exist.toml");
        match result {
            Err(GenerationError::ReadConfig { path, .. }) => {
                assert_eq!(path, Path::new("does/not/exist.toml"))
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
