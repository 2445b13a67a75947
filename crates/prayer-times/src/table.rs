//! Prayer times read from a fixed table.
//!
//! The table is a RON file with the five times that apply on any day and
//! optional per date exceptions:
//!
//! ```ron
//! (
//!     default: ("05:12:00", "13:10:00", "16:30:00", "19:40:00", "21:05:00"),
//!     dates: {
//!         "2024-03-10": ("05:02:00", "13:09:00", "16:34:00", "19:47:00", "21:12:00"),
//!     },
//! )
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use jiff::civil::{Date, Time};
use jiff::tz::TimeZone;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{DailySchedule, EventTime, InvalidSchedule, Prayer, ScheduleProvider};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Could not read schedule table: {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not parse schedule table: {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("{prayer} at {time} can not be placed on {date}")]
    Placing {
        prayer: Prayer,
        time: Time,
        date: Date,
        #[source]
        source: jiff::Error,
    },
    #[error("The table entry for {date} is not a valid schedule")]
    Invalid {
        date: Date,
        #[source]
        source: InvalidSchedule,
    },
}

/// Times in the order of [`Prayer::ALL`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub default: [Time; 5],
    #[serde(default)]
    pub dates: BTreeMap<Date, [Time; 5]>,
}

#[derive(Debug, Clone)]
pub struct StaticTable {
    zone: TimeZone,
    table: Table,
}

impl StaticTable {
    /// The times in `table` are wall clock times in `zone`
    pub fn new(zone: TimeZone, table: Table) -> Self {
        Self { zone, table }
    }

    /// The same times every day
    pub fn every_day(zone: TimeZone, times: [Time; 5]) -> Self {
        Self::new(
            zone,
            Table {
                default: times,
                dates: BTreeMap::new(),
            },
        )
    }

    pub fn parse(
        zone: TimeZone,
        table: &str,
    ) -> Result<Self, ron::error::SpannedError> {
        Ok(Self::new(zone, ron::from_str(table)?))
    }

    pub fn from_file(path: &Path, zone: TimeZone) -> Result<Self, Error> {
        let table = std::fs::read_to_string(path).map_err(|source| {
            Error::Read {
                path: path.to_owned(),
                source,
            }
        })?;
        let this = Self::parse(zone, &table).map_err(|source| Error::Parse {
            path: path.to_owned(),
            source,
        })?;
        debug!(
            "loaded schedule table with {} exceptions from {}",
            this.table.dates.len(),
            path.display()
        );
        Ok(this)
    }

    fn event_on(&self, date: Date, prayer: Prayer) -> Result<EventTime, Error> {
        let times = self.table.dates.get(&date).unwrap_or(&self.table.default);
        let time = times[prayer as usize];
        // wall clock times inside a DST gap are moved forward
        let zoned = date
            .to_datetime(time)
            .to_zoned(self.zone.clone())
            .map_err(|source| Error::Placing {
                prayer,
                time,
                date,
                source,
            })?;
        Ok(EventTime::new(prayer, zoned))
    }
}

impl ScheduleProvider for StaticTable {
    type Error = Error;

    fn schedule(&self, date: Date) -> Result<DailySchedule, Error> {
        let [fajr, dhuhr, asr, maghrib, ishaa] =
            Prayer::ALL.map(|prayer| self.event_on(date, prayer));
        DailySchedule::new(date, [fajr?, dhuhr?, asr?, maghrib?, ishaa?])
            .map_err(|source| Error::Invalid { date, source })
    }
}
