use std::fmt;
use std::time::Duration;

use jiff::Zoned;
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum Prayer {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Ishaa,
}

impl Prayer {
    /// In the order they happen during the day
    pub const ALL: [Prayer; 5] = [
        Prayer::Fajr,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Ishaa,
    ];
}

/// What an [`EventTime`] stands for. The last two only appear as the
/// stand-in neighbour of the first or last prayer near midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Name {
    Prayer(Prayer),
    LastOfYesterday,
    FirstOfTomorrow,
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Name::Prayer(prayer) => write!(f, "{prayer}"),
            Name::LastOfYesterday => f.write_str("last-of-yesterday"),
            Name::FirstOfTomorrow => f.write_str("first-of-tomorrow"),
        }
    }
}

impl From<Prayer> for Name {
    fn from(prayer: Prayer) -> Self {
        Name::Prayer(prayer)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTime {
    name: Name,
    time: Zoned,
}

impl EventTime {
    pub fn new(name: impl Into<Name>, time: Zoned) -> Self {
        Self {
            name: name.into(),
            time,
        }
    }

    pub fn name(&self) -> Name {
        self.name
    }

    pub fn time(&self) -> &Zoned {
        &self.time
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.time.strftime("%Y-%m-%d %H:%M"))
    }
}

/// Time between `now` and the event, regardless of which one comes first.
pub fn distance(event: &EventTime, now: &Zoned) -> Duration {
    now.duration_since(event.time()).unsigned_abs()
}
