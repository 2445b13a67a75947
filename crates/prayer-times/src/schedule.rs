use jiff::civil::Date;
use jiff::Zoned;

use crate::{EventTime, Name};

#[derive(Debug, thiserror::Error)]
pub enum InvalidSchedule {
    #[error("{event} falls on {found}, not on the scheduled date {date}")]
    WrongDate { event: Name, found: Date, date: Date },
    #[error("{later} at {later_time} does not come after {earlier} at {earlier_time}")]
    NotIncreasing {
        earlier: Name,
        earlier_time: Zoned,
        later: Name,
        later_time: Zoned,
    },
}

/// The five events of a single calendar date, strictly increasing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailySchedule {
    date: Date,
    events: [EventTime; 5],
}

impl DailySchedule {
    pub fn new(
        date: Date,
        events: [EventTime; 5],
    ) -> Result<Self, InvalidSchedule> {
        for event in &events {
            let found = event.time().date();
            if found != date {
                return Err(InvalidSchedule::WrongDate {
                    event: event.name(),
                    found,
                    date,
                });
            }
        }

        for pair in events.windows(2) {
            let (earlier, later) = (&pair[0], &pair[1]);
            if earlier.time() >= later.time() {
                return Err(InvalidSchedule::NotIncreasing {
                    earlier: earlier.name(),
                    earlier_time: earlier.time().clone(),
                    later: later.name(),
                    later_time: later.time().clone(),
                });
            }
        }

        Ok(Self { date, events })
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn events(&self) -> &[EventTime; 5] {
        &self.events
    }

    pub fn first(&self) -> &EventTime {
        &self.events[0]
    }

    pub fn last(&self) -> &EventTime {
        &self.events[4]
    }
}

/// Source of the daily schedule. Implementations decide where the times
/// come from (a fixed table, a calculation for some location, ...), they
/// must return exactly the events for `date`.
pub trait ScheduleProvider {
    type Error: std::error::Error + Send + Sync + 'static;

    fn schedule(&self, date: Date) -> Result<DailySchedule, Self::Error>;
}
