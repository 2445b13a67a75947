use jiff::civil::Date;
use jiff::{SignedDuration, Zoned};

use crate::{DailySchedule, EventTime, Name};

/// Offset used to make up yesterday's last and tomorrow's first event
/// from today's schedule. It is 23 hours, not a day, so the made-up event
/// sits an hour closer to today than the real one would.
pub const WRAPAROUND: SignedDuration = SignedDuration::from_hours(23);

/// The event before and after some instant. Near midnight one of them is
/// made up from today's schedule, see [`WRAPAROUND`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NearestPair {
    pub previous: EventTime,
    pub next: EventTime,
}

#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("No events around {now} in the schedule for {date}")]
    NoMatch { now: Zoned, date: Date },
    #[error("Could not shift {event} to make up a wraparound event")]
    Overflow {
        event: Name,
        #[source]
        source: jiff::Error,
    },
}

/// Find the events directly before and after `now`.
///
/// An instant equal to an event's time pairs with the event before it, so
/// at exactly Dhuhr the pair is (Fajr, Dhuhr) and the distance to `next`
/// is zero. Before the first event the previous one is the last event
/// shifted back by [`WRAPAROUND`], after the last event the next one is the
/// first event shifted forward by it.
pub fn nearest(
    schedule: &DailySchedule,
    now: &Zoned,
) -> Result<NearestPair, ResolutionError> {
    let first = schedule.first();
    let last = schedule.last();

    if now <= first.time() {
        return Ok(NearestPair {
            previous: shifted(last, Name::LastOfYesterday, -WRAPAROUND)?,
            next: first.clone(),
        });
    }

    let around = schedule
        .events()
        .windows(2)
        .find(|pair| pair[0].time() < now && now <= pair[1].time());
    if let Some(pair) = around {
        return Ok(NearestPair {
            previous: pair[0].clone(),
            next: pair[1].clone(),
        });
    }

    if now > last.time() {
        return Ok(NearestPair {
            previous: last.clone(),
            next: shifted(first, Name::FirstOfTomorrow, WRAPAROUND)?,
        });
    }

    Err(ResolutionError::NoMatch {
        now: now.clone(),
        date: schedule.date(),
    })
}

fn shifted(
    event: &EventTime,
    name: Name,
    offset: SignedDuration,
) -> Result<EventTime, ResolutionError> {
    event
        .time()
        .checked_add(offset)
        .map(|time| EventTime::new(name, time))
        .map_err(|source| ResolutionError::Overflow {
            event: event.name(),
            source,
        })
}
