#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use adhan::automation::{Automation, Player, Switch};
use jiff::civil::{date, time, Date};
use jiff::tz::TimeZone;
use jiff::Zoned;
use prayer_times::{DailySchedule, ScheduleProvider, StaticTable};

pub const DAY: Date = date(2024, 3, 10);
pub const PAUSE: Duration = Duration::from_millis(1);

/// Everything the mocks were asked to do, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Logged {
    Play,
    IsPlaying,
    SwitchOn,
    SwitchOff,
}

pub type Log = Rc<RefCell<Vec<Logged>>>;

#[derive(Debug, thiserror::Error)]
#[error("mock was told to fail")]
pub struct MockError;

/// Reports playing once right after `play` and then stops
pub struct PlayerMock {
    pub log: Log,
    pub force_playing: bool,
    pub playing: bool,
    pub fail: bool,
}

impl PlayerMock {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            force_playing: false,
            playing: false,
            fail: false,
        }
    }
}

impl Player for PlayerMock {
    type Error = MockError;

    fn play(&mut self) -> Result<(), MockError> {
        if self.fail {
            return Err(MockError);
        }
        self.playing = true;
        self.log.borrow_mut().push(Logged::Play);
        Ok(())
    }

    fn is_playing(&mut self) -> bool {
        if self.force_playing || self.playing {
            self.playing = false;
            self.log.borrow_mut().push(Logged::IsPlaying);
            true
        } else {
            false
        }
    }
}

pub struct SwitchMock {
    pub log: Log,
    pub fail_on: Option<Logged>,
}

impl SwitchMock {
    pub fn new(log: &Log) -> Self {
        Self {
            log: log.clone(),
            fail_on: None,
        }
    }

    fn act(&mut self, action: Logged) -> Result<String, MockError> {
        if self.fail_on == Some(action) {
            return Err(MockError);
        }
        self.log.borrow_mut().push(action);
        Ok("success".to_owned())
    }
}

impl Switch for SwitchMock {
    type Error = MockError;

    fn turn_on(&mut self) -> Result<String, MockError> {
        self.act(Logged::SwitchOn)
    }

    fn turn_off(&mut self) -> Result<String, MockError> {
        self.act(Logged::SwitchOff)
    }
}

/// Prayers at 09:00, 12:00, 15:00, 18:00 and 21:00 every day
pub fn prayer_times() -> StaticTable {
    StaticTable::every_day(
        TimeZone::UTC,
        [
            time(9, 0, 0, 0),
            time(12, 0, 0, 0),
            time(15, 0, 0, 0),
            time(18, 0, 0, 0),
            time(21, 0, 0, 0),
        ],
    )
}

/// Counts how often a schedule was requested
pub struct Counting {
    pub inner: StaticTable,
    pub requests: Rc<Cell<usize>>,
}

impl ScheduleProvider for Counting {
    type Error = prayer_times::table::Error;

    fn schedule(&self, date: Date) -> Result<DailySchedule, Self::Error> {
        self.requests.set(self.requests.get() + 1);
        self.inner.schedule(date)
    }
}

pub struct Unavailable;

impl ScheduleProvider for Unavailable {
    type Error = MockError;

    fn schedule(&self, _: Date) -> Result<DailySchedule, MockError> {
        Err(MockError)
    }
}

/// Always hands out the schedule of the day after the one asked for
pub struct OffByOneDay(pub StaticTable);

impl ScheduleProvider for OffByOneDay {
    type Error = prayer_times::table::Error;

    fn schedule(&self, date: Date) -> Result<DailySchedule, Self::Error> {
        self.0.schedule(date.tomorrow().unwrap())
    }
}

pub fn at(hour: i8, minute: i8) -> Zoned {
    on(DAY, hour, minute)
}

pub fn on(day: Date, hour: i8, minute: i8) -> Zoned {
    day.at(hour, minute, 0, 0).to_zoned(TimeZone::UTC).unwrap()
}

pub fn automation<T: ScheduleProvider>(
    player: PlayerMock,
    switch: SwitchMock,
    prayer_times: T,
) -> Automation<PlayerMock, SwitchMock, T> {
    logger::tracing::setup_for_tests();
    Automation::new(player, switch, prayer_times, PAUSE).unwrap()
}

pub const fn hm(hours: u64, minutes: u64) -> Duration {
    Duration::from_secs(hours * 60 * 60 + minutes * 60)
}
