//! Decides, once per cycle, whether the speaker should be switched and the
//! adhan played, and how long the loop may sleep before deciding again.
//!
//! The speaker switch is the source of truth for whether the speaker is on,
//! we do not track it. It is switched on (or off) again on every cycle that
//! needs it on (or off).

use std::fmt;
use std::thread;
use std::time::Duration;

use jiff::civil::Date;
use jiff::Zoned;
use prayer_times::{
    distance, nearest, DailySchedule, ResolutionError, ScheduleProvider,
};
use tracing::{debug, info, instrument};

use crate::time::fmt_duration;

/// How long to wait before checking again while the adhan plays
pub const REPLAY_CHECK: Duration = Duration::from_secs(5 * 60);
/// Sleep while close to a prayer
pub const TICK: Duration = Duration::from_secs(60);
/// A prayer that started less than this long ago still gets its adhan
pub const PLAY_WINDOW: Duration = Duration::from_secs(2 * 60);
/// Wake up this long before a prayer and then tick till it starts
pub const LEAD: Duration = Duration::from_secs(5 * 60);
/// Time the adhan plays during the self test
pub const SELF_TEST_SETTLE: Duration = Duration::from_secs(20);

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The remote switch powering the speaker. Switching on an already on
/// switch is not an error.
pub trait Switch {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Returns whatever the switch acknowledged with
    fn turn_on(&mut self) -> Result<String, Self::Error>;
    /// Returns whatever the switch acknowledged with
    fn turn_off(&mut self) -> Result<String, Self::Error>;
}

pub trait Player {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Start playing from the beginning
    fn play(&mut self) -> Result<(), Self::Error>;
    fn is_playing(&mut self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SwitchOn,
    SwitchOff,
    Play,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::SwitchOn => f.write_str("switch the speaker on"),
            Action::SwitchOff => f.write_str("switch the speaker off"),
            Action::Play => f.write_str("play the adhan"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Got the schedule for {got} instead")]
pub struct WrongDate {
    pub got: Date,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("The speaker pause must be longer than zero")]
    InvalidPause,
    #[error("Could not get the prayer times for {date}")]
    ScheduleUnavailable {
        date: Date,
        #[source]
        source: BoxError,
    },
    #[error("Could not find the prayers around now")]
    Resolution(#[from] ResolutionError),
    #[error("Could not {action}")]
    ActionFailed {
        action: Action,
        #[source]
        source: BoxError,
    },
}

impl Error {
    fn action(
        action: Action,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::ActionFailed {
            action,
            source: Box::new(source),
        }
    }
}

/// Call [`run`](Automation::run) then sleep for what it returns, forever.
///
/// Everything takes `&mut self`, to share an `Automation` between threads
/// put it behind a single lock held for a whole cycle.
pub struct Automation<P, S, T> {
    player: P,
    switch: S,
    prayer_times: T,
    speaker_pause: Duration,
    /// only refetched when the date changes
    schedule: Option<DailySchedule>,
}

impl<P, S, T> fmt::Debug for Automation<P, S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Automation")
            .field("speaker_pause", &self.speaker_pause)
            .field("schedule_date", &self.schedule.as_ref().map(|s| s.date()))
            .finish_non_exhaustive()
    }
}

impl<P, S, T> Automation<P, S, T>
where
    P: Player,
    S: Switch,
    T: ScheduleProvider,
{
    /// `speaker_pause` is the time between switching the speaker on and
    /// starting the adhan, it gives the speaker time to power up.
    pub fn new(
        player: P,
        switch: S,
        prayer_times: T,
        speaker_pause: Duration,
    ) -> Result<Self, Error> {
        if speaker_pause.is_zero() {
            return Err(Error::InvalidPause);
        }

        Ok(Self {
            player,
            switch,
            prayer_times,
            speaker_pause,
            schedule: None,
        })
    }

    /// One decision cycle, returns how long to sleep till the next.
    ///
    /// Uses the calendar date of `now` in its own time zone to pick the
    /// schedule. If any switch or play action fails nothing is returned and
    /// the caller decides whether to give up or retry later.
    #[instrument(skip_all, fields(now = %now.strftime("%Y-%m-%d %H:%M:%S")))]
    pub fn run(&mut self, now: &Zoned) -> Result<Duration, Error> {
        if self.player.is_playing() {
            debug!("Adhan is still playing");
            return Ok(REPLAY_CHECK);
        }

        let schedule = self.schedule_for(now.date())?;
        let pair = nearest(schedule, now)?;
        let since_previous = distance(&pair.previous, now);
        let till_next = distance(&pair.next, now);
        info!("Time left till {}: {}", pair.next, fmt_duration(till_next));

        if since_previous < PLAY_WINDOW || till_next.is_zero() {
            self.switch_on_and_play()?;
            return Ok(TICK);
        }

        if till_next > LEAD {
            self.switch
                .turn_off()
                .map_err(|e| Error::action(Action::SwitchOff, e))?;
            return Ok(till_next - LEAD);
        }

        Ok(TICK)
    }

    /// Goes through every action once: switch on, play, wait for `settle`
    /// then switch off. Stops at the first action that fails.
    #[instrument(skip(self))]
    pub fn validate_all_actions(
        &mut self,
        settle: Duration,
    ) -> Result<(), Error> {
        self.switch_on_and_play()?;
        thread::sleep(settle);
        self.switch
            .turn_off()
            .map_err(|e| Error::action(Action::SwitchOff, e))?;
        info!("Switching the speaker and playing the adhan works");
        Ok(())
    }

    fn switch_on_and_play(&mut self) -> Result<(), Error> {
        self.switch
            .turn_on()
            .map_err(|e| Error::action(Action::SwitchOn, e))?;
        thread::sleep(self.speaker_pause);
        self.player
            .play()
            .map_err(|e| Error::action(Action::Play, e))?;
        info!("Playing the adhan");
        Ok(())
    }

    fn schedule_for(&mut self, date: Date) -> Result<&DailySchedule, Error> {
        match self.schedule.take() {
            Some(cached) if cached.date() == date => {
                Ok(&*self.schedule.insert(cached))
            }
            _ => {
                let fresh = self.fetch_schedule(date)?;
                Ok(&*self.schedule.insert(fresh))
            }
        }
    }

    fn fetch_schedule(&self, date: Date) -> Result<DailySchedule, Error> {
        let unavailable = |source: BoxError| Error::ScheduleUnavailable {
            date,
            source,
        };

        let schedule = self
            .prayer_times
            .schedule(date)
            .map_err(|e| unavailable(Box::new(e)))?;
        if schedule.date() != date {
            let got = schedule.date();
            return Err(unavailable(Box::new(WrongDate { got })));
        }

        let events: Vec<_> =
            schedule.events().iter().map(ToString::to_string).collect();
        info!("Prayer times for {date}: {}", events.join(", "));
        Ok(schedule)
    }
}
