//! The five daily prayer times and how "now" relates to them.
//!
//! A [`DailySchedule`] holds the events of one calendar date. Where it comes
//! from is up to a [`ScheduleProvider`], [`StaticTable`] reads them from a
//! table on disk. [`nearest`] finds the events around an instant and
//! [`distance`] measures how far away they are.

mod event;
mod nearest;
mod schedule;
pub mod table;

pub use event::{distance, EventTime, Name, Prayer};
pub use nearest::{nearest, NearestPair, ResolutionError, WRAPAROUND};
pub use schedule::{DailySchedule, InvalidSchedule, ScheduleProvider};
pub use table::{StaticTable, Table};
