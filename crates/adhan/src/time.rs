use std::thread;
use std::time::Duration;

use jiff::{tz::TimeZone, Timestamp, Zoned};
use tracing::info;

// Because the pi might be set to UTC, we need to manually add the tz
pub fn now(zone: &TimeZone) -> Zoned {
    Timestamp::now().to_zoned(zone.clone())
}

/// Blocks the thread, there is no way to wake it early. Returns when it
/// should have woken up, if that is representable.
pub fn sleep(duration: Duration, zone: &TimeZone) -> Option<Zoned> {
    let until = now(zone).checked_add(duration).ok();
    match &until {
        Some(until) => info!(
            "Sleeping for {} until {}",
            fmt_duration(duration),
            until.strftime("%Y-%m-%d %H:%M:%S")
        ),
        None => info!("Sleeping for {}", fmt_duration(duration)),
    }
    thread::sleep(duration);
    until
}

/// Formats as for example `2h45m` or `10s`, drops sub second precision
pub fn fmt_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, secs / 60 % 60, secs % 60);

    let mut formatted = String::new();
    for (value, unit) in [(hours, "h"), (minutes, "m"), (seconds, "s")] {
        if value > 0 {
            formatted.push_str(&format!("{value}{unit}"));
        }
    }

    if formatted.is_empty() {
        formatted.push_str("0s");
    }
    formatted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sleep_counts_from_when_it_starts() {
        let zone = TimeZone::UTC;
        let before = now(&zone);
        // some work between reading the clock and going to sleep
        thread::sleep(Duration::from_millis(50));

        let until = sleep(Duration::from_millis(10), &zone).unwrap();
        let planned = before.checked_add(Duration::from_millis(60)).unwrap();
        assert!(until >= planned, "{until} is before {planned}");
        assert!(until <= now(&zone));
    }

    #[test]
    fn test_fmt_duration() {
        let cases = [
            (0, "0s"),
            (5, "5s"),
            (92, "1m32s"),
            (60 * 60 * 2 + 45 * 60, "2h45m"),
            (60 * 60 * 23, "23h"),
            (60 * 60 * 30 + 1, "30h1s"),
        ];

        for (input, correct_output) in cases {
            assert_eq!(fmt_duration(Duration::from_secs(input)), correct_output);
        }
    }
}
