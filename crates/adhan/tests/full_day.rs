use std::time::Duration;

mod common;
use common::{
    at, automation, hm, on, prayer_times, Log, Logged, PlayerMock,
    SwitchMock, DAY,
};

#[test]
fn from_night_till_next_afternoon() {
    use Logged::{IsPlaying, Play, SwitchOff, SwitchOn};

    let log = Log::default();
    let mut automation =
        automation(PlayerMock::new(&log), SwitchMock::new(&log), prayer_times());

    let mut now = at(1, 4);
    let mut slept = Duration::ZERO;
    for _ in 0..60 {
        let sleep = automation.run(&now).unwrap();
        slept += sleep;
        now = now.checked_add(sleep).unwrap();
    }

    assert_eq!(slept, hm(37, 53));
    assert_eq!(now, on(DAY.tomorrow().unwrap(), 14, 57));

    let adhan = [SwitchOn, Play, IsPlaying, SwitchOff];
    let mut expected = vec![SwitchOff];
    for _ in 0..5 {
        expected.extend(adhan);
    }
    expected.push(SwitchOff);
    for _ in 0..2 {
        expected.extend(adhan);
    }
    assert_eq!(*log.borrow(), expected);
}

#[test]
fn one_adhan_per_prayer_for_a_week() {
    let log = Log::default();
    let mut automation =
        automation(PlayerMock::new(&log), SwitchMock::new(&log), prayer_times());

    let end = on(DAY.checked_add(jiff::Span::new().days(7)).unwrap(), 0, 0);
    let mut now = at(0, 0);
    while now < end {
        let sleep = automation.run(&now).unwrap();
        assert!(!sleep.is_zero(), "the loop must never spin");
        now = now.checked_add(sleep).unwrap();
    }

    let count = |action| log.borrow().iter().filter(|a| **a == action).count();
    assert_eq!(count(Logged::Play), 5 * 7);
    assert_eq!(count(Logged::SwitchOn), 5 * 7);
}
