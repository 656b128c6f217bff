use super::*;

fn ts(s: &str) -> Timestamp {
    DateTime::parse_from_rfc3339(s).unwrap()
}

#[test]
fn days_in_month_handles_leap_years() {
    assert_eq!(days_in_month(2024, 2), 29);
    assert_eq!(days_in_month(2023, 2), 28);
    assert_eq!(days_in_month(1900, 2), 28);
    assert_eq!(days_in_month(2000, 2), 29);
    assert_eq!(days_in_month(2024, 12), 31);
    assert_eq!(days_in_month(2024, 4), 30);
    assert_eq!(days_in_month(2024, 13), 30);
}

#[test]
fn fields_from_datetime_read_local_calendar() {
    let f = CalendarFields::from_datetime(&ts("2024-03-15T13:45:30.500+02:00"));
    assert_eq!(f.year, 2024);
    assert_eq!(f.month, 3);
    assert_eq!(f.day, 15);
    // 2024-03-15 is a Friday.
    assert_eq!(f.weekday, 6);
    assert_eq!((f.hour, f.minute, f.second), (13, 45, 30));
    assert!((f.sub_second - 0.5).abs() < 1e-12);
    assert_eq!(f.days_in_month, 31);
}

#[test]
fn sunday_is_weekday_one() {
    let f = CalendarFields::from_datetime(&ts("2024-03-17T00:00:00Z"));
    assert_eq!(f.weekday, 1);
}

#[test]
fn sanitized_replaces_out_of_range_fields() {
    let bad = CalendarFields {
        year: 1999,
        month: 13,
        day: 0,
        weekday: 9,
        hour: 24,
        minute: 60,
        second: 61,
        sub_second: 1.5,
        days_in_month: 0,
    };
    let s = bad.sanitized();
    assert_eq!(s.year, 1999);
    assert_eq!(s.month, 1);
    assert_eq!(s.day, 1);
    assert_eq!(s.weekday, 1);
    assert_eq!((s.hour, s.minute, s.second), (0, 0, 0));
    assert_eq!(s.sub_second, 0.0);
    assert_eq!(s.days_in_month, 30);
}

#[test]
fn sanitized_clamps_day_to_month_length() {
    let f = CalendarFields {
        day: 31,
        days_in_month: 28,
        ..CalendarFields::default()
    };
    assert_eq!(f.sanitized().day, 28);
}

#[test]
fn valid_fields_survive_sanitizing() {
    let f = CalendarFields::from_datetime(&ts("2023-11-30T23:59:59.999+00:00"));
    assert_eq!(f.sanitized(), f);
}

#[test]
fn instant_offset_advances_seconds() {
    let start = ts("2024-03-15T13:45:59.750Z");
    let a = ClockInstant::at_offset(&start, 0.0);
    let b = ClockInstant::at_offset(&start, 0.5);
    assert!((b.seconds - a.seconds - 0.5).abs() < 1e-6);
    assert_eq!(b.fields.minute, 46);
    assert_eq!(b.fields.second, 0);
}

#[test]
fn fixed_clock_reports_its_timestamp() {
    let t = ts("2024-01-01T00:00:00Z");
    let now = FixedClock(t).now();
    assert_eq!(now, ClockInstant::from_datetime(&t));
    assert_eq!(now.seconds, 1_704_067_200.0);
}

#[test]
fn system_clock_tracks_wall_time() {
    let before = chrono::Utc::now().timestamp() as f64;
    let clock: &dyn TimeSource = &SystemClock;
    let now = clock.now();
    let after = chrono::Utc::now().timestamp() as f64 + 1.0;

    assert!(now.seconds >= before && now.seconds <= after);
    assert_eq!(now.fields, now.fields.sanitized());
    assert_eq!(
        now.fields.days_in_month,
        days_in_month(now.fields.year, now.fields.month)
    );
}
