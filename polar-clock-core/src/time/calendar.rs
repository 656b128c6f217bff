use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, TimeZone, Timelike};

/// Absolute timestamp with a known UTC offset, the unit the render pipeline steps through.
pub type Timestamp = DateTime<FixedOffset>;

const DEFAULT_YEAR: i32 = 2024;
const DEFAULT_DAYS_IN_MONTH: u32 = 30;

/// Calendar fields feeding the time decomposer.
///
/// `weekday` counts from Sunday (`1`) to Saturday (`7`).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CalendarFields {
    /// Calendar year.
    pub year: i32,
    /// Month, `1..=12`.
    pub month: u32,
    /// Day of month, `1..=days_in_month`.
    pub day: u32,
    /// Day of week, `1..=7` with `1` = Sunday.
    pub weekday: u32,
    /// Hour, `0..=23`.
    pub hour: u32,
    /// Minute, `0..=59`.
    pub minute: u32,
    /// Second, `0..=59`.
    pub second: u32,
    /// Fraction of the current second, `[0, 1)`.
    pub sub_second: f64,
    /// Number of days in `month` of `year`.
    pub days_in_month: u32,
}

impl Default for CalendarFields {
    fn default() -> Self {
        Self {
            year: DEFAULT_YEAR,
            month: 1,
            day: 1,
            weekday: 1,
            hour: 0,
            minute: 0,
            second: 0,
            sub_second: 0.0,
            days_in_month: DEFAULT_DAYS_IN_MONTH,
        }
    }
}

impl CalendarFields {
    /// Read the calendar fields of `dt` in its own time zone.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        let year = dt.year();
        let month = dt.month();
        // chrono reports leap seconds as nanosecond values >= 1e9.
        let nanos = dt.nanosecond().min(999_999_999);
        Self {
            year,
            month,
            day: dt.day(),
            weekday: dt.weekday().number_from_sunday(),
            hour: dt.hour(),
            minute: dt.minute(),
            second: dt.second().min(59),
            sub_second: f64::from(nanos) / 1_000_000_000.0,
            days_in_month: days_in_month(year, month),
        }
    }

    /// Replace out-of-range fields with safe defaults so the decomposer can assume valid input.
    pub fn sanitized(self) -> Self {
        let d = Self::default();
        let month = if (1..=12).contains(&self.month) {
            self.month
        } else {
            d.month
        };
        let days_in_month = if (1..=31).contains(&self.days_in_month) {
            self.days_in_month
        } else {
            d.days_in_month
        };
        let day = if self.day >= 1 {
            self.day.min(days_in_month)
        } else {
            d.day
        };
        let sub_second = if self.sub_second.is_finite() && (0.0..1.0).contains(&self.sub_second) {
            self.sub_second
        } else {
            d.sub_second
        };

        Self {
            year: self.year,
            month,
            day,
            weekday: if (1..=7).contains(&self.weekday) {
                self.weekday
            } else {
                d.weekday
            },
            hour: if self.hour <= 23 { self.hour } else { d.hour },
            minute: if self.minute <= 59 {
                self.minute
            } else {
                d.minute
            },
            second: if self.second <= 59 {
                self.second
            } else {
                d.second
            },
            sub_second,
            days_in_month,
        }
    }
}

/// Number of days in `month` (1-based) of `year`, or 30 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return DEFAULT_DAYS_IN_MONTH;
    };
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match next {
        Some(next) => u32::try_from((next - first).num_days()).unwrap_or(DEFAULT_DAYS_IN_MONTH),
        None => DEFAULT_DAYS_IN_MONTH,
    }
}

/// One observation of the clock: calendar fields plus absolute time for animation.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClockInstant {
    /// Calendar view of the instant.
    pub fields: CalendarFields,
    /// Absolute time in seconds; only differences between frames are meaningful.
    pub seconds: f64,
}

impl ClockInstant {
    /// Pair already-validated calendar fields with an absolute time.
    pub fn new(fields: CalendarFields, seconds: f64) -> Self {
        Self { fields, seconds }
    }

    /// Observe `dt` in its own time zone.
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        let seconds =
            dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) / 1_000_000_000.0;
        Self {
            fields: CalendarFields::from_datetime(dt),
            seconds,
        }
    }

    /// Observe `start + offset_secs`.
    pub fn at_offset(start: &Timestamp, offset_secs: f64) -> Self {
        let nanos = (offset_secs * 1_000_000_000.0).round() as i64;
        let dt = *start + chrono::Duration::nanoseconds(nanos);
        Self::from_datetime(&dt)
    }
}

/// Source of "now" for hosts that drive the clock live.
pub trait TimeSource {
    /// Current instant.
    fn now(&self) -> ClockInstant;
}

/// Wall clock in the local time zone.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> ClockInstant {
        ClockInstant::from_datetime(&chrono::Local::now())
    }
}

/// Clock frozen at a single timestamp.
#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub Timestamp);

impl TimeSource for FixedClock {
    fn now(&self) -> ClockInstant {
        ClockInstant::from_datetime(&self.0)
    }
}

/// Current local time as a [`Timestamp`].
pub fn local_now() -> Timestamp {
    chrono::Local::now().fixed_offset()
}

#[cfg(test)]
#[path = "../../tests/unit/time/calendar.rs"]
mod tests;
