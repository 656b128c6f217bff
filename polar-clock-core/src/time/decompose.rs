use crate::time::calendar::CalendarFields;

/// Number of rings on the face.
pub const RING_COUNT: usize = 6;

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

const WEEKDAY_NAMES: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

/// Time unit a ring represents. Declaration order is ring order (innermost first).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RingKind {
    /// Progress through the year.
    Month,
    /// Progress through the month.
    Day,
    /// Progress through the week.
    Weekday,
    /// Progress through the day.
    Hour,
    /// Progress through the hour.
    Minute,
    /// Progress through the minute.
    Second,
}

impl RingKind {
    /// All ring kinds in ring order.
    pub const ALL: [RingKind; RING_COUNT] = [
        RingKind::Month,
        RingKind::Day,
        RingKind::Weekday,
        RingKind::Hour,
        RingKind::Minute,
        RingKind::Second,
    ];

    /// Ring index, which is also the palette index.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Progress and label for one ring in one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RingSpec {
    /// Which unit this ring shows.
    pub kind: RingKind,
    /// Fraction of the unit's cycle elapsed, `[0, 1)`.
    pub progress: f64,
    /// Text drawn along the arc.
    pub label: String,
    /// Palette slot, `0..RING_COUNT`.
    pub color_index: usize,
}

/// Nested fractional progress values, before labeling.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CycleProgress {
    /// Year progress.
    pub month: f64,
    /// Month progress.
    pub day: f64,
    /// Week progress.
    pub weekday: f64,
    /// Day progress.
    pub hour: f64,
    /// Hour progress.
    pub minute: f64,
    /// Minute progress.
    pub second: f64,
}

impl CycleProgress {
    /// Each unit carries the next-finer unit's progress as its fractional part, so every ring
    /// moves continuously.
    pub fn from_fields(f: &CalendarFields) -> Self {
        let second = (f64::from(f.second) + f.sub_second) / 60.0;
        let minute = (f64::from(f.minute) + second) / 60.0;
        let hour = (f64::from(f.hour) + minute) / 24.0;
        let day = (f64::from(f.day - 1) + hour) / f64::from(f.days_in_month);
        let month = (f64::from(f.month - 1) + day) / 12.0;
        let weekday = (f64::from(f.weekday - 1) + hour) / 7.0;
        Self {
            month: below_one(month),
            day: below_one(day),
            weekday: below_one(weekday),
            hour: below_one(hour),
            minute: below_one(minute),
            second: below_one(second),
        }
    }

    /// Progress for `kind`.
    pub fn get(&self, kind: RingKind) -> f64 {
        match kind {
            RingKind::Month => self.month,
            RingKind::Day => self.day,
            RingKind::Weekday => self.weekday,
            RingKind::Hour => self.hour,
            RingKind::Minute => self.minute,
            RingKind::Second => self.second,
        }
    }
}

// The last nanosecond of a year rounds `11 + (1 - tiny)` up to 12.0 in f64.
fn below_one(v: f64) -> f64 {
    const LARGEST_BELOW_ONE: f64 = 1.0 - f64::EPSILON / 2.0;
    v.clamp(0.0, LARGEST_BELOW_ONE)
}

/// English ordinal suffix for a day of month.
pub fn ordinal_suffix(day: u32) -> &'static str {
    match day {
        1 | 21 | 31 => "st",
        2 | 22 => "nd",
        3 | 23 => "rd",
        _ => "th",
    }
}

/// Label drawn on the ring of `kind`.
pub fn ring_label(kind: RingKind, f: &CalendarFields) -> String {
    match kind {
        RingKind::Month => MONTH_NAMES[(f.month - 1) as usize].to_string(),
        RingKind::Day => format!("{}{}", f.day, ordinal_suffix(f.day)),
        RingKind::Weekday => WEEKDAY_NAMES[(f.weekday - 1) as usize].to_string(),
        RingKind::Hour => format!("{} hours", f.hour),
        RingKind::Minute => format!("{} minutes", f.minute),
        RingKind::Second => format!("{} seconds", f.second),
    }
}

/// Decompose validated calendar fields into the six ring specs, month first.
///
/// Callers pass fields through [`CalendarFields::sanitized`] when they may be out of range.
pub fn decompose(fields: &CalendarFields) -> [RingSpec; RING_COUNT] {
    let progress = CycleProgress::from_fields(fields);
    RingKind::ALL.map(|kind| RingSpec {
        kind,
        progress: progress.get(kind),
        label: ring_label(kind, fields),
        color_index: kind.index(),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/time/decompose.rs"]
mod tests;
