//! Day-phase classification from sunrise, sunset, and fixed local cutoffs.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use sunrise::{Coordinates, SolarDay, SolarEvent};

use crate::models::Location;

/// Hour (local) at which the morning phase ends.
const MORNING_END_HOUR: u32 = 9;
/// Hour (local) at which the evening phase starts.
const EVENING_START_HOUR: u32 = 18;

/// Coarse part of the day at a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPhase {
    /// Before sunrise or after sunset
    Night,
    /// Sunrise until 09:00
    Morning,
    /// 09:00 until 18:00
    Day,
    /// 18:00 until sunset
    Evening,
}

impl DayPhase {
    /// Emoji substituted for `{{time_emoji}}`.
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Night => "🌙",
            Self::Morning => "🌅",
            Self::Day => "☀️",
            Self::Evening => "🌇",
        }
    }

    /// Label substituted for `{{time_text}}`.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Night => "Night",
            Self::Morning => "Morning",
            Self::Day => "Day",
            Self::Evening => "Evening",
        }
    }

    /// Classifies `now` against the sun times and the local 09:00/18:00 cutoffs.
    ///
    /// All comparisons are strict, so an instant falling exactly on a
    /// boundary ends up in the `Night` default.
    pub fn classify<Tz: TimeZone>(now: &DateTime<Tz>, sun: SunTimes) -> Self {
        let instant = now.with_timezone(&Utc);
        let morning_end = local_cutoff(now, MORNING_END_HOUR);
        let evening_start = local_cutoff(now, EVENING_START_HOUR);

        let before = |cutoff: Option<DateTime<Utc>>| cutoff.is_some_and(|c| instant < c);
        let after = |cutoff: Option<DateTime<Utc>>| cutoff.is_some_and(|c| instant > c);

        if instant < sun.sunrise {
            Self::Night
        } else if instant > sun.sunrise && before(morning_end) {
            Self::Morning
        } else if after(morning_end) && before(evening_start) {
            Self::Day
        } else if after(evening_start) && instant < sun.sunset {
            Self::Evening
        } else {
            Self::Night
        }
    }
}

/// Today's `hour:00` in the time zone of `now`, as an absolute instant.
fn local_cutoff<Tz: TimeZone>(now: &DateTime<Tz>, hour: u32) -> Option<DateTime<Utc>> {
    let naive = now.date_naive().and_hms_opt(hour, 0, 0)?;
    now.timezone()
        .from_local_datetime(&naive)
        .earliest()
        .map(|cutoff| cutoff.with_timezone(&Utc))
}

/// Sunrise and sunset instants for one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SunTimes {
    /// Sunrise instant
    pub sunrise: DateTime<Utc>,
    /// Sunset instant
    pub sunset: DateTime<Utc>,
}

impl SunTimes {
    /// Computes the sun times at `location` on `date`.
    ///
    /// Returns `None` for out-of-range coordinates or an unrepresentable instant.
    pub fn compute(location: Location, date: NaiveDate) -> Option<Self> {
        let coordinates = Coordinates::new(location.latitude, location.longitude)?;
        let day = SolarDay::new(coordinates, date);

        Some(Self {
            sunrise: DateTime::from_timestamp(day.event_time(SolarEvent::Sunrise).timestamp(), 0)?,
            sunset: DateTime::from_timestamp(day.event_time(SolarEvent::Sunset).timestamp(), 0)?,
        })
    }
}

/// The time group of substitution values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeOfDay {
    /// The classified phase
    pub phase: DayPhase,
    /// 12-hour clock reading, e.g. `03:04 PM`
    pub timestamp: String,
}

impl TimeOfDay {
    /// Resolves the time group for `now` at `location`.
    pub fn at<Tz: TimeZone>(location: Location, now: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        let phase = SunTimes::compute(location, now.date_naive())
            .map_or(DayPhase::Night, |sun| DayPhase::classify(now, sun));

        Self {
            phase,
            timestamp: now.format("%I:%M %p").to_string(),
        }
    }
}
