//! Local wall-clock parts for an instant seen from an airport's time zone.
//!
//! Every token on an itinerary line is derived from the zoned calendar date
//! and time, never from UTC: a 21:50 departure from Atlanta is printed as
//! `04JUN T ... 950P` even though it is already June 5th in UTC.

use std::fmt;

use jiff::civil::{Date, Weekday};
use jiff::tz::TimeZone;
use jiff::{Timestamp, Zoned};
use serde::Serialize;

use crate::error::FormatError;

const MINUTES_PER_DAY: u32 = 24 * 60;
const DAY_MS: f64 = 24.0 * 60.0 * 60.0 * 1000.0;

const MONTH_CODES: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Weekday abbreviation to GDS day-of-week letter. Thursday is `Q` and
/// Saturday is `J` so that no two days share a letter.
const DOW_CODES: [(&str, char); 7] = [
    ("SUN", 'S'),
    ("MON", 'M'),
    ("TUE", 'T'),
    ("WED", 'W'),
    ("THU", 'Q'),
    ("FRI", 'F'),
    ("SAT", 'J'),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZonedTimeParts {
    /// Three-letter uppercase month, e.g. `JUN`.
    pub month: String,
    /// Zero-padded day of month, e.g. `04`.
    pub day: String,
    /// Three-letter uppercase weekday, e.g. `TUE`.
    pub weekday: String,
    pub dow_code: char,
    /// Raw five-character time token, e.g. `0950P`. See [`canonical_gds_time`].
    pub gds_time: String,
    pub minutes_since_midnight: u32,
    pub year: i16,
    /// Zero-based month, January is 0.
    pub month_index: u8,
    pub day_number: u8,
    /// e.g. `9:50 PM`
    pub display_time: String,
    /// e.g. `Tue, Jun 04`
    pub display_date: String,
    pub instant: Timestamp,
}

impl ZonedTimeParts {
    /// Departure-style date token, e.g. `04JUN`.
    pub fn date_token(&self) -> String {
        format!("{}{}", self.day, self.month)
    }

    /// The calendar date this instant falls on in its zone.
    ///
    /// `None` only when the parts were assembled by hand with an impossible
    /// year/month/day combination.
    pub fn local_date(&self) -> Option<Date> {
        let month = i8::try_from(self.month_index).ok()? + 1;
        let day = i8::try_from(self.day_number).ok()?;
        Date::new(self.year, month, day).ok()
    }
}

pub fn weekday_abbr(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Sunday => "SUN",
        Weekday::Monday => "MON",
        Weekday::Tuesday => "TUE",
        Weekday::Wednesday => "WED",
        Weekday::Thursday => "THU",
        Weekday::Friday => "FRI",
        Weekday::Saturday => "SAT",
    }
}

/// Looks up the GDS letter for a three-letter weekday abbreviation
/// (case-insensitive).
pub fn dow_code(weekday: &str) -> Option<char> {
    let key = weekday.trim().to_ascii_uppercase();
    DOW_CODES
        .iter()
        .find(|(abbr, _)| *abbr == key)
        .map(|(_, code)| *code)
}

/// Formats minutes since local midnight as the raw five-character GDS time,
/// e.g. 1310 → `0950P`, 0 → `1200A`. Values outside one day wrap around.
pub fn minutes_to_gds(minutes: u32) -> String {
    let normalized = minutes % MINUTES_PER_DAY;
    let hour = normalized / 60;
    let minute = normalized % 60;
    let period = if hour >= 12 { 'P' } else { 'A' };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{hour12:02}{minute:02}{period}")
}

/// Strips the leading hour zero from a raw time token (`0950P` → `950P`).
/// A `00` hour prefix is read as twelve (`0005A` → `1205A`).
pub fn canonical_gds_time(raw: &str) -> String {
    let trimmed = raw.trim();
    let bytes = trimmed.as_bytes();
    if bytes.len() == 5
        && trimmed.starts_with("00")
        && bytes[2].is_ascii_digit()
        && bytes[3].is_ascii_digit()
        && matches!(bytes[4].to_ascii_uppercase(), b'A' | b'P')
    {
        return format!("12{}", &trimmed[2..]);
    }

    let zeros = trimmed.len() - trimmed.trim_start_matches('0').len();
    if zeros == 0 {
        return trimmed.to_string();
    }
    let rest = &trimmed[zeros..];
    if rest.starts_with(|c: char| c.is_ascii_digit()) {
        rest.to_string()
    } else {
        trimmed[zeros - 1..].to_string()
    }
}

pub fn parse_instant(iso: &str) -> Result<Timestamp, FormatError> {
    iso.trim()
        .parse::<Timestamp>()
        .map_err(|_| FormatError::InvalidInstant(iso.to_string()))
}

pub fn resolve_zone(time_zone: &str) -> Result<TimeZone, FormatError> {
    TimeZone::get(time_zone.trim())
        .map_err(|_| FormatError::UnknownTimeZone(time_zone.to_string()))
}

/// Computes the local date and time parts of `iso` in `time_zone`.
pub fn zoned_parts(iso: &str, time_zone: &str) -> Result<ZonedTimeParts, FormatError> {
    let instant = parse_instant(iso)?;
    let tz = resolve_zone(time_zone)?;
    Ok(parts_from_zoned(&instant.to_zoned(tz)))
}

fn parts_from_zoned(zdt: &Zoned) -> ZonedTimeParts {
    // jiff guarantees month in 1..=12, day in 1..=31, hour in 0..=23 and
    // minute in 0..=59, so the unsigned conversions below never clamp.
    let month_index = zdt.month().unsigned_abs() - 1;
    let day_number = zdt.day().unsigned_abs();
    let hour = u32::from(zdt.hour().unsigned_abs());
    let minute = u32::from(zdt.minute().unsigned_abs());
    let minutes_since_midnight = hour * 60 + minute;

    let weekday = weekday_abbr(zdt.weekday());
    let dow = dow_code(weekday).unwrap_or(' ');

    let period = if hour >= 12 { "PM" } else { "AM" };
    let hour12 = match hour % 12 {
        0 => 12,
        h => h,
    };

    ZonedTimeParts {
        month: MONTH_CODES[usize::from(month_index)].to_string(),
        day: format!("{day_number:02}"),
        weekday: weekday.to_string(),
        dow_code: dow,
        gds_time: minutes_to_gds(minutes_since_midnight),
        minutes_since_midnight,
        year: zdt.year(),
        month_index,
        day_number,
        display_time: format!("{hour12}:{minute:02} {period}"),
        display_date: zdt.strftime("%a, %b %d").to_string(),
        instant: zdt.timestamp(),
    }
}

/// Whole calendar days between departure and arrival, as printed after the
/// arrival time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ArrivalOffset(pub i32);

impl ArrivalOffset {
    pub fn days(self) -> i32 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Sentence for screen readers, empty when arriving the same day.
    pub fn note(self) -> String {
        match self.0 {
            0 => String::new(),
            1 => "Arrives one day later".to_string(),
            -1 => "Arrives one day earlier".to_string(),
            n if n > 0 => format!("Arrives {n} days later"),
            n => format!("Arrives {} days earlier", n.unsigned_abs()),
        }
    }
}

impl fmt::Display for ArrivalOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => Ok(()),
            n if n > 0 => write!(f, "+{n}"),
            n => write!(f, "{n}"),
        }
    }
}

/// Calendar-day offset between two zoned endpoints.
///
/// Compares the local calendar dates; time of day is ignored. Falls back to
/// rounding the elapsed time between the raw instants when either date
/// cannot be rebuilt from its parts.
pub fn arrival_offset(departure: &ZonedTimeParts, arrival: &ZonedTimeParts) -> ArrivalOffset {
    if let (Some(dep), Some(arr)) = (departure.local_date(), arrival.local_date()) {
        if let Ok(span) = arr.since(dep) {
            return ArrivalOffset(span.get_days());
        }
    }
    offset_between_instants(departure.instant, arrival.instant)
}

/// Offset computed from raw instants only, rounded to the nearest whole day.
pub fn arrival_offset_between(
    departure_iso: &str,
    arrival_iso: &str,
) -> Result<ArrivalOffset, FormatError> {
    let departure = parse_instant(departure_iso)?;
    let arrival = parse_instant(arrival_iso)?;
    Ok(offset_between_instants(departure, arrival))
}

fn offset_between_instants(departure: Timestamp, arrival: Timestamp) -> ArrivalOffset {
    let diff_ms = arrival.as_millisecond() - departure.as_millisecond();
    // Half-up rounding, so exactly -12h rounds to 0 rather than -1.
    let days = (diff_ms as f64 / DAY_MS + 0.5).floor();
    ArrivalOffset(days as i32)
}
