//! `*I` itinerary rendering.
//!
//! A Sabre-style itinerary line for one segment looks like
//!
//! ```text
//!  1 TK 032J 04JUN T ATLIST*SS1 950P 340P +1 /DCTK /E
//! ```
//!
//! ordinal, flight designator with booking class, departure date and weekday
//! letter, city pair with status, local departure and arrival times, arrival
//! day offset, default carrier marker and e-ticket flag. Codeshare
//! annotations and free text go after the flags.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::FormatError;
use crate::model::{Cabin, FlightSegment};
use crate::zoned::{self, ArrivalOffset, ZonedTimeParts};

/// First-cabin segments shorter than this are sold as business when
/// `force_short_first_as_business` is set.
const SHORT_HAUL_MINUTES: u32 = 360;

const DEFAULT_STATUS: &str = "SS1";
const DEFAULT_BUSINESS_CLASS: &str = "J";

/// Weekday letters used by the arrival-date dialect.
const ARRIVAL_DATE_DOW_CODES: [(&str, char); 7] = [
    ("SUN", 'A'),
    ("MON", 'B'),
    ("TUE", 'C'),
    ("WED", 'D'),
    ("THU", 'Q'),
    ("FRI", 'F'),
    ("SAT", 'J'),
];

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
pub enum Dialect {
    /// Padded ordinal, `+N` arrival offset.
    #[default]
    Sabre,
    /// Consecutive unpadded ordinal, explicit arrival date instead of `+N`.
    ArrivalDate,
}

impl Dialect {
    pub fn from_str_loose(s: &str) -> Result<Self, FormatError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sabre" => Ok(Self::Sabre),
            "arrival-date" => Ok(Self::ArrivalDate),
            _ => Err(FormatError::Validation(format!(
                "invalid dialect: {s} — expected sabre or arrival-date"
            ))),
        }
    }
}

#[derive(
    Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema,
)]
#[serde(rename_all = "camelCase", default)]
pub struct FormatOptions {
    /// Book first-cabin legs under six hours in the business fallback class.
    pub force_short_first_as_business: bool,
    /// Annotate with the segment's `codeshare` data instead of its operating carrier.
    pub simulate_codeshare: bool,
    pub dialect: Dialect,
    /// Fail on segments without departure or arrival instead of skipping them.
    pub strict: bool,
}

/// One rendered line together with the position of its source segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentLine {
    /// 1-based position of the segment in the input.
    pub index: usize,
    pub line: String,
    pub arrival_note: String,
}

pub fn resolve_booking_class(segment: &FlightSegment, options: &FormatOptions) -> String {
    let cabin = segment.cabin_kind();

    if options.force_short_first_as_business
        && cabin == Some(Cabin::First)
        && segment
            .duration_minutes
            .is_some_and(|d| d < SHORT_HAUL_MINUTES)
    {
        return segment
            .business_fallback_class
            .as_deref()
            .map(|c| c.trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_BUSINESS_CLASS.to_string());
    }

    if let Some(explicit) = segment
        .booking_class
        .as_deref()
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty())
    {
        return explicit;
    }

    cabin
        .unwrap_or(Cabin::Economy)
        .fallback_booking_class()
        .to_string()
}

/// Carrier, flight number and booking class. Numbers shorter than four
/// characters are separated from the carrier by a space (`TK 032J`), longer
/// ones are glued to it (`LH1234C`).
pub fn flight_designator(carrier: &str, flight_number: &str, booking_class: &str) -> String {
    let number = flight_number.trim();
    if number.chars().count() < 4 {
        format!("{carrier} {number}{booking_class}")
    } else {
        format!("{carrier}{number}{booking_class}")
    }
}

fn status_code(segment: &FlightSegment) -> String {
    segment
        .status
        .as_deref()
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_STATUS.to_string())
}

fn operated_by(segment: &FlightSegment, carrier: &str, options: &FormatOptions) -> Option<String> {
    if options.simulate_codeshare {
        if let Some(cs) = segment.codeshare.as_ref().filter(|cs| !cs.code.trim().is_empty()) {
            let mut note = format!("//OPERATED BY {}", cs.code.trim());
            if let Some(number) = cs.flight_number.as_deref().filter(|n| !n.is_empty()) {
                note.push(' ');
                note.push_str(number);
            }
            if let Some(name) = cs.name.as_deref().filter(|n| !n.is_empty()) {
                note.push(' ');
                note.push_str(name);
            }
            return Some(note);
        }
    }

    let operating = segment
        .operating_carrier
        .as_deref()
        .map(str::trim)
        .filter(|op| !op.is_empty())?;
    if operating.eq_ignore_ascii_case(carrier) {
        return None;
    }
    let mut note = format!("//OPERATED BY {}", operating.to_uppercase());
    if let Some(name) = segment
        .operating_carrier_name
        .as_deref()
        .filter(|n| !n.is_empty())
    {
        note.push(' ');
        note.push_str(name);
    }
    Some(note)
}

/// Flags and annotations shared by every dialect, in print order.
fn trailing_pieces(segment: &FlightSegment, carrier: &str, options: &FormatOptions) -> Vec<String> {
    let mut pieces = vec![format!("/DC{carrier}")];
    if segment.eticketable != Some(false) {
        pieces.push("/E".to_string());
    }
    if let Some(note) = operated_by(segment, carrier, options) {
        pieces.push(note);
    }
    if let Some(text) = segment.free_text.as_deref().filter(|t| !t.is_empty()) {
        pieces.push(text.to_string());
    }
    pieces
}

struct LegParts<'a> {
    segment: &'a FlightSegment,
    departure: ZonedTimeParts,
    arrival: ZonedTimeParts,
    offset: ArrivalOffset,
    departure_airport: &'a str,
    arrival_airport: &'a str,
}

impl LegParts<'_> {
    fn city_pair(&self) -> String {
        format!(
            "{}{}*{}",
            self.departure_airport,
            self.arrival_airport,
            status_code(self.segment)
        )
    }
}

fn sabre_line(ordinal: usize, leg: &LegParts<'_>, options: &FormatOptions) -> String {
    let carrier = leg.segment.carrier();
    let booking_class = resolve_booking_class(leg.segment, options);

    let mut pieces = vec![
        format!("{ordinal:>2}"),
        flight_designator(&carrier, &leg.segment.flight_number, &booking_class),
        format!("{} {}", leg.departure.date_token(), leg.departure.dow_code),
        leg.city_pair(),
        zoned::canonical_gds_time(&leg.departure.gds_time),
        zoned::canonical_gds_time(&leg.arrival.gds_time),
    ];
    if !leg.offset.is_zero() {
        pieces.push(leg.offset.to_string());
    }
    pieces.extend(trailing_pieces(leg.segment, &carrier, options));
    pieces.join(" ")
}

fn arrival_date_dow(parts: &ZonedTimeParts) -> char {
    ARRIVAL_DATE_DOW_CODES
        .iter()
        .find(|(abbr, _)| *abbr == parts.weekday)
        .map(|(_, code)| *code)
        .unwrap_or(parts.dow_code)
}

fn arrival_date_line(ordinal: usize, leg: &LegParts<'_>, options: &FormatOptions) -> String {
    let carrier = leg.segment.carrier();
    let booking_class = resolve_booking_class(leg.segment, options);

    let mut pieces = vec![
        ordinal.to_string(),
        format!("{carrier} {}{booking_class}", leg.segment.flight_number.trim()),
        format!("{} {}", leg.departure.date_token(), arrival_date_dow(&leg.departure)),
        leg.city_pair(),
        zoned::canonical_gds_time(&leg.departure.gds_time),
        zoned::canonical_gds_time(&leg.arrival.gds_time),
    ];
    if !leg.offset.is_zero() {
        pieces.push(format!(
            "{} {}",
            leg.arrival.date_token(),
            arrival_date_dow(&leg.arrival)
        ));
    }
    pieces.extend(trailing_pieces(leg.segment, &carrier, options));
    pieces.join(" ")
}

/// Renders every well-formed segment as a [`SegmentLine`], in input order.
///
/// Segments without a departure or arrival are skipped unless
/// [`FormatOptions::strict`] is set. An unparsable instant or unknown zone
/// always fails the whole call.
pub fn format_segments_detailed(
    segments: &[FlightSegment],
    options: &FormatOptions,
) -> Result<Vec<SegmentLine>, FormatError> {
    let mut lines: Vec<SegmentLine> = Vec::with_capacity(segments.len());

    for (position, segment) in segments.iter().enumerate() {
        let index = position + 1;
        let (Some(departure), Some(arrival)) = (&segment.departure, &segment.arrival) else {
            if options.strict {
                return Err(FormatError::MalformedSegment { index });
            }
            debug!(index, "skipping segment without departure or arrival");
            continue;
        };

        let departure_parts = zoned::zoned_parts(&departure.iso, &departure.time_zone)?;
        let arrival_parts = zoned::zoned_parts(&arrival.iso, &arrival.time_zone)?;
        let offset = zoned::arrival_offset(&departure_parts, &arrival_parts);

        let leg = LegParts {
            segment,
            departure: departure_parts,
            arrival: arrival_parts,
            offset,
            departure_airport: departure.airport.trim(),
            arrival_airport: arrival.airport.trim(),
        };

        let line = match options.dialect {
            Dialect::Sabre => sabre_line(index, &leg, options),
            Dialect::ArrivalDate => arrival_date_line(lines.len() + 1, &leg, options),
        };
        trace!(index, %line, "rendered segment");

        lines.push(SegmentLine {
            index,
            line,
            arrival_note: offset.note(),
        });
    }

    debug!(
        segments = segments.len(),
        lines = lines.len(),
        dialect = ?options.dialect,
        "formatted itinerary"
    );
    Ok(lines)
}

/// Renders the `*I` block: one line per well-formed segment, joined with
/// `\n`, no trailing newline.
pub fn format_segments_to_i(
    segments: &[FlightSegment],
    options: &FormatOptions,
) -> Result<String, FormatError> {
    let lines = format_segments_detailed(segments, options)?;
    Ok(lines
        .into_iter()
        .map(|l| l.line)
        .collect::<Vec<_>>()
        .join("\n"))
}
