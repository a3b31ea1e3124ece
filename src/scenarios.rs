//! Built-in itineraries used by the demo pages and `gdsi demo`.

use crate::error::FormatError;
use crate::model::{Endpoint, FlightSegment};

#[derive(Debug, Clone)]
pub struct Scenario {
    pub key: &'static str,
    pub name: &'static str,
    pub meta: &'static str,
    pub segments: Vec<FlightSegment>,
}

fn segment(
    carrier: &str,
    number: &str,
    cabin: &str,
    booking_class: Option<&str>,
    duration_minutes: u32,
    aircraft: &str,
    departure: Endpoint,
    arrival: Endpoint,
) -> FlightSegment {
    FlightSegment {
        marketing_carrier: Some(carrier.to_string()),
        flight_number: number.to_string(),
        cabin: Some(cabin.to_string()),
        booking_class: booking_class.map(str::to_string),
        duration_minutes: Some(duration_minutes),
        aircraft: Some(aircraft.to_string()),
        departure: Some(departure),
        arrival: Some(arrival),
        status: Some("SS1".to_string()),
        ..Default::default()
    }
}

fn atl_ist() -> Scenario {
    Scenario {
        key: "atl-ist",
        name: "Turkish Airlines TK 032",
        meta: "Business · Nonstop · Airbus A350",
        segments: vec![segment(
            "TK",
            "032",
            "business",
            Some("J"),
            650,
            "Airbus A350-900",
            Endpoint::new("ATL", "2024-06-04T21:50:00-04:00", "America/New_York")
                .with_city("Atlanta"),
            Endpoint::new("IST", "2024-06-05T15:40:00+03:00", "Europe/Istanbul")
                .with_city("Istanbul"),
        )],
    }
}

fn jfk_zrh_bcn() -> Scenario {
    Scenario {
        key: "jfk-zrh-bcn",
        name: "Swiss LX 019 / LX 195",
        meta: "Premium Economy · 1 stop in ZRH",
        segments: vec![
            segment(
                "LX",
                "019",
                "premium",
                Some("W"),
                455,
                "Boeing 777-300ER",
                Endpoint::new("JFK", "2024-09-12T19:55:00-04:00", "America/New_York")
                    .with_city("New York"),
                Endpoint::new("ZRH", "2024-09-13T09:30:00+02:00", "Europe/Zurich")
                    .with_city("Zurich"),
            ),
            segment(
                "LX",
                "195",
                "premium",
                Some("W"),
                125,
                "Airbus A220-300",
                Endpoint::new("ZRH", "2024-09-13T11:15:00+02:00", "Europe/Zurich")
                    .with_city("Zurich"),
                Endpoint::new("BCN", "2024-09-13T13:20:00+02:00", "Europe/Madrid")
                    .with_city("Barcelona"),
            ),
        ],
    }
}

fn sfo_nrt_sin() -> Scenario {
    Scenario {
        key: "sfo-nrt-sin",
        name: "Japan Airlines JL 001 + Singapore Airlines SQ 633",
        meta: "First · 1 stop in NRT",
        segments: vec![
            segment(
                "JL",
                "001",
                "first",
                None,
                630,
                "Boeing 777-300ER",
                Endpoint::new("SFO", "2024-11-18T13:35:00-08:00", "America/Los_Angeles")
                    .with_city("San Francisco"),
                Endpoint::new("NRT", "2024-11-19T17:05:00+09:00", "Asia/Tokyo")
                    .with_city("Tokyo"),
            ),
            segment(
                "SQ",
                "633",
                "first",
                None,
                340,
                "Boeing 777-300ER",
                Endpoint::new("NRT", "2024-11-19T19:30:00+09:00", "Asia/Tokyo")
                    .with_city("Tokyo"),
                Endpoint::new("SIN", "2024-11-20T00:10:00+08:00", "Asia/Singapore")
                    .with_city("Singapore"),
            ),
        ],
    }
}

pub fn all() -> Vec<Scenario> {
    vec![atl_ist(), jfk_zrh_bcn(), sfo_nrt_sin()]
}

pub fn find(key: &str) -> Result<Scenario, FormatError> {
    let wanted = key.trim().to_ascii_lowercase();
    all()
        .into_iter()
        .find(|s| s.key == wanted)
        .ok_or_else(|| FormatError::UnknownScenario(key.to_string()))
}
