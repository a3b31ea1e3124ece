use gdsi::gds::Dialect;
use gdsi::{parse_input, ItineraryInput};

const SEGMENT: &str = r#"{
    "marketingCarrier": "TK",
    "flightNumber": "032",
    "bookingClass": "J",
    "departure": {"airport": "ATL", "iso": "2024-06-04T21:50:00-04:00", "timeZone": "America/New_York"},
    "arrival": {"airport": "IST", "iso": "2024-06-05T15:40:00+03:00", "timeZone": "Europe/Istanbul"}
}"#;

#[test]
fn parses_bare_array() {
    let input = parse_input(&format!("[{SEGMENT}]")).unwrap();
    assert!(matches!(input, ItineraryInput::Segments(_)));
    let (segments, options) = input.into_parts();
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].carrier(), "TK");
    assert_eq!(options.dialect, Dialect::Sabre);
}

#[test]
fn parses_document_with_options() {
    let json = format!(
        r#"{{"segments": [{SEGMENT}], "options": {{"simulateCodeshare": true, "dialect": "arrival-date"}}}}"#
    );
    let (segments, options) = parse_input(&json).unwrap().into_parts();
    assert_eq!(segments.len(), 1);
    assert!(options.simulate_codeshare);
    assert_eq!(options.dialect, Dialect::ArrivalDate);
}

#[test]
fn parses_document_without_options() {
    let json = format!(r#"{{"segments": [{SEGMENT}]}}"#);
    let (_, options) = parse_input(&json).unwrap().into_parts();
    assert!(!options.simulate_codeshare);
}

#[test]
fn accepts_legacy_field_aliases() {
    let json = r#"[{
        "airlineCode": "lx",
        "number": "195",
        "departure": {"airport": "ZRH", "iso": "2024-09-13T11:15:00+02:00", "timeZone": "Europe/Zurich"},
        "arrival": {"airport": "BCN", "iso": "2024-09-13T13:20:00+02:00", "timeZone": "Europe/Madrid"}
    }]"#;
    let (segments, _) = parse_input(json).unwrap().into_parts();
    assert_eq!(segments[0].carrier(), "LX");
    assert_eq!(segments[0].flight_number, "195");
}

#[test]
fn segment_without_arrival_still_parses() {
    let json = r#"[{"marketingCarrier": "TK", "flightNumber": "032"}]"#;
    let (segments, _) = parse_input(json).unwrap().into_parts();
    assert!(segments[0].departure.is_none());
    assert!(segments[0].arrival.is_none());
}

#[test]
fn rejects_invalid_json() {
    let err = parse_input("{not json").unwrap_err();
    assert_eq!(err.kind(), "invalid_json");
}
