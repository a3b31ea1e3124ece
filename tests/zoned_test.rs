use gdsi::error::FormatError;
use gdsi::zoned::{
    arrival_offset, arrival_offset_between, canonical_gds_time, dow_code, minutes_to_gds,
    zoned_parts, ArrivalOffset,
};

#[test]
fn atlanta_evening_departure_parts() {
    let parts = zoned_parts("2024-06-04T21:50:00-04:00", "America/New_York").unwrap();
    assert_eq!(parts.month, "JUN");
    assert_eq!(parts.day, "04");
    assert_eq!(parts.weekday, "TUE");
    assert_eq!(parts.dow_code, 'T');
    assert_eq!(parts.gds_time, "0950P");
    assert_eq!(parts.minutes_since_midnight, 21 * 60 + 50);
    assert_eq!(parts.year, 2024);
    assert_eq!(parts.month_index, 5);
    assert_eq!(parts.day_number, 4);
    assert_eq!(parts.display_time, "9:50 PM");
    assert_eq!(parts.display_date, "Tue, Jun 04");
    assert_eq!(parts.date_token(), "04JUN");
}

#[test]
fn weekday_comes_from_zone_not_utc() {
    // 01:50 UTC on the 5th is still the evening of the 4th in New York.
    let ny = zoned_parts("2024-06-05T01:50:00Z", "America/New_York").unwrap();
    assert_eq!(ny.day, "04");
    assert_eq!(ny.weekday, "TUE");
    assert_eq!(ny.gds_time, "0950P");

    let utc = zoned_parts("2024-06-05T01:50:00Z", "UTC").unwrap();
    assert_eq!(utc.day, "05");
    assert_eq!(utc.weekday, "WED");
    assert_eq!(utc.dow_code, 'W');
    assert_eq!(utc.gds_time, "0150A");
}

#[test]
fn offset_in_instant_does_not_leak_into_local_time() {
    let parts = zoned_parts("2024-06-05T15:40:00+03:00", "Europe/Istanbul").unwrap();
    assert_eq!(parts.gds_time, "0340P");
    assert_eq!(canonical_gds_time(&parts.gds_time), "340P");
    assert_eq!(parts.dow_code, 'W');
}

#[test]
fn local_midnight_is_1200a() {
    let parts = zoned_parts("2024-03-14T00:00:00+09:00", "Asia/Tokyo").unwrap();
    assert_eq!(parts.gds_time, "1200A");
    assert_eq!(canonical_gds_time(&parts.gds_time), "1200A");
    assert_eq!(parts.minutes_since_midnight, 0);
    assert_eq!(parts.display_time, "12:00 AM");
    assert_eq!(parts.dow_code, 'Q');
}

#[test]
fn local_noon_is_1200p() {
    let parts = zoned_parts("2024-03-16T12:00:00Z", "Europe/London").unwrap();
    assert_eq!(parts.gds_time, "1200P");
    assert_eq!(canonical_gds_time(&parts.gds_time), "1200P");
    assert_eq!(parts.display_time, "12:00 PM");
    assert_eq!(parts.dow_code, 'J');
}

#[test]
fn honors_dst_transition() {
    // New York springs forward at 07:00 UTC on 2024-03-10.
    let before = zoned_parts("2024-03-10T06:30:00Z", "America/New_York").unwrap();
    assert_eq!(before.gds_time, "0130A");

    let after = zoned_parts("2024-03-10T07:30:00Z", "America/New_York").unwrap();
    assert_eq!(after.gds_time, "0330A");
}

#[test]
fn rejects_unparsable_instant() {
    let err = zoned_parts("not-a-date", "America/New_York").unwrap_err();
    assert!(matches!(err, FormatError::InvalidInstant(_)));
    assert_eq!(err.kind(), "invalid_input");
}

#[test]
fn rejects_instant_without_offset() {
    let err = zoned_parts("2024-06-04T21:50:00", "America/New_York").unwrap_err();
    assert!(matches!(err, FormatError::InvalidInstant(_)));
}

#[test]
fn rejects_unknown_zone() {
    let err = zoned_parts("2024-06-04T21:50:00-04:00", "Mars/Olympus_Mons").unwrap_err();
    assert!(matches!(err, FormatError::UnknownTimeZone(_)));
    assert_eq!(err.kind(), "invalid_input");
    assert!(err.to_string().contains("Mars/Olympus_Mons"));
}

#[test]
fn dow_codes_are_distinct() {
    let days = ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"];
    let codes: Vec<char> = days.iter().map(|d| dow_code(d).unwrap()).collect();
    assert_eq!(codes, vec!['S', 'M', 'T', 'W', 'Q', 'F', 'J']);

    let mut unique = codes.clone();
    unique.sort_unstable();
    unique.dedup();
    assert_eq!(unique.len(), 7);
}

#[test]
fn dow_code_is_case_insensitive() {
    assert_eq!(dow_code("thu"), Some('Q'));
    assert_eq!(dow_code("Sat"), Some('J'));
    assert_eq!(dow_code("XYZ"), None);
}

#[test]
fn minutes_to_gds_twelve_hour_clock() {
    assert_eq!(minutes_to_gds(0), "1200A");
    assert_eq!(minutes_to_gds(5), "1205A");
    assert_eq!(minutes_to_gds(65), "0105A");
    assert_eq!(minutes_to_gds(720), "1200P");
    assert_eq!(minutes_to_gds(1310), "0950P");
    assert_eq!(minutes_to_gds(1439), "1159P");
    assert_eq!(minutes_to_gds(1440), "1200A");
}

#[test]
fn canonical_time_strips_leading_zero() {
    assert_eq!(canonical_gds_time("0950P"), "950P");
    assert_eq!(canonical_gds_time("1205A"), "1205A");
    assert_eq!(canonical_gds_time("0005A"), "1205A");
    assert_eq!(canonical_gds_time("0000A"), "1200A");
    assert_eq!(canonical_gds_time(" 0130A "), "130A");
}

#[test]
fn late_departure_early_arrival_next_day_is_plus_one() {
    let dep = zoned_parts("2024-01-15T23:50:00-05:00", "America/New_York").unwrap();
    let arr = zoned_parts("2024-01-16T00:40:00-05:00", "America/New_York").unwrap();
    let offset = arrival_offset(&dep, &arr);
    assert_eq!(offset, ArrivalOffset(1));
    assert_eq!(offset.to_string(), "+1");
    assert_eq!(offset.note(), "Arrives one day later");
}

#[test]
fn same_day_arrival_has_empty_token() {
    let dep = zoned_parts("2024-09-13T11:15:00+02:00", "Europe/Zurich").unwrap();
    let arr = zoned_parts("2024-09-13T13:20:00+02:00", "Europe/Madrid").unwrap();
    let offset = arrival_offset(&dep, &arr);
    assert!(offset.is_zero());
    assert_eq!(offset.to_string(), "");
    assert_eq!(offset.note(), "");
}

#[test]
fn dateline_westbound_is_minus_one() {
    let dep = zoned_parts("2024-07-02T10:00:00+10:00", "Australia/Sydney").unwrap();
    let arr = zoned_parts("2024-07-01T20:00:00-10:00", "Pacific/Honolulu").unwrap();
    let offset = arrival_offset(&dep, &arr);
    assert_eq!(offset.days(), -1);
    assert_eq!(offset.to_string(), "-1");
    assert_eq!(offset.note(), "Arrives one day earlier");
}

#[test]
fn dateline_eastbound_overnight_is_plus_two() {
    let dep = zoned_parts("2024-11-18T23:30:00-10:00", "Pacific/Honolulu").unwrap();
    let arr = zoned_parts("2024-11-20T06:00:00+11:00", "Australia/Sydney").unwrap();
    let offset = arrival_offset(&dep, &arr);
    assert_eq!(offset.to_string(), "+2");
    assert_eq!(offset.note(), "Arrives 2 days later");
}

#[test]
fn offset_display_and_note_for_larger_values() {
    assert_eq!(ArrivalOffset(-3).to_string(), "-3");
    assert_eq!(ArrivalOffset(-3).note(), "Arrives 3 days earlier");
    assert_eq!(ArrivalOffset(0).to_string(), "");
}

#[test]
fn offset_between_instants_rounds_to_nearest_day() {
    let short = arrival_offset_between("2024-01-15T23:50:00Z", "2024-01-16T00:40:00Z").unwrap();
    assert!(short.is_zero());

    let long = arrival_offset_between("2024-01-15T08:00:00Z", "2024-01-16T22:00:00Z").unwrap();
    assert_eq!(long.days(), 2);

    let half = arrival_offset_between("2024-01-15T00:00:00Z", "2024-01-15T12:00:00Z").unwrap();
    assert_eq!(half.days(), 1);

    let negative_half =
        arrival_offset_between("2024-01-15T12:00:00Z", "2024-01-15T00:00:00Z").unwrap();
    assert_eq!(negative_half.days(), 0);
}

#[test]
fn offset_between_rejects_bad_instant() {
    assert!(arrival_offset_between("yesterday", "2024-01-16T00:40:00Z").is_err());
}

#[test]
fn impossible_calendar_parts_fall_back_to_instants() {
    let dep = zoned_parts("2024-01-15T08:00:00Z", "UTC").unwrap();
    let mut arr = zoned_parts("2024-01-16T22:00:00Z", "UTC").unwrap();
    arr.month_index = 1;
    arr.day_number = 31;
    assert!(arr.local_date().is_none());
    assert_eq!(arrival_offset(&dep, &arr).days(), 2);
}

#[test]
fn parts_serialize_camel_case() {
    let parts = zoned_parts("2024-06-04T21:50:00-04:00", "America/New_York").unwrap();
    let value = serde_json::to_value(&parts).unwrap();
    assert_eq!(value["dowCode"], "T");
    assert_eq!(value["gdsTime"], "0950P");
    assert_eq!(value["monthIndex"], 5);
    assert_eq!(value["displayDate"], "Tue, Jun 04");
}
