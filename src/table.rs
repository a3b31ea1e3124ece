use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::gds::SegmentLine;
use crate::zoned::ZonedTimeParts;

pub fn render_lines(lines: &[SegmentLine]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Seg", "*I line", "Arrival"]);

    for line in lines {
        let note = if line.arrival_note.is_empty() {
            "Same day"
        } else {
            line.arrival_note.as_str()
        };
        table.add_row(vec![line.index.to_string(), line.line.clone(), note.to_string()]);
    }

    table.to_string()
}

pub fn render_parts(rows: &[(String, ZonedTimeParts)]) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Endpoint", "Local date", "Local time", "Date token", "DOW", "GDS time", "Instant (UTC)",
        ]);

    for (label, parts) in rows {
        table.add_row(vec![
            label.clone(),
            parts.display_date.clone(),
            parts.display_time.clone(),
            parts.date_token(),
            format!("{} ({})", parts.dow_code, parts.weekday),
            crate::zoned::canonical_gds_time(&parts.gds_time),
            parts.instant.to_string(),
        ]);
    }

    table.to_string()
}
