pub mod error;
pub mod gds;
pub mod mcp;
pub mod model;
pub mod scenarios;
pub mod table;
pub mod zoned;

use std::io::Read;

use serde::Deserialize;

use error::FormatError;
use gds::FormatOptions;
use model::FlightSegment;

pub use gds::{format_segments_detailed, format_segments_to_i, SegmentLine};
pub use zoned::{arrival_offset, arrival_offset_between, zoned_parts, ArrivalOffset, ZonedTimeParts};

/// An input document: either a bare array of segments or an object carrying
/// segments plus formatting options.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ItineraryInput {
    Segments(Vec<FlightSegment>),
    Document {
        segments: Vec<FlightSegment>,
        #[serde(default)]
        options: FormatOptions,
    },
}

impl ItineraryInput {
    pub fn into_parts(self) -> (Vec<FlightSegment>, FormatOptions) {
        match self {
            Self::Segments(segments) => (segments, FormatOptions::default()),
            Self::Document { segments, options } => (segments, options),
        }
    }
}

pub fn parse_input(json: &str) -> Result<ItineraryInput, FormatError> {
    Ok(serde_json::from_str(json)?)
}

pub fn read_input(path: Option<&str>) -> Result<ItineraryInput, FormatError> {
    let text = match path {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
        Some(p) => std::fs::read_to_string(p)
            .map_err(|e| FormatError::Io(format!("{p}: {e}")))?,
    };
    parse_input(&text)
}
