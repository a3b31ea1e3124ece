use std::fmt;

#[derive(Debug)]
pub enum FormatError {
    InvalidInstant(String),
    UnknownTimeZone(String),
    MalformedSegment { index: usize },
    UnknownScenario(String),
    InvalidJson(String),
    Io(String),
    Validation(String),
}

impl FormatError {
    /// Stable machine-readable name, used for JSON errors and MCP results.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInstant(_) | Self::UnknownTimeZone(_) => "invalid_input",
            Self::MalformedSegment { .. } => "malformed_segment",
            Self::UnknownScenario(_) => "unknown_scenario",
            Self::InvalidJson(_) => "invalid_json",
            Self::Io(_) => "io_error",
            Self::Validation(_) => "validation_error",
        }
    }
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInstant(value) => write!(
                f,
                "invalid instant \"{value}\" — expected RFC 3339 with an offset \
                 (e.g. 2024-06-04T21:50:00-04:00 or 2024-06-05T01:50:00Z)"
            ),
            Self::UnknownTimeZone(zone) => write!(
                f,
                "unknown time zone \"{zone}\" — use an IANA identifier \
                 (e.g. America/New_York, Europe/Istanbul)"
            ),
            Self::MalformedSegment { index } => write!(
                f,
                "segment {index} is missing its departure or arrival — \
                 drop --strict to skip incomplete segments"
            ),
            Self::UnknownScenario(key) => write!(
                f,
                "unknown demo scenario \"{key}\" — run `gdsi demo --list` to see the available keys"
            ),
            Self::InvalidJson(detail) => write!(
                f,
                "failed to read segments — {detail}. \
                 Expected a JSON array of segments or {{\"segments\": [...]}}"
            ),
            Self::Io(detail) => write!(f, "failed to read input ({detail})"),
            Self::Validation(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

impl From<serde_json::Error> for FormatError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidJson(err.to_string())
    }
}

impl From<std::io::Error> for FormatError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
