use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::schemars;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler, ServiceExt};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::FormatError;
use crate::gds::{self, Dialect, FormatOptions};
use crate::model::FlightSegment;
use crate::scenarios;
use crate::zoned;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct FormatArgs {
    #[schemars(
        description = "Flight segments in itinerary order. Each needs marketingCarrier, flightNumber, \
            departure and arrival ({airport, iso, timeZone}). iso is RFC 3339 with offset, \
            timeZone is an IANA zone. Example departure: \
            {\"airport\":\"ATL\",\"iso\":\"2024-06-04T21:50:00-04:00\",\"timeZone\":\"America/New_York\"}"
    )]
    segments: Vec<FlightSegment>,
    #[schemars(description = "Book first-cabin legs under 6 hours in business (class J). Default: false")]
    short_first_as_business: Option<bool>,
    #[schemars(description = "Use each segment's codeshare data for //OPERATED BY. Default: false")]
    codeshare: Option<bool>,
    #[schemars(description = "One of: sabre, arrival-date. Default: sabre")]
    dialect: Option<String>,
    #[schemars(description = "Fail on segments missing departure or arrival instead of skipping. Default: false")]
    strict: Option<bool>,
    #[schemars(description = "Return JSON records {index, line, arrivalNote} instead of the text block")]
    detailed: Option<bool>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct PartsArgs {
    #[schemars(description = "RFC 3339 instant with offset. Example: 2024-06-04T21:50:00-04:00")]
    instant: String,
    #[schemars(description = "IANA time zone. Example: Europe/Istanbul")]
    time_zone: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
struct DemoArgs {
    #[schemars(description = "Scenario key. One of: atl-ist, jfk-zrh-bcn, sfo-nrt-sin")]
    scenario: String,
    #[schemars(description = "Book first-cabin legs under 6 hours in business (class J). Default: false")]
    short_first_as_business: Option<bool>,
    #[schemars(description = "One of: sabre, arrival-date. Default: sabre")]
    dialect: Option<String>,
}

#[derive(Debug, Serialize)]
struct ScenarioSummary<'a> {
    key: &'a str,
    name: &'a str,
    meta: &'a str,
}

fn build_options(
    short_first_as_business: Option<bool>,
    codeshare: Option<bool>,
    dialect: Option<&str>,
    strict: Option<bool>,
) -> Result<FormatOptions, FormatError> {
    let dialect = dialect
        .map(Dialect::from_str_loose)
        .transpose()?
        .unwrap_or_default();
    Ok(FormatOptions {
        force_short_first_as_business: short_first_as_business.unwrap_or(false),
        simulate_codeshare: codeshare.unwrap_or(false),
        dialect,
        strict: strict.unwrap_or(false),
    })
}

fn tool_error(msg: impl Into<String>) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::error(vec![Content::text(msg.into())]))
}

fn format_error(err: &FormatError) -> Result<CallToolResult, McpError> {
    tool_error(format!("{}: {err}", err.kind()))
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    match serde_json::to_string_pretty(value) {
        Ok(json) => Ok(CallToolResult::success(vec![Content::text(json)])),
        Err(e) => tool_error(format!("failed to encode result: {e}")),
    }
}

fn render(
    segments: &[FlightSegment],
    options: &FormatOptions,
    detailed: bool,
) -> Result<CallToolResult, McpError> {
    if detailed {
        match gds::format_segments_detailed(segments, options) {
            Ok(lines) => json_result(&lines),
            Err(e) => format_error(&e),
        }
    } else {
        match gds::format_segments_to_i(segments, options) {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(e) => format_error(&e),
        }
    }
}

#[derive(Debug, Clone)]
struct GdsiMcp {
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl GdsiMcp {
    fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Render flight segments as a Sabre-style *I itinerary block, one line per segment. Times are printed in each airport's local zone, arrival day offsets (+1) come from calendar dates. Segments missing departure or arrival are skipped unless strict is set."
    )]
    async fn gds_format_itinerary(
        &self,
        Parameters(args): Parameters<FormatArgs>,
    ) -> Result<CallToolResult, McpError> {
        let options = match build_options(
            args.short_first_as_business,
            args.codeshare,
            args.dialect.as_deref(),
            args.strict,
        ) {
            Ok(o) => o,
            Err(e) => return format_error(&e),
        };
        render(&args.segments, &options, args.detailed.unwrap_or(false))
    }

    #[tool(
        description = "Show the local calendar date, weekday letter and GDS time token for an instant in an IANA time zone."
    )]
    async fn gds_zoned_parts(
        &self,
        Parameters(args): Parameters<PartsArgs>,
    ) -> Result<CallToolResult, McpError> {
        match zoned::zoned_parts(&args.instant, &args.time_zone) {
            Ok(parts) => json_result(&parts),
            Err(e) => format_error(&e),
        }
    }

    #[tool(
        description = "Render one of the built-in demo itineraries (atl-ist, jfk-zrh-bcn, sfo-nrt-sin) as a *I block. Pass scenario=list to get the available keys."
    )]
    async fn gds_demo_itinerary(
        &self,
        Parameters(args): Parameters<DemoArgs>,
    ) -> Result<CallToolResult, McpError> {
        if args.scenario.trim() == "list" {
            let all = scenarios::all();
            let summaries: Vec<ScenarioSummary<'_>> = all
                .iter()
                .map(|s| ScenarioSummary {
                    key: s.key,
                    name: s.name,
                    meta: s.meta,
                })
                .collect();
            return json_result(&summaries);
        }

        let scenario = match scenarios::find(&args.scenario) {
            Ok(s) => s,
            Err(e) => return format_error(&e),
        };
        let options = match build_options(
            args.short_first_as_business,
            None,
            args.dialect.as_deref(),
            None,
        ) {
            Ok(o) => o,
            Err(e) => return format_error(&e),
        };
        render(&scenario.segments, &options, false)
    }
}

#[tool_handler]
impl ServerHandler for GdsiMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "gdsi".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "GDS itinerary formatter. Use gds_format_itinerary to turn flight segments into *I text, gds_zoned_parts to inspect how a single time is localised, and gds_demo_itinerary for ready-made examples.".into(),
            ),
        }
    }
}

pub async fn run() -> Result<(), FormatError> {
    info!("starting MCP server on stdio");
    let service = GdsiMcp::new()
        .serve(rmcp::transport::stdio())
        .await
        .map_err(|e| FormatError::Io(format!("failed to start MCP server: {e}")))?;
    service
        .waiting()
        .await
        .map_err(|e| FormatError::Io(format!("MCP server error: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_options_defaults() {
        let options = build_options(None, None, None, None).unwrap();
        assert_eq!(options, FormatOptions::default());
    }

    #[test]
    fn build_options_with_flags() {
        let options = build_options(Some(true), Some(true), Some("arrival-date"), Some(true)).unwrap();
        assert!(options.force_short_first_as_business);
        assert!(options.simulate_codeshare);
        assert!(options.strict);
        assert_eq!(options.dialect, Dialect::ArrivalDate);
    }

    #[test]
    fn build_options_rejects_unknown_dialect() {
        let err = build_options(None, None, Some("amadeus"), None).unwrap_err();
        assert_eq!(err.kind(), "validation_error");
    }

    #[test]
    fn format_args_accept_camel_case_segments() {
        let args: FormatArgs = serde_json::from_str(
            r#"{
                "segments": [{
                    "marketingCarrier": "TK",
                    "flightNumber": "032",
                    "departure": {"airport": "ATL", "iso": "2024-06-04T21:50:00-04:00", "timeZone": "America/New_York"},
                    "arrival": {"airport": "IST", "iso": "2024-06-05T15:40:00+03:00", "timeZone": "Europe/Istanbul"}
                }],
                "dialect": "sabre"
            }"#,
        )
        .unwrap();
        assert_eq!(args.segments.len(), 1);
        assert_eq!(args.segments[0].carrier(), "TK");
        assert!(args.detailed.is_none());
    }
}
