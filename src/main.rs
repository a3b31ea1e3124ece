use std::process;

use clap::Parser;
use serde_json::json;
use tracing_subscriber::EnvFilter;

use gdsi::error::FormatError;
use gdsi::gds::{Dialect, FormatOptions};
use gdsi::model::FlightSegment;
use gdsi::{scenarios, table};

#[derive(Parser)]
#[command(
    name = "gdsi",
    about = "Render flight segments as GDS *I itinerary text",
    version,
    after_help = "\
Examples:
  gdsi demo atl-ist
  gdsi demo sfo-nrt-sin --short-first-as-business
  gdsi format itinerary.json
  cat itinerary.json | gdsi format - --codeshare --table
  gdsi parts --at 2024-06-04T21:50:00-04:00 --tz America/New_York

Logging:
  GDSI_LOG=debug gdsi format itinerary.json"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    #[command(
        about = "Format segments from a JSON file or stdin",
        long_about = "Format flight segments as a Sabre-style *I itinerary block.\n\
            Input is a JSON array of segments, or an object {\"segments\": [...], \"options\": {...}}.\n\
            Command-line flags are applied on top of the options in the file.",
        after_help = "\
Examples:
  From file:       gdsi format itinerary.json
  From stdin:      cat itinerary.json | gdsi format -
  Codeshare:       gdsi format itinerary.json --codeshare
  Detailed JSON:   gdsi format itinerary.json --json --detailed --pretty
  Table:           gdsi format itinerary.json --table"
    )]
    Format(FormatArgs),

    #[command(about = "Show local date/time parts for instants in time zones")]
    Parts(PartsArgs),

    #[command(about = "Format a built-in demo itinerary")]
    Demo(DemoArgs),

    #[command(about = "Start MCP server (for AI assistants)")]
    Mcp,
}

#[derive(clap::Args)]
struct RenderArgs {
    #[arg(
        long,
        help = "Book first-cabin legs under 6 hours in business",
        long_help = "Book first-cabin legs shorter than 360 minutes in the segment's \
            businessFallbackClass (default J) instead of F."
    )]
    short_first_as_business: bool,

    #[arg(long, help = "Use codeshare data for //OPERATED BY annotations")]
    codeshare: bool,

    #[arg(
        long,
        value_name = "DIALECT",
        help = "Output grammar [sabre, arrival-date]",
        long_help = "Output grammar. sabre prints a padded ordinal and a +N arrival offset; \
            arrival-date prints a consecutive ordinal and the arrival date instead of +N. \
            Overrides the dialect in the input file."
    )]
    dialect: Option<String>,

    #[arg(long, help = "Fail on segments missing departure or arrival")]
    strict: bool,

    #[arg(long, help = "Output as a table with arrival notes")]
    table: bool,

    #[arg(long, help = "Output as JSON")]
    json: bool,

    #[arg(long, help = "Output as pretty-printed JSON")]
    pretty: bool,

    #[arg(long, help = "With --json: one record per line with index and arrival note")]
    detailed: bool,
}

#[derive(clap::Args)]
struct FormatArgs {
    #[arg(value_name = "FILE", help = "Segments JSON file, or - for stdin [default: -]")]
    input: Option<String>,

    #[command(flatten)]
    render: RenderArgs,
}

#[derive(clap::Args)]
struct PartsArgs {
    #[arg(
        long,
        value_name = "ISO",
        required = true,
        help = "RFC 3339 instant with offset (repeatable)"
    )]
    at: Vec<String>,

    #[arg(
        long,
        value_name = "ZONE",
        required = true,
        help = "IANA time zone for the matching --at (repeatable)"
    )]
    tz: Vec<String>,

    #[arg(long, help = "Output as JSON")]
    json: bool,

    #[arg(long, help = "Output as pretty-printed JSON")]
    pretty: bool,
}

#[derive(clap::Args)]
struct DemoArgs {
    #[arg(value_name = "KEY", help = "Scenario key (see --list)")]
    key: Option<String>,

    #[arg(long, help = "List the built-in scenarios")]
    list: bool,

    #[command(flatten)]
    render: RenderArgs,
}

fn is_json(render: &RenderArgs) -> bool {
    render.json || render.pretty
}

fn error_code(err: &FormatError) -> i32 {
    match err {
        FormatError::InvalidInstant(_)
        | FormatError::UnknownTimeZone(_)
        | FormatError::MalformedSegment { .. }
        | FormatError::UnknownScenario(_)
        | FormatError::Validation(_) => 2,
        FormatError::Io(_) => 3,
        FormatError::InvalidJson(_) => 4,
    }
}

fn die(err: &FormatError, json_mode: bool) -> ! {
    if json_mode {
        let json = json!({
            "error": {
                "kind": err.kind(),
                "message": err.to_string(),
            }
        });
        println!("{json}");
    } else {
        eprintln!("error: {err}");
    }
    process::exit(error_code(err));
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("GDSI_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn apply_flags(mut options: FormatOptions, render: &RenderArgs) -> Result<FormatOptions, FormatError> {
    options.force_short_first_as_business |= render.short_first_as_business;
    options.simulate_codeshare |= render.codeshare;
    options.strict |= render.strict;
    if let Some(dialect) = render.dialect.as_deref() {
        options.dialect = Dialect::from_str_loose(dialect)?;
    }
    Ok(options)
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String, FormatError> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(out)
}

fn print_itinerary(
    segments: &[FlightSegment],
    options: &FormatOptions,
    render: &RenderArgs,
) -> Result<(), FormatError> {
    if is_json(render) {
        let output = if render.detailed {
            let lines = gdsi::format_segments_detailed(segments, options)?;
            to_json(&lines, render.pretty)?
        } else {
            let text = gdsi::format_segments_to_i(segments, options)?;
            to_json(&json!({ "itinerary": text }), render.pretty)?
        };
        println!("{output}");
        return Ok(());
    }

    if render.table {
        let lines = gdsi::format_segments_detailed(segments, options)?;
        if lines.is_empty() {
            println!("No segments formatted.");
            return Ok(());
        }
        println!("{}", table::render_lines(&lines));
        return Ok(());
    }

    let text = gdsi::format_segments_to_i(segments, options)?;
    if text.is_empty() {
        eprintln!("warning: no segments formatted");
        return Ok(());
    }
    println!("{text}");
    Ok(())
}

fn run_format(args: &FormatArgs) -> Result<(), FormatError> {
    let input = gdsi::read_input(args.input.as_deref())?;
    let (segments, options) = input.into_parts();
    let options = apply_flags(options, &args.render)?;
    print_itinerary(&segments, &options, &args.render)
}

fn run_parts(args: &PartsArgs) -> Result<(), FormatError> {
    if args.at.len() != args.tz.len() {
        return Err(FormatError::Validation(format!(
            "every --at needs a matching --tz (got {} --at and {} --tz)",
            args.at.len(),
            args.tz.len()
        )));
    }

    let mut rows = Vec::with_capacity(args.at.len());
    for (iso, zone) in args.at.iter().zip(&args.tz) {
        rows.push((zone.clone(), gdsi::zoned_parts(iso, zone)?));
    }

    let offset = match rows.as_slice() {
        [(_, first), .., (_, last)] => Some(gdsi::arrival_offset(first, last)),
        _ => None,
    };

    if args.json || args.pretty {
        let parts: Vec<_> = rows.iter().map(|(_, p)| p).collect();
        let value = json!({
            "parts": parts,
            "arrivalOffset": offset.map(|o| o.to_string()),
        });
        println!("{}", to_json(&value, args.pretty)?);
        return Ok(());
    }

    println!("{}", table::render_parts(&rows));
    if let Some(offset) = offset {
        if offset.is_zero() {
            println!("Arrival offset: none (same day)");
        } else {
            println!("Arrival offset: {offset} ({})", offset.note());
        }
    }
    Ok(())
}

fn run_demo(args: &DemoArgs) -> Result<(), FormatError> {
    if args.list || args.key.is_none() {
        for scenario in scenarios::all() {
            println!("{:<12} {} ({})", scenario.key, scenario.name, scenario.meta);
        }
        return Ok(());
    }

    let key = args.key.as_deref().unwrap_or_default();
    let scenario = scenarios::find(key)?;
    let options = apply_flags(FormatOptions::default(), &args.render)?;
    print_itinerary(&scenario.segments, &options, &args.render)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Commands::Mcp => {
            if let Err(e) = gdsi::mcp::run().await {
                die(&e, false);
            }
        }
        Commands::Format(args) => {
            if let Err(e) = run_format(&args) {
                die(&e, is_json(&args.render));
            }
        }
        Commands::Parts(args) => {
            if let Err(e) = run_parts(&args) {
                die(&e, args.json || args.pretty);
            }
        }
        Commands::Demo(args) => {
            if let Err(e) = run_demo(&args) {
                die(&e, is_json(&args.render));
            }
        }
    }
}
