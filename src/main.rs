//! CLI entry point for the Where2Meet client.
//!
//! Provides subcommands for calculating a fair meeting point, re-displaying a
//! saved result, and querying the service's geocoder, station list and health.

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};
use where2meet::{
    config::ClientConfig,
    infra::where2meet::Where2MeetClient,
    input::{load_locations, parse_location},
    model::Location,
    output::{append_records, journey_records, load_result, print_summary, save_result, write_geojson},
    services::MeetingPointApi,
    session::MeetingSession,
};

#[derive(Parser)]
#[command(name = "where2meet")]
#[command(about = "Find the fairest public-transport meeting point", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Which candidate and person to show, and where to export the view.
#[derive(Args)]
struct ViewArgs {
    /// Candidate station to display (0 = optimal, 1-3 = alternatives)
    #[arg(short, long, default_value_t = 0)]
    station: usize,

    /// Highlight one person's journey (0-based, in input order)
    #[arg(long)]
    highlight: Option<usize>,

    /// Write the rendered routes and markers as GeoJSON
    #[arg(long, value_name = "FILE")]
    geojson: Option<String>,

    /// CSV file to append per-person journey rows to
    #[arg(long, value_name = "FILE")]
    csv: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask the service for the fairest meeting point
    Calculate {
        /// A person as NAME=ADDRESS or NAME@LAT,LON (repeatable)
        #[arg(short, long = "person", value_name = "PERSON")]
        people: Vec<String>,

        /// JSON file with a list of locations
        #[arg(short, long, value_name = "FILE")]
        locations: Option<String>,

        /// Skip live TfL routing and use estimated journeys
        #[arg(long, default_value_t = false)]
        no_tfl: bool,

        /// Save the raw result JSON for later `show`
        #[arg(long, value_name = "FILE")]
        save: Option<String>,

        #[command(flatten)]
        view: ViewArgs,
    },
    /// Display a previously saved result
    Show {
        /// Result JSON written by `calculate --save`
        #[arg(value_name = "FILE")]
        result: String,

        #[command(flatten)]
        view: ViewArgs,
    },
    /// Resolve an address to coordinates
    Geocode {
        #[arg(value_name = "ADDRESS")]
        address: String,
    },
    /// List the stations the service can choose from
    Stations,
    /// Check that the service is up
    Health,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/where2meet.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("where2meet.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env()?;
    let client = Where2MeetClient::from_config(&config)?;

    match cli.command {
        Commands::Calculate {
            people,
            locations,
            no_tfl,
            save,
            view,
        } => {
            let mut input: Vec<Location> = match &locations {
                Some(path) => load_locations(path)?,
                None => Vec::new(),
            };
            for person in &people {
                input.push(parse_location(person)?);
            }

            let mut session = MeetingSession::new(client, config.use_tfl_api && !no_tfl);
            info!(base_url = %session.api().base_url(), people = input.len(), "Calculating meeting point");
            if let Err(e) = session.submit(&input).await {
                error!(error = %e, "Could not calculate meeting point");
                return Err(e.into());
            }

            if let (Some(path), Some(result)) = (&save, session.result()) {
                save_result(path, result)?;
                info!(path = %path, "Result saved");
            }
            present(&mut session, &view)?;
        }
        Commands::Show { result, view } => {
            let mut session = MeetingSession::new(client, config.use_tfl_api);
            session.load(load_result(&result)?);
            present(&mut session, &view)?;
        }
        Commands::Geocode { address } => {
            let geocoded = client.geocode(&address).await?;
            info!(
                address = %geocoded.address,
                latitude = geocoded.latitude,
                longitude = geocoded.longitude,
                "Geocoded"
            );
        }
        Commands::Stations => {
            let stations = client.list_stations().await?;
            for station in &stations {
                info!(
                    name = %station.name,
                    latitude = station.latitude,
                    longitude = station.longitude,
                    "Station"
                );
            }
            info!(total = stations.len(), "Station list fetched");
        }
        Commands::Health => {
            let health = client.health().await?;
            info!(
                status = %health.status,
                service = health.service.as_deref().unwrap_or("-"),
                version = health.version.as_deref().unwrap_or("-"),
                "Service health"
            );
            if health.status != "healthy" {
                bail!("service reports status {:?}", health.status);
            }
        }
    }

    Ok(())
}

/// Applies the view arguments to the session and writes every requested
/// output.
fn present<A: MeetingPointApi>(session: &mut MeetingSession<A>, view: &ViewArgs) -> Result<()> {
    session.select_station(view.station);
    if session.selection().station_index != view.station {
        warn!(requested = view.station, "Station index outside the display set, showing optimal");
    }
    if let Some(person) = view.highlight {
        session.click_person(person);
        if session.selection().highlighted() != Some(person) {
            warn!(person, "No journey for that person, nothing highlighted");
        }
    }

    let (Some(result), Some(scene)) = (session.result(), session.scene()) else {
        bail!("no result to display");
    };

    print_summary(result, session.selection());

    if let Some(path) = &view.geojson {
        write_geojson(path, &scene)?;
        info!(path = %path, segments = scene.segments.len(), "GeoJSON written");
    }
    if let Some(path) = &view.csv {
        append_records(path, &journey_records(result, session.selection()))?;
        info!(path = %path, "Journey rows appended");
    }

    Ok(())
}
