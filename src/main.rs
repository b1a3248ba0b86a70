use std::process::ExitCode;
use std::time::Instant;

use clap::{Parser, Subcommand};

use ride_directions::config::Settings;
use ride_directions::directions::DirectionsClient;
use ride_directions::logging::init_logging;
use ride_directions::polyline;
use ride_directions::route::{Origin, parse_lat_lng};
use ride_directions::selection::{FetchOutcome, RouteSelection};
use ride_directions::traits::DirectionsRequest;

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "ride-directions",
    about = "Fetch and pick alternative driving routes",
    long_about = "Fetches alternative driving routes from the directions API and\n\
                  works with Google encoded polylines.\n\
                  The API key is read from GOOGLE_DIRECTIONS_API_KEY or GOOGLE_MAPS_API_KEY."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Fetch route alternatives between two places
    Plan {
        /// Place name, or "lat,lng" for a coordinate origin
        #[arg(value_parser = parse_origin)]
        origin: Origin,
        /// Destination place name
        destination: String,
        /// Upper bound on returned routes (defaults to DIRECTIONS_MAX_ROUTES or 3)
        #[arg(long)]
        max_routes: Option<usize>,
    },
    /// Print the coordinates of an encoded polyline
    Decode {
        polyline: String,
    },
    /// Encode "lat,lng" points into a polyline
    Encode {
        #[arg(required = true, value_parser = parse_point)]
        points: Vec<(f64, f64)>,
    },
}

fn parse_origin(value: &str) -> Result<Origin, String> {
    if value.trim().is_empty() {
        return Err("origin must not be empty".to_string());
    }
    Ok(Origin::parse(value))
}

fn parse_point(value: &str) -> Result<(f64, f64), String> {
    parse_lat_lng(value).ok_or_else(|| format!("not a finite lat,lng pair: {value}"))
}

// ── Entry point ────────────────────────────────────────────────────

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Plan {
            origin,
            destination,
            max_routes,
        } => plan(origin, &destination, max_routes),
        Commands::Decode { polyline: encoded } => {
            for (lat, lng) in polyline::decode(&encoded) {
                println!("{lat},{lng}");
            }
            Ok(())
        }
        Commands::Encode { points } => {
            println!("{}", polyline::encode(&points));
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            tracing::error!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn plan(origin: Origin, destination: &str, max_routes: Option<usize>) -> Result<(), String> {
    let settings = Settings::from_env().map_err(|e| e.to_string())?;
    let client = DirectionsClient::new(settings.directions_config()).map_err(|e| e.to_string())?;
    let request = DirectionsRequest::new(origin, destination)
        .with_max_routes(max_routes.unwrap_or(settings.max_routes));

    let mut selection = RouteSelection::new(settings.selection_options());
    let outcome = selection
        .fetch_with(&client, &request, Instant::now())
        .map_err(|e| e.to_string())?;

    if outcome == FetchOutcome::Empty {
        println!("No routes were returned for this trip.");
        return Ok(());
    }

    for (index, route) in selection.routes().iter().enumerate() {
        let marker = if selection.selected_index() == Some(index) {
            "*"
        } else {
            " "
        };
        let label = selection.label(index).unwrap_or_default();
        println!(
            "{marker} {label}: {} | {} ({} points)",
            or_dash(route.duration_text()),
            or_dash(route.distance_text()),
            route.coordinates().len()
        );
        if !route.summary().is_empty() {
            println!("    via {}", route.summary());
        }
    }

    if let Some(fit) = selection.map_fit() {
        let (sw, ne) = (fit.bounds.south_west, fit.bounds.north_east);
        println!(
            "fit: ({:.5}, {:.5}) - ({:.5}, {:.5})",
            sw.0, sw.1, ne.0, ne.1
        );
    }

    Ok(())
}

fn or_dash(text: &str) -> &str {
    if text.is_empty() { "-" } else { text }
}
