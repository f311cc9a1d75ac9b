// CLI entry point for floorwalk.
//
// Loads a map database once, wraps it in a `NavigationService`, and answers
// one command. Output is JSON on stdout (a `RouteResponse` for `route`);
// logs go to stderr.
//
// Usage:
//   floorwalk [--data <FILE>] [--config <FILE>] [--pretty] <COMMAND>
//     route <BUILDING> <START> <END>   Route between two rooms/exits
//     list [BUILDING]                  List buildings, or one building's
//                                      destinations and floors
//     batch <REQUESTS>                 Route a JSON array of
//                                      {building, start, end} in parallel
//
// Log verbosity follows `RUST_LOG` (default `floorwalk=info`).

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use floorwalk_nav::{MapDatabase, NavConfig, NavigationService, RouteRequest};
use serde::Serialize;
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about = "Indoor route planning over floor-plan maps")]
struct Cli {
    /// Map database (JSON with a top-level "buildings" object)
    #[arg(short, long, default_value = "map_data.json")]
    data: PathBuf,

    /// Navigation config (JSON); defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Route between two rooms or exits of one building
    Route {
        building: String,
        start: String,
        end: String,
    },
    /// List buildings, or the destinations and floors of one building
    List { building: Option<String> },
    /// Route every request in a JSON array file
    Batch { requests: PathBuf },
}

/// One entry of `batch` output: either a route or the error it hit.
#[derive(Serialize)]
#[serde(untagged)]
enum BatchOutcome {
    Route(floorwalk_nav::RouteResponse),
    Error { error: String },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("floorwalk=info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let service = load_service(&cli.data, cli.config.as_deref())?;

    match cli.command {
        Command::Route {
            building,
            start,
            end,
        } => {
            let response = service.navigate(&building, &start, &end)?;
            if response.is_empty() {
                info!(%building, %start, %end, "no route found");
            }
            print_json(&response, cli.pretty)
        }
        Command::List { building: None } => print_json(&service.buildings(), cli.pretty),
        Command::List {
            building: Some(building),
        } => print_json(&service.directory(&building)?, cli.pretty),
        Command::Batch { requests } => {
            let text = std::fs::read_to_string(&requests)
                .with_context(|| format!("reading {}", requests.display()))?;
            let requests: Vec<RouteRequest> =
                serde_json::from_str(&text).context("parsing batch requests")?;
            let outcomes: Vec<BatchOutcome> = service
                .navigate_batch(&requests)
                .into_iter()
                .map(|r| match r {
                    Ok(route) => BatchOutcome::Route(route),
                    Err(e) => BatchOutcome::Error {
                        error: e.to_string(),
                    },
                })
                .collect();
            print_json(&outcomes, cli.pretty)
        }
    }
}

fn load_service(data: &Path, config: Option<&Path>) -> Result<NavigationService> {
    let db = MapDatabase::load(data)?;
    let config = match config {
        Some(path) => NavConfig::load(path)?,
        None => NavConfig::default(),
    };
    info!(
        data = %data.display(),
        buildings = db.buildings.len(),
        corridor_snap_distance = config.corridor_snap_distance,
        "map database loaded"
    );
    Ok(NavigationService::new(Arc::new(db), config))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
