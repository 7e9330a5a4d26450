mod export;
mod route;
mod store;
mod web;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::export::ExportFormat;
use crate::route::{assemble, build_route, compute_statistics, MissionFilter, StyleConfig};
use crate::store::Store;
use crate::web::Config;

#[derive(Parser)]
#[command(name = "rover-base")]
#[command(about = "Rover mission telemetry logging and route analysis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve {
        #[arg(long, default_value = "config.yaml")]
        config: String,
    },
    /// Print a mission report export to stdout
    Report {
        /// Storage folder holding metadata.json and waypoints.json
        #[arg(long)]
        storage: PathBuf,
        /// Mission identifier; omit for all missions
        #[arg(long)]
        mission: Option<String>,
        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => serve(&config),
        Commands::Report {
            storage,
            mission,
            format,
        } => report(storage, mission, format),
    }
}

fn serve(config_path: &str) -> ExitCode {
    let config = match Config::from_file(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error starting runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(web::run_server(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn report(storage: PathBuf, mission: Option<String>, format: ExportFormat) -> ExitCode {
    let store = Store::new(storage);
    let filter = MissionFilter::from_param(mission);

    let (samples, waypoints) = match (store.samples(&filter), store.waypoints(&filter)) {
        (Ok(s), Ok(w)) => (s, w),
        (Err(e), _) | (_, Err(e)) => {
            eprintln!("Error reading storage: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let route = build_route(&samples, &waypoints);
    let statistics = compute_statistics(&route);
    let report = assemble(&filter, route, statistics, &StyleConfig::default());

    let output = match format {
        ExportFormat::Json => serde_json::to_string_pretty(&report).map_err(|e| e.to_string()),
        ExportFormat::Csv => export::to_csv(&report).map_err(|e| e.to_string()),
    };

    match output {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error building report: {}", e);
            ExitCode::FAILURE
        }
    }
}
