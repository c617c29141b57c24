use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use chronoplan::config::PlannerConfig;
use chronoplan::display::{print_timetable, write_timetable_csv, write_timetable_to_file};
use chronoplan::parser::load_roster;
use chronoplan::roster::Roster;
use chronoplan::schedule::{find_appointments, SlotGrid};
use chronoplan::web::{self, AppState};

#[derive(Parser, Debug)]
#[command(name = "chronoplan")]
#[command(version)]
#[command(about = "Pairs teachers and students into weekly lesson slots")]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a timetable from a roster CSV
    Plan {
        /// Roster CSV (role,name,services,availability)
        #[arg(long)]
        roster: PathBuf,

        /// JSON file with grid and capacity settings
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the number of classrooms per slot
        #[arg(long)]
        max_classrooms: Option<u32>,

        /// Write the timetable as text
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write the timetable as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },

    /// Serve the roster and planning API over HTTP
    Serve {
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Roster CSV to preload and append new records to
        #[arg(long)]
        roster: Option<PathBuf>,

        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long)]
        max_classrooms: Option<u32>,
    },
}

fn load_config(path: Option<&PathBuf>, max_classrooms: Option<u32>) -> chronoplan::Result<PlannerConfig> {
    let config = match path {
        Some(path) => PlannerConfig::from_json_file(path)?,
        None => PlannerConfig::default(),
    };
    Ok(config.with_max_classrooms(max_classrooms))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    match args.command {
        Commands::Plan {
            roster,
            config,
            max_classrooms,
            output,
            csv,
        } => {
            let config = load_config(config.as_ref(), max_classrooms)?;
            let roster = load_roster(&roster)?;
            let grid = SlotGrid::from_config(&config.grid)?;

            let teachers = roster.teachers();
            let students = roster.students()?;
            let outcome = find_appointments(&teachers, &students, &grid, config.max_classrooms)?;

            print_timetable("Generated Timetable", &outcome);

            if let Some(path) = output {
                write_timetable_to_file("Generated Timetable", &outcome, &path)?;
                println!("Timetable saved to {}", path.display());
            }
            if let Some(path) = csv {
                write_timetable_csv(&outcome, &path)?;
                println!("Timetable CSV saved to {}", path.display());
            }
        }
        Commands::Serve {
            port,
            roster,
            config,
            max_classrooms,
        } => {
            let config = load_config(config.as_ref(), max_classrooms)?;
            // Fail before binding if the grid can't be built.
            SlotGrid::from_config(&config.grid)?;

            let initial = match &roster {
                Some(path) if path.exists() => load_roster(path)?,
                _ => Roster::new(),
            };

            println!("Access the API at http://localhost:{}", port);
            web::start_server(port, AppState::new(config, initial, roster)).await?;
        }
    }

    Ok(())
}
