use tracing_subscriber::EnvFilter;

use crate::analyzers::CollisionAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::error::{ExplorerError, Result};
use crate::loader::DatasetLoader;
use crate::models::InjuryCategory;
use crate::utils::progress::ProgressReporter;
use crate::views;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    let loader = DatasetLoader::new(&cli.source);

    let progress = ProgressReporter::new_spinner("Loading collision data...", cli.json);
    let table = loader.load(cli.rows)?;
    progress.finish_with_message(&format!(
        "Loaded {} records from {}",
        table.len(),
        loader.source().display()
    ));

    match cli.command {
        Commands::Map { min_injured } => {
            let points = views::injury_map_points(&table, min_injured)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&points)?);
            } else {
                println!(
                    "{} collisions with at least {} person(s) injured",
                    points.len(),
                    min_injured
                );
                for point in points.iter().take(10) {
                    println!("  ({:.5}, {:.5})", point.latitude, point.longitude);
                }
                if points.len() > 10 {
                    println!("  ... and {} more", points.len() - 10);
                }
            }
        }

        Commands::Density { hour } => {
            let view = views::hourly_density(&table, hour)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                println!(
                    "Vehicle collisions between {}:00 and {}:00: {}",
                    hour,
                    (hour + 1) % 24,
                    view.points.len()
                );
                match view.center {
                    Some(center) => println!(
                        "View center: ({:.5}, {:.5})",
                        center.latitude, center.longitude
                    ),
                    None => println!("No collisions in this hour"),
                }
            }
        }

        Commands::Histogram { hour } => {
            let bins = views::minute_histogram(&table, hour)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&bins)?);
            } else {
                println!(
                    "Breakdown by minute between {}:00 and {}:00",
                    hour,
                    (hour + 1) % 24
                );
                for bin in bins.iter().filter(|b| b.crashes > 0) {
                    println!("  :{:02}  {}", bin.minute, bin.crashes);
                }
            }
        }

        Commands::Streets { category, limit } => {
            let parsed = InjuryCategory::parse(&category)
                .ok_or(ExplorerError::UnknownCategory(category))?;
            let ranking = views::top_streets(&table, parsed, limit);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&ranking)?);
            } else {
                println!("Top {} most dangerous streets ({:?})", limit, parsed);
                for (i, entry) in ranking.iter().enumerate() {
                    println!(
                        "{}. {} ({} injured)",
                        i + 1,
                        entry.on_street_name,
                        entry.injured
                    );
                }
            }
        }

        Commands::Info => {
            let summary = CollisionAnalyzer::new().summarize(&table)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{}", summary.detailed_summary());
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
