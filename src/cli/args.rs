use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::utils::constants::{DEFAULT_ROW_LIMIT, DEFAULT_SOURCE_FILE, TOP_STREET_COUNT};

#[derive(Parser)]
#[command(name = "collision-explorer")]
#[command(about = "Explore NYC motor vehicle collision data from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        default_value = DEFAULT_SOURCE_FILE,
        help = "Collision CSV source file"
    )]
    pub source: PathBuf,

    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_ROW_LIMIT,
        help = "Maximum source rows to load"
    )]
    pub rows: usize,

    #[arg(long, global = true, help = "Emit results as JSON")]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Map points for collisions at or above an injured-persons threshold
    Map {
        #[arg(short, long, default_value_t = 0, help = "Minimum persons injured (0-19)")]
        min_injured: u32,
    },

    /// Collisions during a given hour of day, with a view-center hint
    Density {
        #[arg(short = 'H', long, help = "Hour of day to look at (0-23)")]
        hour: u32,
    },

    /// Minute-by-minute breakdown within an hour window
    Histogram {
        #[arg(short = 'H', long, help = "Hour of day to look at (0-23)")]
        hour: u32,
    },

    /// Top dangerous streets for an affected category of people
    Streets {
        #[arg(
            short,
            long,
            default_value = "pedestrians",
            help = "Affected category: pedestrians, cyclists or motorists"
        )]
        category: String,

        #[arg(long, default_value_t = TOP_STREET_COUNT, help = "Number of streets to show")]
        limit: usize,
    },

    /// Summarize the loaded dataset
    Info,
}
