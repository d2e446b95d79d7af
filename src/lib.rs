pub mod analyzers;
pub mod cli;
pub mod error;
pub mod loader;
pub mod models;
pub mod readers;
pub mod utils;
pub mod views;

pub use error::{ExplorerError, Result};
pub use loader::DatasetLoader;
