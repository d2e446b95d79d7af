pub mod collision_analyzer;

pub use collision_analyzer::{CollisionAnalyzer, DatasetSummary};
