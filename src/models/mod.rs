pub mod record;
pub mod table;

pub use record::{CollisionRecord, InjuryCategory};
pub use table::CollisionTable;
