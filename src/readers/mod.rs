pub mod collision_reader;

pub use collision_reader::CollisionReader;
