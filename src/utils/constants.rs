/// Canonical column names after normalization
pub const COL_DATE_TIME: &str = "date/time";
pub const COL_CRASH_DATE: &str = "crash_date";
pub const COL_CRASH_TIME: &str = "crash_time";
pub const COL_LATITUDE: &str = "latitude";
pub const COL_LONGITUDE: &str = "longitude";
pub const COL_INJURED_PERSONS: &str = "injured_persons";
pub const COL_INJURED_PEDESTRIANS: &str = "injured_pedestrians";
pub const COL_INJURED_CYCLISTS: &str = "injured_cyclists";
pub const COL_INJURED_MOTORISTS: &str = "injured_motorists";
pub const COL_ON_STREET_NAME: &str = "on_street_name";

/// Default source file (NYC open data export)
pub const DEFAULT_SOURCE_FILE: &str = "Motor_Vehicle_Collisions_-_Crashes.csv";

/// Default number of source rows read into a table
pub const DEFAULT_ROW_LIMIT: usize = 100_000;

/// Accepted crash date layouts
pub const DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%Y-%m-%d"];

/// Accepted crash time layouts
pub const TIME_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

/// Input bounds mirrored by validation
pub const MAX_INJURED_THRESHOLD: u32 = 19;
pub const MAX_HOUR: u32 = 23;
pub const MINUTES_PER_HOUR: usize = 60;
pub const TOP_STREET_COUNT: usize = 5;

/// NYC geographic bounds (used for coordinate quality reporting)
pub const NYC_MIN_LAT: f64 = 40.45;
pub const NYC_MAX_LAT: f64 = 41.0;
pub const NYC_MIN_LON: f64 = -74.3;
pub const NYC_MAX_LON: f64 = -73.6;

/// CSV read buffer size
pub const DEFAULT_BUFFER_SIZE: usize = 8192 * 16; // 128KB
