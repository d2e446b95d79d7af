use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;
use validator::Validate;

use crate::utils::constants::{
    COL_INJURED_CYCLISTS, COL_INJURED_MOTORISTS, COL_INJURED_PEDESTRIANS, NYC_MAX_LAT, NYC_MAX_LON,
    NYC_MIN_LAT, NYC_MIN_LON,
};

/// Affected category of people, as selected in the dangerous-streets ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InjuryCategory {
    Pedestrians,
    Cyclists,
    Motorists,
}

impl InjuryCategory {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pedestrians" => Some(InjuryCategory::Pedestrians),
            "cyclists" => Some(InjuryCategory::Cyclists),
            "motorists" => Some(InjuryCategory::Motorists),
            _ => None,
        }
    }

    /// Canonical column name backing this category.
    pub fn column_name(&self) -> &'static str {
        match self {
            InjuryCategory::Pedestrians => COL_INJURED_PEDESTRIANS,
            InjuryCategory::Cyclists => COL_INJURED_CYCLISTS,
            InjuryCategory::Motorists => COL_INJURED_MOTORISTS,
        }
    }
}

/// One normalized collision row.
///
/// Latitude and longitude are plain `f64` rather than options: rows with a
/// missing coordinate are dropped during load, so a record in a table always
/// carries both. The `validator` ranges are used for quality reporting by the
/// analyzer, not for load-time filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Validate)]
pub struct CollisionRecord {
    /// Merged CRASH_DATE + CRASH_TIME
    pub date_time: NaiveDateTime,

    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,

    pub injured_persons: u32,
    pub injured_pedestrians: u32,
    pub injured_cyclists: u32,
    pub injured_motorists: u32,

    pub on_street_name: Option<String>,

    /// Passthrough column values, aligned with `CollisionTable::extra_columns`
    pub extra: Vec<Option<String>>,
}

impl CollisionRecord {
    pub fn hour(&self) -> u32 {
        self.date_time.hour()
    }

    pub fn minute(&self) -> u32 {
        self.date_time.minute()
    }

    /// Injured count for the selected category.
    pub fn injured_in(&self, category: InjuryCategory) -> u32 {
        match category {
            InjuryCategory::Pedestrians => self.injured_pedestrians,
            InjuryCategory::Cyclists => self.injured_cyclists,
            InjuryCategory::Motorists => self.injured_motorists,
        }
    }

    pub fn is_within_nyc_bounds(&self) -> bool {
        self.latitude >= NYC_MIN_LAT
            && self.latitude <= NYC_MAX_LAT
            && self.longitude >= NYC_MIN_LON
            && self.longitude <= NYC_MAX_LON
    }
}
