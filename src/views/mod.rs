//! Stateless view transformations over a loaded table.
//!
//! Each function recomputes its result from scratch on every call; only the
//! table itself is cached, in the loader.

pub mod density;
pub mod histogram;
pub mod map;
pub mod streets;

pub use density::{hourly_density, DensityPoint, DensityView, ViewCenter};
pub use histogram::{minute_histogram, MinuteBin};
pub use map::{injury_map_points, MapPoint};
pub use streets::{top_streets, StreetRanking};

#[cfg(test)]
pub(crate) mod testing {
    use chrono::NaiveDate;

    use crate::models::{CollisionRecord, CollisionTable};
    use crate::utils::constants::COL_DATE_TIME;

    fn base_record(i: usize) -> CollisionRecord {
        CollisionRecord {
            date_time: NaiveDate::from_ymd_opt(2019, 7, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            latitude: 40.70 + i as f64 * 0.01,
            longitude: -74.00 + i as f64 * 0.01,
            injured_persons: 0,
            injured_pedestrians: 0,
            injured_cyclists: 0,
            injured_motorists: 0,
            on_street_name: Some(format!("STREET {}", i)),
            extra: vec![],
        }
    }

    fn table(records: Vec<CollisionRecord>) -> CollisionTable {
        CollisionTable::new(
            vec![
                COL_DATE_TIME.to_string(),
                "latitude".to_string(),
                "longitude".to_string(),
            ],
            vec![],
            records,
        )
    }

    pub fn table_with_injuries(injured_persons: &[u32]) -> CollisionTable {
        table(
            injured_persons
                .iter()
                .enumerate()
                .map(|(i, &n)| {
                    let mut r = base_record(i);
                    r.injured_persons = n;
                    r
                })
                .collect(),
        )
    }

    pub fn table_with_pedestrian_injuries(injured_pedestrians: &[u32]) -> CollisionTable {
        table(
            injured_pedestrians
                .iter()
                .enumerate()
                .map(|(i, &n)| {
                    let mut r = base_record(i);
                    r.injured_pedestrians = n;
                    r
                })
                .collect(),
        )
    }

    pub fn table_with_hours(hours: &[u32]) -> CollisionTable {
        table_with_times(&hours.iter().map(|&h| (h, 0)).collect::<Vec<_>>())
    }

    pub fn table_with_times(times: &[(u32, u32)]) -> CollisionTable {
        table(
            times
                .iter()
                .enumerate()
                .map(|(i, &(hour, minute))| {
                    let mut r = base_record(i);
                    r.date_time = NaiveDate::from_ymd_opt(2019, 7, 1)
                        .unwrap()
                        .and_hms_opt(hour, minute, 0)
                        .unwrap();
                    r
                })
                .collect(),
        )
    }

    pub fn rebuild(original: CollisionTable, records: Vec<CollisionRecord>) -> CollisionTable {
        CollisionTable::new(
            original.columns().to_vec(),
            original.extra_columns().to_vec(),
            records,
        )
    }
}
