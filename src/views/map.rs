use serde::Serialize;

use crate::error::{ExplorerError, Result};
use crate::models::CollisionTable;
use crate::utils::constants::MAX_INJURED_THRESHOLD;

/// A coordinate pair for the point-map feed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Coordinates of collisions with at least `min_injured` persons injured.
///
/// `min_injured` mirrors the dashboard slider and must be in 0..=19.
pub fn injury_map_points(table: &CollisionTable, min_injured: u32) -> Result<Vec<MapPoint>> {
    if min_injured > MAX_INJURED_THRESHOLD {
        return Err(ExplorerError::ThresholdOutOfRange(min_injured));
    }

    Ok(table
        .iter()
        .filter(|r| r.injured_persons >= min_injured)
        .map(|r| MapPoint {
            latitude: r.latitude,
            longitude: r.longitude,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::table_with_injuries;

    #[test]
    fn test_threshold_filters_points() {
        let table = table_with_injuries(&[0, 2, 5, 1]);

        let all = injury_map_points(&table, 0).unwrap();
        assert_eq!(all.len(), 4);

        let severe = injury_map_points(&table, 2).unwrap();
        assert_eq!(severe.len(), 2);
    }

    #[test]
    fn test_threshold_bounds() {
        let table = table_with_injuries(&[0]);
        assert!(injury_map_points(&table, 19).is_ok());
        assert!(matches!(
            injury_map_points(&table, 20),
            Err(ExplorerError::ThresholdOutOfRange(20))
        ));
    }
}
