use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{ExplorerError, Result};
use crate::models::CollisionTable;
use crate::utils::constants::MAX_HOUR;

/// One collision in the 3D density feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityPoint {
    pub date_time: NaiveDateTime,
    pub latitude: f64,
    pub longitude: f64,
}

/// Arithmetic-mean coordinates of the filtered set, used by renderers as the
/// initial view center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewCenter {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DensityView {
    pub hour: u32,
    pub points: Vec<DensityPoint>,
    /// None when no collision falls in the selected hour.
    pub center: Option<ViewCenter>,
}

/// Collisions whose timestamp falls in the selected hour of day, plus the
/// mean-coordinate center hint.
pub fn hourly_density(table: &CollisionTable, hour: u32) -> Result<DensityView> {
    if hour > MAX_HOUR {
        return Err(ExplorerError::HourOutOfRange(hour));
    }

    let points: Vec<DensityPoint> = table
        .iter()
        .filter(|r| r.hour() == hour)
        .map(|r| DensityPoint {
            date_time: r.date_time,
            latitude: r.latitude,
            longitude: r.longitude,
        })
        .collect();

    let center = if points.is_empty() {
        None
    } else {
        let n = points.len() as f64;
        Some(ViewCenter {
            latitude: points.iter().map(|p| p.latitude).sum::<f64>() / n,
            longitude: points.iter().map(|p| p.longitude).sum::<f64>() / n,
        })
    };

    Ok(DensityView {
        hour,
        points,
        center,
    })
}
