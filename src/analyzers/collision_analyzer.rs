use chrono::NaiveDateTime;
use serde::Serialize;
use validator::Validate;

use crate::error::{ExplorerError, Result};
use crate::models::CollisionTable;

#[derive(Debug, Serialize)]
pub struct DatasetSummary {
    pub total_records: usize,
    pub date_range: (NaiveDateTime, NaiveDateTime),
    pub injury_totals: InjuryTotals,
    pub geographic_bounds: GeographicBounds,
    pub coordinate_quality: CoordinateQuality,
    /// Hour of day with the most collisions, with its count
    pub busiest_hour: (u32, usize),
}

#[derive(Debug, Serialize)]
pub struct InjuryTotals {
    pub persons: u64,
    pub pedestrians: u64,
    pub cyclists: u64,
    pub motorists: u64,
}

#[derive(Debug, Serialize)]
pub struct GeographicBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

#[derive(Debug, Serialize)]
pub struct CoordinateQuality {
    pub total_records: usize,
    /// Coordinates inside valid lat/lon ranges
    pub in_range: usize,
    /// Coordinates outside ±90/±180 (sensor or entry garbage)
    pub out_of_range: usize,
    /// In-range coordinates that nevertheless fall outside the city bounds,
    /// e.g. the dataset's recurring (0, 0) rows
    pub outside_city: usize,
}

impl CoordinateQuality {
    pub fn in_range_percentage(&self) -> f64 {
        (self.in_range as f64 / self.total_records as f64) * 100.0
    }

    pub fn outside_city_percentage(&self) -> f64 {
        (self.outside_city as f64 / self.total_records as f64) * 100.0
    }
}

impl DatasetSummary {
    pub fn detailed_summary(&self) -> String {
        let mut out = String::new();
        out.push_str("Collision Dataset Summary\n");
        out.push_str("=========================\n");
        out.push_str(&format!("Total records: {}\n", self.total_records));
        out.push_str(&format!(
            "Date range: {} to {}\n",
            self.date_range.0.format("%Y-%m-%d %H:%M"),
            self.date_range.1.format("%Y-%m-%d %H:%M")
        ));
        out.push_str(&format!(
            "Busiest hour: {:02}:00 ({} collisions)\n",
            self.busiest_hour.0, self.busiest_hour.1
        ));
        out.push_str(&format!(
            "Injured: {} persons ({} pedestrians, {} cyclists, {} motorists)\n",
            self.injury_totals.persons,
            self.injury_totals.pedestrians,
            self.injury_totals.cyclists,
            self.injury_totals.motorists
        ));
        out.push_str(&format!(
            "Geographic bounds: lat {:.4}..{:.4}, lon {:.4}..{:.4}\n",
            self.geographic_bounds.min_lat,
            self.geographic_bounds.max_lat,
            self.geographic_bounds.min_lon,
            self.geographic_bounds.max_lon
        ));
        out.push_str(&format!(
            "Coordinate quality: {:.1}% in range, {} out of range, {} outside city ({:.1}%)",
            self.coordinate_quality.in_range_percentage(),
            self.coordinate_quality.out_of_range,
            self.coordinate_quality.outside_city,
            self.coordinate_quality.outside_city_percentage()
        ));
        out
    }
}

pub struct CollisionAnalyzer;

impl CollisionAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn summarize(&self, table: &CollisionTable) -> Result<DatasetSummary> {
        let records = table.records();
        if records.is_empty() {
            return Err(ExplorerError::NoRecords);
        }

        let mut min_date = records[0].date_time;
        let mut max_date = records[0].date_time;
        let mut min_lat = records[0].latitude;
        let mut max_lat = records[0].latitude;
        let mut min_lon = records[0].longitude;
        let mut max_lon = records[0].longitude;

        let mut totals = InjuryTotals {
            persons: 0,
            pedestrians: 0,
            cyclists: 0,
            motorists: 0,
        };
        let mut in_range = 0;
        let mut out_of_range = 0;
        let mut outside_city = 0;
        let mut hour_counts = [0usize; 24];

        for record in records {
            if record.date_time < min_date {
                min_date = record.date_time;
            }
            if record.date_time > max_date {
                max_date = record.date_time;
            }

            min_lat = min_lat.min(record.latitude);
            max_lat = max_lat.max(record.latitude);
            min_lon = min_lon.min(record.longitude);
            max_lon = max_lon.max(record.longitude);

            totals.persons += u64::from(record.injured_persons);
            totals.pedestrians += u64::from(record.injured_pedestrians);
            totals.cyclists += u64::from(record.injured_cyclists);
            totals.motorists += u64::from(record.injured_motorists);

            if record.validate().is_ok() {
                in_range += 1;
                if !record.is_within_nyc_bounds() {
                    outside_city += 1;
                }
            } else {
                out_of_range += 1;
            }

            hour_counts[record.hour() as usize] += 1;
        }

        let busiest_hour = hour_counts
            .iter()
            .enumerate()
            .max_by_key(|(_, &count)| count)
            .map(|(hour, &count)| (hour as u32, count))
            .unwrap_or((0, 0));

        Ok(DatasetSummary {
            total_records: records.len(),
            date_range: (min_date, max_date),
            injury_totals: totals,
            geographic_bounds: GeographicBounds {
                min_lat,
                max_lat,
                min_lon,
                max_lon,
            },
            coordinate_quality: CoordinateQuality {
                total_records: records.len(),
                in_range,
                out_of_range,
                outside_city,
            },
            busiest_hour,
        })
    }
}

impl Default for CollisionAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::{rebuild, table_with_times};

    #[test]
    fn test_summary_counts_and_bounds() {
        let table = table_with_times(&[(3, 0), (3, 30), (4, 0), (5, 0)]);

        let summary = CollisionAnalyzer::new().summarize(&table).unwrap();

        assert_eq!(summary.total_records, 4);
        assert_eq!(summary.busiest_hour, (3, 2));
        assert!(summary.geographic_bounds.min_lat <= summary.geographic_bounds.max_lat);
        assert_eq!(summary.coordinate_quality.in_range, 4);
        assert_eq!(summary.coordinate_quality.out_of_range, 0);
    }

    #[test]
    fn test_out_of_range_coordinates_are_flagged() {
        let table = table_with_times(&[(3, 0), (4, 0)]);
        let mut records = table.records().to_vec();
        records[0].latitude = 120.0;
        records[1].latitude = 0.0;
        records[1].longitude = 0.0;
        let table = rebuild(table, records);

        let summary = CollisionAnalyzer::new().summarize(&table).unwrap();
        assert_eq!(summary.coordinate_quality.out_of_range, 1);
        assert_eq!(summary.coordinate_quality.outside_city, 1);
    }

    #[test]
    fn test_empty_table_is_an_error() {
        let table = table_with_times(&[]);
        let err = CollisionAnalyzer::new().summarize(&table).unwrap_err();
        assert!(matches!(err, ExplorerError::NoRecords));
    }
}
