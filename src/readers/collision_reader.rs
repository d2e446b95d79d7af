use std::fs::File;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{ExplorerError, Result};
use crate::models::{CollisionRecord, CollisionTable};
use crate::utils::constants::{
    COL_CRASH_DATE, COL_CRASH_TIME, COL_DATE_TIME, COL_INJURED_CYCLISTS, COL_INJURED_MOTORISTS,
    COL_INJURED_PEDESTRIANS, COL_INJURED_PERSONS, COL_LATITUDE, COL_LONGITUDE, COL_ON_STREET_NAME,
    DATE_FORMATS, DEFAULT_BUFFER_SIZE, TIME_FORMATS,
};

/// Resolved positions of the required source columns, plus the indices of
/// every passthrough column.
struct ColumnLayout {
    date: usize,
    time: usize,
    latitude: usize,
    longitude: usize,
    injured_persons: usize,
    injured_pedestrians: usize,
    injured_cyclists: usize,
    injured_motorists: usize,
    on_street_name: usize,
    extras: Vec<usize>,
}

impl ColumnLayout {
    fn resolve(headers: &[String]) -> Result<Self> {
        let index_of = |name: &str| -> Result<usize> {
            headers.iter().position(|h| h == name).ok_or_else(|| {
                ExplorerError::MissingColumn {
                    column: name.to_string(),
                }
            })
        };

        let date = index_of(COL_CRASH_DATE)?;
        let time = index_of(COL_CRASH_TIME)?;
        let latitude = index_of(COL_LATITUDE)?;
        let longitude = index_of(COL_LONGITUDE)?;
        let injured_persons = index_of(COL_INJURED_PERSONS)?;
        let injured_pedestrians = index_of(COL_INJURED_PEDESTRIANS)?;
        let injured_cyclists = index_of(COL_INJURED_CYCLISTS)?;
        let injured_motorists = index_of(COL_INJURED_MOTORISTS)?;
        let on_street_name = index_of(COL_ON_STREET_NAME)?;

        let required = [
            date,
            time,
            latitude,
            longitude,
            injured_persons,
            injured_pedestrians,
            injured_cyclists,
            injured_motorists,
            on_street_name,
        ];
        let extras = (0..headers.len())
            .filter(|i| !required.contains(i))
            .collect();

        Ok(Self {
            date,
            time,
            latitude,
            longitude,
            injured_persons,
            injured_pedestrians,
            injured_cyclists,
            injured_motorists,
            on_street_name,
            extras,
        })
    }
}

/// Reads and normalizes collision rows from a delimited source file.
///
/// The pipeline per row: drop the row if either coordinate cell is empty,
/// otherwise merge the crash date and time cells into one timestamp, parse
/// the injured counts, and pass every remaining column through unchanged.
/// Any malformed retained row fails the whole read; there are no partial
/// tables.
pub struct CollisionReader;

impl CollisionReader {
    pub fn new() -> Self {
        Self
    }

    /// Read up to `row_limit` rows from `path` into a normalized table.
    pub fn read_collisions(&self, path: &Path, row_limit: usize) -> Result<CollisionTable> {
        let file = File::open(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                ExplorerError::SourceNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                ExplorerError::Io(e)
            }
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .buffer_capacity(DEFAULT_BUFFER_SIZE)
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();
        let layout = ColumnLayout::resolve(&headers)?;

        // Output column list: the crash-date slot becomes the merged
        // `date/time` column, the crash-time slot disappears.
        let columns: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != layout.time)
            .map(|(i, name)| {
                if i == layout.date {
                    COL_DATE_TIME.to_string()
                } else {
                    name.clone()
                }
            })
            .collect();
        let extra_columns: Vec<String> = layout.extras.iter().map(|&i| headers[i].clone()).collect();

        let mut records = Vec::new();
        for (i, row_result) in reader.records().take(row_limit).enumerate() {
            let row = i + 1; // 1-based data row number
            let raw = row_result?;

            if let Some(record) = self.parse_row(&raw, &layout, row)? {
                records.push(record);
            }
        }

        Ok(CollisionTable::new(columns, extra_columns, records))
    }

    /// Parse one raw CSV row; `Ok(None)` means the row was dropped by the
    /// missing-coordinate rule.
    fn parse_row(
        &self,
        raw: &csv::StringRecord,
        layout: &ColumnLayout,
        row: usize,
    ) -> Result<Option<CollisionRecord>> {
        let field = |idx: usize| raw.get(idx).unwrap_or("").trim();

        // The coordinate check comes first: a malformed timestamp on a row
        // that is dropped anyway must not fail the load.
        let lat_field = field(layout.latitude);
        let lon_field = field(layout.longitude);
        if lat_field.is_empty() || lon_field.is_empty() {
            return Ok(None);
        }

        let latitude = self.parse_coordinate(lat_field, row)?;
        let longitude = self.parse_coordinate(lon_field, row)?;

        let date_time = self.parse_timestamp(field(layout.date), field(layout.time), row)?;

        let injured_persons = self.parse_count(field(layout.injured_persons), COL_INJURED_PERSONS, row)?;
        let injured_pedestrians =
            self.parse_count(field(layout.injured_pedestrians), COL_INJURED_PEDESTRIANS, row)?;
        let injured_cyclists =
            self.parse_count(field(layout.injured_cyclists), COL_INJURED_CYCLISTS, row)?;
        let injured_motorists =
            self.parse_count(field(layout.injured_motorists), COL_INJURED_MOTORISTS, row)?;

        let street = field(layout.on_street_name);
        let on_street_name = if street.is_empty() {
            None
        } else {
            Some(street.to_string())
        };

        let extra = layout
            .extras
            .iter()
            .map(|&idx| {
                let value = field(idx);
                if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                }
            })
            .collect();

        Ok(Some(CollisionRecord {
            date_time,
            latitude,
            longitude,
            injured_persons,
            injured_pedestrians,
            injured_cyclists,
            injured_motorists,
            on_street_name,
            extra,
        }))
    }

    /// Merge the two date/time sub-fields into a single timestamp.
    fn parse_timestamp(&self, date_str: &str, time_str: &str, row: usize) -> Result<NaiveDateTime> {
        let date = DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(date_str, fmt).ok());
        let time = TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveTime::parse_from_str(time_str, fmt).ok());

        match (date, time) {
            (Some(d), Some(t)) => Ok(d.and_time(t)),
            _ => Err(ExplorerError::Timestamp {
                row,
                value: format!("{} {}", date_str, time_str),
            }),
        }
    }

    fn parse_coordinate(&self, value: &str, row: usize) -> Result<f64> {
        value
            .parse::<f64>()
            .map_err(|_| ExplorerError::InvalidCoordinate {
                row,
                value: value.to_string(),
            })
    }

    /// Parse an injured count. Empty cells read as zero; exports that went
    /// through a float dtype can carry a trailing `.0`.
    fn parse_count(&self, value: &str, column: &str, row: usize) -> Result<u32> {
        if value.is_empty() {
            return Ok(0);
        }

        if let Ok(count) = value.parse::<u32>() {
            return Ok(count);
        }

        match value.parse::<f64>() {
            Ok(f) if f >= 0.0 && f.fract() == 0.0 => Ok(f as u32),
            _ => Err(ExplorerError::InvalidCount {
                row,
                column: column.to_string(),
                value: value.to_string(),
            }),
        }
    }
}

impl Default for CollisionReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "CRASH_DATE,CRASH_TIME,BOROUGH,LATITUDE,LONGITUDE,\
        INJURED_PERSONS,INJURED_PEDESTRIANS,INJURED_CYCLISTS,INJURED_MOTORISTS,ON_STREET_NAME";

    fn write_csv(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER).unwrap();
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        file
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let reader = CollisionReader::new();

        let ts = reader.parse_timestamp("07/01/2019", "17:42", 1).unwrap();
        assert_eq!(ts.format("%Y-%m-%d %H:%M").to_string(), "2019-07-01 17:42");

        let ts = reader.parse_timestamp("2019-07-01", "17:42:30", 1).unwrap();
        assert_eq!(
            ts.format("%Y-%m-%d %H:%M:%S").to_string(),
            "2019-07-01 17:42:30"
        );

        let err = reader.parse_timestamp("July 1st", "17:42", 3).unwrap_err();
        assert!(matches!(err, ExplorerError::Timestamp { row: 3, .. }));
    }

    #[test]
    fn test_parse_count_variants() {
        let reader = CollisionReader::new();

        assert_eq!(reader.parse_count("", "injured_persons", 1).unwrap(), 0);
        assert_eq!(reader.parse_count("3", "injured_persons", 1).unwrap(), 3);
        assert_eq!(reader.parse_count("2.0", "injured_persons", 1).unwrap(), 2);
        assert!(reader.parse_count("two", "injured_persons", 1).is_err());
        assert!(reader.parse_count("-1", "injured_persons", 1).is_err());
    }

    #[test]
    fn test_read_collisions_normalizes_columns() {
        let file = write_csv(&[
            "07/01/2019,17:00,MANHATTAN,40.7128,-74.0060,1,1,0,0,BROADWAY",
            "07/01/2019,18:30,BROOKLYN,40.6782,-73.9442,0,0,0,0,",
        ]);

        let reader = CollisionReader::new();
        let table = reader.read_collisions(file.path(), 1000).unwrap();

        assert_eq!(table.len(), 2);
        assert!(table.has_column("date/time"));
        assert!(!table.has_column("crash_date"));
        assert!(!table.has_column("crash_time"));
        assert!(table.has_column("borough"));
        assert_eq!(table.extra_columns(), ["borough".to_string()]);

        let first = &table.records()[0];
        assert_eq!(first.hour(), 17);
        assert_eq!(first.injured_persons, 1);
        assert_eq!(first.on_street_name.as_deref(), Some("BROADWAY"));
        assert_eq!(first.extra, vec![Some("MANHATTAN".to_string())]);

        let second = &table.records()[1];
        assert_eq!(second.on_street_name, None);
    }

    #[test]
    fn test_rows_without_coordinates_are_dropped() {
        let file = write_csv(&[
            "07/01/2019,17:00,MANHATTAN,40.7128,-74.0060,0,0,0,0,BROADWAY",
            "07/01/2019,18:00,QUEENS,,-73.9,0,0,0,0,MAIN ST",
            "07/01/2019,19:00,QUEENS,40.72,,0,0,0,0,MAIN ST",
            "07/01/2019,20:00,BRONX,40.84,-73.86,0,0,0,0,GRAND CONCOURSE",
        ]);

        let reader = CollisionReader::new();
        let table = reader.read_collisions(file.path(), 1000).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.records()[0].on_street_name.as_deref(), Some("BROADWAY"));
        assert_eq!(
            table.records()[1].on_street_name.as_deref(),
            Some("GRAND CONCOURSE")
        );
    }

    #[test]
    fn test_malformed_timestamp_on_dropped_row_is_ignored() {
        let file = write_csv(&[
            "garbage,25:99,QUEENS,,,0,0,0,0,MAIN ST",
            "07/01/2019,17:00,MANHATTAN,40.7128,-74.0060,0,0,0,0,BROADWAY",
        ]);

        let reader = CollisionReader::new();
        let table = reader.read_collisions(file.path(), 1000).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_malformed_timestamp_on_retained_row_fails() {
        let file = write_csv(&[
            "garbage,17:00,MANHATTAN,40.7128,-74.0060,0,0,0,0,BROADWAY",
        ]);

        let reader = CollisionReader::new();
        let err = reader.read_collisions(file.path(), 1000).unwrap_err();
        assert!(matches!(err, ExplorerError::Timestamp { row: 1, .. }));
    }

    #[test]
    fn test_row_limit_truncates_in_source_order() {
        let rows: Vec<String> = (0..10)
            .map(|i| format!("07/01/2019,0{}:00,QUEENS,40.7,-73.9,{},0,0,0,ST {}", i, i, i))
            .collect();
        let row_refs: Vec<&str> = rows.iter().map(|s| s.as_str()).collect();
        let file = write_csv(&row_refs);

        let reader = CollisionReader::new();
        let table = reader.read_collisions(file.path(), 4).unwrap();

        assert_eq!(table.len(), 4);
        assert_eq!(table.records()[3].injured_persons, 3);
    }

    #[test]
    fn test_missing_column_is_a_schema_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "CRASH_DATE,CRASH_TIME,LATITUDE,LONGITUDE").unwrap();
        writeln!(file, "07/01/2019,17:00,40.7,-73.9").unwrap();

        let reader = CollisionReader::new();
        let err = reader.read_collisions(file.path(), 10).unwrap_err();
        assert!(
            matches!(err, ExplorerError::MissingColumn { ref column } if column == "injured_persons")
        );
    }

    #[test]
    fn test_source_not_found() {
        let reader = CollisionReader::new();
        let err = reader
            .read_collisions(Path::new("no_such_file.csv"), 10)
            .unwrap_err();
        assert!(matches!(err, ExplorerError::SourceNotFound { .. }));
    }
}
