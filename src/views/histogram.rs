use serde::Serialize;

use crate::error::{ExplorerError, Result};
use crate::models::CollisionTable;
use crate::utils::constants::{MAX_HOUR, MINUTES_PER_HOUR};

/// One minute bucket of the breakdown-by-minute chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MinuteBin {
    pub minute: u32,
    pub crashes: u32,
}

/// Minute-of-hour distribution of collisions within the selected hour window,
/// always 60 one-minute buckets.
pub fn minute_histogram(table: &CollisionTable, hour: u32) -> Result<Vec<MinuteBin>> {
    if hour > MAX_HOUR {
        return Err(ExplorerError::HourOutOfRange(hour));
    }

    let mut counts = [0u32; MINUTES_PER_HOUR];
    for record in table.iter().filter(|r| r.hour() == hour) {
        counts[record.minute() as usize] += 1;
    }

    Ok(counts
        .iter()
        .enumerate()
        .map(|(minute, &crashes)| MinuteBin {
            minute: minute as u32,
            crashes,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::testing::table_with_times;

    #[test]
    fn test_sixty_buckets_always() {
        let table = table_with_times(&[(3, 15)]);
        let bins = minute_histogram(&table, 10).unwrap();
        assert_eq!(bins.len(), 60);
        assert!(bins.iter().all(|b| b.crashes == 0));
    }

    #[test]
    fn test_minutes_are_binned() {
        let table = table_with_times(&[(3, 15), (3, 15), (3, 59), (4, 15)]);

        let bins = minute_histogram(&table, 3).unwrap();
        assert_eq!(bins[15].crashes, 2);
        assert_eq!(bins[59].crashes, 1);
        assert_eq!(bins.iter().map(|b| b.crashes).sum::<u32>(), 3);
    }

    #[test]
    fn test_hour_bounds() {
        let table = table_with_times(&[(3, 15)]);
        assert!(matches!(
            minute_histogram(&table, 24),
            Err(ExplorerError::HourOutOfRange(24))
        ));
    }
}
