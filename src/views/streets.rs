use serde::Serialize;

use crate::models::{CollisionTable, InjuryCategory};

/// One entry of the dangerous-streets ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreetRanking {
    pub on_street_name: String,
    pub injured: u32,
}

/// Streets ranked by injured count for the selected category.
///
/// Rows with a zero count or without a street name are excluded; the sort is
/// stable, so ties keep their source order. Truncated to `limit` entries.
pub fn top_streets(
    table: &CollisionTable,
    category: InjuryCategory,
    limit: usize,
) -> Vec<StreetRanking> {
    let mut ranking: Vec<StreetRanking> = table
        .iter()
        .filter(|r| r.injured_in(category) >= 1)
        .filter_map(|r| {
            r.on_street_name.as_ref().map(|street| StreetRanking {
                on_street_name: street.clone(),
                injured: r.injured_in(category),
            })
        })
        .collect();

    ranking.sort_by(|a, b| b.injured.cmp(&a.injured));
    ranking.truncate(limit);
    ranking
}
