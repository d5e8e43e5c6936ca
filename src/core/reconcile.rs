use super::types::{AlignedRow, Projection, ScenarioId, SeriesValues};

/// Aligns projections with possibly different horizons into one table,
/// one row per year from 0 to the longest horizon.
///
/// A scenario reports zeros for years past its own horizon rather than
/// holding its final value.
pub fn reconcile(projections: &[(ScenarioId, &Projection)]) -> Vec<AlignedRow> {
    let Some(max_year) = projections
        .iter()
        .filter_map(|(_, projection)| projection.series.last())
        .map(|point| point.year)
        .max()
    else {
        return Vec::new();
    };

    (0..=max_year)
        .map(|year| AlignedRow {
            year,
            values: projections
                .iter()
                .map(|(id, projection)| (*id, values_for_year(projection, year)))
                .collect(),
        })
        .collect()
}

fn values_for_year(projection: &Projection, year: u32) -> SeriesValues {
    // The engine emits year y at index y.
    projection
        .series
        .get(year as usize)
        .filter(|point| point.year == year)
        .map(SeriesValues::from)
        .unwrap_or_default()
}
