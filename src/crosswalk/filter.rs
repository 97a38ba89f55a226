use tracing::info;

use crate::crosswalk::CrosswalkRow;

/// Row counts around the threshold filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct FilterStats {
    pub rows_in: usize,
    pub dropped: usize,
    pub rows_out: usize,
}

/// Keep rows whose weight is strictly greater than `threshold`.
pub fn apply_threshold(rows: Vec<CrosswalkRow>, threshold: f64) -> (Vec<CrosswalkRow>, FilterStats) {
    let rows_in = rows.len();
    let kept: Vec<CrosswalkRow> = rows.into_iter()
        .filter(|row| row.weight.is_finite() && row.weight > threshold)
        .collect();

    let stats = FilterStats { rows_in, dropped: rows_in - kept.len(), rows_out: kept.len() };
    if stats.dropped > 0 {
        info!("Filtered out {} rows with weight <= {threshold}", stats.dropped);
    }
    (kept, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::RegionIds;

    fn row(weight: f64) -> CrosswalkRow {
        CrosswalkRow { source: RegionIds::default(), target: RegionIds::default(), weight }
    }

    #[test]
    fn threshold_is_strict() {
        let (kept, stats) = apply_threshold(vec![row(0.0005), row(0.002), row(0.001), row(0.0)], 0.001);
        assert_eq!(kept, vec![row(0.002)]);
        assert_eq!(stats, FilterStats { rows_in: 4, dropped: 3, rows_out: 1 });
    }

    #[test]
    fn zero_threshold_still_drops_zero_weights() {
        let (kept, stats) = apply_threshold(vec![row(0.0), row(1.0)], 0.0);
        assert_eq!(kept.len(), 1);
        assert_eq!(stats.dropped, 1);
    }
}
