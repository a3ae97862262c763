pub struct StatsHelper;

impl StatsHelper {
    /// Share of `part` in `total` as a percentage; zero when `total` is zero.
    pub fn percent(part: usize, total: usize) -> f64 {
        if total == 0 {
            return 0.0;
        }
        part as f64 / total as f64 * 100.0
    }

    /// Mean of `samples` scaled to a percentage; zero for an empty slice.
    pub fn mean_percent(samples: &[f64]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        100.0 * samples.iter().sum::<f64>() / samples.len() as f64
    }
}
