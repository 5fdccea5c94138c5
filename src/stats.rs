//! Edge-weight distribution summaries.
//!
//! Used to pick sensible cutoffs: quantile cut points of the weights of a
//! built graph, computed with the exclusive method (sample quantiles over
//! `n + 1` positions with linear interpolation).

use std::fmt;

use crate::error::StatsError;

pub type StatsResult<T> = std::result::Result<T, StatsError>;

/// Quantile counts reported for a graph.
pub const REPORTED_QUANTILES: [usize; 7] = [2, 3, 4, 5, 10, 100, 1000];

/// The `n - 1` cut points dividing `data` into `n` equal-probability groups.
///
/// `data` need not be sorted. Needs at least two points; `n` must be at
/// least 1 (`n = 1` gives no cut points).
pub fn quantiles(data: &[usize], n: usize) -> StatsResult<Vec<f64>> {
    if data.len() < 2 {
        return Err(StatsError::TooFewPoints { count: data.len() });
    }
    let mut sorted = data.to_vec();
    sorted.sort_unstable();

    let len = sorted.len() as i64;
    let n = n as i64;
    let m = len + 1;
    let cuts = (1..n)
        .map(|i| {
            let j = (i * m / n).clamp(1, len - 1);
            let delta = i * m - j * n;
            let below = sorted[(j - 1) as usize] as f64;
            let above = sorted[j as usize] as f64;
            (below * (n - delta) as f64 + above * delta as f64) / n as f64
        })
        .collect();
    Ok(cuts)
}

/// Quantile summary of a weight list.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightSummary {
    /// All weights, ascending.
    pub weights: Vec<usize>,
    /// (n, cut points) for each of [`REPORTED_QUANTILES`].
    pub quantiles: Vec<(usize, Vec<f64>)>,
}

impl WeightSummary {
    pub fn new(weights: &[usize]) -> StatsResult<Self> {
        let quantiles = REPORTED_QUANTILES
            .iter()
            .map(|&n| quantiles(weights, n).map(|cuts| (n, cuts)))
            .collect::<StatsResult<Vec<_>>>()?;
        let mut weights = weights.to_vec();
        weights.sort_unstable();
        Ok(Self { weights, quantiles })
    }
}

impl fmt::Display for WeightSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:?}", self.weights)?;
        for (n, cuts) in &self.quantiles {
            writeln!(f, "{n} {cuts:?}")?;
        }
        Ok(())
    }
}
