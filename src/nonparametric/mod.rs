// Rank-based hypothesis tests
//
// Each routine follows the defaults of the common scientific stacks so that
// results line up with what analysts already know:
// - two-sided alternative
// - average ranks for ties, with the usual tie corrections
// - exact null distributions for small samples without ties
//
// Tail probabilities come from statrs (Normal, ChiSquared, StudentsT);
// ranking uses statrs' OrderStatistics. Only the test statistics are
// assembled here.

mod friedman;
mod kruskal;
mod mann_whitney;
mod ranks;
mod spearman;
mod wilcoxon;

pub use friedman::friedman;
pub use kruskal::kruskal_wallis;
pub use mann_whitney::mann_whitney;
pub use ranks::{average_ranks, tie_term};
pub use spearman::spearman;
pub use wilcoxon::wilcoxon;

use statrs::distribution::{ChiSquared, ContinuousCDF, Normal};
use thiserror::Error;

/// Errors raised while computing a rank test
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Samples must have the same length, got {left} and {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("Sample contains a non-finite value")]
    NonFinite,

    #[error("Degenerate input: {0}")]
    Degenerate(&'static str),

    #[error("Distribution error: {0}")]
    Distribution(String),
}

pub type Result<T> = std::result::Result<T, StatsError>;

/// Statistic and two-sided p-value of a hypothesis test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestStatistic {
    /// Test statistic (W, U, H, rho or chi-square depending on the test)
    pub statistic: f64,

    /// Two-sided p-value, always within [0, 1]
    pub p_value: f64,
}

fn ensure_finite(sample: &[f64]) -> Result<()> {
    if sample.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(StatsError::NonFinite)
    }
}

/// Upper tail of the chi-square distribution
fn chi_squared_sf(x: f64, df: usize) -> Result<f64> {
    let dist =
        ChiSquared::new(df as f64).map_err(|e| StatsError::Distribution(e.to_string()))?;
    Ok(dist.sf(x).clamp(0.0, 1.0))
}

/// Two-sided tail of the standard normal distribution
fn normal_two_sided(z: f64) -> Result<f64> {
    let dist = Normal::new(0.0, 1.0).map_err(|e| StatsError::Distribution(e.to_string()))?;
    Ok((2.0 * dist.sf(z.abs())).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests;
