// Kruskal-Wallis H test for k independent samples

use super::{average_ranks, chi_squared_sf, ensure_finite, tie_term, Result, StatsError, TestStatistic};

/// Kruskal-Wallis H test with tie correction
///
/// The p-value is the chi-square upper tail with `k - 1` degrees of freedom.
pub fn kruskal_wallis<G: AsRef<[f64]>>(groups: &[G]) -> Result<TestStatistic> {
    if groups.len() < 2 {
        return Err(StatsError::InsufficientData {
            required: 2,
            actual: groups.len(),
        });
    }

    let mut combined = Vec::new();
    for group in groups {
        let group = group.as_ref();
        if group.is_empty() {
            return Err(StatsError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        ensure_finite(group)?;
        combined.extend_from_slice(group);
    }

    let ranks = average_ranks(&combined);
    let n = combined.len() as f64;

    let mut offset = 0;
    let mut weighted = 0.0;
    for group in groups {
        let len = group.as_ref().len();
        let rank_sum: f64 = ranks[offset..offset + len].iter().sum();
        weighted += rank_sum * rank_sum / len as f64;
        offset += len;
    }

    let correction = 1.0 - tie_term(&combined) / (n * n * n - n);
    if correction <= 0.0 {
        return Err(StatsError::Degenerate("all numbers are identical"));
    }
    let statistic = (12.0 / (n * (n + 1.0)) * weighted - 3.0 * (n + 1.0)) / correction;
    let p_value = chi_squared_sf(statistic, groups.len() - 1)?;

    tracing::debug!(groups = groups.len(), statistic, p_value, "kruskal-wallis");
    Ok(TestStatistic { statistic, p_value })
}
