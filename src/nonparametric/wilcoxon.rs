// Wilcoxon signed-rank test for paired samples

use super::{average_ranks, ensure_finite, normal_two_sided, tie_term, Result, StatsError, TestStatistic};

/// Largest number of non-zero differences that uses the exact distribution
const EXACT_LIMIT: usize = 50;

/// Wilcoxon signed-rank test on the paired differences `x - y`
///
/// Zero differences are discarded. The statistic is the smaller of the
/// positive and negative rank sums. Without ties or zeros and with at most
/// 50 pairs the p-value comes from the exact null distribution, otherwise
/// from the tie-corrected normal approximation.
pub fn wilcoxon(x: &[f64], y: &[f64]) -> Result<TestStatistic> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    ensure_finite(x)?;
    ensure_finite(y)?;

    let diffs: Vec<f64> = x
        .iter()
        .zip(y)
        .map(|(a, b)| a - b)
        .filter(|d| *d != 0.0)
        .collect();
    let n = diffs.len();
    if n == 0 {
        return Err(StatsError::Degenerate("all paired differences are zero"));
    }

    let magnitudes: Vec<f64> = diffs.iter().map(|d| d.abs()).collect();
    let ranks = average_ranks(&magnitudes);
    let r_plus: f64 = diffs
        .iter()
        .zip(&ranks)
        .filter(|(d, _)| **d > 0.0)
        .map(|(_, r)| r)
        .sum();
    let total = (n * (n + 1)) as f64 / 2.0;
    let statistic = r_plus.min(total - r_plus);

    let ties = tie_term(&magnitudes);
    let had_zeros = n != x.len();

    let p_value = if n <= EXACT_LIMIT && ties == 0.0 && !had_zeros {
        exact_p_value(statistic, n)
    } else {
        let nf = n as f64;
        let mean = nf * (nf + 1.0) / 4.0;
        let variance = (nf * (nf + 1.0) * (2.0 * nf + 1.0) - 0.5 * ties) / 24.0;
        if variance <= 0.0 {
            return Err(StatsError::Degenerate("zero variance in signed ranks"));
        }
        normal_two_sided((statistic - mean) / variance.sqrt())?
    };

    tracing::debug!(n, statistic, p_value, "wilcoxon signed-rank");
    Ok(TestStatistic { statistic, p_value })
}

/// Two-sided exact p-value for a rank sum of `n` untied differences
fn exact_p_value(statistic: f64, n: usize) -> f64 {
    let max_sum = n * (n + 1) / 2;
    let mut counts = vec![0.0f64; max_sum + 1];
    counts[0] = 1.0;
    for rank in 1..=n {
        for sum in (rank..=max_sum).rev() {
            counts[sum] += counts[sum - rank];
        }
    }

    let total = 2f64.powi(n as i32);
    let upto = statistic.floor() as usize;
    let lower_tail: f64 = counts.iter().take(upto + 1).sum::<f64>() / total;
    (2.0 * lower_tail).min(1.0)
}
