// Mann-Whitney U test for two independent samples

use super::{average_ranks, ensure_finite, normal_two_sided, tie_term, Result, StatsError, TestStatistic};

/// Without ties, the exact distribution is used when either sample has at
/// most this many observations
const EXACT_LIMIT: usize = 8;

/// Mann-Whitney U test, two-sided
///
/// Returns U for the first sample. The p-value is exact when there are no
/// ties and the smaller sample has at most 8 observations, otherwise it uses the normal approximation with tie and
/// continuity corrections.
pub fn mann_whitney(x: &[f64], y: &[f64]) -> Result<TestStatistic> {
    for sample in [x, y] {
        if sample.is_empty() {
            return Err(StatsError::InsufficientData {
                required: 1,
                actual: 0,
            });
        }
        ensure_finite(sample)?;
    }

    let n1 = x.len();
    let n2 = y.len();
    let combined: Vec<f64> = x.iter().chain(y).copied().collect();
    let ranks = average_ranks(&combined);

    let r1: f64 = ranks[..n1].iter().sum();
    let u1 = r1 - (n1 * (n1 + 1)) as f64 / 2.0;
    let u2 = (n1 * n2) as f64 - u1;
    let u = u1.max(u2);

    let ties = tie_term(&combined);
    let p_value = if n1.min(n2) <= EXACT_LIMIT && ties == 0.0 {
        exact_p_value(u, n1, n2)
    } else {
        let n = (n1 + n2) as f64;
        let product = (n1 * n2) as f64;
        let mean = product / 2.0;
        let variance = product / 12.0 * ((n + 1.0) - ties / (n * (n - 1.0)));
        if variance <= 0.0 {
            return Err(StatsError::Degenerate("all observations are identical"));
        }
        let z = (u - mean - 0.5) / variance.sqrt();
        // one tail doubled; z is non-negative here since u >= mean
        normal_two_sided(z.max(0.0))?
    };

    tracing::debug!(n1, n2, u1, p_value, "mann-whitney");
    Ok(TestStatistic {
        statistic: u1,
        p_value,
    })
}

/// Two-sided exact p-value, `2 * P(U >= u)` under the null
fn exact_p_value(u: f64, n1: usize, n2: usize) -> f64 {
    let counts = u_distribution(n1, n2);
    let total: f64 = counts.iter().sum();
    let from = u.ceil() as usize;
    let upper_tail: f64 = counts.iter().skip(from).sum::<f64>() / total;
    (2.0 * upper_tail).min(1.0)
}

/// Number of arrangements giving each value of U for sample sizes `n1`, `n2`
fn u_distribution(n1: usize, n2: usize) -> Vec<f64> {
    // previous[j] holds the counts for (i - 1, j); only one row is kept
    let mut previous: Vec<Vec<f64>> = vec![vec![1.0]; n2 + 1];
    for i in 1..=n1 {
        let mut current: Vec<Vec<f64>> = Vec::with_capacity(n2 + 1);
        current.push(vec![1.0]);
        for j in 1..=n2 {
            // largest observation comes from x (beats all j) or from y
            let mut counts = vec![0.0; i * j + 1];
            for (u, c) in previous[j].iter().enumerate() {
                counts[u + j] += c;
            }
            for (u, c) in current[j - 1].iter().enumerate() {
                counts[u] += c;
            }
            current.push(counts);
        }
        previous = current;
    }
    std::mem::take(&mut previous[n2])
}
