// Friedman test for repeated measures

use super::{average_ranks, chi_squared_sf, ensure_finite, tie_term, Result, StatsError, TestStatistic};

/// Friedman chi-square test
///
/// `treatments[j][i]` is the measurement of block `i` under treatment `j`.
/// Needs at least three treatments of equal length. Observations are ranked
/// within each block; ties are averaged and corrected for.
pub fn friedman<G: AsRef<[f64]>>(treatments: &[G]) -> Result<TestStatistic> {
    let k = treatments.len();
    if k < 3 {
        return Err(StatsError::InsufficientData {
            required: 3,
            actual: k,
        });
    }

    let n = treatments[0].as_ref().len();
    for treatment in treatments {
        let treatment = treatment.as_ref();
        if treatment.len() != n {
            return Err(StatsError::LengthMismatch {
                left: n,
                right: treatment.len(),
            });
        }
        ensure_finite(treatment)?;
    }
    if n == 0 {
        return Err(StatsError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }

    let mut rank_sums = vec![0.0; k];
    let mut ties = 0.0;
    for block in 0..n {
        let row: Vec<f64> = treatments.iter().map(|t| t.as_ref()[block]).collect();
        for (sum, rank) in rank_sums.iter_mut().zip(average_ranks(&row)) {
            *sum += rank;
        }
        ties += tie_term(&row);
    }

    let (nf, kf) = (n as f64, k as f64);
    let squares: f64 = rank_sums.iter().map(|r| r * r).sum();
    let correction = 1.0 - ties / (nf * kf * (kf * kf - 1.0));
    if correction <= 0.0 {
        return Err(StatsError::Degenerate("every block is fully tied"));
    }
    let statistic =
        (12.0 / (nf * kf * (kf + 1.0)) * squares - 3.0 * nf * (kf + 1.0)) / correction;
    let p_value = chi_squared_sf(statistic, k - 1)?;

    tracing::debug!(blocks = n, treatments = k, statistic, p_value, "friedman");
    Ok(TestStatistic { statistic, p_value })
}
