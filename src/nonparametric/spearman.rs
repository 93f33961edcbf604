// Spearman rank correlation

use statrs::distribution::{ContinuousCDF, StudentsT};

use super::{average_ranks, ensure_finite, Result, StatsError, TestStatistic};

/// Spearman's rho with a two-sided p-value from the t distribution
/// (`n - 2` degrees of freedom). The statistic is the correlation itself.
pub fn spearman(x: &[f64], y: &[f64]) -> Result<TestStatistic> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    if x.len() < 3 {
        return Err(StatsError::InsufficientData {
            required: 3,
            actual: x.len(),
        });
    }
    ensure_finite(x)?;
    ensure_finite(y)?;

    let rho = pearson(&average_ranks(x), &average_ranks(y))?;

    let df = (x.len() - 2) as f64;
    let denominator = 1.0 - rho * rho;
    let p_value = if denominator <= 0.0 {
        0.0
    } else {
        let t = rho * (df / denominator).sqrt();
        let dist =
            StudentsT::new(0.0, 1.0, df).map_err(|e| StatsError::Distribution(e.to_string()))?;
        (2.0 * dist.sf(t.abs())).clamp(0.0, 1.0)
    };

    tracing::debug!(n = x.len(), rho, p_value, "spearman");
    Ok(TestStatistic {
        statistic: rho,
        p_value,
    })
}

fn pearson(a: &[f64], b: &[f64]) -> Result<f64> {
    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let (mut cov, mut var_a, mut var_b) = (0.0, 0.0, 0.0);
    for (x, y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }
    if var_a == 0.0 || var_b == 0.0 {
        return Err(StatsError::Degenerate("input is constant"));
    }
    Ok((cov / (var_a * var_b).sqrt()).clamp(-1.0, 1.0))
}
