// Tests for the rank tests against textbook values
//
// Reference values are the ones published for the classic small examples,
// so a regression in ranking or tail computation shows up immediately.

use super::*;
use proptest::prelude::*;

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {} +/- {}, got {}",
        expected,
        tolerance,
        actual
    );
}

/// Five pairs, every difference positive and distinct:
/// W = 0, exact two-sided p = 2 / 2^5
#[test]
fn test_wilcoxon_exact_all_positive() {
    let x = [2.0, 4.0, 6.0, 8.0, 10.0];
    let y = [1.0, 2.0, 3.0, 4.0, 5.0];

    let result = wilcoxon(&x, &y).unwrap();
    assert_eq!(result.statistic, 0.0);
    assert_close(result.p_value, 0.0625, 1e-12);
}

#[test]
fn test_wilcoxon_symmetric_is_not_significant() {
    let x = [1.0, 5.0, 2.0, 6.0, 3.0, 7.0];
    let y = [2.0, 4.0, 3.0, 5.0, 4.5, 6.5];

    let result = wilcoxon(&x, &y).unwrap();
    assert!(result.p_value > 0.05);
}

#[test]
fn test_wilcoxon_length_mismatch() {
    assert_eq!(
        wilcoxon(&[1.0, 2.0], &[1.0]),
        Err(StatsError::LengthMismatch { left: 2, right: 1 })
    );
}

#[test]
fn test_wilcoxon_all_zero_differences() {
    let x = [1.0, 2.0, 3.0];
    assert!(matches!(wilcoxon(&x, &x), Err(StatsError::Degenerate(_))));
}

#[test]
fn test_wilcoxon_rejects_nan() {
    assert_eq!(
        wilcoxon(&[1.0, f64::NAN], &[0.0, 0.0]),
        Err(StatsError::NonFinite)
    );
}

/// Fully separated groups of five: U1 = 0, exact p = 2 / C(10, 5)
#[test]
fn test_mann_whitney_exact_separated() {
    let x = [1.0, 2.0, 3.0, 4.0, 5.0];
    let y = [6.0, 7.0, 8.0, 9.0, 10.0];

    let result = mann_whitney(&x, &y).unwrap();
    assert_eq!(result.statistic, 0.0);
    assert_close(result.p_value, 2.0 / 252.0, 1e-12);
}

#[test]
fn test_mann_whitney_statistic_is_for_first_sample() {
    let x = [6.0, 7.0, 8.0, 9.0, 10.0];
    let y = [1.0, 2.0, 3.0, 4.0, 5.0];

    let result = mann_whitney(&x, &y).unwrap();
    assert_eq!(result.statistic, 25.0);
}

#[test]
fn test_mann_whitney_asymptotic_with_ties() {
    let x: Vec<f64> = (0..20).map(|i| (i % 5) as f64).collect();
    let y: Vec<f64> = (0..20).map(|i| (i % 5) as f64 + 2.0).collect();

    let result = mann_whitney(&x, &y).unwrap();
    assert!(result.p_value < 0.05);
    assert!(result.p_value > 0.0);
}

#[test]
fn test_mann_whitney_identical_values_degenerate() {
    let x = [3.0; 10];
    assert!(matches!(
        mann_whitney(&x, &x),
        Err(StatsError::Degenerate(_))
    ));
}

/// Ranks 1..9 split in three consecutive groups: H = 7.2, df = 2
#[test]
fn test_kruskal_textbook() {
    let groups = [vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0], vec![7.0, 8.0, 9.0]];

    let result = kruskal_wallis(&groups).unwrap();
    assert_close(result.statistic, 7.2, 1e-9);
    // chi-square(2) survival = exp(-x / 2)
    assert_close(result.p_value, (-3.6f64).exp(), 1e-7);
}

#[test]
fn test_kruskal_needs_two_groups() {
    let groups = [vec![1.0, 2.0]];
    assert_eq!(
        kruskal_wallis(&groups),
        Err(StatsError::InsufficientData {
            required: 2,
            actual: 1
        })
    );
}

#[test]
fn test_kruskal_all_identical() {
    let groups = [vec![1.0, 1.0], vec![1.0, 1.0]];
    assert!(matches!(
        kruskal_wallis(&groups),
        Err(StatsError::Degenerate(_))
    ));
}

#[test]
fn test_kruskal_empty_group() {
    let groups: [Vec<f64>; 2] = [vec![1.0, 2.0], vec![]];
    assert!(matches!(
        kruskal_wallis(&groups),
        Err(StatsError::InsufficientData { .. })
    ));
}

#[test]
fn test_spearman_perfect_monotone() {
    let x = [1.0, 2.0, 3.0, 4.0, 5.0];
    let y = [1.0, 4.0, 9.0, 16.0, 25.0];

    let result = spearman(&x, &y).unwrap();
    assert_close(result.statistic, 1.0, 1e-12);
    assert_eq!(result.p_value, 0.0);
}

#[test]
fn test_spearman_known_value() {
    // d^2 sum = 4 -> rho = 1 - 6 * 4 / (5 * 24) = 0.8
    let x = [1.0, 2.0, 3.0, 4.0, 5.0];
    let y = [2.0, 1.0, 4.0, 3.0, 5.0];

    let result = spearman(&x, &y).unwrap();
    assert_close(result.statistic, 0.8, 1e-12);
    assert!(result.p_value > 0.05 && result.p_value < 0.2);
}

#[test]
fn test_spearman_too_short() {
    assert!(matches!(
        spearman(&[1.0, 2.0], &[2.0, 1.0]),
        Err(StatsError::InsufficientData { .. })
    ));
}

/// Four blocks ranking three treatments identically: chi2 = 8, df = 2
#[test]
fn test_friedman_consistent_ranking() {
    let treatments = [
        vec![1.0, 2.0, 1.5, 3.0],
        vec![2.0, 3.0, 2.5, 4.0],
        vec![3.0, 4.0, 3.5, 5.0],
    ];

    let result = friedman(&treatments).unwrap();
    assert_close(result.statistic, 8.0, 1e-9);
    assert_close(result.p_value, (-4.0f64).exp(), 1e-7);
}

#[test]
fn test_friedman_needs_three_treatments() {
    let treatments = [vec![1.0, 2.0], vec![2.0, 3.0]];
    assert_eq!(
        friedman(&treatments),
        Err(StatsError::InsufficientData {
            required: 3,
            actual: 2
        })
    );
}

#[test]
fn test_friedman_unequal_lengths() {
    let treatments = [vec![1.0, 2.0], vec![2.0, 3.0], vec![1.0]];
    assert_eq!(
        friedman(&treatments),
        Err(StatsError::LengthMismatch { left: 2, right: 1 })
    );
}

#[test]
fn test_friedman_fully_tied_blocks() {
    let treatments = [vec![1.0, 2.0], vec![1.0, 2.0], vec![1.0, 2.0]];
    assert!(matches!(friedman(&treatments), Err(StatsError::Degenerate(_))));
}

proptest! {
    #[test]
    fn prop_rank_sum_is_triangular(values in prop::collection::vec(-1e6f64..1e6, 1..60)) {
        let n = values.len() as f64;
        let sum: f64 = average_ranks(&values).iter().sum();
        prop_assert!((sum - n * (n + 1.0) / 2.0).abs() < 1e-6);
    }

    #[test]
    fn prop_mann_whitney_p_value_in_unit_interval(
        x in prop::collection::vec(-100.0f64..100.0, 1..30),
        y in prop::collection::vec(-100.0f64..100.0, 1..30),
    ) {
        if let Ok(result) = mann_whitney(&x, &y) {
            prop_assert!((0.0..=1.0).contains(&result.p_value));
            prop_assert!(result.statistic >= 0.0);
            prop_assert!(result.statistic <= (x.len() * y.len()) as f64);
        }
    }

    #[test]
    fn prop_kruskal_p_value_in_unit_interval(
        a in prop::collection::vec(-100.0f64..100.0, 2..20),
        b in prop::collection::vec(-100.0f64..100.0, 2..20),
        c in prop::collection::vec(-100.0f64..100.0, 2..20),
    ) {
        if let Ok(result) = kruskal_wallis(&[a, b, c]) {
            prop_assert!((0.0..=1.0).contains(&result.p_value));
            prop_assert!(result.statistic >= -1e-9);
        }
    }
}
