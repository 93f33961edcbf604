// Rank transform shared by every test

use statrs::statistics::{Data, OrderStatistics, RankTieBreaker};

/// Ranks starting at 1, ties receive the average of the ranks they span.
///
/// Output order matches input order.
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut data = Data::new(values.to_vec());
    data.ranks(RankTieBreaker::Average)
}

/// Tie correction term: sum of (t^3 - t) over every group of t equal values
pub fn tie_term(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mut term = 0.0;
    let mut run = 1usize;
    for pair in sorted.windows(2) {
        if pair[0] == pair[1] {
            run += 1;
        } else {
            term += tie_contribution(run);
            run = 1;
        }
    }
    if !sorted.is_empty() {
        term += tie_contribution(run);
    }
    term
}

fn tie_contribution(run: usize) -> f64 {
    let t = run as f64;
    t * t * t - t
}
