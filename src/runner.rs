//! Test selection and execution over the sample dataset

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::Serialize;

use crate::dataset::Dataset;
use crate::interpretation::interpret_p_value;
use crate::nonparametric::{self, StatsError, TestStatistic};

/// Seed for the Friedman arrays when none is configured
pub const DEFAULT_FRIEDMAN_SEED: u64 = 43;

/// Measurements per Friedman treatment
const FRIEDMAN_BLOCKS: usize = 30;

/// Friedman treatments as (mean, standard deviation)
const FRIEDMAN_TREATMENTS: [(f64, f64); 3] = [(50.0, 10.0), (55.0, 10.0), (52.0, 10.0)];

/// The supported tests, named as on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestKind {
    Wilcoxon,
    MannWhitney,
    KruskalWallis,
    Spearman,
    Friedman,
}

impl TestKind {
    pub const ALL: [TestKind; 5] = [
        TestKind::Wilcoxon,
        TestKind::MannWhitney,
        TestKind::KruskalWallis,
        TestKind::Spearman,
        TestKind::Friedman,
    ];

    /// Identifier accepted in `test_type`
    pub fn wire_name(self) -> &'static str {
        match self {
            TestKind::Wilcoxon => "wilcoxon",
            TestKind::MannWhitney => "mann_whitney",
            TestKind::KruskalWallis => "kruskal_wallis",
            TestKind::Spearman => "spearman",
            TestKind::Friedman => "friedman",
        }
    }

    /// Name reported in results
    pub fn display_name(self) -> &'static str {
        match self {
            TestKind::Wilcoxon => "Wilcoxon",
            TestKind::MannWhitney => "Mann-Whitney",
            TestKind::KruskalWallis => "Kruskal-Wallis",
            TestKind::Spearman => "Spearman",
            TestKind::Friedman => "Friedman",
        }
    }
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Unrecognized `test_type`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown test type: {0}")]
pub struct UnknownTestKind(pub String);

impl FromStr for TestKind {
    type Err = UnknownTestKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TestKind::ALL
            .into_iter()
            .find(|kind| kind.wire_name() == s)
            .ok_or_else(|| UnknownTestKind(s.to_string()))
    }
}

/// Statistic reported by a test, serialized under its own key
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Measure {
    #[serde(rename = "statistique")]
    Statistic(f64),
    #[serde(rename = "correlation")]
    Correlation(f64),
}

impl Measure {
    pub fn value(self) -> f64 {
        match self {
            Measure::Statistic(v) | Measure::Correlation(v) => v,
        }
    }
}

/// Outcome of one test run
///
/// Serializes as `{"test", "statistique"|"correlation", "p_value",
/// "interpretation", "graphique"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    pub test: &'static str,
    #[serde(flatten)]
    pub measure: Measure,
    pub p_value: f64,
    pub interpretation: &'static str,
    #[serde(rename = "graphique", skip_serializing_if = "Option::is_none")]
    pub chart: Option<String>,
}

impl TestResult {
    fn new(kind: TestKind, outcome: TestStatistic) -> Self {
        let measure = match kind {
            TestKind::Spearman => Measure::Correlation(outcome.statistic),
            _ => Measure::Statistic(outcome.statistic),
        };
        Self {
            test: kind.display_name(),
            measure,
            p_value: outcome.p_value,
            interpretation: interpret_p_value(outcome.p_value),
            chart: None,
        }
    }

    /// Attach a base64 PNG chart
    pub fn with_chart(mut self, chart: String) -> Self {
        self.chart = Some(chart);
        self
    }
}

/// Run `kind` on the sample dataset
///
/// Friedman does not read `dataset`: it draws three independent treatment
/// arrays from `friedman_seed`.
pub fn run_test(
    kind: TestKind,
    dataset: &Dataset,
    friedman_seed: u64,
) -> Result<TestResult, StatsError> {
    let outcome = match kind {
        TestKind::Wilcoxon => {
            let (a, b) = groups_a_b(dataset);
            nonparametric::wilcoxon(&a, &b)?
        }
        TestKind::MannWhitney => {
            let (a, b) = groups_a_b(dataset);
            nonparametric::mann_whitney(&a, &b)?
        }
        TestKind::KruskalWallis => {
            let groups: Vec<Vec<f64>> = dataset
                .groups()
                .into_iter()
                .map(|g| dataset.values_for_group(g))
                .collect();
            nonparametric::kruskal_wallis(&groups)?
        }
        TestKind::Spearman => nonparametric::spearman(&dataset.values(), &dataset.scores())?,
        TestKind::Friedman => nonparametric::friedman(&friedman_treatments(friedman_seed))?,
    };

    tracing::info!(
        test = kind.wire_name(),
        statistic = outcome.statistic,
        p_value = outcome.p_value,
        "test executed"
    );
    Ok(TestResult::new(kind, outcome))
}

fn groups_a_b(dataset: &Dataset) -> (Vec<f64>, Vec<f64>) {
    (dataset.values_for_group("A"), dataset.values_for_group("B"))
}

/// Three synthetic repeated-measures treatments, independent of the dataset
pub fn friedman_treatments(seed: u64) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    FRIEDMAN_TREATMENTS
        .iter()
        .map(|&(mean, std_dev)| {
            (0..FRIEDMAN_BLOCKS)
                .map(|_| {
                    let z: f64 = rng.sample(StandardNormal);
                    mean + std_dev * z
                })
                .collect()
        })
        .collect()
}
