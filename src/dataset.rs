//! Synthetic sample dataset
//!
//! Three groups of 30 rows with a continuous `value`, an integer `score` in
//! 1..=9 and an exponential `time`. Generation is seeded, so the same seed
//! always yields the same table.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Exp1, StandardNormal};
use serde::Serialize;
use serde_json::{Map, Value};

/// Seed used when none is configured
pub const DEFAULT_SEED: u64 = 42;

/// Rows generated per group
pub const ROWS_PER_GROUP: usize = 30;

/// Column names, in display order
pub const COLUMNS: [&str; 4] = ["group", "value", "score", "time"];

/// Group label with the normal distribution its values are drawn from
const GROUPS: [(&str, f64, f64); 3] = [("A", 50.0, 15.0), ("B", 65.0, 12.0), ("C", 45.0, 18.0)];

/// Mean of the exponential `time` column
const TIME_SCALE: f64 = 2.0;

/// One observation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    pub group: String,
    pub value: f64,
    pub score: u8,
    pub time: f64,
}

/// In-memory sample table, built per request
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    rows: Vec<Row>,
}

impl Dataset {
    /// Generate the sample table from `seed`
    ///
    /// Draw order is fixed: all group values (A, then B, then C), then every
    /// score, then every time.
    pub fn generate(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut rows: Vec<Row> = Vec::with_capacity(GROUPS.len() * ROWS_PER_GROUP);
        for (label, mean, std_dev) in GROUPS {
            for _ in 0..ROWS_PER_GROUP {
                let z: f64 = rng.sample(StandardNormal);
                rows.push(Row {
                    group: label.to_string(),
                    value: mean + std_dev * z,
                    score: 0,
                    time: 0.0,
                });
            }
        }
        for row in &mut rows {
            row.score = rng.gen_range(1..=9);
        }
        for row in &mut rows {
            let e: f64 = rng.sample(Exp1);
            row.time = TIME_SCALE * e;
        }

        tracing::debug!(seed, rows = rows.len(), "generated sample dataset");
        Self { rows }
    }

    pub fn columns(&self) -> Vec<String> {
        COLUMNS.iter().map(|c| c.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Distinct group labels in order of first appearance
    pub fn groups(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !seen.contains(&row.group.as_str()) {
                seen.push(&row.group);
            }
        }
        seen
    }

    /// `value` column restricted to one group
    pub fn values_for_group(&self, group: &str) -> Vec<f64> {
        self.rows
            .iter()
            .filter(|r| r.group == group)
            .map(|r| r.value)
            .collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.value).collect()
    }

    pub fn scores(&self) -> Vec<f64> {
        self.rows.iter().map(|r| f64::from(r.score)).collect()
    }

    /// First `n` rows as JSON objects keyed by column name
    pub fn preview(&self, n: usize) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .take(n)
            .map(|row| {
                let mut object = Map::new();
                object.insert("group".into(), Value::from(row.group.clone()));
                object.insert("value".into(), Value::from(row.value));
                object.insert("score".into(), Value::from(row.score));
                object.insert("time".into(), Value::from(row.time));
                object
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape() {
        let data = Dataset::generate(DEFAULT_SEED);
        assert_eq!(data.len(), 90);
        assert_eq!(data.groups(), vec!["A", "B", "C"]);
        for group in ["A", "B", "C"] {
            assert_eq!(data.values_for_group(group).len(), ROWS_PER_GROUP);
        }
    }

    #[test]
    fn test_same_seed_same_data() {
        assert_eq!(Dataset::generate(7), Dataset::generate(7));
    }

    #[test]
    fn test_different_seed_different_values() {
        assert_ne!(Dataset::generate(1).values(), Dataset::generate(2).values());
    }

    #[test]
    fn test_group_assignment_is_fixed() {
        let data = Dataset::generate(99);
        assert!(data.rows()[..30].iter().all(|r| r.group == "A"));
        assert!(data.rows()[30..60].iter().all(|r| r.group == "B"));
        assert!(data.rows()[60..].iter().all(|r| r.group == "C"));
    }

    #[test]
    fn test_score_and_time_bounds() {
        let data = Dataset::generate(DEFAULT_SEED);
        assert!(data.rows().iter().all(|r| (1..=9).contains(&r.score)));
        assert!(data.rows().iter().all(|r| r.time >= 0.0));
    }

    #[test]
    fn test_preview_keys_in_column_order() {
        let data = Dataset::generate(DEFAULT_SEED);
        let preview = data.preview(10);
        assert_eq!(preview.len(), 10);
        let keys: Vec<&String> = preview[0].keys().collect();
        assert_eq!(keys, vec!["group", "value", "score", "time"]);
    }

    #[test]
    fn test_preview_larger_than_table() {
        let data = Dataset::generate(DEFAULT_SEED);
        assert_eq!(data.preview(500).len(), 90);
    }
}
