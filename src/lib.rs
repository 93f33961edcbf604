//! nonparam - non-parametric hypothesis tests over HTTP
//!
//! This library provides the rank tests (Wilcoxon, Mann-Whitney,
//! Kruskal-Wallis, Spearman, Friedman), the seeded sample dataset, CSV
//! upload previews, chart rendering and the axum router serving them.

pub mod chart;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod interpretation;
pub mod nonparametric;
pub mod pages;
pub mod runner;
pub mod server;
pub mod upload;
