//! Uncertainty-aware classification: Monte Carlo dropout inference,
//! predictive statistics, and restriction to the supported disease set.

pub mod filter;
pub mod mcd;
pub mod stats;

pub use filter::{filter_allowed, DiseaseScore, ALLOWED_DISEASES};
pub use mcd::{ClassificationResult, MonteCarloClassifier};
