//! Black-box scoring oracles wrapped by the uncertainty classifier.
//!
//! An oracle owns a pretrained sequence classifier and its tokenizer. It is
//! consumed purely via "encode once, then repeated stochastic forward
//! passes": the Monte Carlo dropout wrapper in `classify::mcd` drives the
//! pass loop and owns all statistics.

pub mod mock;
#[cfg(feature = "onnx-models")]
pub mod onnx;

use std::path::PathBuf;

use thiserror::Error;

pub use mock::MockOracle;
#[cfg(feature = "onnx-models")]
pub use onnx::OnnxOracle;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("model file not found: {0}")]
    NotFound(PathBuf),

    #[error("model initialization: {0}")]
    Init(String),

    #[error("tokenization error: {0}")]
    Tokenization(String),

    #[error("forward pass failed: {0}")]
    Forward(String),
}

/// Result of encoding a narrative once, reused across stochastic passes.
///
/// The lowercased source text is retained alongside the token ids because
/// keyword-backed oracles (the mock used in tests and offline runs) score
/// from it directly.
#[derive(Debug, Clone)]
pub struct Encoded {
    pub input_ids: Vec<i64>,
    pub attention_mask: Vec<i64>,
    pub text: String,
}

/// A pretrained classifier consumed as a stochastic scoring oracle.
///
/// `stochastic_pass` must return a softmax probability vector over
/// `labels()` with dropout active at the given rate while normalization
/// layers stay in evaluation mode. Each call is an independent sample.
pub trait ScoringOracle: Send + Sync {
    /// Human-readable model identity, reported in diagnoses.
    fn name(&self) -> &str;

    /// Label map: index in a probability vector → label string.
    fn labels(&self) -> &[String];

    fn encode(&self, text: &str) -> Result<Encoded, ModelError>;

    fn stochastic_pass(&self, encoded: &Encoded, dropout_rate: f32) -> Result<Vec<f32>, ModelError>;
}
