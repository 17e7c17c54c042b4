//! Monte Carlo dropout inference wrapper.
//!
//! Encodes a narrative once, then runs N stochastic forward passes against
//! the scoring oracle with dropout active at a dedicated inference rate,
//! folding every sample into running statistics. Normalization layers stay
//! in evaluation mode — that decoupling is part of the oracle contract,
//! since flipping a whole model into training mode would also perturb
//! normalization statistics and corrupt the estimates.

use std::sync::Arc;

use crate::classify::stats::{mutual_information, PassAccumulator};
use crate::model::{ModelError, ScoringOracle};

/// One prediction with calibrated confidence and uncertainty estimates.
/// Created once per classification call; never partially updated.
#[derive(Debug, Clone)]
pub struct ClassificationResult {
    pub predicted_label: String,
    /// Max of the mean class probabilities.
    pub confidence: f64,
    /// Mutual information: epistemic uncertainty across stochastic passes.
    pub uncertainty: f64,
    pub mean_probabilities: Vec<f64>,
    /// Reported but never gated on.
    pub std_probabilities: Vec<f64>,
    pub predictive_entropy: f64,
    /// Identity of the language-specific model that produced the result.
    pub model_used: String,
}

pub struct MonteCarloClassifier {
    oracle: Arc<dyn ScoringOracle>,
    passes: usize,
    dropout_rate: f32,
}

impl MonteCarloClassifier {
    pub fn new(oracle: Arc<dyn ScoringOracle>, passes: usize, dropout_rate: f32) -> Self {
        assert!(passes > 0, "at least one stochastic pass is required");
        Self {
            oracle,
            passes,
            dropout_rate,
        }
    }

    pub fn model_name(&self) -> &str {
        self.oracle.name()
    }

    pub fn labels(&self) -> &[String] {
        self.oracle.labels()
    }

    /// Run the full MC dropout estimate for one narrative.
    ///
    /// Tokenization or forward-pass failures propagate as fatal for this
    /// request; there is no silent fallback.
    pub fn predict_with_uncertainty(&self, text: &str) -> Result<ClassificationResult, ModelError> {
        let encoded = self.oracle.encode(text)?;

        let classes = self.oracle.labels().len();
        let mut acc = PassAccumulator::new(classes);

        for _ in 0..self.passes {
            let probs = self.oracle.stochastic_pass(&encoded, self.dropout_rate)?;
            let probs: Vec<f64> = probs.iter().map(|&p| p as f64).collect();
            acc.add(&probs);
            // probs dropped here; peak memory stays at one sample
        }

        let mean = acc.mean();
        let std = acc.std();
        let expected_entropy = acc.expected_entropy();

        let (argmax, &confidence) = mean
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .ok_or_else(|| ModelError::Forward("empty probability vector".into()))?;

        let predictive_entropy = crate::classify::stats::entropy(&mean);
        let uncertainty = mutual_information(&mean, expected_entropy);

        tracing::debug!(
            model = self.oracle.name(),
            passes = acc.count(),
            confidence,
            uncertainty,
            "MC dropout prediction complete"
        );

        Ok(ClassificationResult {
            predicted_label: self.oracle.labels()[argmax].clone(),
            confidence,
            uncertainty,
            mean_probabilities: mean,
            std_probabilities: std,
            predictive_entropy,
            model_used: self.oracle.name().to_string(),
        })
    }
}
