//! Predictive-distribution statistics for Monte Carlo dropout sampling.

/// Shannon entropy (nats) of a probability vector.
///
/// Tolerant of exact zeros: 0·ln(0) is taken as 0.
pub fn entropy(probs: &[f64]) -> f64 {
    probs
        .iter()
        .filter(|&&p| p > 0.0)
        .map(|&p| -p * p.ln())
        .sum()
}

/// Epistemic uncertainty: entropy of the mean distribution minus the mean
/// entropy of individual samples (BALD decomposition).
///
/// Non-negative by Jensen's inequality; clamped at zero so floating-point
/// sampling noise can never surface a negative estimate.
pub fn mutual_information(mean_probs: &[f64], expected_entropy: f64) -> f64 {
    (entropy(mean_probs) - expected_entropy).max(0.0)
}

/// Streaming accumulator over stochastic passes.
///
/// Folds each sample into running first/second moments and an entropy sum,
/// so per-pass probability buffers are released immediately instead of
/// being stacked for the whole run.
pub struct PassAccumulator {
    n: usize,
    sum: Vec<f64>,
    sum_sq: Vec<f64>,
    entropy_sum: f64,
}

impl PassAccumulator {
    pub fn new(classes: usize) -> Self {
        Self {
            n: 0,
            sum: vec![0.0; classes],
            sum_sq: vec![0.0; classes],
            entropy_sum: 0.0,
        }
    }

    pub fn add(&mut self, probs: &[f64]) {
        debug_assert_eq!(probs.len(), self.sum.len());
        for (i, &p) in probs.iter().enumerate() {
            self.sum[i] += p;
            self.sum_sq[i] += p * p;
        }
        self.entropy_sum += entropy(probs);
        self.n += 1;
    }

    pub fn count(&self) -> usize {
        self.n
    }

    /// Elementwise mean over all accumulated samples.
    pub fn mean(&self) -> Vec<f64> {
        let n = self.n.max(1) as f64;
        self.sum.iter().map(|&s| s / n).collect()
    }

    /// Elementwise population standard deviation.
    pub fn std(&self) -> Vec<f64> {
        let n = self.n.max(1) as f64;
        self.sum
            .iter()
            .zip(&self.sum_sq)
            .map(|(&s, &sq)| {
                let mean = s / n;
                (sq / n - mean * mean).max(0.0).sqrt()
            })
            .collect()
    }

    /// Mean entropy of the individual samples (expected aleatoric part).
    pub fn expected_entropy(&self) -> f64 {
        self.entropy_sum / self.n.max(1) as f64
    }
}
