//! Keyword-backed mock oracle for tests and offline runs.
//!
//! Scores a narrative by summing logit boosts for symptom keywords found in
//! the text, then perturbs the logits per pass to imitate dropout
//! disagreement. Deterministic at dropout rate 0.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::Rng;

use super::{Encoded, ModelError, ScoringOracle};

/// Logit amplitude of the per-pass perturbation at the reference dropout
/// rate (0.05). Scales linearly with the requested rate.
const BASE_NOISE: f32 = 0.4;

struct Affinity {
    keyword: &'static str,
    label: usize,
    boost: f32,
}

const fn aff(keyword: &'static str, label: usize, boost: f32) -> Affinity {
    Affinity { keyword, label, boost }
}

// Label indices: 0 Dengue, 1 Pneumonia, 2 Typhoid, 3 Impetigo.
// Keywords cover both English and Tagalog phrasings.
const AFFINITIES: &[Affinity] = &[
    aff("fever", 0, 1.6),
    aff("fever", 2, 1.4),
    aff("fever", 1, 1.2),
    aff("lagnat", 0, 1.6),
    aff("lagnat", 2, 1.4),
    aff("lagnat", 1, 1.2),
    aff("chill", 2, 1.2),
    aff("chill", 0, 1.0),
    aff("chill", 1, 0.8),
    aff("fatigue", 2, 1.0),
    aff("fatigue", 0, 0.8),
    aff("fatigue", 1, 0.8),
    aff("kapaguran", 2, 1.0),
    aff("kapaguran", 0, 0.8),
    aff("kapaguran", 1, 0.8),
    aff("cough", 1, 3.0),
    aff("ubo", 1, 3.0),
    aff("breath", 1, 2.5),
    aff("shortness", 1, 2.5),
    aff("singal", 1, 2.5),
    aff("chest", 1, 2.0),
    aff("dibdib", 1, 2.0),
    aff("phlegm", 1, 2.0),
    aff("plema", 1, 2.0),
    aff("rash", 0, 2.2),
    aff("rash", 3, 0.8),
    aff("pantal", 0, 2.2),
    aff("pantal", 3, 0.8),
    aff("joint", 0, 2.0),
    aff("kasukasuan", 0, 2.0),
    aff("muscle", 0, 1.2),
    aff("kalamnan", 0, 1.2),
    aff("headache", 0, 1.2),
    aff("headache", 2, 0.8),
    aff("sakit ng ulo", 0, 1.2),
    aff("sakit ng ulo", 2, 0.8),
    aff("bleeding", 0, 1.8),
    aff("dugo", 0, 1.8),
    aff("stomach", 2, 2.0),
    aff("abdominal", 2, 2.0),
    aff("tiyan", 2, 2.0),
    aff("diarrhea", 2, 2.2),
    aff("pagtatae", 2, 2.2),
    aff("constipation", 2, 1.5),
    aff("appetite", 2, 1.2),
    aff("gana", 2, 1.2),
    aff("sore", 3, 3.0),
    aff("sugat", 3, 3.0),
    aff("blister", 3, 2.5),
    aff("crust", 3, 2.2),
    aff("langib", 3, 2.2),
    aff("itch", 3, 1.8),
    aff("makati", 3, 1.8),
    aff("skin", 3, 1.2),
    aff("balat", 3, 1.2),
];

pub struct MockOracle {
    name: String,
    labels: Vec<String>,
    noise: f32,
}

impl MockOracle {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            labels: ["Dengue", "Pneumonia", "Typhoid", "Impetigo"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            noise: BASE_NOISE,
        }
    }

    /// Stand-in for the English production model.
    pub fn english() -> Self {
        Self::new("BioClinical ModernBERT")
    }

    /// Stand-in for the Tagalog production model.
    pub fn tagalog() -> Self {
        Self::new("RoBERTa Tagalog")
    }

    /// Override the label map (used by filter tests that need
    /// out-of-domain labels in the distribution).
    pub fn with_labels(mut self, labels: &[&str]) -> Self {
        self.labels = labels.iter().map(|s| s.to_string()).collect();
        self
    }

    fn logits(&self, text: &str) -> Vec<f32> {
        let mut logits = vec![0.0f32; self.labels.len()];
        for a in AFFINITIES {
            if a.label < logits.len() && text.contains(a.keyword) {
                logits[a.label] += a.boost;
            }
        }
        logits
    }
}

fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&l| (l - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.iter().map(|&e| e / sum).collect()
}

fn token_id(word: &str) -> i64 {
    let mut hasher = DefaultHasher::new();
    word.hash(&mut hasher);
    (hasher.finish() % i64::MAX as u64) as i64
}

impl ScoringOracle for MockOracle {
    fn name(&self) -> &str {
        &self.name
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn encode(&self, text: &str) -> Result<Encoded, ModelError> {
        let text = text.to_lowercase();
        let input_ids: Vec<i64> = text.split_whitespace().map(token_id).collect();
        let attention_mask = vec![1i64; input_ids.len()];
        Ok(Encoded {
            input_ids,
            attention_mask,
            text,
        })
    }

    fn stochastic_pass(&self, encoded: &Encoded, dropout_rate: f32) -> Result<Vec<f32>, ModelError> {
        let mut logits = self.logits(&encoded.text);
        if dropout_rate > 0.0 {
            let amplitude = self.noise * (dropout_rate / 0.05);
            let mut rng = rand::thread_rng();
            for l in &mut logits {
                *l += rng.gen_range(-amplitude..=amplitude);
            }
        }
        Ok(softmax(&logits))
    }
}
