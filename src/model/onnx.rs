//! ONNX-backed scoring oracle — behind the `onnx-models` feature.
//!
//! Expects a training-mode export of the sequence classifier so dropout
//! stays live at inference. Requires three files in the model directory:
//! - `model.onnx` — graph exported with dropout nodes active and
//!   normalization layers frozen in evaluation mode, taking the dropout
//!   probability as a trailing scalar input
//! - `tokenizer.json` — HuggingFace tokenizer definition
//! - `labels.json` — JSON array mapping class index to label string

use std::path::Path;
use std::sync::Mutex;

use ort::session::Session;

use super::{Encoded, ModelError, ScoringOracle};

/// Real scoring oracle using ONNX Runtime.
///
/// Uses interior mutability (Mutex) because `ort::Session::run` requires
/// `&mut self` but the `ScoringOracle` trait exposes `&self` for shared
/// usage; the lock also serializes stochastic passes of concurrent
/// requests against the one loaded graph.
pub struct OnnxOracle {
    name: String,
    session: Mutex<Session>,
    tokenizer: tokenizers::Tokenizer,
    labels: Vec<String>,
    /// Whether the export exposes a dropout-probability input. Collected
    /// once at load time; without it the graph's baked-in rate is used and
    /// the per-pass rate argument is ignored.
    has_ratio_input: bool,
}

impl OnnxOracle {
    /// Load a classifier export from a directory.
    pub fn load(name: &str, model_dir: &Path) -> Result<Self, ModelError> {
        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");
        let labels_path = model_dir.join("labels.json");

        for path in [&model_path, &tokenizer_path, &labels_path] {
            if !path.exists() {
                return Err(ModelError::NotFound(path.clone()));
            }
        }

        let session = Session::builder()
            .map_err(|e: ort::Error| ModelError::Init(e.to_string()))?
            .with_intra_threads(2)
            .map_err(|e: ort::Error| ModelError::Init(e.to_string()))?
            .commit_from_file(&model_path)
            .map_err(|e: ort::Error| ModelError::Init(format!("ONNX load failed: {e}")))?;

        let has_ratio_input = session
            .inputs
            .iter()
            .any(|input| input.name.ends_with("ratio"));

        let tokenizer = tokenizers::Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| ModelError::Init(format!("Tokenizer load failed: {e}")))?;

        let labels_raw = std::fs::read_to_string(&labels_path)
            .map_err(|e| ModelError::Init(format!("labels.json read failed: {e}")))?;
        let labels: Vec<String> = serde_json::from_str(&labels_raw)
            .map_err(|e| ModelError::Init(format!("labels.json parse failed: {e}")))?;
        if labels.is_empty() {
            return Err(ModelError::Init("labels.json is empty".into()));
        }

        tracing::info!(
            model = name,
            classes = labels.len(),
            ratio_input = has_ratio_input,
            "ONNX oracle loaded from {}",
            model_dir.display()
        );

        Ok(Self {
            name: name.to_string(),
            session: Mutex::new(session),
            tokenizer,
            labels,
            has_ratio_input,
        })
    }
}

impl ScoringOracle for OnnxOracle {
    fn name(&self) -> &str {
        &self.name
    }

    fn labels(&self) -> &[String] {
        &self.labels
    }

    fn encode(&self, text: &str) -> Result<Encoded, ModelError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| ModelError::Tokenization(e.to_string()))?;

        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect();

        Ok(Encoded {
            input_ids,
            attention_mask,
            text: text.to_lowercase(),
        })
    }

    fn stochastic_pass(&self, encoded: &Encoded, dropout_rate: f32) -> Result<Vec<f32>, ModelError> {
        use ort::value::TensorRef;

        let seq_len = encoded.input_ids.len();

        let ids_array = ndarray::Array2::from_shape_vec((1, seq_len), encoded.input_ids.clone())
            .map_err(|e| ModelError::Forward(e.to_string()))?;
        let mask_array =
            ndarray::Array2::from_shape_vec((1, seq_len), encoded.attention_mask.clone())
                .map_err(|e| ModelError::Forward(e.to_string()))?;
        let ratio_array = ndarray::arr0(dropout_rate);

        let ids_tensor = TensorRef::from_array_view(&ids_array)
            .map_err(|e| ModelError::Forward(e.to_string()))?;
        let mask_tensor = TensorRef::from_array_view(&mask_array)
            .map_err(|e| ModelError::Forward(e.to_string()))?;

        let mut session = self
            .session
            .lock()
            .map_err(|_| ModelError::Forward("Session lock poisoned".to_string()))?;

        let outputs = if self.has_ratio_input {
            let ratio_tensor = TensorRef::from_array_view(&ratio_array)
                .map_err(|e| ModelError::Forward(e.to_string()))?;
            session
                .run(ort::inputs![ids_tensor, mask_tensor, ratio_tensor])
                .map_err(|e| ModelError::Forward(format!("ONNX inference failed: {e}")))?
        } else {
            session
                .run(ort::inputs![ids_tensor, mask_tensor])
                .map_err(|e| ModelError::Forward(format!("ONNX inference failed: {e}")))?
        };

        // Output shape: [1, num_labels] logits
        let (shape, logits) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| ModelError::Forward(format!("Output extraction: {e}")))?;

        let classes = self.labels.len();
        if shape.len() != 2 || shape[1] as usize != classes {
            return Err(ModelError::Forward(format!(
                "Unexpected output shape: {shape:?}, expected [1, {classes}]"
            )));
        }

        // Softmax with max-subtraction for numerical stability
        let max = logits.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let exps: Vec<f32> = logits.iter().map(|&l| (l - max).exp()).collect();
        let sum: f32 = exps.iter().sum();
        Ok(exps.iter().map(|&e| e / sum).collect())
    }
}
