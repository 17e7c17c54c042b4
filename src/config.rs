use std::net::SocketAddr;
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Lusog";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Stochastic forward passes per prediction.
pub const MC_PASSES: usize = 25;

/// Dropout probability applied during inference passes. Deliberately lower
/// than the training rate so individual samples stay close to the
/// deterministic prediction while still disagreeing enough to measure.
pub const INFERENCE_DROPOUT_RATE: f32 = 0.05;

/// Get the application data directory
/// ~/Lusog/ on all platforms (user-visible, per design requirement)
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Lusog")
}

/// Get the models directory (ONNX model + tokenizer pairs)
pub fn models_dir() -> PathBuf {
    app_data_dir().join("models")
}

/// Directory of the English symptom classifier (BioClinical ModernBERT export)
pub fn english_model_dir() -> PathBuf {
    models_dir().join("bioclinical-modernbert")
}

/// Directory of the Tagalog symptom classifier (RoBERTa Tagalog export)
pub fn tagalog_model_dir() -> PathBuf {
    models_dir().join("roberta-tagalog")
}

pub fn default_log_filter() -> String {
    "info,lusog=debug".to_string()
}

/// Server bind address, overridable via LUSOG_ADDR.
pub fn server_addr() -> SocketAddr {
    std::env::var("LUSOG_ADDR")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 10000)))
}

/// Gate and stopping thresholds used across the triage pipeline.
pub mod thresholds {
    /// Narratives shorter than this in words AND characters are rejected
    /// before the model is invoked. Either measure alone is enough to pass.
    pub const MIN_WORDS: usize = 5;
    pub const MIN_CHARS: usize = 20;

    /// Above this confidence and below this uncertainty: the diagnosis is
    /// final and follow-up questioning is skipped entirely.
    pub const EARLY_STOP_CONFIDENCE: f64 = 0.95;
    pub const EARLY_STOP_UNCERTAINTY: f64 = 0.01;

    /// Hard admission band. Outside it the prediction is not trusted.
    pub const MIN_CONFIDENCE: f64 = 0.70;
    pub const MAX_UNCERTAINTY: f64 = 0.15;

    /// Soft band: admitted with an advisory so follow-up questions can
    /// disambiguate. Below/above these the request is rejected outright.
    pub const SOFT_MIN_CONFIDENCE: f64 = 0.30;
    pub const SOFT_MAX_UNCERTAINTY: f64 = 0.30;

    /// Follow-up session stops once this confidence/uncertainty is reached.
    pub const STOP_CONFIDENCE: f64 = 0.90;
    pub const STOP_UNCERTAINTY: f64 = 0.03;

    /// After this many questions without reaching a moderate confidence,
    /// the symptoms are treated as not matching any supported disease.
    pub const LOW_CONFIDENCE_QUESTION_LIMIT: usize = 6;
    pub const LOW_CONFIDENCE_BAR: f64 = 0.60;

    /// Absolute ceiling on questions per session, regardless of confidence.
    pub const MAX_QUESTIONS: usize = 10;

    /// Top-two probability gap below which the two hypotheses are treated
    /// as close competitors and a discriminating question is preferred.
    pub const CLOSE_CALL_GAP: f64 = 0.20;

    /// Stop early once this many primary questions of the leading disease
    /// are already answered by the free-text narrative, provided the
    /// prediction is at least moderately good.
    pub const EVIDENCE_COVERAGE_STOP: usize = 3;
    pub const COVERAGE_STOP_CONFIDENCE: f64 = 0.60;
    pub const COVERAGE_STOP_UNCERTAINTY: f64 = 0.10;
}
