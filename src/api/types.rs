//! Request/response DTOs for the session protocol.
//!
//! Field names are the wire contract and must not change: existing clients
//! echo the diagnosis payload back verbatim on every follow-up turn, which
//! is the only session state this service ever sees.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::classify::DiseaseScore;
use crate::service::{Diagnosis, TriageService};
use crate::triage::{Admission, Question};

/// Shared handler state: the one service object constructed at startup.
#[derive(Clone)]
pub struct ApiContext {
    pub service: Arc<TriageService>,
}

/// Every success response nests its payload under `data`.
#[derive(Debug, Serialize)]
pub struct DataEnvelope<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct NewCaseRequest {
    #[serde(default)]
    pub symptoms: String,
}

/// Caller-echoed belief state for one follow-up turn.
#[derive(Debug, Deserialize)]
pub struct FollowUpRequest {
    /// Cumulative narrative: the original symptoms plus every folded-in
    /// answer so far.
    #[serde(default)]
    pub symptoms: String,
    pub disease: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub uncertainty: f64,
    #[serde(default)]
    pub asked_questions: Vec<String>,
    #[serde(default)]
    pub top_diseases: Vec<DiseaseScore>,
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default)]
    pub force: bool,
    /// Echoed by the client for observability; not used in selection.
    #[serde(default)]
    pub last_answer: Option<String>,
    #[serde(default)]
    pub last_question_id: Option<String>,
}

fn default_mode() -> String {
    "adaptive".to_string()
}

#[derive(Debug, Serialize)]
pub struct DiagnosisBody {
    pub pred: String,
    pub confidence: f64,
    pub uncertainty: f64,
    /// Human-readable ranking, one `"Disease: NN.NN%"` entry per allowed
    /// disease.
    pub probs: Vec<String>,
    pub model_used: String,
    pub disease: String,
    pub top_diseases: Vec<DiseaseScore>,
    pub mean_probs: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advisory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_followup: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub red_flags: Vec<&'static str>,
}

impl DiagnosisBody {
    pub fn from_diagnosis(d: &Diagnosis) -> Self {
        let (advisory, skip_followup, skip_reason) = match d.admission {
            Admission::Accept => (None, None, None),
            Admission::Advisory => (
                Some(
                    "Preliminary result with low confidence. \
                     Answering the follow-up questions will refine it."
                        .to_string(),
                ),
                None,
                None,
            ),
            Admission::EarlyStop => (None, Some(true), Some("HIGH_CONFIDENCE".to_string())),
        };

        Self {
            pred: d.pred.clone(),
            confidence: d.confidence,
            uncertainty: d.uncertainty,
            probs: format_probs(&d.top_diseases),
            model_used: d.model_used.clone(),
            disease: d.pred.clone(),
            top_diseases: d.top_diseases.clone(),
            mean_probs: d.mean_probs.clone(),
            advisory,
            skip_followup,
            skip_reason,
            red_flags: d.red_flags.clone(),
        }
    }

    /// Snapshot built purely from caller-echoed state, for follow-up turns
    /// with no narrative to reclassify.
    pub fn echo(req: &FollowUpRequest, model_used: String) -> Self {
        Self {
            pred: req.disease.clone(),
            confidence: req.confidence,
            uncertainty: req.uncertainty,
            probs: format_probs(&req.top_diseases),
            model_used,
            disease: req.disease.clone(),
            top_diseases: req.top_diseases.clone(),
            mean_probs: req.top_diseases.iter().map(|d| d.probability).collect(),
            advisory: None,
            skip_followup: None,
            skip_reason: None,
            red_flags: Vec::new(),
        }
    }
}

fn format_probs(top: &[DiseaseScore]) -> Vec<String> {
    top.iter()
        .map(|d| format!("{}: {:.2}%", d.disease, d.probability * 100.0))
        .collect()
}

#[derive(Debug, Serialize)]
pub struct QuestionBody {
    pub id: &'static str,
    pub question: &'static str,
    pub positive_symptom: &'static str,
    pub negative_symptom: &'static str,
    pub category: &'static str,
}

impl From<Question> for QuestionBody {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            question: q.question,
            positive_symptom: q.positive_symptom,
            negative_symptom: q.negative_symptom,
            category: q.category.as_str(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct FollowUpBody {
    pub should_stop: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<QuestionBody>,
    pub diagnosis: DiagnosisBody,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probs_are_formatted_as_percentages() {
        let top = vec![
            DiseaseScore {
                disease: "Dengue".to_string(),
                probability: 0.5512,
            },
            DiseaseScore {
                disease: "Typhoid".to_string(),
                probability: 0.1,
            },
        ];
        assert_eq!(format_probs(&top), vec!["Dengue: 55.12%", "Typhoid: 10.00%"]);
    }

    #[test]
    fn follow_up_request_defaults() {
        let req: FollowUpRequest =
            serde_json::from_str(r#"{"disease": "Dengue"}"#).unwrap();
        assert_eq!(req.mode, "adaptive");
        assert!(!req.force);
        assert!(req.asked_questions.is_empty());
        assert!(req.last_question_id.is_none());
    }

    #[test]
    fn question_body_carries_the_answer_phrasings() {
        let q = crate::triage::questions::QUESTION_BANK_EN
            .questions_for("Dengue")
            .unwrap()[0];
        let body = QuestionBody::from(q);
        assert_eq!(body.id, "dengue_1");
        assert_eq!(body.category, "primary");
        assert!(!body.positive_symptom.is_empty());
        assert!(!body.negative_symptom.is_empty());
    }
}
