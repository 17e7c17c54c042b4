//! The triage service: one explicitly constructed object owning both
//! language classifiers, built once at startup and shared by reference
//! with every request handler. No global model state.

use std::sync::Arc;

use crate::classify::{filter_allowed, DiseaseScore, MonteCarloClassifier};
use crate::config;
use crate::model::{MockOracle, ScoringOracle};
use crate::triage::{
    gate, language::detect_language, normalize, questions, selector, Admission, Language,
    SessionDecision, SessionState, TriageError,
};

/// One gated classification outcome, ready for serialization.
#[derive(Debug, Clone)]
pub struct Diagnosis {
    pub pred: String,
    pub confidence: f64,
    pub uncertainty: f64,
    pub model_used: String,
    pub top_diseases: Vec<DiseaseScore>,
    pub mean_probs: Vec<f64>,
    pub admission: Admission,
    pub red_flags: Vec<&'static str>,
}

pub struct TriageService {
    english: MonteCarloClassifier,
    tagalog: MonteCarloClassifier,
}

impl TriageService {
    pub fn new(english: Arc<dyn ScoringOracle>, tagalog: Arc<dyn ScoringOracle>) -> Self {
        Self {
            english: MonteCarloClassifier::new(
                english,
                config::MC_PASSES,
                config::INFERENCE_DROPOUT_RATE,
            ),
            tagalog: MonteCarloClassifier::new(
                tagalog,
                config::MC_PASSES,
                config::INFERENCE_DROPOUT_RATE,
            ),
        }
    }

    /// Service backed by the keyword mocks, used when no model files are
    /// installed and throughout the test suite.
    pub fn with_mock_oracles() -> Self {
        Self::new(
            Arc::new(MockOracle::english()),
            Arc::new(MockOracle::tagalog()),
        )
    }

    pub fn model_name(&self, language: Language) -> &str {
        self.classifier_for(language).model_name()
    }

    fn classifier_for(&self, language: Language) -> &MonteCarloClassifier {
        match language {
            Language::English => &self.english,
            Language::Tagalog => &self.tagalog,
        }
    }

    /// Fully gated classification of a fresh narrative: narrative checks,
    /// language hinting, MC dropout inference, disease filtering, then the
    /// confidence/uncertainty gate.
    pub fn diagnose(&self, symptoms: &str) -> Result<Diagnosis, TriageError> {
        gate::check_narrative(symptoms)?;
        let language = detect_language(symptoms)?;
        let mut diagnosis = self.classify(symptoms, language)?;
        diagnosis.admission = gate::admit(diagnosis.confidence, diagnosis.uncertainty)?;
        Ok(diagnosis)
    }

    /// Reclassification of a cumulative mid-session narrative. The input
    /// gate is skipped — the session already passed it on the first turn —
    /// and a weak prediction degrades to advisory instead of erroring, so
    /// follow-up answers can pull confidence back up.
    pub fn reassess(&self, symptoms: &str) -> Result<Diagnosis, TriageError> {
        let language = detect_language(symptoms)?;
        let mut diagnosis = self.classify(symptoms, language)?;
        diagnosis.admission = gate::admit(diagnosis.confidence, diagnosis.uncertainty)
            .unwrap_or(Admission::Advisory);
        Ok(diagnosis)
    }

    /// Next step for a follow-up session, against the question bank of the
    /// narrative's language.
    pub fn next_question(&self, symptoms: &str, state: &SessionState) -> SessionDecision {
        let language = detect_language(symptoms).unwrap_or(Language::English);
        selector::next_question(questions::bank_for(language), state)
    }

    fn classify(&self, symptoms: &str, language: Language) -> Result<Diagnosis, TriageError> {
        let canonical = normalize::normalize(symptoms);
        let classifier = self.classifier_for(language);
        let result = classifier.predict_with_uncertainty(&canonical)?;
        let (pred, top_diseases) = filter_allowed(
            &result.mean_probabilities,
            classifier.labels(),
            &result.predicted_label,
        );

        tracing::info!(
            language = language.code(),
            pred,
            confidence = result.confidence,
            uncertainty = result.uncertainty,
            "classification complete"
        );

        Ok(Diagnosis {
            pred,
            confidence: result.confidence,
            uncertainty: result.uncertainty,
            model_used: result.model_used,
            top_diseases,
            mean_probs: result.mean_probabilities,
            admission: Admission::Advisory,
            red_flags: normalize::red_flags(symptoms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TriageService {
        TriageService::with_mock_oracles()
    }

    #[test]
    fn clear_respiratory_narrative_is_accepted() {
        let d = service()
            .diagnose("I have had fever and cough for two days")
            .unwrap();
        assert_eq!(d.pred, "Pneumonia");
        assert_eq!(d.admission, Admission::Accept);
        assert_eq!(d.model_used, "BioClinical ModernBERT");
        assert!(d.confidence > 0.7);
    }

    #[test]
    fn tagalog_narrative_uses_the_tagalog_model() {
        let d = service()
            .diagnose("May lagnat at inuubo ako simula kahapon")
            .unwrap();
        assert_eq!(d.model_used, "RoBERTa Tagalog");
        assert_eq!(d.pred, "Pneumonia");
    }

    #[test]
    fn greeting_is_rejected_before_the_model_runs() {
        let err = service().diagnose("hey").unwrap_err();
        assert!(matches!(err, TriageError::InsufficientEvidence { .. }));
    }

    #[test]
    fn non_latin_script_is_rejected() {
        let err = service()
            .diagnose("У меня жар и кашель уже два дня")
            .unwrap_err();
        assert!(matches!(err, TriageError::UnsupportedLanguage { .. }));
    }

    #[test]
    fn vague_systemic_narrative_is_advisory() {
        let d = service().diagnose("I feel cold and tired today").unwrap();
        assert_eq!(d.admission, Admission::Advisory);
        assert!(d.confidence < 0.7);
    }

    #[test]
    fn top_diseases_are_sorted_descending() {
        let d = service()
            .diagnose("I have had fever and cough for two days")
            .unwrap();
        assert_eq!(d.top_diseases.len(), 4);
        assert!(d
            .top_diseases
            .windows(2)
            .all(|w| w[0].probability >= w[1].probability));
        assert_eq!(d.top_diseases[0].disease, d.pred);
    }

    #[test]
    fn red_flags_are_surfaced() {
        let d = service()
            .diagnose("bad cough and difficulty breathing since last night")
            .unwrap();
        assert_eq!(d.red_flags, vec!["breathing difficulty"]);
    }

    #[test]
    fn reassess_does_not_reject_weak_predictions() {
        // Gibberish with one keyword: diagnose() would reject on
        // confidence; reassess degrades to advisory instead.
        let d = service().reassess("slight headache").unwrap();
        assert_eq!(d.admission, Admission::Advisory);
    }

    #[test]
    fn next_question_uses_the_tagalog_bank_for_tagalog_narratives() {
        let asked: Vec<String> = Vec::new();
        let top = vec![
            DiseaseScore {
                disease: "Pneumonia".to_string(),
                probability: 0.7,
            },
            DiseaseScore {
                disease: "Dengue".to_string(),
                probability: 0.1,
            },
        ];
        let symptoms = "May lagnat ako at inuubo";
        let state = SessionState {
            symptoms,
            disease: "Pneumonia",
            confidence: 0.7,
            uncertainty: 0.2,
            asked_questions: &asked,
            top_diseases: &top,
            mode: Default::default(),
            force: false,
        };
        match service().next_question(symptoms, &state) {
            SessionDecision::Continue(q) => {
                assert!(q.question.contains("plema"), "question: {}", q.question);
            }
            other => panic!("expected a question, got {other:?}"),
        }
    }
}
