//! Follow-up question selection.
//!
//! Re-evaluated fresh every turn from caller-supplied state, so the whole
//! module is a pure function of (diagnosis, asked questions, cumulative
//! narrative, mode). Nothing here holds memory between turns.

use crate::classify::DiseaseScore;
use crate::config::thresholds;

use super::normalize;
use super::questions::{evidence_keywords, Question, QuestionBank, QuestionCategory, TRIAGE_RESP_ID};

/// `adaptive` applies the triage/discrimination heuristics; `legacy` is
/// plain priority ordering over unasked questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    #[default]
    Adaptive,
    Legacy,
}

impl SelectionMode {
    pub fn from_str(s: &str) -> Self {
        match s {
            "legacy" => SelectionMode::Legacy,
            _ => SelectionMode::Adaptive,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    HighConfidence,
    SymptomsNotMatching,
    EvidenceSatisfied,
    NoMoreQuestions,
}

impl StopReason {
    pub fn code(&self) -> &'static str {
        match self {
            StopReason::HighConfidence => "HIGH_CONFIDENCE",
            StopReason::SymptomsNotMatching => "SYMPTOMS_NOT_MATCHING",
            StopReason::EvidenceSatisfied => "EVIDENCE_SATISFIED",
            StopReason::NoMoreQuestions => "NO_MORE_QUESTIONS",
        }
    }
}

/// Belief state round-tripped by the caller each turn.
#[derive(Debug)]
pub struct SessionState<'a> {
    /// Cumulative symptom narrative, all answers folded in.
    pub symptoms: &'a str,
    /// Current top disease.
    pub disease: &'a str,
    pub confidence: f64,
    pub uncertainty: f64,
    /// Ids of every question already asked this session.
    pub asked_questions: &'a [String],
    /// Ranked allowed diseases from the last classification.
    pub top_diseases: &'a [DiseaseScore],
    pub mode: SelectionMode,
    /// Caller override: keep questioning past the high-confidence stop.
    pub force: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionDecision {
    Continue(Question),
    Stop(StopReason),
}

/// Decide the next step for a session: stop with a reason, or ask one more
/// question from `bank`. Stopping conditions are checked in priority order;
/// first match wins.
pub fn next_question(bank: &'static QuestionBank, state: &SessionState) -> SessionDecision {
    let normalized = normalize::normalize(state.symptoms);
    let asked = state.asked_questions.len();

    if !state.force
        && state.confidence >= thresholds::STOP_CONFIDENCE
        && state.uncertainty <= thresholds::STOP_UNCERTAINTY
    {
        return SessionDecision::Stop(StopReason::HighConfidence);
    }

    // Too many questions without converging: poor fit to any supported
    // disease.
    if asked >= thresholds::LOW_CONFIDENCE_QUESTION_LIMIT
        && state.confidence < thresholds::LOW_CONFIDENCE_BAR
    {
        return SessionDecision::Stop(StopReason::SymptomsNotMatching);
    }

    if asked >= thresholds::MAX_QUESTIONS {
        return SessionDecision::Stop(StopReason::SymptomsNotMatching);
    }

    if primary_evidence_coverage(bank, state.disease, &normalized)
        >= thresholds::EVIDENCE_COVERAGE_STOP
        && state.confidence >= thresholds::COVERAGE_STOP_CONFIDENCE
        && state.uncertainty <= thresholds::COVERAGE_STOP_UNCERTAINTY
    {
        return SessionDecision::Stop(StopReason::EvidenceSatisfied);
    }

    let candidates = open_questions(bank, state.disease, state, &normalized);
    if candidates.is_empty() {
        return SessionDecision::Stop(StopReason::NoMoreQuestions);
    }

    if state.mode == SelectionMode::Legacy {
        // Safe: candidates checked non-empty above.
        return SessionDecision::Continue(best_by_priority(&candidates).unwrap());
    }

    // Fever/fatigue alone is compatible with all four diseases; respiratory
    // involvement is the single highest-value discriminator. Ask it first.
    if normalize::has_systemic_signals(&normalized)
        && !normalize::has_respiratory_signals(&normalized)
        && !state.asked_questions.iter().any(|id| id == TRIAGE_RESP_ID)
    {
        return SessionDecision::Continue(bank.triage_question());
    }

    // Respiratory keywords pull Pneumonia's questions to the front of the
    // pool even when Pneumonia is not the current top disease.
    if normalize::has_respiratory_signals(&normalized) && state.disease != "Pneumonia" {
        let pneumonia = open_questions(bank, "Pneumonia", state, &normalized);
        if let Some(q) = best_by_priority(&pneumonia) {
            return SessionDecision::Continue(q);
        }
    }

    // Close competitors: prefer a question the runner-up's bank does not
    // also contain, since a shared question cannot tell the two apart.
    if let [first, second, ..] = state.top_diseases {
        if first.probability - second.probability < thresholds::CLOSE_CALL_GAP {
            let discriminating: Vec<Question> = candidates
                .iter()
                .copied()
                .filter(|q| !bank.has_question_text(&second.disease, q.question))
                .collect();
            if let Some(q) = best_by_priority(&discriminating) {
                return SessionDecision::Continue(q);
            }
        }
    }

    SessionDecision::Continue(best_by_priority(&candidates).unwrap())
}

/// Unasked questions for `disease`, with evidence suppression in adaptive
/// mode: a question already answered in free text is never re-asked.
fn open_questions(
    bank: &'static QuestionBank,
    disease: &str,
    state: &SessionState,
    normalized: &str,
) -> Vec<Question> {
    let Some(questions) = bank.questions_for(disease) else {
        return Vec::new();
    };
    questions
        .iter()
        .copied()
        .filter(|q| !state.asked_questions.iter().any(|id| id == q.id))
        .filter(|q| state.mode == SelectionMode::Legacy || !is_evidenced(q, normalized))
        .collect()
}

fn is_evidenced(question: &Question, normalized: &str) -> bool {
    evidence_keywords(question.id)
        .iter()
        .any(|k| normalized.contains(k))
}

/// Count of primary questions for `disease` already satisfied by free-text
/// evidence.
fn primary_evidence_coverage(bank: &'static QuestionBank, disease: &str, normalized: &str) -> usize {
    bank.questions_for(disease)
        .map(|qs| {
            qs.iter()
                .filter(|q| q.category == QuestionCategory::Primary)
                .filter(|q| is_evidenced(q, normalized))
                .count()
        })
        .unwrap_or(0)
}

/// Primary-category questions outrank secondary; weight breaks ties within
/// a category; bank order breaks weight ties.
fn best_by_priority(questions: &[Question]) -> Option<Question> {
    questions.iter().copied().reduce(|best, q| {
        let rank = |q: &Question| (q.category == QuestionCategory::Primary, q.weight);
        if rank(&q) > rank(&best) {
            q
        } else {
            best
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triage::questions::QUESTION_BANK_EN;

    fn ids(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn scores(pairs: &[(&str, f64)]) -> Vec<DiseaseScore> {
        pairs
            .iter()
            .map(|(d, p)| DiseaseScore {
                disease: d.to_string(),
                probability: *p,
            })
            .collect()
    }

    fn state<'a>(
        symptoms: &'a str,
        disease: &'a str,
        confidence: f64,
        uncertainty: f64,
        asked: &'a [String],
        top: &'a [DiseaseScore],
    ) -> SessionState<'a> {
        SessionState {
            symptoms,
            disease,
            confidence,
            uncertainty,
            asked_questions: asked,
            top_diseases: top,
            mode: SelectionMode::Adaptive,
            force: false,
        }
    }

    #[test]
    fn high_confidence_stops() {
        let asked = ids(&["dengue_1"]);
        let top = scores(&[("Dengue", 0.92), ("Typhoid", 0.05)]);
        let s = state("rash and joint pain", "Dengue", 0.92, 0.02, &asked, &top);
        assert_eq!(
            next_question(&QUESTION_BANK_EN, &s),
            SessionDecision::Stop(StopReason::HighConfidence)
        );
    }

    #[test]
    fn force_overrides_high_confidence_stop() {
        let asked = ids(&["dengue_1"]);
        let top = scores(&[("Dengue", 0.92), ("Typhoid", 0.05)]);
        let mut s = state("rash and joint pain", "Dengue", 0.92, 0.02, &asked, &top);
        s.force = true;
        assert!(matches!(
            next_question(&QUESTION_BANK_EN, &s),
            SessionDecision::Continue(_)
        ));
    }

    #[test]
    fn low_confidence_exhaustion_stops() {
        let asked = ids(&[
            "dengue_1", "dengue_2", "dengue_3", "dengue_4", "dengue_5", "triage_resp_1",
        ]);
        let top = scores(&[("Dengue", 0.45), ("Typhoid", 0.40)]);
        let s = state("vague body pain", "Dengue", 0.45, 0.2, &asked, &top);
        assert_eq!(
            next_question(&QUESTION_BANK_EN, &s),
            SessionDecision::Stop(StopReason::SymptomsNotMatching)
        );
    }

    #[test]
    fn ceiling_stops_regardless_of_confidence() {
        let asked: Vec<String> = (0..10).map(|i| format!("q_{i}")).collect();
        let top = scores(&[("Typhoid", 0.70), ("Dengue", 0.20)]);
        let s = state("stomach pain and fever", "Typhoid", 0.70, 0.2, &asked, &top);
        assert_eq!(
            next_question(&QUESTION_BANK_EN, &s),
            SessionDecision::Stop(StopReason::SymptomsNotMatching)
        );
    }

    #[test]
    fn evidence_coverage_stops_with_moderate_confidence() {
        let asked = ids(&[]);
        let top = scores(&[("Pneumonia", 0.65), ("Typhoid", 0.15)]);
        let s = state(
            "cough with phlegm, chest pain when breathing, shortness of breath",
            "Pneumonia",
            0.65,
            0.05,
            &asked,
            &top,
        );
        assert_eq!(
            next_question(&QUESTION_BANK_EN, &s),
            SessionDecision::Stop(StopReason::EvidenceSatisfied)
        );
    }

    #[test]
    fn exhausted_bank_stops() {
        let asked = ids(&[
            "impetigo_1",
            "impetigo_2",
            "impetigo_3",
            "impetigo_4",
            "impetigo_5",
        ]);
        let top = scores(&[("Impetigo", 0.75), ("Dengue", 0.10)]);
        let s = state("sores on my face", "Impetigo", 0.75, 0.2, &asked, &top);
        assert_eq!(
            next_question(&QUESTION_BANK_EN, &s),
            SessionDecision::Stop(StopReason::NoMoreQuestions)
        );
    }

    #[test]
    fn unknown_disease_has_nothing_to_ask() {
        let asked = ids(&[]);
        let top = scores(&[("Influenza", 0.8)]);
        let s = state("fever and aches everywhere", "Influenza", 0.8, 0.2, &asked, &top);
        assert_eq!(
            next_question(&QUESTION_BANK_EN, &s),
            SessionDecision::Stop(StopReason::NoMoreQuestions)
        );
    }

    #[test]
    fn never_reasks_asked_or_evidenced_questions() {
        // "itch" already answers impetigo_3 in free text.
        let asked = ids(&["impetigo_1"]);
        let top = scores(&[("Impetigo", 0.75), ("Dengue", 0.30)]);
        let s = state("itchy skin blisters", "Impetigo", 0.75, 0.2, &asked, &top);
        match next_question(&QUESTION_BANK_EN, &s) {
            SessionDecision::Continue(q) => {
                assert!(!asked.iter().any(|id| id == q.id));
                assert_ne!(q.id, "impetigo_3");
                assert_eq!(q.id, "impetigo_2");
            }
            other => panic!("expected a question, got {other:?}"),
        }
    }

    #[test]
    fn systemic_without_respiratory_triggers_triage_question() {
        // "cold and tired" normalizes to chill + fatigue: systemic only.
        let asked = ids(&[]);
        let top = scores(&[("Typhoid", 0.43), ("Dengue", 0.30)]);
        let s = state("I feel cold and tired", "Typhoid", 0.43, 0.2, &asked, &top);
        match next_question(&QUESTION_BANK_EN, &s) {
            SessionDecision::Continue(q) => assert_eq!(q.id, TRIAGE_RESP_ID),
            other => panic!("expected triage question, got {other:?}"),
        }
    }

    #[test]
    fn triage_question_is_not_repeated() {
        let asked = ids(&[TRIAGE_RESP_ID]);
        let top = scores(&[("Typhoid", 0.43), ("Impetigo", 0.10)]);
        let s = state("I feel cold and tired", "Typhoid", 0.43, 0.2, &asked, &top);
        match next_question(&QUESTION_BANK_EN, &s) {
            SessionDecision::Continue(q) => assert_eq!(q.id, "typhoid_1"),
            other => panic!("expected typhoid question, got {other:?}"),
        }
    }

    #[test]
    fn respiratory_signals_pull_pneumonia_questions_forward() {
        let asked = ids(&[]);
        let top = scores(&[("Typhoid", 0.60), ("Pneumonia", 0.25)]);
        let s = state("fever and cough for three days", "Typhoid", 0.60, 0.2, &asked, &top);
        match next_question(&QUESTION_BANK_EN, &s) {
            SessionDecision::Continue(q) => assert_eq!(q.id, "pneumonia_1"),
            other => panic!("expected pneumonia question, got {other:?}"),
        }
    }

    #[test]
    fn reweighting_respects_evidence_suppression() {
        let asked = ids(&[]);
        let top = scores(&[("Typhoid", 0.60), ("Pneumonia", 0.25)]);
        let s = state(
            "fever and cough with phlegm for three days",
            "Typhoid",
            0.60,
            0.2,
            &asked,
            &top,
        );
        match next_question(&QUESTION_BANK_EN, &s) {
            // pneumonia_1 is evidenced by "phlegm"; next in priority wins.
            SessionDecision::Continue(q) => assert_eq!(q.id, "pneumonia_2"),
            other => panic!("expected pneumonia question, got {other:?}"),
        }
    }

    #[test]
    fn close_competitors_get_a_discriminating_question() {
        // dengue_4 ("high fever") is shared with the Pneumonia bank, so it
        // cannot separate the two; dengue_5 wins despite its lower weight.
        let asked = ids(&["dengue_1", "dengue_2", "dengue_3"]);
        let top = scores(&[("Dengue", 0.55), ("Pneumonia", 0.50)]);
        let s = state("rash and joint pain", "Dengue", 0.55, 0.2, &asked, &top);
        match next_question(&QUESTION_BANK_EN, &s) {
            SessionDecision::Continue(q) => assert_eq!(q.id, "dengue_5"),
            other => panic!("expected dengue_5, got {other:?}"),
        }
    }

    #[test]
    fn clear_leader_gets_plain_priority() {
        let asked = ids(&["dengue_1", "dengue_2", "dengue_3"]);
        let top = scores(&[("Dengue", 0.75), ("Pneumonia", 0.10)]);
        let s = state("rash and joint pain", "Dengue", 0.75, 0.2, &asked, &top);
        match next_question(&QUESTION_BANK_EN, &s) {
            // Gap is wide, so the shared high-fever question is fine.
            SessionDecision::Continue(q) => assert_eq!(q.id, "dengue_4"),
            other => panic!("expected dengue_4, got {other:?}"),
        }
    }

    #[test]
    fn default_priority_prefers_primary_then_weight() {
        let asked = ids(&[]);
        let top = scores(&[("Impetigo", 0.75), ("Dengue", 0.10)]);
        let s = state("my skin looks bad", "Impetigo", 0.75, 0.2, &asked, &top);
        match next_question(&QUESTION_BANK_EN, &s) {
            SessionDecision::Continue(q) => assert_eq!(q.id, "impetigo_1"),
            other => panic!("expected impetigo_1, got {other:?}"),
        }
    }

    #[test]
    fn legacy_mode_ignores_heuristics() {
        // Systemic-only narrative and a close gap would trigger the triage
        // and discrimination heuristics in adaptive mode.
        let asked = ids(&[]);
        let top = scores(&[("Dengue", 0.55), ("Pneumonia", 0.50)]);
        let mut s = state("I feel cold and tired", "Dengue", 0.55, 0.2, &asked, &top);
        s.mode = SelectionMode::Legacy;
        match next_question(&QUESTION_BANK_EN, &s) {
            SessionDecision::Continue(q) => assert_eq!(q.id, "dengue_1"),
            other => panic!("expected dengue_1, got {other:?}"),
        }
    }

    #[test]
    fn mode_parsing_defaults_to_adaptive() {
        assert_eq!(SelectionMode::from_str("legacy"), SelectionMode::Legacy);
        assert_eq!(SelectionMode::from_str("adaptive"), SelectionMode::Adaptive);
        assert_eq!(SelectionMode::from_str(""), SelectionMode::Adaptive);
    }

    #[test]
    fn stop_reason_codes() {
        assert_eq!(StopReason::HighConfidence.code(), "HIGH_CONFIDENCE");
        assert_eq!(StopReason::NoMoreQuestions.code(), "NO_MORE_QUESTIONS");
    }
}
