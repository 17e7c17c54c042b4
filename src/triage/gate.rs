//! Evidence gate: input-sufficiency and confidence/uncertainty admission.
//!
//! The classifier always produces *some* answer, gibberish included. The
//! gate is the only defense against false-positive diagnoses of
//! non-symptom text: cheap narrative checks before the model runs, and
//! confidence/uncertainty thresholds after.

use crate::config::thresholds;

use super::normalize;
use super::TriageError;

/// Post-classification admission verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Prediction trusted as-is.
    Accept,
    /// Admitted inside the soft band; follow-up questions should
    /// disambiguate and the caller is warned.
    Advisory,
    /// Confident enough that follow-up questioning is skipped entirely.
    EarlyStop,
}

/// Cheap pre-classification checks, run before the model is invoked.
///
/// A narrative passes on length if EITHER the word count or the character
/// count is sufficient; both must fail to reject.
pub fn check_narrative(text: &str) -> Result<(), TriageError> {
    let words = normalize::word_count(text);
    if words < thresholds::MIN_WORDS && text.len() < thresholds::MIN_CHARS {
        return Err(TriageError::InsufficientEvidence {
            reason: "text too short".to_string(),
        });
    }

    if !normalize::has_medical_keywords(text) {
        return Err(TriageError::InsufficientEvidence {
            reason: "no medical keywords found".to_string(),
        });
    }

    Ok(())
}

/// Confidence/uncertainty admission after classification.
pub fn admit(confidence: f64, uncertainty: f64) -> Result<Admission, TriageError> {
    if confidence >= thresholds::EARLY_STOP_CONFIDENCE
        && uncertainty <= thresholds::EARLY_STOP_UNCERTAINTY
    {
        return Ok(Admission::EarlyStop);
    }

    if confidence < thresholds::MIN_CONFIDENCE || uncertainty > thresholds::MAX_UNCERTAINTY {
        if confidence >= thresholds::SOFT_MIN_CONFIDENCE
            && uncertainty <= thresholds::SOFT_MAX_UNCERTAINTY
        {
            return Ok(Admission::Advisory);
        }
        return Err(TriageError::InsufficientEvidence {
            reason: format!(
                "prediction not trusted (confidence {confidence:.4}, uncertainty {uncertainty:.4})"
            ),
        });
    }

    Ok(Admission::Accept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_greeting() {
        // 1 word, 3 chars: both length checks fail.
        let err = check_narrative("hey").unwrap_err();
        assert!(matches!(err, TriageError::InsufficientEvidence { .. }));
    }

    #[test]
    fn rejects_short_off_topic_phrase() {
        assert!(check_narrative("what's up").is_err());
        assert!(check_narrative("lol").is_err());
    }

    #[test]
    fn accepts_eight_word_narrative() {
        check_narrative("I have had fever and cough for two days").unwrap();
    }

    #[test]
    fn accepts_tagalog_narrative() {
        check_narrative("May lagnat at inuubo ako simula kahapon").unwrap();
    }

    #[test]
    fn enough_words_passes_even_when_short_in_chars() {
        // 5 one-letter-ish words, fewer than MIN_CHARS characters.
        check_narrative("so so bad flu now").unwrap_err(); // no keyword though
        check_narrative("a bad dry cough now").unwrap();
    }

    #[test]
    fn long_text_without_keywords_is_rejected() {
        let err =
            check_narrative("the quick brown fox jumps over the lazy dog again").unwrap_err();
        match err {
            TriageError::InsufficientEvidence { reason } => {
                assert!(reason.contains("keyword"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn high_confidence_low_uncertainty_stops_early() {
        assert_eq!(admit(0.97, 0.005).unwrap(), Admission::EarlyStop);
    }

    #[test]
    fn solid_prediction_is_accepted() {
        assert_eq!(admit(0.85, 0.05).unwrap(), Admission::Accept);
    }

    #[test]
    fn soft_band_is_advisory() {
        assert_eq!(admit(0.45, 0.2).unwrap(), Admission::Advisory);
    }

    #[test]
    fn hopeless_prediction_is_rejected() {
        assert!(admit(0.2, 0.5).is_err());
        assert!(admit(0.28, 0.05).is_err());
    }

    #[test]
    fn high_uncertainty_alone_can_reject() {
        // Confident but the passes disagree wildly: distribution shift.
        assert!(admit(0.9, 0.4).is_err());
    }
}
