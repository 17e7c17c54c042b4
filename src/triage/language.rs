//! Language hinting for model and question-bank selection.
//!
//! Mirrors the production heuristic: a Tagalog medical keyword anywhere in
//! the narrative selects the Tagalog model, otherwise English. Both keyword
//! sets are matched by substring — deliberately crude, because off-the-shelf
//! language detectors misclassify short Tagalog text as unrelated
//! languages. Narratives written predominantly in a non-Latin script are
//! rejected as unsupported.

use super::normalize;
use super::TriageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Tagalog,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Tagalog => "tl",
        }
    }
}

/// Fraction of alphabetic characters that must be Latin for the narrative
/// to be considered supported.
const MIN_LATIN_FRACTION: f64 = 0.5;

fn is_latin(c: char) -> bool {
    c.is_ascii_alphabetic() || matches!(c, 'ñ' | 'Ñ' | 'á' | 'é' | 'í' | 'ó' | 'ú' | 'ü')
}

/// Best-guess language for a symptom narrative.
pub fn detect_language(text: &str) -> Result<Language, TriageError> {
    let alphabetic: Vec<char> = text.chars().filter(|c| c.is_alphabetic()).collect();
    if !alphabetic.is_empty() {
        let latin = alphabetic.iter().filter(|&&c| is_latin(c)).count();
        if (latin as f64) / (alphabetic.len() as f64) < MIN_LATIN_FRACTION {
            return Err(TriageError::UnsupportedLanguage {
                detected: "non-Latin script".to_string(),
            });
        }
    }

    if normalize::contains_tagalog_keywords(text) {
        Ok(Language::Tagalog)
    } else {
        Ok(Language::English)
    }
}
