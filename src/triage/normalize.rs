//! Narrative normalization and medical-signal extraction.
//!
//! Lower-cases symptom narratives and rewrites common phrasings through a
//! bilingual synonym table to canonical tokens, so downstream keyword
//! matching sees one spelling per symptom. Also hosts the medical-keyword
//! sets used by the evidence gate and the red-flag patterns surfaced as
//! advisories.

use std::sync::LazyLock;

use regex::Regex;

/// Synonym rewrites applied in order. Multi-word phrases come first so a
/// longer phrase is rewritten before its parts.
const SYNONYMS: &[(&str, &str)] = &[
    // English
    ("shortness of breath", "shortness"),
    ("breathing difficulty", "shortness"),
    ("feverishness", "fever"),
    ("feverish", "fever"),
    ("tired", "fatigue"),
    ("weak", "fatigue"),
    ("cold", "chill"),
    // Tagalog
    ("hirap huminga", "singal"),
    ("kulang sa hangin", "singal"),
    ("nilalagnat", "lagnat"),
    ("ginaw", "lagnat"),
    ("pagod", "kapaguran"),
    ("mahina", "kapaguran"),
    ("ubo", "pag-ubo"),
];

/// English medical keywords. Checked together with the Tagalog set
/// regardless of detected language, because language detection is known to
/// misclassify short Tagalog narratives.
pub const MEDICAL_KEYWORDS_EN: &[&str] = &[
    "fever", "cough", "headache", "rash", "pain", "fatigue", "tired", "chill", "cold",
    "vomit", "nausea", "diarrhea", "sore", "blister", "itch", "breath", "phlegm",
    "sweat", "bleed", "stomach", "muscle", "joint", "skin", "appetite", "dizzy",
    "chest", "crust",
];

/// Tagalog medical keywords.
pub const MEDICAL_KEYWORDS_TL: &[&str] = &[
    "lagnat", "ubo", "sakit", "masakit", "pantal", "pagod", "kapaguran", "ginaw",
    "suka", "pagtatae", "sugat", "singal", "hirap huminga", "plema", "pawis", "dugo",
    "tiyan", "kalamnan", "balat", "gana", "hilo", "dibdib", "langib", "makati",
];

/// Canonical tokens signalling systemic illness (fever/fatigue class).
const SYSTEMIC_SIGNALS: &[&str] = &["fever", "fatigue", "chill", "lagnat", "kapaguran"];

/// Canonical tokens signalling respiratory involvement.
const RESPIRATORY_SIGNALS: &[&str] = &[
    "cough", "breath", "shortness", "chest", "phlegm", "ubo", "singal", "dibdib", "plema",
];

struct RedFlag {
    regex: Regex,
    label: &'static str,
}

/// Bilingual danger phrasings surfaced as an advisory alongside the
/// diagnosis. Matched against the raw lowercased narrative.
static RED_FLAGS: LazyLock<Vec<RedFlag>> = LazyLock::new(|| {
    let flag = |pattern: &str, label: &'static str| RedFlag {
        regex: Regex::new(pattern).expect("invalid red-flag pattern"),
        label,
    };
    vec![
        flag(
            r"difficulty breathing|can'?t breathe|cannot breathe|hirap (sa )?paghinga|hirap huminga",
            "breathing difficulty",
        ),
        flag(
            r"cough(ing)? (up )?blood|blood in (my )?(stool|vomit)|dumudugo|may dugo",
            "bleeding",
        ),
        flag(r"stiff neck|matigas ang leeg", "stiff neck"),
        flag(r"confus|disorient|wala sa sarili", "confusion"),
        flag(
            r"persistent vomiting|vomiting everything|tuloy[- ]tuloy na pagsusuka",
            "persistent vomiting",
        ),
    ]
});

/// Lowercase and rewrite a narrative to canonical symptom tokens.
pub fn normalize(text: &str) -> String {
    let mut text = text.to_lowercase();
    for (from, to) in SYNONYMS {
        text = text.replace(from, to);
    }
    text
}

/// Whitespace word count, empties dropped.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// True if the lowercased text contains at least one medical keyword from
/// either language set.
pub fn has_medical_keywords(text: &str) -> bool {
    let lower = text.to_lowercase();
    MEDICAL_KEYWORDS_EN.iter().any(|k| lower.contains(k))
        || MEDICAL_KEYWORDS_TL.iter().any(|k| lower.contains(k))
}

/// True if any Tagalog medical keyword appears — the language hint used to
/// pick the Tagalog model and question bank.
pub fn contains_tagalog_keywords(text: &str) -> bool {
    let lower = text.to_lowercase();
    MEDICAL_KEYWORDS_TL.iter().any(|k| lower.contains(k))
}

/// Red-flag labels present in the narrative.
pub fn red_flags(text: &str) -> Vec<&'static str> {
    let lower = text.to_lowercase();
    RED_FLAGS
        .iter()
        .filter(|f| f.regex.is_match(&lower))
        .map(|f| f.label)
        .collect()
}

/// Fever/fatigue-class signal in a normalized narrative.
pub fn has_systemic_signals(normalized: &str) -> bool {
    SYSTEMIC_SIGNALS.iter().any(|s| normalized.contains(s))
}

/// Respiratory involvement in a normalized narrative.
pub fn has_respiratory_signals(normalized: &str) -> bool {
    RESPIRATORY_SIGNALS.iter().any(|s| normalized.contains(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_synonyms_rewrite() {
        assert_eq!(normalize("I feel Cold and Tired"), "i feel chill and fatigue");
        assert_eq!(normalize("shortness of breath"), "shortness");
    }

    #[test]
    fn tagalog_synonyms_rewrite() {
        assert_eq!(normalize("Hirap huminga ako"), "singal ako");
        assert_eq!(normalize("pagod at mahina"), "kapaguran at kapaguran");
        assert!(normalize("inuubo ako").contains("pag-ubo"));
    }

    #[test]
    fn word_count_drops_empties() {
        assert_eq!(word_count("  fever   and  cough "), 3);
        assert_eq!(word_count(""), 0);
    }

    #[test]
    fn medical_keywords_found_in_both_languages() {
        assert!(has_medical_keywords("I have a FEVER"));
        assert!(has_medical_keywords("may lagnat ako"));
        assert!(!has_medical_keywords("hey"));
        assert!(!has_medical_keywords("what's up"));
    }

    #[test]
    fn tagalog_hint_detected() {
        assert!(contains_tagalog_keywords("May lagnat at inuubo ako"));
        assert!(!contains_tagalog_keywords("I have a fever and cough"));
    }

    #[test]
    fn red_flags_detected_bilingually() {
        assert_eq!(red_flags("I have difficulty breathing"), vec!["breathing difficulty"]);
        assert_eq!(red_flags("hirap sa paghinga ako"), vec!["breathing difficulty"]);
        assert_eq!(red_flags("coughing up blood since morning"), vec!["bleeding"]);
        assert!(red_flags("mild headache").is_empty());
    }

    #[test]
    fn systemic_and_respiratory_signals() {
        let norm = normalize("I feel cold and tired");
        assert!(has_systemic_signals(&norm));
        assert!(!has_respiratory_signals(&norm));

        let norm = normalize("I feel cold and tired, I have cough");
        assert!(has_respiratory_signals(&norm));

        let norm = normalize("hirap huminga ako");
        assert!(has_respiratory_signals(&norm));
    }
}
