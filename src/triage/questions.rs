//! Bilingual follow-up question banks.
//!
//! Immutable reference data: two banks (English, Tagalog) with the same
//! question ids per disease, loaded once and never mutated. Each question
//! carries the positive/negative symptom phrasing the caller folds back
//! into the cumulative narrative after the user answers.

use super::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionCategory {
    Primary,
    Secondary,
}

impl QuestionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionCategory::Primary => "primary",
            QuestionCategory::Secondary => "secondary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Question {
    pub id: &'static str,
    pub question: &'static str,
    pub positive_symptom: &'static str,
    pub negative_symptom: &'static str,
    pub category: QuestionCategory,
    pub weight: f32,
}

const fn q(
    id: &'static str,
    question: &'static str,
    positive_symptom: &'static str,
    negative_symptom: &'static str,
    category: QuestionCategory,
    weight: f32,
) -> Question {
    Question {
        id,
        question,
        positive_symptom,
        negative_symptom,
        category,
        weight,
    }
}

use QuestionCategory::{Primary, Secondary};

pub const TRIAGE_RESP_ID: &str = "triage_resp_1";

/// Fixed respiratory triage question, injected ahead of disease-specific
/// questions when fever/fatigue is reported without respiratory signals.
const TRIAGE_RESP_EN: Question = q(
    TRIAGE_RESP_ID,
    "Do you have cough, chest pain, or difficulty breathing?",
    "I have cough, chest pain, or difficulty breathing",
    "no cough, chest pain, or difficulty breathing",
    Primary,
    10.0,
);

const TRIAGE_RESP_TL: Question = q(
    TRIAGE_RESP_ID,
    "Mayroon ka bang ubo, pananakit ng dibdib, o hirap sa paghinga?",
    "may ubo, pananakit ng dibdib, o hirap sa paghinga ako",
    "walang ubo, pananakit ng dibdib, o hirap sa paghinga",
    Primary,
    10.0,
);

const DENGUE_EN: &[Question] = &[
    q(
        "dengue_1",
        "Do you have severe headache or pain behind your eyes?",
        "severe headache and pain behind the eyes",
        "no headache or pain behind the eyes",
        Primary,
        5.0,
    ),
    q(
        "dengue_2",
        "Do you have joint or muscle pain?",
        "joint and muscle pain",
        "no joint or muscle pain",
        Primary,
        4.0,
    ),
    q(
        "dengue_3",
        "Have you noticed a skin rash or red spots?",
        "skin rash with red spots",
        "no skin rash or red spots",
        Primary,
        4.0,
    ),
    q(
        "dengue_4",
        "Do you have a high fever?",
        "high fever",
        "no high fever",
        Secondary,
        3.0,
    ),
    q(
        "dengue_5",
        "Have you had any nose or gum bleeding?",
        "nose and gum bleeding",
        "no nose or gum bleeding",
        Secondary,
        2.0,
    ),
];

const PNEUMONIA_EN: &[Question] = &[
    q(
        "pneumonia_1",
        "Do you have a productive cough with phlegm?",
        "productive cough with phlegm",
        "no productive cough or phlegm",
        Primary,
        5.0,
    ),
    q(
        "pneumonia_2",
        "Do you feel chest pain when breathing or coughing?",
        "chest pain when breathing",
        "no chest pain when breathing",
        Primary,
        5.0,
    ),
    q(
        "pneumonia_3",
        "Do you experience shortness of breath?",
        "shortness of breath",
        "no shortness of breath",
        Primary,
        4.0,
    ),
    q(
        "pneumonia_4",
        "Do you have a high fever?",
        "high fever",
        "no high fever",
        Secondary,
        3.0,
    ),
    q(
        "pneumonia_5",
        "Do you have chills or heavy sweating?",
        "chills and heavy sweating",
        "no chills or sweating",
        Secondary,
        2.0,
    ),
];

const TYPHOID_EN: &[Question] = &[
    q(
        "typhoid_1",
        "Have you had a fever lasting more than a week?",
        "fever lasting more than a week",
        "fever for less than a week",
        Primary,
        5.0,
    ),
    q(
        "typhoid_2",
        "Do you have abdominal pain or discomfort?",
        "abdominal pain",
        "no abdominal pain",
        Primary,
        4.0,
    ),
    q(
        "typhoid_3",
        "Have you experienced diarrhea or constipation?",
        "diarrhea or constipation",
        "no diarrhea or constipation",
        Primary,
        4.0,
    ),
    q(
        "typhoid_4",
        "Do you have a high fever?",
        "high fever",
        "no high fever",
        Secondary,
        3.0,
    ),
    q(
        "typhoid_5",
        "Have you lost your appetite?",
        "loss of appetite",
        "normal appetite",
        Secondary,
        2.0,
    ),
];

const IMPETIGO_EN: &[Question] = &[
    q(
        "impetigo_1",
        "Do you have red sores around your nose or mouth?",
        "red sores around the nose and mouth",
        "no sores around the nose or mouth",
        Primary,
        5.0,
    ),
    q(
        "impetigo_2",
        "Do the sores ooze or form honey-colored crusts?",
        "sores oozing with honey-colored crusts",
        "no oozing or crusts",
        Primary,
        4.0,
    ),
    q(
        "impetigo_3",
        "Are the affected skin areas itchy?",
        "itchy affected skin",
        "no itching",
        Primary,
        4.0,
    ),
    q(
        "impetigo_4",
        "Is the skin around the sores swollen or warm?",
        "swollen warm skin around the sores",
        "no swelling or warmth",
        Secondary,
        3.0,
    ),
    q(
        "impetigo_5",
        "Has anyone around you had similar skin sores?",
        "contact with someone with similar sores",
        "no contact with similar sores",
        Secondary,
        2.0,
    ),
];

const DENGUE_TL: &[Question] = &[
    q(
        "dengue_1",
        "Mayroon ka bang matinding sakit ng ulo o pananakit sa likod ng mata?",
        "matinding sakit ng ulo at pananakit sa likod ng mata",
        "walang sakit ng ulo o pananakit ng mata",
        Primary,
        5.0,
    ),
    q(
        "dengue_2",
        "Masakit ba ang iyong mga kasukasuan o kalamnan?",
        "masakit ang kasukasuan at kalamnan",
        "walang pananakit ng kasukasuan o kalamnan",
        Primary,
        4.0,
    ),
    q(
        "dengue_3",
        "May napansin ka bang pantal o pulang batik sa balat?",
        "may pantal at pulang batik sa balat",
        "walang pantal o pulang batik",
        Primary,
        4.0,
    ),
    q(
        "dengue_4",
        "May mataas ka bang lagnat?",
        "mataas na lagnat",
        "walang mataas na lagnat",
        Secondary,
        3.0,
    ),
    q(
        "dengue_5",
        "Nagkaroon ka ba ng pagdurugo sa ilong o gilagid?",
        "pagdurugo sa ilong at gilagid",
        "walang pagdurugo",
        Secondary,
        2.0,
    ),
];

const PNEUMONIA_TL: &[Question] = &[
    q(
        "pneumonia_1",
        "May ubo ka bang may kasamang plema?",
        "ubo na may plema",
        "walang ubo o plema",
        Primary,
        5.0,
    ),
    q(
        "pneumonia_2",
        "Masakit ba ang iyong dibdib kapag humihinga o umuubo?",
        "masakit ang dibdib kapag humihinga",
        "walang pananakit ng dibdib",
        Primary,
        5.0,
    ),
    q(
        "pneumonia_3",
        "Nahihirapan ka bang huminga?",
        "hirap sa paghinga",
        "walang hirap sa paghinga",
        Primary,
        4.0,
    ),
    q(
        "pneumonia_4",
        "May mataas ka bang lagnat?",
        "mataas na lagnat",
        "walang mataas na lagnat",
        Secondary,
        3.0,
    ),
    q(
        "pneumonia_5",
        "Giniginaw ka ba o labis na pinagpapawisan?",
        "giniginaw at labis na pinagpapawisan",
        "walang ginaw o pawis",
        Secondary,
        2.0,
    ),
];

const TYPHOID_TL: &[Question] = &[
    q(
        "typhoid_1",
        "Mahigit isang linggo na ba ang iyong lagnat?",
        "lagnat nang mahigit isang linggo",
        "lagnat nang wala pang isang linggo",
        Primary,
        5.0,
    ),
    q(
        "typhoid_2",
        "Masakit ba ang iyong tiyan?",
        "masakit ang tiyan",
        "walang sakit ng tiyan",
        Primary,
        4.0,
    ),
    q(
        "typhoid_3",
        "Nakaranas ka ba ng pagtatae o tibi?",
        "pagtatae o tibi",
        "walang pagtatae o tibi",
        Primary,
        4.0,
    ),
    q(
        "typhoid_4",
        "May mataas ka bang lagnat?",
        "mataas na lagnat",
        "walang mataas na lagnat",
        Secondary,
        3.0,
    ),
    q(
        "typhoid_5",
        "Nawalan ka ba ng gana sa pagkain?",
        "walang gana sa pagkain",
        "normal ang gana sa pagkain",
        Secondary,
        2.0,
    ),
];

const IMPETIGO_TL: &[Question] = &[
    q(
        "impetigo_1",
        "May mga pulang sugat ka ba sa paligid ng ilong o bibig?",
        "pulang sugat sa paligid ng ilong at bibig",
        "walang sugat sa ilong o bibig",
        Primary,
        5.0,
    ),
    q(
        "impetigo_2",
        "Tumutulo ba o nagkaka-langib ang mga sugat?",
        "sugat na tumutulo at may langib",
        "walang tumutulo o langib",
        Primary,
        4.0,
    ),
    q(
        "impetigo_3",
        "Makati ba ang mga apektadong bahagi ng balat?",
        "makating balat",
        "hindi makati",
        Primary,
        4.0,
    ),
    q(
        "impetigo_4",
        "Namamaga ba o mainit ang balat sa paligid ng sugat?",
        "namamaga at mainit na balat sa paligid ng sugat",
        "walang pamamaga",
        Secondary,
        3.0,
    ),
    q(
        "impetigo_5",
        "May kakilala ka bang may katulad na sugat sa balat?",
        "may nakasalamuha na may katulad na sugat",
        "walang kakilalang may katulad na sugat",
        Secondary,
        2.0,
    ),
];

/// One language's complete question bank: disease name → ordered questions.
pub struct QuestionBank {
    pub language: Language,
    entries: &'static [(&'static str, &'static [Question])],
    triage_resp: Question,
}

pub static QUESTION_BANK_EN: QuestionBank = QuestionBank {
    language: Language::English,
    entries: &[
        ("Dengue", DENGUE_EN),
        ("Pneumonia", PNEUMONIA_EN),
        ("Typhoid", TYPHOID_EN),
        ("Impetigo", IMPETIGO_EN),
    ],
    triage_resp: TRIAGE_RESP_EN,
};

pub static QUESTION_BANK_TL: QuestionBank = QuestionBank {
    language: Language::Tagalog,
    entries: &[
        ("Dengue", DENGUE_TL),
        ("Pneumonia", PNEUMONIA_TL),
        ("Typhoid", TYPHOID_TL),
        ("Impetigo", IMPETIGO_TL),
    ],
    triage_resp: TRIAGE_RESP_TL,
};

pub fn bank_for(language: Language) -> &'static QuestionBank {
    match language {
        Language::English => &QUESTION_BANK_EN,
        Language::Tagalog => &QUESTION_BANK_TL,
    }
}

impl QuestionBank {
    pub fn questions_for(&self, disease: &str) -> Option<&'static [Question]> {
        self.entries
            .iter()
            .find(|(name, _)| *name == disease)
            .map(|(_, questions)| *questions)
    }

    pub fn diseases(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn triage_question(&self) -> Question {
        self.triage_resp
    }

    /// Whether `text` is the exact text of any question in `disease`'s set.
    /// Used by the discrimination check: a question shared verbatim between
    /// two banks cannot tell the two hypotheses apart.
    pub fn has_question_text(&self, disease: &str, text: &str) -> bool {
        self.questions_for(disease)
            .map(|qs| qs.iter().any(|q| q.question == text))
            .unwrap_or(false)
    }
}

/// Curated bilingual symptom keywords per question id, matched against the
/// normalized cumulative narrative to suppress questions the user has
/// already answered in free text.
pub fn evidence_keywords(id: &str) -> &'static [&'static str] {
    match id {
        "dengue_1" => &["behind the eyes", "severe headache", "matinding sakit ng ulo"],
        "dengue_2" => &["joint", "muscle", "kasukasuan", "kalamnan"],
        "dengue_3" => &["rash", "red spots", "pantal"],
        "dengue_4" | "pneumonia_4" | "typhoid_4" => &["high fever", "mataas na lagnat"],
        "dengue_5" => &["bleed", "nosebleed", "dugo", "pagdurugo"],
        "pneumonia_1" => &["phlegm", "plema"],
        "pneumonia_2" => &["chest", "dibdib"],
        "pneumonia_3" => &["shortness", "singal"],
        "pneumonia_5" => &["chill", "sweat", "pawis"],
        "typhoid_1" => &["more than a week", "prolonged fever", "mahigit isang linggo"],
        "typhoid_2" => &["abdominal", "stomach", "tiyan"],
        "typhoid_3" => &["diarrhea", "constipation", "pagtatae", "tibi"],
        "typhoid_5" => &["appetite", "gana"],
        "impetigo_1" => &["sore", "sugat"],
        "impetigo_2" => &["ooze", "crust", "langib", "nana"],
        "impetigo_3" => &["itch", "makati"],
        "impetigo_4" => &["swollen", "namamaga"],
        "impetigo_5" => &["similar sores", "katulad na sugat"],
        _ => &[],
    }
}
