use serde::Serialize;

/// Original language selectable for the latest-movies listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub name: &'static str,
    pub code: &'static str,
}

pub const LANGUAGES: &[Language] = &[
    Language { name: "English", code: "en" },
    Language { name: "Hindi", code: "hi" },
    Language { name: "Tamil", code: "ta" },
    Language { name: "Telugu", code: "te" },
    Language { name: "Malayalam", code: "ml" },
    Language { name: "Kannada", code: "kn" },
    Language { name: "Marathi", code: "mr" },
    Language { name: "Bengali", code: "bn" },
    Language { name: "Gujarati", code: "gu" },
    Language { name: "Punjabi", code: "pa" },
    Language { name: "Odia", code: "or" },
    Language { name: "Assamese", code: "as" },
    Language { name: "Urdu", code: "ur" },
    Language { name: "French", code: "fr" },
    Language { name: "German", code: "de" },
    Language { name: "Spanish", code: "es" },
    Language { name: "Italian", code: "it" },
    Language { name: "Japanese", code: "ja" },
    Language { name: "Korean", code: "ko" },
    Language { name: "Chinese", code: "zh" },
    Language { name: "Russian", code: "ru" },
    Language { name: "Portuguese", code: "pt" },
    Language { name: "Turkish", code: "tr" },
    Language { name: "Arabic", code: "ar" },
];

impl Language {
    /// Resolves a display name (case-insensitive) or an ISO 639-1 code
    pub fn lookup(value: &str) -> Option<Language> {
        let value = value.trim();
        LANGUAGES
            .iter()
            .find(|l| l.name.eq_ignore_ascii_case(value) || l.code.eq_ignore_ascii_case(value))
            .copied()
    }
}
