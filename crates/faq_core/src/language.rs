use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FaqError;
use crate::model::Answer;

/// Languages the service answers in. Adding a variant requires a
/// not-found message below; there is no runtime fallback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Hi,
    Te,
    Kn,
}

pub const SUPPORTED_LANGUAGES: [Language; 4] =
    [Language::En, Language::Hi, Language::Te, Language::Kn];

pub const DEFAULT_LANGUAGE: Language = Language::En;

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Te => "te",
            Language::Kn => "kn",
        }
    }

    pub fn not_found_message(self) -> &'static str {
        match self {
            Language::En => "I'm sorry, I couldn't find a relevant answer to your question.",
            Language::Hi => "क्षमा करें, मैं आपके प्रश्न का प्रासंगिक उत्तर नहीं ढूंढ पाया।",
            Language::Te => "క్షమించండి, మీ ప్రశ్నకు సంబంధించిన సమాధానం కనుగొనలేకపోయాను.",
            Language::Kn => "ಕ್ಷಮಿಸಿ, ನಿಮ್ಮ ಪ್ರಶ್ನೆಗೆ ಸಂಬಂಧಿಸಿದ ಉತ್ತರವನ್ನು ಹುಡುಕಲು ಸಾಧ್ಯವಾಗಲಿಲ್ಲ.",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = FaqError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        SUPPORTED_LANGUAGES
            .into_iter()
            .find(|lang| lang.code() == code)
            .ok_or_else(|| FaqError::UnsupportedLanguage(code.to_string()))
    }
}

/// Text of `answer` in `language`, falling back to the default language.
pub fn localized_text(answer: &Answer, language: Language) -> Result<&str, FaqError> {
    answer
        .get(language.code())
        .or_else(|| answer.get(DEFAULT_LANGUAGE.code()))
        .map(String::as_str)
        .ok_or(FaqError::MissingTranslation { language })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(pairs: &[(&str, &str)]) -> Answer {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn parses_supported_codes() {
        for lang in SUPPORTED_LANGUAGES {
            assert_eq!(lang.code().parse::<Language>().unwrap(), lang);
        }
    }

    #[test]
    fn rejects_other_codes() {
        for code in ["fr", "EN", "", "en-US"] {
            let err = code.parse::<Language>().unwrap_err();
            assert!(matches!(err, FaqError::UnsupportedLanguage(ref c) if c == code));
        }
    }

    #[test]
    fn every_language_has_a_not_found_message() {
        for lang in SUPPORTED_LANGUAGES {
            assert!(!lang.not_found_message().is_empty());
        }
        assert_eq!(DEFAULT_LANGUAGE, Language::default());
    }

    #[test]
    fn localized_text_prefers_requested_language() {
        let a = answer(&[("en", "Open 9 to 5."), ("hi", "9 से 5")]);
        assert_eq!(localized_text(&a, Language::Hi).unwrap(), "9 से 5");
        assert_eq!(localized_text(&a, Language::Kn).unwrap(), "Open 9 to 5.");
    }

    #[test]
    fn localized_text_without_fallback_is_an_error() {
        let a = answer(&[("hi", "9 से 5")]);
        let err = localized_text(&a, Language::Te).unwrap_err();
        assert!(matches!(
            err,
            FaqError::MissingTranslation {
                language: Language::Te
            }
        ));
    }
}
