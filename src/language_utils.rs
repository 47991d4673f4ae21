use anyhow::{Result, anyhow};
use isolang::Language;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported languages and their parsing rules
///
/// The display name is what goes into the prompt. ISO 639 codes are only
/// accepted as a typing shortcut and never sent to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupportedLanguage {
    English,
    Hindi,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
    Marathi,
    Bengali,
    Urdu,
    Spanish,
    French,
    German,
    Italian,
    Portuguese,
    Russian,
    Arabic,
    Chinese,
    Japanese,
    Korean,
}

impl SupportedLanguage {
    /// Every supported language, in the order offered to the user
    pub const ALL: [SupportedLanguage; 19] = [
        Self::English,
        Self::Hindi,
        Self::Tamil,
        Self::Telugu,
        Self::Kannada,
        Self::Malayalam,
        Self::Marathi,
        Self::Bengali,
        Self::Urdu,
        Self::Spanish,
        Self::French,
        Self::German,
        Self::Italian,
        Self::Portuguese,
        Self::Russian,
        Self::Arabic,
        Self::Chinese,
        Self::Japanese,
        Self::Korean,
    ];

    /// Human-readable name used in prompts and menus
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "Hindi",
            Self::Tamil => "Tamil",
            Self::Telugu => "Telugu",
            Self::Kannada => "Kannada",
            Self::Malayalam => "Malayalam",
            Self::Marathi => "Marathi",
            Self::Bengali => "Bengali",
            Self::Urdu => "Urdu",
            Self::Spanish => "Spanish",
            Self::French => "French",
            Self::German => "German",
            Self::Italian => "Italian",
            Self::Portuguese => "Portuguese",
            Self::Russian => "Russian",
            Self::Arabic => "Arabic",
            Self::Chinese => "Chinese",
            Self::Japanese => "Japanese",
            Self::Korean => "Korean",
        }
    }

    /// ISO 639-3 code of the language
    pub fn iso_639_3(&self) -> &'static str {
        match self {
            Self::English => "eng",
            Self::Hindi => "hin",
            Self::Tamil => "tam",
            Self::Telugu => "tel",
            Self::Kannada => "kan",
            Self::Malayalam => "mal",
            Self::Marathi => "mar",
            Self::Bengali => "ben",
            Self::Urdu => "urd",
            Self::Spanish => "spa",
            Self::French => "fra",
            Self::German => "deu",
            Self::Italian => "ita",
            Self::Portuguese => "por",
            Self::Russian => "rus",
            Self::Arabic => "ara",
            Self::Chinese => "zho",
            Self::Japanese => "jpn",
            Self::Korean => "kor",
        }
    }

    /// Look up a language by display name, ignoring case
    pub fn from_display_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.display_name().eq_ignore_ascii_case(name))
    }

    /// Look up a language by ISO 639-1 or ISO 639-2 code
    pub fn from_code(code: &str) -> Option<Self> {
        let part2t = normalize_to_part2t(code).ok()?;
        Self::ALL
            .iter()
            .copied()
            .find(|lang| lang.iso_639_3() == part2t)
    }

    /// Comma separated list of every display name
    pub fn listing() -> String {
        Self::ALL
            .iter()
            .map(|lang| lang.display_name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for SupportedLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for SupportedLanguage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_display_name(s)
            .or_else(|| Self::from_code(s))
            .ok_or_else(|| anyhow!("Unsupported language: '{}'. Choose one of: {}", s.trim(), Self::listing()))
    }
}

/// Normalize a language code to ISO 639-2/T (3-letter) format
pub fn normalize_to_part2t(code: &str) -> Result<String> {
    let normalized_code = code.trim().to_lowercase();

    // If it's a 2-letter code, convert to 3-letter
    if normalized_code.len() == 2 {
        if let Some(lang) = Language::from_639_1(&normalized_code) {
            return Ok(lang.to_639_3().to_string());
        }
    }
    // If it's already a 3-letter code, ensure it's ISO 639-2/T
    else if normalized_code.len() == 3 {
        if Language::from_639_3(&normalized_code).is_some() {
            return Ok(normalized_code);
        }

        // Bibliographic codes of the supported set that differ from 639-2/T
        match normalized_code.as_str() {
            "fre" => return Ok("fra".to_string()),
            "ger" => return Ok("deu".to_string()),
            "chi" => return Ok("zho".to_string()),
            _ => {}
        }
    }

    Err(anyhow!("Cannot normalize invalid language code: {}", code))
}
