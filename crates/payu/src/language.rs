use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{LANGUAGE_ENGLISH, LANGUAGE_PORTUGUESE, LANGUAGE_SPANISH};
use crate::PayUError;

/// Language the gateway uses for its messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "pt")]
    Portuguese,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Spanish, Language::Portuguese];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => LANGUAGE_ENGLISH,
            Language::Spanish => LANGUAGE_SPANISH,
            Language::Portuguese => LANGUAGE_PORTUGUESE,
        }
    }

    /// Resolve an optional language code. Absent or empty codes fall back to
    /// English.
    pub fn resolve(code: Option<&str>) -> Result<Self, PayUError> {
        match code {
            None | Some("") => Ok(Language::default()),
            Some(code) => code.parse(),
        }
    }
}

impl FromStr for Language {
    type Err = PayUError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            LANGUAGE_ENGLISH => Ok(Language::English),
            LANGUAGE_SPANISH => Ok(Language::Spanish),
            LANGUAGE_PORTUGUESE => Ok(Language::Portuguese),
            other => Err(PayUError::InvalidLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
