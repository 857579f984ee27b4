use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// The two parts of one generation: a tailored CV section and a cover letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedDocuments {
    pub cv: String,
    pub cover_letter: String,
}

impl GeneratedDocuments {
    pub fn part(&self, part: DocumentPart) -> &str {
        match part {
            DocumentPart::Cv => &self.cv,
            DocumentPart::CoverLetter => &self.cover_letter,
        }
    }
}

/// Which half of `GeneratedDocuments` a download refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentPart {
    Cv,
    CoverLetter,
}

impl DocumentPart {
    /// Path segment and download file stem.
    pub fn slug(self) -> &'static str {
        match self {
            DocumentPart::Cv => "cv",
            DocumentPart::CoverLetter => "cover-letter",
        }
    }
}

impl FromStr for DocumentPart {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cv" => Ok(DocumentPart::Cv),
            "cover-letter" => Ok(DocumentPart::CoverLetter),
            other => Err(AppError::Validation(format!(
                "unknown document part '{other}' (expected 'cv' or 'cover-letter')"
            ))),
        }
    }
}
