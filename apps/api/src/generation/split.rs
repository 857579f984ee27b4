//! Splits a completion into its CV and cover-letter parts.
//!
//! The separator is the first line whose trimmed content is exactly `---`.
//! Later separator lines stay inside the cover letter verbatim.

use thiserror::Error;

use crate::models::documents::GeneratedDocuments;

pub const SEPARATOR: &str = "---";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SplitError {
    #[error("the completion has no \"---\" line separating the CV from the cover letter")]
    MissingSeparator,
}

/// Splits `text` at the first separator line; both halves are trimmed.
pub fn split_completion(text: &str) -> Result<GeneratedDocuments, SplitError> {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        let end = offset + line.len();
        if line.trim() == SEPARATOR {
            return Ok(GeneratedDocuments {
                cv: text[..offset].trim().to_string(),
                cover_letter: text[end..].trim().to_string(),
            });
        }
        offset = end;
    }
    Err(SplitError::MissingSeparator)
}
