//! CV & cover-letter generation pipeline.
//!
//! Flow: build prompt → one completion call → split on the separator line.
//! No retries: the first failure propagates to the caller, and no partial
//! result is ever returned.

use tracing::info;

use crate::errors::AppError;
use crate::generation::prompts::build_generation_prompt;
use crate::generation::split::split_completion;
use crate::llm_client::CompletionProvider;
use crate::models::documents::GeneratedDocuments;

/// Asks the completion provider for a tailored CV section and cover letter.
pub async fn generate_documents(
    provider: &dyn CompletionProvider,
    resume_text: &str,
    jd_text: &str,
) -> Result<GeneratedDocuments, AppError> {
    let prompt = build_generation_prompt(resume_text, jd_text);
    let completion = provider.complete(&prompt).await?;
    let documents = split_completion(&completion)?;

    info!(
        "Generated documents: cv_chars={}, cover_letter_chars={}",
        documents.cv.len(),
        documents.cover_letter.len()
    );
    Ok(documents)
}
