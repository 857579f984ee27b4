// Prompt text for the Generation module.

/// Opening instructions: the role and the two deliverables.
pub const CAREER_COACH_INSTRUCTIONS: &str = "You are a career coach. Given the candidate's resume \
and the job description, produce:\n\n\
1) A concise, skill-focused CV section tailored to the JD.\n\
2) A crisp, professional cover letter that highlights the candidate's fit.";

/// Closing instruction that establishes the separator contract parsed by `split`.
pub const SEPARATOR_INSTRUCTION: &str =
    "Return the CV first, then on its own line \"---\", then the cover letter.";

/// Builds the single user message sent to the completion endpoint.
///
/// Inputs are inserted verbatim; placeholders are not used so neither input can
/// inject text into the other's block.
pub fn build_generation_prompt(resume_text: &str, jd_text: &str) -> String {
    format!(
        "{CAREER_COACH_INSTRUCTIONS}\n\n\
         === Resume ===\n{resume_text}\n\n\
         === Job Description ===\n{jd_text}\n\n\
         {SEPARATOR_INSTRUCTION}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_layout() {
        let prompt = build_generation_prompt("RESUME BODY", "JD BODY");
        let resume_at = prompt.find("=== Resume ===\nRESUME BODY").unwrap();
        let jd_at = prompt.find("=== Job Description ===\nJD BODY").unwrap();
        assert!(prompt.starts_with("You are a career coach."));
        assert!(resume_at < jd_at);
        assert!(prompt.ends_with(SEPARATOR_INSTRUCTION));
    }

    #[test]
    fn test_prompt_inserts_inputs_verbatim() {
        let prompt = build_generation_prompt("{jd_text}", "{resume_text}");
        assert!(prompt.contains("=== Resume ===\n{jd_text}\n"));
        assert!(prompt.contains("=== Job Description ===\n{resume_text}\n"));
    }
}
