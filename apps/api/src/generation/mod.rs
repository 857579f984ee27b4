// CV & cover-letter generation.
// Flow: resume PDF → text → prompt → one completion call → split on "---" → session.
// All completion calls go through llm_client::CompletionProvider.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod session;
pub mod split;
