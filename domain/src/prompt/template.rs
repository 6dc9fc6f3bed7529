//! Prompt templates for case generation, persona turns, and summaries

use crate::character::persona::{
    CASE_OVERVIEW_PLACEHOLDER, PREVIOUS_STATEMENTS_PLACEHOLDER, Persona,
};
use crate::session::entities::INVESTIGATOR_LABEL;

/// Substituted for `{PREVIOUS_STATEMENTS}` when the transcript has no prior lines.
pub const NO_PRIOR_STATEMENTS: &str = "No prior statements.";

/// Substituted for `{CASE_OVERVIEW}` when no case has been generated.
pub const OVERVIEW_UNAVAILABLE: &str = "Case overview unavailable.";

/// Templates for generating prompts at each stage
pub struct PromptTemplate;

impl PromptTemplate {
    /// Prompt asking for the structured case object
    pub fn case_details(precedent: &str) -> String {
        format!(
            r#"Based on the following legal precedent, create a case overview, the key issues (3-5 items), and a basic investigation plan. Return the result as exactly one JSON object in this format: {{"overview": "...", "issues": ["...", "..."], "plan": ["...", "..."]}}

Precedent:
{}"#,
            precedent
        )
    }

    /// Prompt for the dramatized complaint letter
    pub fn complaint(overview: &str) -> String {
        format!(
            r#"Based on the following case overview, write a complaint letter in an emotional and somewhat illogical tone. The complaint should be detailed but need not be fully consistent. Emphasize the feeling of injustice and anger toward the accused, and avoid formal legal terminology.

Case overview:
{}"#,
            overview
        )
    }

    /// Prompt for summarizing a flattened transcript
    pub fn summary(raw_log: &str) -> String {
        format!(
            r#"The following is a conversation record between an investigator and a person under investigation. Organize it into a concise, professional summary log, focusing on key facts, whether the statements are consistent, contradictions, and emotional reactions.

Conversation record:
{}"#,
            raw_log
        )
    }

    /// Full prompt for one persona turn.
    ///
    /// The persona template is rendered with the overview (or
    /// [`OVERVIEW_UNAVAILABLE`]) and the prior statements (or
    /// [`NO_PRIOR_STATEMENTS`]); the new utterance is the final line.
    pub fn persona_turn(
        persona: &Persona,
        overview: Option<&str>,
        previous_statements: &str,
        utterance: &str,
    ) -> String {
        let overview = overview
            .filter(|o| !o.trim().is_empty())
            .unwrap_or(OVERVIEW_UNAVAILABLE);
        let previous = if previous_statements.is_empty() {
            NO_PRIOR_STATEMENTS
        } else {
            previous_statements
        };

        let rendered = persona
            .template
            .replace(CASE_OVERVIEW_PLACEHOLDER, overview)
            .replace(PREVIOUS_STATEMENTS_PLACEHOLDER, previous);

        format!("{}\n\n{}: {}", rendered, INVESTIGATOR_LABEL, utterance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::persona::PersonaRegistry;
    use crate::character::role::CharacterRole;

    #[test]
    fn test_case_details_prompt_embeds_precedent() {
        let prompt = PromptTemplate::case_details("Supreme Court 2019Do1234");
        assert!(prompt.contains("Supreme Court 2019Do1234"));
        assert!(prompt.contains(r#""overview""#));
    }

    #[test]
    fn test_persona_turn_substitutes_placeholders() {
        let persona = PersonaRegistry::get(CharacterRole::Witness);
        let prompt = PromptTemplate::persona_turn(
            persona,
            Some("A bicycle was stolen."),
            "Investigator: What did you see?\nWitness: A man in red.",
            "What time was it?",
        );

        assert!(prompt.contains("A bicycle was stolen."));
        assert!(prompt.contains("Witness: A man in red."));
        assert!(!prompt.contains(CASE_OVERVIEW_PLACEHOLDER));
        assert!(!prompt.contains(PREVIOUS_STATEMENTS_PLACEHOLDER));
        assert!(prompt.ends_with("\n\nInvestigator: What time was it?"));
    }

    #[test]
    fn test_persona_turn_sentinels() {
        let persona = PersonaRegistry::get(CharacterRole::Suspect);
        let prompt = PromptTemplate::persona_turn(persona, None, "", "Did you take it?");
        assert!(prompt.contains(OVERVIEW_UNAVAILABLE));
        assert!(prompt.contains(NO_PRIOR_STATEMENTS));
    }
}
