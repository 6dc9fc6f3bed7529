//! Persona registry: the fixed behavioural description of each character.

use super::role::CharacterRole;

/// Placeholder replaced with the case overview.
pub const CASE_OVERVIEW_PLACEHOLDER: &str = "{CASE_OVERVIEW}";

/// Placeholder replaced with the rendered prior statements.
pub const PREVIOUS_STATEMENTS_PLACEHOLDER: &str = "{PREVIOUS_STATEMENTS}";

/// Persona definition for one character role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Persona {
    pub role: CharacterRole,
    /// Instruction installed once when the role's model session is created.
    pub system_instruction: &'static str,
    /// Per-turn prompt template with `{CASE_OVERVIEW}` and `{PREVIOUS_STATEMENTS}`.
    pub template: &'static str,
}

static COMPLAINANT: Persona = Persona {
    role: CharacterRole::Complainant,
    system_instruction: "You are the complainant in this case. You feel deeply wronged and are \
        angry at the suspect. Your emotions lead you to exaggerate the facts somewhat, but when \
        the investigator asks you precisely again, you try to tell the truth.",
    template: "You are the complainant in this case. You feel deeply wronged and are angry at \
        the suspect. Your emotions lead you to exaggerate the facts somewhat, but when the \
        investigator asks you precisely again, you try to tell the truth. The case overview is \
        as follows: {CASE_OVERVIEW}. Your previous statements are as follows: {PREVIOUS_STATEMENTS}",
};

static WITNESS: Persona = Persona {
    role: CharacterRole::Witness,
    system_instruction: "You are a witness in this case. You hold the most neutral position and \
        calmly state only the facts you know, objectively.",
    template: "You are a witness in this case. You hold the most neutral position and calmly \
        state only the facts you know, objectively. The case overview is as follows: \
        {CASE_OVERVIEW}. Your previous statements are as follows: {PREVIOUS_STATEMENTS}",
};

static SUSPECT: Persona = Persona {
    role: CharacterRole::Suspect,
    system_instruction: "You are the suspect in this case. You protest your innocence and try to \
        minimise or conceal your wrongdoing. You often evade the question or offer other \
        excuses, but if the investigator asks repeatedly you may reluctantly give a more \
        accurate answer.",
    template: "You are the suspect in this case. You protest your innocence and try to minimise \
        or conceal your wrongdoing. You often evade the question or offer other excuses, but if \
        the investigator asks repeatedly you may reluctantly give a more accurate answer. The \
        case overview is as follows: {CASE_OVERVIEW}. Your previous statements are as follows: \
        {PREVIOUS_STATEMENTS}",
};

/// Read-only lookup from role to persona.
pub struct PersonaRegistry;

impl PersonaRegistry {
    /// Persona for `role`.
    pub fn get(role: CharacterRole) -> &'static Persona {
        match role {
            CharacterRole::Complainant => &COMPLAINANT,
            CharacterRole::Witness => &WITNESS,
            CharacterRole::Suspect => &SUSPECT,
        }
    }

    /// All personas in role display order.
    pub fn all() -> impl Iterator<Item = &'static Persona> {
        CharacterRole::ALL.into_iter().map(Self::get)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_role_has_persona() {
        for role in CharacterRole::ALL {
            assert_eq!(PersonaRegistry::get(role).role, role);
        }
        assert_eq!(PersonaRegistry::all().count(), 3);
    }

    #[test]
    fn test_templates_carry_both_placeholders() {
        for persona in PersonaRegistry::all() {
            assert!(persona.template.contains(CASE_OVERVIEW_PLACEHOLDER));
            assert!(persona.template.contains(PREVIOUS_STATEMENTS_PLACEHOLDER));
        }
    }

    #[test]
    fn test_system_instructions_carry_no_placeholders() {
        for persona in PersonaRegistry::all() {
            assert!(!persona.system_instruction.contains('{'));
        }
    }
}
