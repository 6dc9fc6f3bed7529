//! Character roles and their personas.
//!
//! - [`role::CharacterRole`]: the closed set of interrogation targets
//! - [`persona::PersonaRegistry`]: static role → persona lookup

pub mod persona;
pub mod role;
