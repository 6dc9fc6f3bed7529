//! Slash-command parsing for the REPL

use interrogation_domain::{CharacterRole, ExportKind};
use std::path::PathBuf;

/// One line of REPL input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Set the API key (never added to history)
    Key(String),
    /// Build a case from inline precedent text
    Case(String),
    /// Build a case from a precedent file
    CaseFile(PathBuf),
    Role(CharacterRole),
    Roles,
    Log(Option<CharacterRole>),
    Summary(Option<CharacterRole>),
    Export(ExportKind, Option<CharacterRole>),
    Details,
    Reset,
    Help,
    Quit,
    /// Anything that is not a command: a question for the active role
    Utterance(String),
}

impl ReplCommand {
    /// Parse a trimmed, non-empty line.
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        if !line.starts_with('/') {
            return Ok(ReplCommand::Utterance(line.to_string()));
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name {
            "/key" => required(rest, "/key <api-key>").map(ReplCommand::Key),
            "/case" => required(rest, "/case <precedent text>").map(ReplCommand::Case),
            "/case-file" => {
                required(rest, "/case-file <path>").map(|p| ReplCommand::CaseFile(PathBuf::from(p)))
            }
            "/role" => {
                let arg = required(rest, "/role <complainant|witness|suspect>")?;
                parse_role(&arg).map(ReplCommand::Role)
            }
            "/roles" => Ok(ReplCommand::Roles),
            "/log" => optional_role(rest).map(ReplCommand::Log),
            "/summary" => optional_role(rest).map(ReplCommand::Summary),
            "/export" => parse_export(rest),
            "/details" => Ok(ReplCommand::Details),
            "/reset" => Ok(ReplCommand::Reset),
            "/help" | "/h" | "/?" => Ok(ReplCommand::Help),
            "/quit" | "/exit" | "/q" => Ok(ReplCommand::Quit),
            other => Err(format!(
                "Unknown command: {}\nType /help for available commands",
                other
            )),
        }
    }

    /// Whether the line may be stored in readline history.
    pub fn is_recordable(&self) -> bool {
        !matches!(self, ReplCommand::Key(_))
    }
}

fn required(arg: &str, usage: &str) -> Result<String, String> {
    if arg.is_empty() {
        Err(format!("Usage: {}", usage))
    } else {
        Ok(arg.to_string())
    }
}

fn parse_role(arg: &str) -> Result<CharacterRole, String> {
    arg.parse::<CharacterRole>().map_err(|e| e.to_string())
}

fn optional_role(arg: &str) -> Result<Option<CharacterRole>, String> {
    if arg.is_empty() {
        Ok(None)
    } else {
        parse_role(arg).map(Some)
    }
}

fn parse_export(rest: &str) -> Result<ReplCommand, String> {
    let mut args = rest.split_whitespace();
    let kind = match args.next() {
        None | Some("log") => ExportKind::Transcript,
        Some("summary") => ExportKind::Summary,
        Some(other) => {
            return Err(format!(
                "Unknown export kind: {} (expected log or summary)",
                other
            ));
        }
    };
    let role = match args.next() {
        Some(arg) => Some(parse_role(arg)?),
        None => None,
    };
    Ok(ReplCommand::Export(kind, role))
}
