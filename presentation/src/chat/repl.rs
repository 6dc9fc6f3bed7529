//! REPL (Read-Eval-Print Loop) for interactive interrogation

use super::command::ReplCommand;
use crate::ConsoleFormatter;
use crate::config::ReplConfig;
use interrogation_application::{Investigation, InvestigationError};
use interrogation_domain::{CharacterRole, Credential, ExportKind};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Interactive interrogation REPL
pub struct InvestigationRepl {
    investigation: Arc<Investigation>,
    config: ReplConfig,
}

impl InvestigationRepl {
    pub fn new(investigation: Arc<Investigation>) -> Self {
        Self {
            investigation,
            config: ReplConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self.config.history_path();
        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline(&self.prompt());

            match readline {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }

                    let command = match ReplCommand::parse(line) {
                        Ok(command) => command,
                        Err(message) => {
                            println!("{}", message);
                            continue;
                        }
                    };

                    if command.is_recordable() {
                        let _ = rl.add_history_entry(line);
                    }

                    if self.handle(command).await {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn prompt(&self) -> String {
        match self.investigation.active_role() {
            Some(role) => format!("[{}] >>> ", role.as_str()),
            None => ">>> ".to_string(),
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│        Interrogation Practice Session       │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        match self.investigation.credential_hint() {
            Some(hint) => println!("API key: {}", hint),
            None => println!("No API key set. Use /key <api-key> first."),
        }
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /key <api-key>            - Set or change the API key (resets everything)");
        println!("  /case <text>              - Build a case from precedent text");
        println!("  /case-file <path>         - Build a case from a precedent file");
        println!("  /details                  - Show the case overview, issues, plan, complaint");
        println!("  /role <name>              - Question the complainant, witness, or suspect");
        println!("  /roles                    - List characters");
        println!("  /log [role]               - Show a character's raw log");
        println!("  /summary [role]           - Show a character's summary");
        println!("  /export [log|summary] [role] - Write a log or summary to a text file");
        println!("  /reset                    - Discard the key, case, and all conversations");
        println!("  /help, /h, /?             - Show this help");
        println!("  /quit, /exit, /q          - Exit");
        println!();
        println!("Any other line is a question for the selected character.");
        println!();
    }

    /// Dispatch one command. Returns true if the REPL should exit.
    async fn handle(&self, command: ReplCommand) -> bool {
        match command {
            ReplCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ReplCommand::Help => {
                println!();
                Self::print_help();
            }
            ReplCommand::Key(raw) => self.set_key(&raw),
            ReplCommand::Case(text) => self.build_case(&text).await,
            ReplCommand::CaseFile(path) => self.build_case_from_file(&path).await,
            ReplCommand::Details => self.show_details(),
            ReplCommand::Role(role) => {
                self.investigation.select_role(role);
                info!(role = role.as_str(), "Role selected");
                println!(
                    "{}",
                    ConsoleFormatter::format_notice(&format!("Now questioning the {}", role.label()))
                );
            }
            ReplCommand::Roles => {
                let in_flight: Vec<_> = CharacterRole::ALL
                    .into_iter()
                    .filter(|r| self.investigation.is_turn_in_flight(*r))
                    .collect();
                println!();
                print!(
                    "{}",
                    ConsoleFormatter::format_roles(self.investigation.active_role(), &in_flight)
                );
                println!();
            }
            ReplCommand::Log(role) => {
                if let Some(role) = self.resolve_role(role) {
                    let transcript = self.investigation.transcript(role);
                    println!("{}", ConsoleFormatter::format_transcript(role, &transcript));
                }
            }
            ReplCommand::Summary(role) => {
                if let Some(role) = self.resolve_role(role) {
                    let summary = self.investigation.summary(role);
                    println!(
                        "{}",
                        ConsoleFormatter::format_summary(role, summary.as_deref())
                    );
                }
            }
            ReplCommand::Export(kind, role) => {
                if let Some(role) = self.resolve_role(role) {
                    self.export(kind, role);
                }
            }
            ReplCommand::Reset => match self.investigation.reset() {
                Ok(()) => println!(
                    "{}",
                    ConsoleFormatter::format_notice("Everything cleared. Set a key with /key.")
                ),
                Err(e) => Self::alert(&e),
            },
            ReplCommand::Utterance(text) => self.ask(&text).await,
        }
        false
    }

    fn set_key(&self, raw: &str) {
        let result = Credential::new(raw)
            .map_err(InvestigationError::from)
            .and_then(|credential| self.investigation.set_credential(credential));
        match result {
            Ok(()) => {
                let hint = self.investigation.credential_hint().unwrap_or_default();
                println!(
                    "{}",
                    ConsoleFormatter::format_notice(&format!("API key set ({})", hint))
                );
            }
            Err(e) => Self::alert(&e),
        }
    }

    async fn build_case(&self, precedent: &str) {
        println!();
        match self.investigation.submit_precedent(precedent).await {
            Ok(outcome) => println!("{}", ConsoleFormatter::format_case(&outcome)),
            Err(e) => Self::alert(&e),
        }
    }

    async fn build_case_from_file(&self, path: &Path) {
        match std::fs::read_to_string(path) {
            Ok(text) => self.build_case(&text).await,
            Err(e) => eprintln!("Cannot read {}: {}", path.display(), e),
        }
    }

    fn show_details(&self) {
        let Some(details) = self.investigation.case_details() else {
            println!("No case yet. Use /case or /case-file.");
            return;
        };
        print!("{}", ConsoleFormatter::format_details(&details));
        if let Some(complaint) = self.investigation.complaint() {
            print!("{}", ConsoleFormatter::format_complaint(&complaint));
        }
        println!();
    }

    async fn ask(&self, text: &str) {
        println!();
        match self.investigation.submit_utterance(text).await {
            Ok(outcome) => {
                println!("{}", ConsoleFormatter::format_reply(outcome.role, &outcome.reply));
                if let Some(alert) = Investigation::summary_alert(&outcome) {
                    Self::alert(&alert);
                }
            }
            Err(e) => Self::alert(&e),
        }
        println!();
    }

    fn export(&self, kind: ExportKind, role: CharacterRole) {
        match self.investigation.export(kind, role) {
            Ok(path) => println!(
                "{}",
                ConsoleFormatter::format_notice(&format!("Saved {}", path.display()))
            ),
            Err(e) => Self::alert(&e),
        }
    }

    /// Explicit role, else the active one.
    fn resolve_role(&self, role: Option<CharacterRole>) -> Option<CharacterRole> {
        let role = role.or_else(|| self.investigation.active_role());
        if role.is_none() {
            Self::alert(&InvestigationError::PreconditionFailed(
                "no character selected; pass one or use /role".to_string(),
            ));
        }
        role
    }

    fn alert(error: &InvestigationError) {
        eprintln!("{}", ConsoleFormatter::format_alert(error));
    }
}
