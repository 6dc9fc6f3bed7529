//! Console output formatter for cases, replies, logs, and alerts

use colored::Colorize;
use interrogation_application::{CaseOutcome, InvestigationError};
use interrogation_domain::{CaseDetails, CharacterRole, Complaint, Sender, Transcript};

/// Formats investigation state for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Full case: overview, issues, plan, and complaint.
    pub fn format_case(outcome: &CaseOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Case File"));
        output.push('\n');
        output.push_str(&Self::format_details(&outcome.details));
        output.push_str(&Self::format_complaint(&outcome.complaint));
        output.push_str(&Self::footer());

        output
    }

    /// Overview, numbered issues, and numbered plan steps.
    pub fn format_details(details: &CaseDetails) -> String {
        let mut output = String::new();

        output.push_str(&Self::section_header("Overview"));
        output.push_str(&format!("{}\n", details.overview));

        output.push_str(&Self::section_header("Key Issues"));
        output.push_str(&Self::numbered(&details.issues));

        output.push_str(&Self::section_header("Investigation Plan"));
        output.push_str(&Self::numbered(&details.plan));

        output
    }

    pub fn format_complaint(complaint: &Complaint) -> String {
        let mut output = Self::section_header("Complaint");
        match complaint {
            Complaint::Generated(text) => output.push_str(&format!("{}\n", text)),
            Complaint::Placeholder => {
                output.push_str(&format!("{}\n", complaint.text().dimmed()));
            }
        }
        output
    }

    /// Format the case as JSON
    pub fn format_json(outcome: &CaseOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// A character's reply as it appears in the REPL.
    pub fn format_reply(role: CharacterRole, text: &str) -> String {
        format!(
            "{}\n{}",
            format!("{}:", role.label()).yellow().bold(),
            Self::indent(text, "  ")
        )
    }

    /// Raw log for one role, newest last.
    pub fn format_transcript(role: CharacterRole, transcript: &Transcript) -> String {
        let mut output = Self::section_header(&format!("{} Log", role.label()));

        if transcript.is_empty() {
            output.push_str(&format!("{}\n", "(no conversation yet)".dimmed()));
            return output;
        }

        for message in transcript.messages() {
            let attribution = message.sender.attribution(role);
            let name = match message.sender {
                Sender::Investigator => attribution.cyan().bold(),
                Sender::Character => attribution.yellow().bold(),
            };
            let time = message
                .timestamp
                .with_timezone(&chrono::Local)
                .format("%H:%M:%S");
            output.push_str(&format!("{} {}\n", name, format!("({})", time).dimmed()));
            output.push_str(&Self::indent(&message.text, "  "));
            output.push('\n');
        }

        output
    }

    pub fn format_summary(role: CharacterRole, summary: Option<&str>) -> String {
        let mut output = Self::section_header(&format!("{} Summary", role.label()));
        match summary {
            Some(text) => output.push_str(&format!("{}\n", text)),
            None => output.push_str(&format!("{}\n", "(no summary yet)".dimmed())),
        }
        output
    }

    /// Roles with the active one marked.
    pub fn format_roles(active: Option<CharacterRole>, in_flight: &[CharacterRole]) -> String {
        let mut output = String::new();
        for role in CharacterRole::ALL {
            let marker = if Some(role) == active { "*" } else { " " };
            let mut line = format!("{} {:<12} /role {}", marker, role.label(), role.as_str());
            if in_flight.contains(&role) {
                line.push_str(&format!(" {}", "(answering)".dimmed()));
            }
            if Some(role) == active {
                output.push_str(&format!("{}\n", line.green().bold()));
            } else {
                output.push_str(&format!("{}\n", line));
            }
        }
        output
    }

    /// Transient alert tagged by the operation that failed.
    pub fn format_alert(error: &InvestigationError) -> String {
        format!(
            "{} {}",
            format!("[{}]", error.operation()).red().bold(),
            error
        )
    }

    pub fn format_notice(message: &str) -> String {
        format!("{} {}", "->".cyan(), message)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    fn numbered(items: &[String]) -> String {
        if items.is_empty() {
            return format!("{}\n", "(none)".dimmed());
        }
        items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("  {}. {}\n", i + 1, item))
            .collect()
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
