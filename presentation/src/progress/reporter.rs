//! Progress reporting for model calls

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use interrogation_application::ports::progress::{GatewayCall, ProgressNotifier};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

/// Shows one spinner per outstanding model call.
///
/// Calls for different roles may overlap, so spinners are tracked per
/// [`GatewayCall`].
pub struct ProgressReporter {
    multi: MultiProgress,
    spinners: Mutex<HashMap<GatewayCall, ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            spinners: Mutex::new(HashMap::new()),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Number of spinners currently shown.
    pub fn active(&self) -> usize {
        self.spinners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_call_start(&self, call: GatewayCall) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_message(format!("{}...", call));
        pb.enable_steady_tick(Duration::from_millis(100));

        let previous = self
            .spinners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(call, pb);
        if let Some(previous) = previous {
            previous.finish_and_clear();
        }
    }

    fn on_call_complete(&self, call: GatewayCall, success: bool) {
        let pb = self
            .spinners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&call);
        if let Some(pb) = pb {
            if success {
                pb.finish_and_clear();
            } else {
                pb.finish_with_message(format!("{} {}", "x".red(), call));
            }
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_call_start(&self, call: GatewayCall) {
        eprintln!("{} {}...", "->".cyan(), call);
    }

    fn on_call_complete(&self, call: GatewayCall, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), call);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), call);
        }
    }
}
