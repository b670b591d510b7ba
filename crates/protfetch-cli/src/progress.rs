//! Terminal progress for a protfetch run
//!
//! Status lines go to stdout; the GO expansion bar is drawn on stderr by
//! indicatif and hides itself when stderr is not a terminal.

use crate::pipeline::RunObserver;
use crate::sources::ResolvedProtein;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::OnceLock;
use std::time::Duration;

/// Create a spinner for indeterminate operations
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Create a progress bar counting GO terms
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{msg}\n{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta})")
        .map(|s| s.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Prints run milestones and drives the resolution spinner and GO expansion bar
#[derive(Default)]
pub struct ConsoleObserver {
    spinner: Option<ProgressBar>,
    go_bar: OnceLock<ProgressBar>,
}

impl ConsoleObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Observer that spins while `name` is being resolved
    pub fn resolving(name: &str) -> Self {
        Self {
            spinner: Some(create_spinner(&format!("Resolving '{}'...", name))),
            go_bar: OnceLock::new(),
        }
    }

    /// Clear anything still drawn; safe to call more than once
    pub fn finish(&self) {
        if let Some(spinner) = &self.spinner {
            spinner.finish_and_clear();
        }
        if let Some(bar) = self.go_bar.get() {
            bar.finish_and_clear();
        }
    }
}

impl RunObserver for ConsoleObserver {
    fn on_resolved(&self, resolved: &ResolvedProtein) {
        if let Some(spinner) = &self.spinner {
            spinner.finish_and_clear();
        }

        let name = resolved.display_name.as_deref().unwrap_or("(unnamed entry)");
        println!("Protein: {}", name.bold());
        println!("Accession: {}", resolved.accession.to_string().cyan());
    }

    fn on_go_terms_discovered(&self, count: usize) {
        if count == 0 {
            println!("{} No GO terms found", "!".yellow());
            return;
        }

        println!("{} Found {} GO terms", "✓".green(), count);
        let _ = self
            .go_bar
            .set(create_progress_bar(count as u64, "Fetching GO term details"));
    }

    fn on_go_term_expanded(&self, go_id: &str) {
        let Some(bar) = self.go_bar.get() else {
            return;
        };

        bar.inc(1);
        bar.set_message(format!("Fetched {}", go_id));
        if bar.length().is_some_and(|len| bar.position() >= len) {
            bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_create_spinner() {
        let pb = create_spinner("Resolving...");
        assert!(!pb.is_finished());
        pb.finish();
    }

    #[test]
    fn test_create_progress_bar() {
        let pb = create_progress_bar(7, "Fetching GO term details");
        assert_eq!(pb.length(), Some(7));
    }

    #[test]
    fn test_observer_tracks_go_expansion() {
        let observer = ConsoleObserver::new();
        observer.on_go_terms_discovered(2);

        observer.on_go_term_expanded("GO:0015671");
        assert_eq!(observer.go_bar.get().unwrap().position(), 1);

        observer.on_go_term_expanded("GO:0042744");
        assert!(observer.go_bar.get().unwrap().is_finished());
    }

    #[test]
    fn test_observer_finish_clears_spinner() {
        let observer = ConsoleObserver::resolving("hemoglobin");
        observer.finish();
        assert!(observer.spinner.as_ref().unwrap().is_finished());
        observer.finish();
    }

    #[test]
    fn test_observer_without_terms_has_no_bar() {
        let observer = ConsoleObserver::new();
        observer.on_go_terms_discovered(0);
        observer.on_go_term_expanded("GO:0015671");
        assert!(observer.go_bar.get().is_none());
    }
}
