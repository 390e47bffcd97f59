//! Output formatting for the CLI.

use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use storefront_commerce::store::LoadState;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
    term: Term,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self {
            verbose,
            json,
            term: Term::stderr(),
        }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a dimmed hint line.
    pub fn hint(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("  {}", style(msg).dim());
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        println!("  {}", format_row(cols, widths));
    }

    /// Print a bold table header followed by a rule.
    pub fn table_header(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let row = format_row(cols, widths);
        let rule_len = row.chars().count().min(self.term_width().max(20));
        println!("  {}", style(row).bold());
        println!("  {}", style("─".repeat(rule_len)).dim());
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json || !self.term.is_term() {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        let template = ProgressStyle::default_spinner().template("{spinner:.green} {msg}");
        if let Ok(spinner_style) = template {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Get terminal width.
    pub fn term_width(&self) -> usize {
        self.term.size().1 as usize
    }
}

fn format_row(cols: &[&str], widths: &[usize]) -> String {
    cols.iter()
        .zip(widths.iter())
        .map(|(col, width)| format!("{:width$}", truncate(col, *width), width = width))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Status badge for the catalog load state.
pub fn state_badge(state: &LoadState) -> String {
    match state {
        LoadState::Ready => style("ready").green().to_string(),
        LoadState::Loading => style("loading").yellow().to_string(),
        LoadState::Failed(_) => style("failed").red().to_string(),
    }
}

/// Plain name of a load state, for JSON output.
pub fn state_name(state: &LoadState) -> &'static str {
    match state {
        LoadState::Ready => "ready",
        LoadState::Loading => "loading",
        LoadState::Failed(_) => "failed",
    }
}

/// Cut `text` to at most `width` chars, marking the cut with an ellipsis.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Kiwi", 10), "Kiwi");
        assert_eq!(truncate("Essence Mascara", 8), "Essence…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_format_row_pads_and_trims() {
        assert_eq!(format_row(&["1", "Kiwi"], &[3, 6]), "1    Kiwi");
    }

    #[test]
    fn test_state_name() {
        assert_eq!(state_name(&LoadState::Ready), "ready");
        assert_eq!(state_name(&LoadState::Failed("x".into())), "failed");
    }
}
