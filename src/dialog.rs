//! Operator confirmation prompts

use std::io::{BufRead, Write};

/// Blocking yes/no question to the operator
pub trait ConfirmPrompt: Send + Sync {
    fn confirm(&self, message: &str, title: &str) -> bool;
}

/// Fixed answer, for `--yes` and for tests
pub struct AutoConfirm(pub bool);

impl ConfirmPrompt for AutoConfirm {
    fn confirm(&self, message: &str, _title: &str) -> bool {
        tracing::debug!("Auto-answering '{}' with {}", message, self.0);
        self.0
    }
}

/// Asks on the controlling terminal
pub struct TerminalPrompt;

impl TerminalPrompt {
    fn parse_answer(line: &str) -> bool {
        matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

impl ConfirmPrompt for TerminalPrompt {
    fn confirm(&self, message: &str, title: &str) -> bool {
        let mut stderr = std::io::stderr();
        let _ = write!(stderr, "{}: {} [y/N] ", title, message);
        let _ = stderr.flush();

        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(_) => Self::parse_answer(&line),
            Err(e) => {
                tracing::warn!("Could not read confirmation: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert!(TerminalPrompt::parse_answer("y\n"));
        assert!(TerminalPrompt::parse_answer(" YES "));
        assert!(!TerminalPrompt::parse_answer("\n"));
        assert!(!TerminalPrompt::parse_answer("no"));
    }

    #[test]
    fn test_auto_confirm() {
        assert!(AutoConfirm(true).confirm("q", "t"));
        assert!(!AutoConfirm(false).confirm("q", "t"));
    }
}
