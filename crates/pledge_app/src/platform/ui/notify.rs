use std::io::{self, Write};

use super::Notifier;

/// Prints notifications on their own line. Expiry is driven by the
/// controller, which redraws the table without the message.
#[derive(Debug, Default)]
pub struct TerminalNotifier {
    current: Option<String>,
}

impl Notifier for TerminalNotifier {
    fn notify(&mut self, message: &str, duration_ms: u64) {
        self.current = Some(message.to_string());
        let mut out = io::stdout().lock();
        let _ = writeln!(out, ">> {message} ({:.1}s)", duration_ms as f64 / 1000.0);
    }

    fn dismiss(&mut self) {
        if let Some(message) = self.current.take() {
            let mut out = io::stdout().lock();
            let _ = writeln!(out, ">> dismissed: {message}");
        }
    }
}
