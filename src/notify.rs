use tracing::warn;

use crate::{config::OutputConfig, traits::Notifier};

/// Emits notices as warnings on the `notice` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, message: &str) {
        warn!(target: "notice", "{message}");
    }
}

/// Prints notices to stderr.
#[derive(Debug, Clone)]
pub struct TerminalNotifier {
    output: OutputConfig,
}

impl TerminalNotifier {
    pub fn new(output: OutputConfig) -> Self {
        Self { output }
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, message: &str) {
        eprintln!("{}", self.output.format_str(message));
    }
}
