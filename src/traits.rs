use crate::config::Config;

/// Side channel for failures the user should see, as opposed to ones that are
/// only logged.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

pub trait DisplayTerminal {
    fn fmt_to_string(&self, config: &Config) -> String;
}
