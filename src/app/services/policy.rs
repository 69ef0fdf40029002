//! Per-origin choice of rich-text write-back strategy.

use serde::{Deserialize, Serialize};

use crate::app::domain::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriteStrategy {
    /// Overwrite the node's text and notify listeners. Fast.
    DirectMutation,
    /// Backspace out the old content and paste the new one, key by key.
    KeystrokeSimulation,
}

/// How a strategy was arrived at for a given origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// An entry in the table decided it.
    Known(WriteStrategy),
    /// No entry matched. Try direct mutation and probe whether the host kept it.
    Probe,
}

/// Table from hostname substrings to write strategies.
///
/// Entries are matched in insertion order; origins learned at runtime win
/// over configured ones. Nothing here is persisted.
#[derive(Debug, Clone, Default)]
pub struct WritePolicy {
    entries: Vec<(String, WriteStrategy)>,
    learned: Vec<String>,
}

impl WritePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let mut policy = Self::new();
        for host in &settings.restricted_hosts {
            policy.add(host, WriteStrategy::KeystrokeSimulation);
        }
        for host in &settings.direct_hosts {
            policy.add(host, WriteStrategy::DirectMutation);
        }
        policy
    }

    pub fn add(&mut self, pattern: &str, strategy: WriteStrategy) {
        let pattern = pattern.trim().to_ascii_lowercase();
        if pattern.is_empty() {
            return;
        }
        self.entries.push((pattern, strategy));
    }

    pub fn resolve(&self, hostname: &str) -> Resolution {
        let hostname = hostname.to_ascii_lowercase();
        if self.learned.iter().any(|h| *h == hostname) {
            return Resolution::Known(WriteStrategy::KeystrokeSimulation);
        }
        self.entries
            .iter()
            .find(|(pattern, _)| hostname.contains(pattern.as_str()))
            .map(|&(_, strategy)| Resolution::Known(strategy))
            .unwrap_or(Resolution::Probe)
    }

    /// Remember that `hostname` dropped a direct mutation.
    pub fn learn_restricted(&mut self, hostname: &str) {
        let hostname = hostname.to_ascii_lowercase();
        if hostname.is_empty() || self.learned.contains(&hostname) {
            return;
        }
        tracing::info!(%hostname, "host ignores direct mutation; simulating keystrokes from now on");
        self.learned.push(hostname);
    }

    pub fn learned(&self) -> &[String] {
        &self.learned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_restrict_facebook() {
        let policy = WritePolicy::from_settings(&Settings::default());
        assert_eq!(
            policy.resolve("www.facebook.com"),
            Resolution::Known(WriteStrategy::KeystrokeSimulation)
        );
        assert_eq!(policy.resolve("example.org"), Resolution::Probe);
    }

    #[test]
    fn test_substring_and_case_insensitive() {
        let mut policy = WritePolicy::new();
        policy.add("Messenger.com", WriteStrategy::KeystrokeSimulation);
        assert_eq!(
            policy.resolve("WWW.MESSENGER.COM"),
            Resolution::Known(WriteStrategy::KeystrokeSimulation)
        );
    }

    #[test]
    fn test_first_entry_wins() {
        let mut policy = WritePolicy::new();
        policy.add("docs.example.com", WriteStrategy::DirectMutation);
        policy.add("example.com", WriteStrategy::KeystrokeSimulation);
        assert_eq!(
            policy.resolve("docs.example.com"),
            Resolution::Known(WriteStrategy::DirectMutation)
        );
        assert_eq!(
            policy.resolve("chat.example.com"),
            Resolution::Known(WriteStrategy::KeystrokeSimulation)
        );
    }

    #[test]
    fn test_learned_origin_overrides_entries() {
        let mut policy = WritePolicy::new();
        policy.add("wiki.local", WriteStrategy::DirectMutation);
        policy.learn_restricted("wiki.local");
        policy.learn_restricted("wiki.local");

        assert_eq!(policy.learned().len(), 1);
        assert_eq!(
            policy.resolve("wiki.local"),
            Resolution::Known(WriteStrategy::KeystrokeSimulation)
        );
    }

    #[test]
    fn test_blank_patterns_ignored() {
        let mut policy = WritePolicy::new();
        policy.add("  ", WriteStrategy::KeystrokeSimulation);
        assert_eq!(policy.resolve("anything.com"), Resolution::Probe);
    }
}
