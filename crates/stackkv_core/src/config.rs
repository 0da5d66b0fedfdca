//! Session configuration.

/// Default prompt printed before each line is read.
pub const DEFAULT_PROMPT: &str = "> ";

/// Configuration for a [`Session`](crate::Session) and its command loop.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Prompt printed before each read.
    pub prompt: String,

    /// Whether verbs are matched regardless of case (`read` == `READ`).
    pub verbs_case_insensitive: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            verbs_case_insensitive: true,
        }
    }
}

impl SessionConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the prompt.
    #[must_use]
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Sets whether verbs are matched case-insensitively.
    #[must_use]
    pub fn verbs_case_insensitive(mut self, value: bool) -> Self {
        self.verbs_case_insensitive = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.prompt, "> ");
        assert!(config.verbs_case_insensitive);
    }

    #[test]
    fn builder_pattern() {
        let config = SessionConfig::new()
            .prompt("kv> ")
            .verbs_case_insensitive(false);

        assert_eq!(config.prompt, "kv> ");
        assert!(!config.verbs_case_insensitive);
    }
}
