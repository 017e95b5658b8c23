//! Risk classification of action requests.

use crate::catalog::PatternCatalog;
use crate::request::ActionRequest;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether an action matched a known-destructive shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Risk {
    Benign,
    Dangerous,
}

impl fmt::Display for Risk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Benign => "benign",
            Self::Dangerous => "dangerous",
        })
    }
}

/// Classifies requests against a [`PatternCatalog`].
///
/// Only shell commands are pattern matched. File writes and edits are always
/// [`Risk::Benign`]; whether they need confirmation is up to the approval mode.
#[derive(Debug, Clone, Default)]
pub struct RiskClassifier {
    catalog: PatternCatalog,
}

impl RiskClassifier {
    pub fn new(catalog: PatternCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    pub fn classify(&self, action: &ActionRequest) -> Risk {
        match action.command() {
            Some(command) => self.classify_command(command),
            None => Risk::Benign,
        }
    }

    pub fn classify_command(&self, command: &str) -> Risk {
        if self.catalog.matches_any(command) {
            Risk::Dangerous
        } else {
            Risk::Benign
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_classification() {
        let classifier = RiskClassifier::default();
        assert_eq!(
            classifier.classify(&ActionRequest::shell("rm -rf /tmp/build")),
            Risk::Dangerous
        );
        assert_eq!(classifier.classify(&ActionRequest::shell("ls -la")), Risk::Benign);
        assert_eq!(
            classifier.classify(&ActionRequest::shell("git push origin main --force")),
            Risk::Dangerous
        );
    }

    #[test]
    fn test_file_actions_never_pattern_matched() {
        let classifier = RiskClassifier::default();
        let write = ActionRequest::write("wipe.sh", "sudo rm -rf / && shutdown now");
        let edit = ActionRequest::edit("run.sh", "echo ok", "kill -9 1");
        assert_eq!(classifier.classify(&write), Risk::Benign);
        assert_eq!(classifier.classify(&edit), Risk::Benign);
    }

    #[test]
    fn test_classification_is_repeatable() {
        let classifier = RiskClassifier::default();
        for command in ["sudo shutdown now", "ls -la", "git reset --hard", ""] {
            let request = ActionRequest::shell(command);
            assert_eq!(classifier.classify(&request), classifier.classify(&request));
        }
    }

    #[test]
    fn test_empty_catalog_is_always_benign() {
        let classifier = RiskClassifier::new(PatternCatalog::empty());
        assert_eq!(classifier.classify_command("rm -rf /"), Risk::Benign);
    }
}
