use crate::catalog::{PatternCatalog, RiskSignature};
use crate::error::GuardError;
use crate::policy::ApprovalMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// An extra risk signature declared in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureConfig {
    pub name: String,
    #[serde(default)]
    pub intent: String,
    /// Regex searched for in the raw command text.
    pub pattern: String,
}

/// Serialized settings from ~/.warden/config.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub approval_mode: ApprovalMode,
    pub shell_timeout_secs: u64,
    /// Unanswered prompts are declined after this long. `None` waits forever.
    pub confirm_timeout_secs: Option<u64>,
    pub extra_signatures: Vec<SignatureConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            approval_mode: ApprovalMode::Dangerous,
            shell_timeout_secs: 120,
            confirm_timeout_secs: None,
            extra_signatures: Vec::new(),
        }
    }
}

impl Config {
    pub fn shell_timeout(&self) -> Duration {
        Duration::from_secs(self.shell_timeout_secs)
    }

    pub fn confirm_timeout(&self) -> Option<Duration> {
        self.confirm_timeout_secs.map(Duration::from_secs)
    }

    /// Built-in signatures followed by `extra_signatures`.
    pub fn build_catalog(&self) -> Result<PatternCatalog, GuardError> {
        let mut catalog = PatternCatalog::default();
        for sig in &self.extra_signatures {
            let signature = RiskSignature::new(sig.name.as_str(), sig.intent.as_str(), &sig.pattern)?;
            catalog = catalog.with_signature(signature);
        }
        Ok(catalog)
    }
}

/// Helper struct for storing the location to read/write settings
pub struct ConfigStore {
    path: PathBuf,
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    pub fn new() -> Self {
        let mut path = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push(".warden");
        path.push("config.json");
        Self { path }
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved config, or fall back to Default
    pub fn load(&self) -> Config {
        let Ok(content) = fs::read_to_string(&self.path) else {
            return Config::default();
        };
        match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable config");
                Config::default()
            }
        }
    }

    /// Save the config back to disk
    pub fn save(&self, config: &Config) -> Result<(), GuardError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(config)?;
        fs::write(&self.path, content)?;
        Ok(())
    }

    /// Persist a new approval mode, keeping everything else.
    pub fn set_approval_mode(&self, mode: ApprovalMode) -> Result<Config, GuardError> {
        let mut config = self.load();
        config.approval_mode = mode;
        self.save(&config)?;
        Ok(config)
    }
}
