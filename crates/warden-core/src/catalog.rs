//! Catalog of destructive shell command shapes.
//!
//! Matching is a regex search over the raw command text. It is deliberately
//! coarse: a false positive costs one confirmation prompt, while a false
//! negative (a destructive command no signature describes) is accepted
//! residual risk. The built-in table is append-only; grow it by adding a row,
//! or at runtime through [`PatternCatalog::with_signature`].

use crate::error::GuardError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Built-in signatures: `(name, intent, pattern)`.
const BUILTIN: &[(&str, &str, &str)] = &[
    // Filesystem destruction
    (
        "rm-recursive-force",
        "recursive or forced removal",
        r"\brm\s+(-[a-zA-Z]*[rf]|--force|--recursive)\b",
    ),
    (
        "rm-absolute-path",
        "removal of an absolute path",
        r"\brm\b.*\s+/",
    ),
    // Privilege and ownership
    ("sudo", "runs as root", r"\bsudo\b"),
    ("chmod", "permission change", r"\bchmod\b"),
    ("chown", "ownership change", r"\bchown\b"),
    // Disk-level utilities
    ("dd", "raw block copy", r"\bdd\b"),
    ("mkfs", "filesystem creation", r"\bmkfs\b"),
    ("fdisk", "partition table edit", r"\bfdisk\b"),
    ("format", "disk format", r"\bformat\b"),
    // Power state
    (
        "power-state",
        "shutdown or reboot",
        r"\b(shutdown|reboot|poweroff|halt)\b",
    ),
    // Git history rewrites
    (
        "git-force-push",
        "force push rewrites remote history",
        r"\bgit\s+push\s+.*--force",
    ),
    (
        "git-hard-reset",
        "hard reset discards uncommitted changes",
        r"\bgit\s+reset\s+--hard",
    ),
    (
        "git-clean-force",
        "forced clean deletes untracked files",
        r"\bgit\s+clean\s+-[a-zA-Z]*f",
    ),
    // Devices
    (
        "device-redirect",
        "redirection into a device file",
        r">\s*/dev/",
    ),
    // Process termination
    ("kill-9", "forceful process kill", r"\bkill\s+-9"),
    ("killall", "kills processes by name", r"\bkillall\b"),
    ("pkill", "kills processes by pattern", r"\bpkill\b"),
];

static DEFAULT_CATALOG: Lazy<PatternCatalog> = Lazy::new(|| PatternCatalog {
    signatures: BUILTIN
        .iter()
        .map(|(name, intent, pattern)| {
            RiskSignature::new(*name, *intent, pattern)
                .expect("built-in signature patterns are valid")
        })
        .collect(),
});

/// One destructive command shape.
#[derive(Debug, Clone)]
pub struct RiskSignature {
    name: String,
    intent: String,
    matcher: Regex,
}

impl RiskSignature {
    /// Compile a signature from a regex pattern.
    pub fn new(
        name: impl Into<String>,
        intent: impl Into<String>,
        pattern: &str,
    ) -> Result<Self, GuardError> {
        let name = name.into();
        let matcher = Regex::new(pattern).map_err(|source| GuardError::InvalidPattern {
            name: name.clone(),
            source,
        })?;
        Ok(Self {
            name,
            intent: intent.into(),
            matcher,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn intent(&self) -> &str {
        &self.intent
    }

    pub fn pattern(&self) -> &str {
        self.matcher.as_str()
    }

    /// Whether the command text contains this shape.
    pub fn is_match(&self, command: &str) -> bool {
        self.matcher.is_match(command)
    }
}

/// Ordered set of risk signatures.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    signatures: Vec<RiskSignature>,
}

impl Default for PatternCatalog {
    fn default() -> Self {
        DEFAULT_CATALOG.clone()
    }
}

impl PatternCatalog {
    /// A catalog with no signatures. Nothing is ever dangerous.
    pub fn empty() -> Self {
        Self {
            signatures: Vec::new(),
        }
    }

    /// Append a signature.
    pub fn with_signature(mut self, signature: RiskSignature) -> Self {
        self.signatures.push(signature);
        self
    }

    /// Whether any signature matches.
    pub fn matches_any(&self, command: &str) -> bool {
        self.signatures.iter().any(|sig| sig.is_match(command))
    }

    /// Every signature that matches, in catalog order.
    pub fn matching(&self, command: &str) -> Vec<&RiskSignature> {
        self.signatures
            .iter()
            .filter(|sig| sig.is_match(command))
            .collect()
    }

    pub fn signatures(&self) -> impl Iterator<Item = &RiskSignature> {
        self.signatures.iter()
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}
