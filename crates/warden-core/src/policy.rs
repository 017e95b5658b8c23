//! Approval modes and the confirmation decision table.

use crate::classify::Risk;
use crate::error::GuardError;
use crate::request::ActionKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// When a human must confirm a side effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalMode {
    /// Confirm every shell command, file write and file edit.
    Always,
    /// Confirm only shell commands that match a risk signature.
    #[default]
    Dangerous,
    /// Never prompt.
    Never,
}

impl ApprovalMode {
    pub const ALL: [ApprovalMode; 3] = [Self::Always, Self::Dangerous, Self::Never];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Dangerous => "dangerous",
            Self::Never => "never",
        }
    }
}

impl fmt::Display for ApprovalMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApprovalMode {
    type Err = GuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "dangerous" => Ok(Self::Dangerous),
            "never" => Ok(Self::Never),
            _ => Err(GuardError::InvalidApprovalMode(s.to_string())),
        }
    }
}

/// Outcome of the policy for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalDecision {
    RequireConfirmation,
    ProceedDirectly,
}

impl fmt::Display for ApprovalDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RequireConfirmation => "require confirmation",
            Self::ProceedDirectly => "proceed",
        })
    }
}

/// Policy matrix. Total over every (mode, kind, risk) triple.
pub fn decide(mode: ApprovalMode, kind: ActionKind, risk: Risk) -> ApprovalDecision {
    match (mode, kind, risk) {
        (ApprovalMode::Always, _, _) => ApprovalDecision::RequireConfirmation,
        (ApprovalMode::Dangerous, ActionKind::ShellExec, Risk::Dangerous) => {
            ApprovalDecision::RequireConfirmation
        }
        (ApprovalMode::Dangerous, ActionKind::ShellExec, Risk::Benign) => {
            ApprovalDecision::ProceedDirectly
        }
        (ApprovalMode::Dangerous, ActionKind::FileWrite | ActionKind::FileEdit, _) => {
            ApprovalDecision::ProceedDirectly
        }
        (ApprovalMode::Never, _, _) => ApprovalDecision::ProceedDirectly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RISKS: [Risk; 2] = [Risk::Benign, Risk::Dangerous];

    #[test]
    fn test_always_policy_matrix() {
        for kind in ActionKind::ALL {
            for risk in RISKS {
                assert_eq!(
                    decide(ApprovalMode::Always, kind, risk),
                    ApprovalDecision::RequireConfirmation
                );
            }
        }
    }

    #[test]
    fn test_never_policy_matrix() {
        for kind in ActionKind::ALL {
            for risk in RISKS {
                assert_eq!(
                    decide(ApprovalMode::Never, kind, risk),
                    ApprovalDecision::ProceedDirectly
                );
            }
        }
    }

    #[test]
    fn test_dangerous_policy_matrix() {
        use ApprovalDecision::*;
        let mode = ApprovalMode::Dangerous;
        assert_eq!(decide(mode, ActionKind::ShellExec, Risk::Dangerous), RequireConfirmation);
        assert_eq!(decide(mode, ActionKind::ShellExec, Risk::Benign), ProceedDirectly);
        for risk in RISKS {
            assert_eq!(decide(mode, ActionKind::FileWrite, risk), ProceedDirectly);
            assert_eq!(decide(mode, ActionKind::FileEdit, risk), ProceedDirectly);
        }
    }

    #[test]
    fn test_default_mode_is_dangerous() {
        assert_eq!(ApprovalMode::default(), ApprovalMode::Dangerous);
    }

    #[test]
    fn test_parse_modes() {
        assert_eq!("always".parse::<ApprovalMode>().unwrap(), ApprovalMode::Always);
        assert_eq!(" Never ".parse::<ApprovalMode>().unwrap(), ApprovalMode::Never);
        assert_eq!("DANGEROUS".parse::<ApprovalMode>().unwrap(), ApprovalMode::Dangerous);
        assert!(matches!(
            "on-request".parse::<ApprovalMode>(),
            Err(GuardError::InvalidApprovalMode(_))
        ));
    }

    #[test]
    fn test_mode_serde_lowercase() {
        let json = serde_json::to_string(&ApprovalMode::Never).unwrap();
        assert_eq!(json, "\"never\"");
        let mode: ApprovalMode = serde_json::from_str("\"always\"").unwrap();
        assert_eq!(mode, ApprovalMode::Always);
        for mode in ApprovalMode::ALL {
            assert_eq!(mode.to_string().parse::<ApprovalMode>().unwrap(), mode);
        }
    }
}
