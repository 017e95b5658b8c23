//! warden-core: Approval-gated execution of agent tool calls.
//!
//! A [`GuardedExecutor`] sits between a model-driven loop and a real
//! [`Executor`](warden_tools::Executor). Each request is classified against the
//! [`PatternCatalog`], the [`ApprovalMode`] decides whether a human must confirm
//! it, and the [`ConfirmationGate`] asks. Rejected requests never reach the
//! underlying executor.

pub mod catalog;
pub mod classify;
pub mod config;
pub mod confirm;
mod error;
pub mod guard;
pub mod policy;
pub mod request;

pub use catalog::{PatternCatalog, RiskSignature};
pub use classify::{Risk, RiskClassifier};
pub use config::{Config, ConfigStore, SignatureConfig};
pub use confirm::{ConfirmError, ConfirmationGate, ConfirmationPrompt, DenyAllGate};
pub use error::GuardError;
pub use guard::{ExecutionOutcome, GuardedExecutor, REJECTION_MESSAGE, REJECTION_REASON};
pub use policy::{decide, ApprovalDecision, ApprovalMode};
pub use request::{tool_definitions, ActionKind, ActionRequest};
