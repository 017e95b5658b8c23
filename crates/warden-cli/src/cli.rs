//! CLI argument and command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use warden_core::ApprovalMode;

#[derive(Parser)]
#[command(
    name = "warden",
    version,
    about = "Approval-gated shell commands and file edits for coding agents"
)]
pub struct Cli {
    /// Approval mode: always, dangerous or never (overrides the saved config).
    #[arg(long, global = true)]
    pub mode: Option<ApprovalMode>,

    /// Base directory for shell commands and file paths (defaults to the current directory).
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a shell command through the guard.
    Run {
        /// Timeout in seconds (defaults to the configured shell timeout).
        #[arg(long)]
        timeout: Option<u64>,

        /// The command to run.
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Write a file through the guard.
    Write {
        /// Target path.
        path: String,

        /// File contents. Read from stdin when omitted.
        #[arg(long)]
        contents: Option<String>,
    },

    /// Replace an exact text fragment in a file through the guard.
    Edit {
        /// Target path.
        path: String,
        /// Text to replace. Must occur exactly once.
        old_text: String,
        /// Replacement text.
        new_text: String,
    },

    /// Classify a command and show what the guard would do, without running it.
    Check {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// List the risk signatures in the active catalog.
    Signatures,

    /// List the guarded tools exposed to a model, or show one tool's schema.
    Tools {
        /// Tool name.
        name: Option<String>,
    },

    /// Show or change the saved approval mode.
    Mode {
        #[command(subcommand)]
        action: Option<ModeAction>,
    },
}

#[derive(Subcommand)]
pub enum ModeAction {
    /// Save a new approval mode to the config file.
    Set {
        /// always, dangerous or never.
        mode: ApprovalMode,
    },
}
