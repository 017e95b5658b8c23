//! warden-tools: The executor capability the guard wraps, plus a local implementation
//! (shell, file write, exact-text edit).

mod error;
pub mod local;
mod path_guard;
pub mod shell;
pub mod traits;

pub use error::ToolError;
pub use local::LocalExecutor;
pub use traits::{Executor, ToolResult};
