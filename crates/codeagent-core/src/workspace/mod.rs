//! Repository workspaces.

mod errors;
pub mod files;
mod guard;
mod manager;
mod retry;
mod store;

pub use errors::{Result, WorkspaceError};
pub use guard::Workspace;
pub use manager::{
    clone_directory_name, truncate_diff, AcquireMode, WorkspaceManager, MAX_DIFF_CHARS,
};
pub use retry::RetryPolicy;
pub use store::{
    Clock, ManualClock, MemoryWorkspaceStore, SystemClock, WorkspaceKey, WorkspaceStore,
};
