/*!
 * Process Module
 * Child process roles, spawning, joining, and abrupt termination
 */

pub mod launcher;
pub mod registry;
pub mod role;
pub mod types;

// Re-export public API
pub use launcher::{ChildLauncher, SpawnedChild};
pub use registry::ChildRegistry;
pub use role::{run_child, usage_exit_code, ChildRole, RoleError};
pub use types::{describe_status, ProcessError, ProcessResult};
