// ABOUTME: Server module for nblaunch
// ABOUTME: Provides running-server discovery, attach, and detached launch

pub mod error;
pub mod launcher;
pub mod locator;
pub mod registry;

pub use error::{Result, ServerError};
pub use launcher::{notebook_url, open_or_launch, LaunchOptions};
pub use locator::find_server_for;
pub use registry::{RunningServerRecord, RuntimeDirRegistry, ServerRegistry};
