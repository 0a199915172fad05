// ABOUTME: Main library module for the nblaunch notebook kickoff tool
// ABOUTME: Exports all core modules and provides the public API

pub mod cli;
pub mod notebook;
pub mod server;
pub mod template;

// Re-export commonly used types
pub use cli::{App, Args, Config};
pub use notebook::Notebook;
pub use server::{
    find_server_for, open_or_launch, LaunchOptions, RunningServerRecord, RuntimeDirRegistry,
    ServerRegistry,
};
pub use template::{create_from_template, substitute_vars};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
