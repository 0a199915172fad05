// ABOUTME: Running-server registry for nblaunch
// ABOUTME: Defines the registry query seam and the runtime-directory implementation

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::error::Result;

/// A running notebook server as advertised in the runtime directory.
///
/// Unknown fields in the advertisement file (pid, port, token, ...) are
/// ignored; records are read fresh on every query and never written back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunningServerRecord {
    /// Directory the server exposes as its serving root
    pub notebook_dir: PathBuf,

    /// Base URL of the server, e.g. "http://localhost:8888/"
    pub url: String,

    /// Browser the server prefers for opening pages, if configured
    #[serde(default)]
    pub browser: Option<String>,
}

/// Read-only query interface over the set of running servers.
///
/// Injected into the locator and launcher so tests can run against
/// fabricated server lists.
pub trait ServerRegistry {
    fn running_servers(&self) -> Result<Vec<RunningServerRecord>>;
}

/// Registry backed by `nbserver-*.json` files in the runtime directory
pub struct RuntimeDirRegistry {
    runtime_dir: PathBuf,
}

impl RuntimeDirRegistry {
    /// Create a registry over the given runtime directory, or the
    /// default location when `None`
    pub fn new(runtime_dir: Option<PathBuf>) -> Self {
        Self {
            runtime_dir: resolve_runtime_dir(runtime_dir),
        }
    }

    pub fn runtime_dir(&self) -> &Path {
        &self.runtime_dir
    }
}

impl ServerRegistry for RuntimeDirRegistry {
    /// List the currently advertised servers.
    ///
    /// Files that cannot be read or parsed are skipped: servers that died
    /// without cleaning up leave stale or truncated records behind. A
    /// missing runtime directory means no server has ever advertised, not
    /// an error. Records are returned in file-name order so repeated
    /// queries see a stable ordering.
    fn running_servers(&self) -> Result<Vec<RunningServerRecord>> {
        let entries = match fs::read_dir(&self.runtime_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(
                    "Runtime directory {} does not exist, no running servers",
                    self.runtime_dir.display()
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| is_server_record_file(path))
            .collect();
        paths.sort();

        let mut records = Vec::new();
        for path in paths {
            if let Some(record) = read_record(&path) {
                records.push(record);
            }
        }

        debug!(
            "Found {} running server(s) in {}",
            records.len(),
            self.runtime_dir.display()
        );
        Ok(records)
    }
}

/// Resolve the runtime directory: explicit setting, environment
/// overrides, then the platform's user directories.
fn resolve_runtime_dir(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir;
    }
    if let Ok(dir) = env::var("NBLAUNCH_RUNTIME_DIR") {
        return PathBuf::from(dir);
    }
    if let Ok(dir) = env::var("JUPYTER_RUNTIME_DIR") {
        return PathBuf::from(dir);
    }
    if let Some(dir) = dirs::runtime_dir() {
        return dir.join("jupyter");
    }
    if let Some(dir) = dirs::data_dir() {
        return dir.join("jupyter").join("runtime");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".jupyter")
        .join("runtime")
}

fn is_server_record_file(path: &Path) -> bool {
    match path.file_name().and_then(|name| name.to_str()) {
        Some(name) => name.starts_with("nbserver-") && name.ends_with(".json"),
        None => false,
    }
}

fn read_record(path: &Path) -> Option<RunningServerRecord> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            debug!("Skipping unreadable server record {}: {}", path.display(), e);
            return None;
        }
    };

    match serde_json::from_str(&content) {
        Ok(record) => Some(record),
        Err(e) => {
            debug!(
                "Skipping unparseable server record {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}
