// ABOUTME: Server attach and launch for nblaunch
// ABOUTME: Opens a notebook in a matched running server or spawns a new detached server process

use std::path::Path;
use std::process::Command;
use tracing::{info, warn};
use url::Url;

use super::error::{Result, ServerError};
use super::locator::find_server_for;
use super::registry::{RunningServerRecord, ServerRegistry};

/// How to open or start a server, resolved from configuration by the caller
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Browser to fall back to when the matched server has no preference;
    /// `None` means the system default browser
    pub browser: Option<String>,

    /// Command used to start a new notebook server; the target file path
    /// is appended as the final argument
    pub server_command: Vec<String>,
}

/// Open `target` in a running server covering it, or start a new detached
/// server pointed at it.
///
/// Browser and spawn failures are logged at warn level and not
/// propagated. Only a missing target or a failed registry query is an
/// error.
pub fn open_or_launch(
    target: &Path,
    registry: &dyn ServerRegistry,
    options: &LaunchOptions,
) -> Result<()> {
    let resolved = target
        .canonicalize()
        .map_err(|e| ServerError::TargetNotFound {
            path: target.to_path_buf(),
            source: e,
        })?;

    match find_server_for(&resolved, registry)? {
        Some(server) => {
            info!(
                "Using running server at {} (serving from {})",
                server.url,
                server.notebook_dir.display()
            );
            let url = notebook_url(&server, &resolved)?;
            let browser = server.browser.as_deref().or(options.browser.as_deref());
            if let Err(e) = open_in_browser(&url, browser) {
                warn!("Failed to open browser for {}: {}", url, e);
            }
        }
        None => {
            info!(
                "No running server is serving {}, starting a new one",
                resolved.display()
            );
            if let Err(e) = spawn_server(&resolved, options) {
                warn!("Failed to start notebook server: {}", e);
            }
        }
    }

    Ok(())
}

/// Build the URL that opens `resolved_target` in the given server.
///
/// The target's path relative to the serving root is appended to the
/// server's base URL under the `notebooks/` route, one percent-escaped
/// segment per path component.
pub fn notebook_url(server: &RunningServerRecord, resolved_target: &Path) -> Result<Url> {
    let relative = resolved_target
        .strip_prefix(&server.notebook_dir)
        .map_err(|_| {
            ServerError::InvalidRecord(format!(
                "serving root {} does not cover {}",
                server.notebook_dir.display(),
                resolved_target.display()
            ))
        })?;

    let mut url = Url::parse(&server.url)?;
    {
        let mut segments = url.path_segments_mut().map_err(|_| {
            ServerError::InvalidRecord(format!("server URL '{}' cannot be a base", server.url))
        })?;
        segments.pop_if_empty();
        segments.push("notebooks");
        for component in relative.components() {
            segments.push(&component.as_os_str().to_string_lossy());
        }
    }

    Ok(url)
}

fn open_in_browser(url: &Url, browser: Option<&str>) -> std::io::Result<()> {
    match browser {
        Some(program) => open::with(url.as_str(), program),
        None => open::that(url.as_str()),
    }
}

/// Start a new notebook server for `resolved_target` as a detached process
fn spawn_server(resolved_target: &Path, options: &LaunchOptions) -> Result<()> {
    let (program, args) = options
        .server_command
        .split_first()
        .ok_or_else(|| ServerError::LaunchError("server command is empty".to_string()))?;

    let mut command = Command::new(program);
    command.args(args).arg(resolved_target);

    spawn_detached(command)
        .map_err(|e| ServerError::LaunchError(format!("{}: {}", program, e)))?;

    info!("Started detached notebook server: {}", program);
    Ok(())
}

/// Spawn the command as a detached process that survives this process's
/// exit and is never waited on.
///
/// Unix: new process group, standard streams detached to null.
#[cfg(unix)]
fn spawn_detached(mut command: Command) -> std::io::Result<()> {
    use std::os::unix::process::CommandExt;
    use std::process::Stdio;

    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .process_group(0)
        .spawn()
        .map(|_| ())
}

/// Windows: allocate a new console so the server is not tied to ours.
#[cfg(windows)]
fn spawn_detached(mut command: Command) -> std::io::Result<()> {
    use std::os::windows::process::CommandExt;

    const CREATE_NEW_CONSOLE: u32 = 0x0000_0010;

    command.creation_flags(CREATE_NEW_CONSOLE).spawn().map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn record(notebook_dir: &str, url: &str) -> RunningServerRecord {
        RunningServerRecord {
            notebook_dir: PathBuf::from(notebook_dir),
            url: url.to_string(),
            browser: None,
        }
    }

    #[test]
    fn test_notebook_url_joins_relative_path() {
        let server = record("/srv/project", "http://localhost:8888/");
        let url = notebook_url(&server, Path::new("/srv/project/sub/analysis.ipynb")).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8888/notebooks/sub/analysis.ipynb"
        );
    }

    #[test]
    fn test_notebook_url_escapes_segments() {
        let server = record("/srv/project", "http://localhost:8888/");
        let url = notebook_url(&server, Path::new("/srv/project/my notebook.ipynb")).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8888/notebooks/my%20notebook.ipynb"
        );
    }

    #[test]
    fn test_notebook_url_respects_base_path() {
        let server = record("/srv/project", "http://localhost:8888/lab/");
        let url = notebook_url(&server, Path::new("/srv/project/analysis.ipynb")).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8888/lab/notebooks/analysis.ipynb"
        );
    }

    #[test]
    fn test_notebook_url_rejects_uncovered_target() {
        let server = record("/srv/project", "http://localhost:8888/");
        let result = notebook_url(&server, Path::new("/elsewhere/analysis.ipynb"));
        assert!(matches!(result, Err(ServerError::InvalidRecord(_))));
    }

    #[test]
    fn test_notebook_url_rejects_bad_base_url() {
        let server = record("/srv/project", "not a url");
        let result = notebook_url(&server, Path::new("/srv/project/analysis.ipynb"));
        assert!(matches!(result, Err(ServerError::InvalidUrl(_))));
    }

    #[test]
    fn test_spawn_with_empty_command_is_launch_error() {
        let options = LaunchOptions {
            browser: None,
            server_command: vec![],
        };
        let result = spawn_server(Path::new("/tmp/analysis.ipynb"), &options);
        assert!(matches!(result, Err(ServerError::LaunchError(_))));
    }
}
