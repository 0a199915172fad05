// ABOUTME: Server discovery for nblaunch
// ABOUTME: Matches a target notebook against the serving roots of running servers

use std::path::Path;
use tracing::debug;

use super::error::{Result, ServerError};
use super::registry::{RunningServerRecord, ServerRegistry};

/// Find the running server whose serving root is the deepest ancestor of
/// `target`, if any.
///
/// The target is canonicalized first (symlink-resolving); a missing file
/// is [`ServerError::TargetNotFound`]. Ancestry is component-wise
/// (`/abc` is not an ancestor of `/abcd/x`). Among matches the record
/// with the most path components in its serving root wins; records of
/// equal depth keep the one the registry returned first.
pub fn find_server_for(
    target: &Path,
    registry: &dyn ServerRegistry,
) -> Result<Option<RunningServerRecord>> {
    let resolved = target
        .canonicalize()
        .map_err(|e| ServerError::TargetNotFound {
            path: target.to_path_buf(),
            source: e,
        })?;

    let servers = registry.running_servers()?;
    debug!(
        "Matching {} against {} running server(s)",
        resolved.display(),
        servers.len()
    );

    let mut best: Option<(usize, RunningServerRecord)> = None;
    for record in servers {
        if !resolved.starts_with(&record.notebook_dir) {
            continue;
        }
        let depth = record.notebook_dir.components().count();
        // strictly greater, so equal-depth ties keep the earlier record
        if best.as_ref().map_or(true, |(best_depth, _)| depth > *best_depth) {
            best = Some((depth, record));
        }
    }

    Ok(best.map(|(_, record)| record))
}
