// ABOUTME: Command implementations for the nblaunch CLI
// ABOUTME: Handles the create-then-open kickoff flow and variable parsing

use anyhow::Result;
use indexmap::IndexMap;
use std::path::PathBuf;
use tracing::info;

use super::config::Config;
use crate::server::{self, RuntimeDirRegistry};
use crate::template;

/// Create the target notebook from the template, then open it in a
/// running or newly started notebook server
pub fn kickoff(
    template_path: PathBuf,
    target_path: PathBuf,
    vars: Vec<String>,
    config: &Config,
) -> Result<()> {
    let variables = parse_variables(&vars)?;
    info!("Parsed {} template variables", variables.len());

    template::create_from_template(&template_path, &target_path, &variables)
        .map_err(|e| anyhow::anyhow!("Failed to create notebook: {}", e))?;

    let registry = RuntimeDirRegistry::new(config.runtime_dir.clone());
    server::open_or_launch(&target_path, &registry, &config.launch_options())
        .map_err(|e| anyhow::anyhow!("Failed to open notebook: {}", e))?;

    Ok(())
}

/// Parse variables from NAME=VALUE format.
///
/// The returned map preserves command-line order, which is also the
/// substitution order. Assigning the same name twice keeps the first
/// position but takes the last value.
pub fn parse_variables(vars: &[String]) -> Result<IndexMap<String, String>> {
    let mut variables = IndexMap::new();

    for var in vars {
        if let Some((key, value)) = var.split_once('=') {
            variables.insert(key.to_string(), value.to_string());
        } else {
            return Err(anyhow::anyhow!(
                "Invalid variable format '{}'. Expected 'NAME=VALUE'",
                var
            ));
        }
    }

    Ok(variables)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_variables_preserves_order() {
        let variables = parse_variables(&strings(&["b=2", "a=1"])).unwrap();
        let keys: Vec<_> = variables.keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_parse_variables_splits_on_first_equals() {
        let variables = parse_variables(&strings(&["query=a=b"])).unwrap();
        assert_eq!(variables["query"], "a=b");
    }

    #[test]
    fn test_parse_variables_last_assignment_wins() {
        let variables = parse_variables(&strings(&["x=1", "y=2", "x=3"])).unwrap();
        assert_eq!(variables["x"], "3");
        // overriding keeps the original position
        let keys: Vec<_> = variables.keys().cloned().collect();
        assert_eq!(keys, vec!["x", "y"]);
    }

    #[test]
    fn test_parse_variables_rejects_missing_equals() {
        let result = parse_variables(&strings(&["not-a-variable"]));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_variables_empty_is_valid() {
        let variables = parse_variables(&[]).unwrap();
        assert!(variables.is_empty());
    }
}
