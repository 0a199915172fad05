// ABOUTME: Template instantiation for notebook files
// ABOUTME: Substitutes literal placeholder variables in cell sources and writes the new notebook

use indexmap::IndexMap;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;
use tracing::{debug, info};

use super::error::{Result, TemplateError};
use crate::notebook::Notebook;

/// Replace every literal occurrence of `{{ name }}` in `source` with the
/// mapped value.
///
/// The match is exact literal text: two braces, one space, the variable
/// name, one space, two braces. There is no whitespace-flexible matching,
/// no nesting, and no escaping. Names missing from the map stay verbatim.
///
/// Variables are applied in map insertion order. The order is observable
/// when a replacement value itself contains placeholder syntax: a later
/// variable's placeholder introduced by an earlier replacement is still
/// substituted, while the reverse is not.
pub fn substitute_vars(source: &str, variables: &IndexMap<String, String>) -> String {
    let mut result = source.to_string();
    for (name, value) in variables {
        let placeholder = format!("{{{{ {} }}}}", name);
        result = result.replace(&placeholder, value);
    }
    result
}

/// Substitute variables in every cell source of the notebook
pub fn fill_notebook(notebook: &mut Notebook, variables: &IndexMap<String, String>) {
    if variables.is_empty() {
        return;
    }
    notebook.for_each_source_mut(|source| {
        let substituted = substitute_vars(source, variables);
        *source = substituted;
    });
}

/// Create `target_path` from the template notebook at `template_path`,
/// substituting `variables` in cell sources.
///
/// Fails with [`TemplateError::TargetExists`] if the target already exists;
/// the check runs before the template is read, and the write itself uses
/// `create_new` so a file appearing in between is still refused. After any
/// failure no file exists at the target path.
pub fn create_from_template(
    template_path: &Path,
    target_path: &Path,
    variables: &IndexMap<String, String>,
) -> Result<()> {
    if target_path.exists() {
        return Err(TemplateError::TargetExists(target_path.to_path_buf()));
    }

    let mut notebook = Notebook::load(template_path)?;
    debug!(
        "Loaded template '{}' with {} cells",
        template_path.display(),
        notebook.cell_count()
    );

    fill_notebook(&mut notebook, variables);

    let serialized = notebook.to_json_string().map_err(TemplateError::NotebookError)?;
    write_new_file(target_path, &serialized)?;

    info!("Created notebook: {}", target_path.display());
    Ok(())
}

/// Write `contents` to a file that must not exist yet, removing the
/// partial file if the write fails midway.
fn write_new_file(path: &Path, contents: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| {
            if e.kind() == ErrorKind::AlreadyExists {
                TemplateError::TargetExists(path.to_path_buf())
            } else {
                TemplateError::IoError(e)
            }
        })?;

    let result = file
        .write_all(contents.as_bytes())
        .and_then(|_| file.write_all(b"\n"));

    if let Err(e) = result {
        drop(file);
        let _ = fs::remove_file(path);
        return Err(TemplateError::IoError(e));
    }

    Ok(())
}
