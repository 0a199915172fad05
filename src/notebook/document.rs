// ABOUTME: Notebook document model backed by a raw JSON value tree
// ABOUTME: Loads notebooks, exposes cell sources for mutation, and saves preserving all other structure

use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::error::{NotebookError, Result};

/// A notebook document held as its raw JSON value tree.
///
/// Keeping the parsed tree instead of a typed model means every field this
/// tool does not understand (cell metadata, outputs, kernel info, format
/// versions) round-trips untouched, including object key order. Only the
/// `source` text of each cell is ever mutated.
pub struct Notebook {
    root: Value,
}

impl Notebook {
    /// Load a notebook from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                NotebookError::NotFound(path.to_path_buf())
            } else {
                NotebookError::IoError(e)
            }
        })?;
        Self::from_json(&content, path)
    }

    /// Parse a notebook from a JSON string
    ///
    /// `path` is only used for error reporting.
    pub fn from_json(content: &str, path: &Path) -> Result<Self> {
        let root: Value = serde_json::from_str(content).map_err(|e| NotebookError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        validate_structure(&root, path)?;
        Ok(Self { root })
    }

    /// Number of cells in the document
    pub fn cell_count(&self) -> usize {
        self.cells().map_or(0, |cells| cells.len())
    }

    /// Apply `f` to every cell source string.
    ///
    /// Handles both on-disk source forms: a single string, or an array of
    /// line strings (which keeps its array shape, each element visited
    /// separately). Cells without a `source` field are skipped.
    pub fn for_each_source_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&mut String),
    {
        let cells = match self.root.get_mut("cells").and_then(Value::as_array_mut) {
            Some(cells) => cells,
            None => return,
        };

        for cell in cells {
            let source = match cell.get_mut("source") {
                Some(source) => source,
                None => continue,
            };

            match source {
                Value::String(text) => f(text),
                Value::Array(lines) => {
                    for line in lines {
                        if let Value::String(text) = line {
                            f(text);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    /// Cell sources as plain strings, array-form sources joined
    pub fn cell_sources(&self) -> Vec<String> {
        let cells = match self.cells() {
            Some(cells) => cells,
            None => return Vec::new(),
        };

        cells
            .iter()
            .map(|cell| match cell.get("source") {
                Some(Value::String(text)) => text.clone(),
                Some(Value::Array(lines)) => lines
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .concat(),
                _ => String::new(),
            })
            .collect()
    }

    /// The underlying JSON value tree
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    /// Serialize the document back to notebook JSON
    pub fn to_json_string(&self) -> Result<String> {
        let serialized = serde_json::to_string_pretty(&self.root)?;
        Ok(serialized)
    }

    fn cells(&self) -> Option<&Vec<Value>> {
        self.root.get("cells").and_then(Value::as_array)
    }
}

/// Check that the parsed value has the minimal shape of a notebook:
/// a top-level object carrying a `cells` array of objects.
fn validate_structure(root: &Value, path: &Path) -> Result<()> {
    let invalid = |reason: &str| NotebookError::InvalidFormat {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    let object = root.as_object().ok_or_else(|| invalid("not a JSON object"))?;

    let cells = object
        .get("cells")
        .ok_or_else(|| invalid("missing 'cells' field"))?;
    let cells = cells
        .as_array()
        .ok_or_else(|| invalid("'cells' is not an array"))?;

    for (index, cell) in cells.iter().enumerate() {
        if !cell.is_object() {
            return Err(invalid(&format!("cell {} is not an object", index)));
        }
    }

    Ok(())
}
