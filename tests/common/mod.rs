// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides shared functionality for building template notebooks and test environments

#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Canonicalized root, for building registry records that must match
    /// canonicalized target paths
    pub fn canonical_path(&self) -> PathBuf {
        self.temp_dir.path().canonicalize().expect("canonicalize temp dir")
    }

    pub fn file(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    pub fn write_file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.file(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, contents).expect("write file");
        path
    }

    pub fn write_notebook(&self, name: &str, notebook: &Value) -> PathBuf {
        self.write_file(name, &serde_json::to_string_pretty(notebook).unwrap())
    }

    /// Create a runtime directory holding one record file per server
    pub fn write_runtime_dir(&self, records: &[(&str, &Value)]) -> PathBuf {
        let runtime_dir = self.file("runtime");
        fs::create_dir_all(&runtime_dir).expect("create runtime dir");
        for (file_name, record) in records {
            fs::write(
                runtime_dir.join(file_name),
                serde_json::to_string(record).unwrap(),
            )
            .expect("write server record");
        }
        runtime_dir
    }
}

pub struct TestNotebookBuilder {
    cells: Vec<Value>,
}

impl TestNotebookBuilder {
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    pub fn add_code_cell(mut self, source: &str) -> Self {
        self.cells.push(json!({
            "cell_type": "code",
            "execution_count": null,
            "metadata": {},
            "outputs": [],
            "source": source,
        }));
        self
    }

    pub fn add_code_cell_lines(mut self, lines: &[&str]) -> Self {
        self.cells.push(json!({
            "cell_type": "code",
            "execution_count": null,
            "metadata": {},
            "outputs": [],
            "source": lines,
        }));
        self
    }

    pub fn add_markdown_cell(mut self, source: &str) -> Self {
        self.cells.push(json!({
            "cell_type": "markdown",
            "metadata": {},
            "source": source,
        }));
        self
    }

    pub fn build(&self) -> Value {
        json!({
            "cells": self.cells,
            "metadata": {
                "kernelspec": {
                    "display_name": "Python 3",
                    "language": "python",
                    "name": "python3",
                },
                "language_info": {"name": "python", "version": "3.11.4"},
            },
            "nbformat": 4,
            "nbformat_minor": 5,
        })
    }
}

/// A running-server record as it appears in the runtime directory
pub fn server_record(notebook_dir: &Path, url: &str) -> Value {
    json!({
        "notebook_dir": notebook_dir,
        "url": url,
        "hostname": "localhost",
        "pid": 4242,
        "port": 8888,
        "secure": false,
        "token": "",
    })
}
