//! File IO at the boundary.
//!
//! Reading validates the input path before touching it, loading parses the
//! interface document from YAML, and saving writes documents and rendered
//! modules. The document path rule lives here: a directory target gets a
//! file named after the application inside it.

use std::fs;
use std::path::{Path, PathBuf};

use zen_gen::ast::Module;
use zen_gen::{render_module, Document};

use crate::error::{CliError, CliResult};

/// Read a source file to a string, rejecting missing paths and directories.
pub fn read_source(path: &Path) -> CliResult<String> {
    if !path.exists() {
        return Err(CliError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }
    if path.is_dir() {
        return Err(CliError::SourceIsDirectory {
            path: path.to_path_buf(),
        });
    }
    Ok(fs::read_to_string(path)?)
}

/// Load an interface document from a YAML file.
pub fn load_document(path: &Path) -> CliResult<Document> {
    let text = read_source(path)?;
    serde_yaml::from_str(&text).map_err(|source| CliError::MalformedDocument {
        path: path.to_path_buf(),
        message: source.to_string(),
    })
}

/// The effective document output path: a directory target becomes
/// `<app_name>.yml` inside that directory.
pub fn resolve_document_path(path: &Path, app_name: &str) -> PathBuf {
    if path.is_dir() {
        path.join(format!("{app_name}.yml"))
    } else {
        path.to_path_buf()
    }
}

/// Serialize and write an interface document. Returns the path written.
pub fn save_document(path: &Path, app_name: &str, document: &Document) -> CliResult<PathBuf> {
    let target = resolve_document_path(path, app_name);
    let yaml = serde_yaml::to_string(document)?;
    fs::write(&target, yaml)?;
    Ok(target)
}

/// Render and write a generated-code module.
pub fn save_module(path: &Path, module: &Module) -> CliResult<()> {
    fs::write(path, render_module(module))?;
    Ok(())
}

/// The module name a generated file is imported as: its file stem.
pub fn module_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "models".to_string())
}
