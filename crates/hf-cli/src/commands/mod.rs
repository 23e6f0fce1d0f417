pub mod check;
pub mod decode;
pub mod encode;
pub mod hooks;
pub mod sync;

use std::fs;
use std::path::{Path, PathBuf};

use hf_core::ResourceId;
use hf_modifiers::{ComposableModifier, ModifierLoader};
use serde_json::Value;

/// Read a file to a string.
fn read_file(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))
}

/// Read and parse a JSON file.
fn read_json(path: &Path) -> Result<Value, String> {
    let text = read_file(path)?;
    serde_json::from_str(&text).map_err(|e| format!("{}: {e}", path.display()))
}

/// Load a single modifier definition.
fn load_modifier(loader: &ModifierLoader, path: &Path) -> Result<ComposableModifier, String> {
    let value = read_json(path)?;
    loader
        .deserialize(&value)
        .map_err(|e| format!("{}: {e}", path.display()))
}

/// Modifier id for a definition file: its stem in the default namespace.
fn modifier_id(path: &Path) -> Result<ResourceId, String> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| format!("{}: file name is not valid UTF-8", path.display()))?;
    ResourceId::parse(stem).map_err(|e| format!("{}: {e}", path.display()))
}

/// Expand directories to the `.json` files directly inside them, sorted.
fn collect_json_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, String> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
            let mut found: Vec<PathBuf> = entries
                .filter_map(Result::ok)
                .map(|entry| entry.path())
                .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}
