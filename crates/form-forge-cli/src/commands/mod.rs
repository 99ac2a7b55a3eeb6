pub mod check;
pub mod completions;
pub mod inspect;
pub mod reorder;
pub mod validate;

use std::path::{Path, PathBuf};

use form_forge_core::types::FormDefinition;
use form_forge_core::{compile, CompiledContract};

use crate::error::CliError;

/// File suffix that marks a form definition inside a directory.
pub const FORM_SUFFIX: &str = ".form.json";

/// A form definition file as read from disk.
pub struct FormFile {
    pub path: PathBuf,
    pub source_text: String,
    pub form: FormDefinition,
}

impl FormFile {
    /// Reads and deserializes a form definition.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let source_text = read_text(path)?;
        let form = serde_json::from_str(&source_text).map_err(|e| CliError::Json {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            source_text,
            form,
        })
    }

    /// Compiles the definition, keeping the source text for diagnostics.
    pub fn compile(&self) -> Result<CompiledContract, CliError> {
        compile(&self.form).map_err(|error| CliError::Compile {
            file: self.path.clone(),
            error,
            source_text: self.source_text.clone(),
        })
    }
}

pub fn read_text(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|e| CliError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Discover form files from a list of paths.
///
/// Paths can be files (used directly) or directories (searched recursively
/// for files ending in `.form.json`).
pub fn discover_form_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            let pattern = format!("{}/**/*{FORM_SUFFIX}", path.display());
            let entries = glob::glob(&pattern).map_err(|e| CliError::Other(e.to_string()))?;
            for entry in entries {
                let entry = entry.map_err(|e| CliError::Other(e.to_string()))?;
                files.push(entry);
            }
        } else {
            return Err(CliError::NoFormFiles { path: path.clone() });
        }
    }

    if files.is_empty() {
        let display_path = paths
            .first()
            .cloned()
            .unwrap_or_else(|| PathBuf::from("forms/"));
        return Err(CliError::NoFormFiles { path: display_path });
    }

    files.sort();
    files.dedup();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
  "title": "Minimal",
  "description": "One field",
  "fields": [{"name": "a", "label": "A", "type": "text", "order": 0}]
}"#;

    #[test]
    fn discover_nonexistent_path() {
        let result = discover_form_files(&[PathBuf::from("/nonexistent/path")]);
        assert!(matches!(result, Err(CliError::NoFormFiles { .. })));
    }

    #[test]
    fn discover_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_form_files(&[dir.path().to_path_buf()]).is_err());
    }

    #[test]
    fn discover_only_form_files_in_directories() {
        let dir = tempfile::tempdir().unwrap();
        let form_path = dir.path().join("nested").join("signup.form.json");
        std::fs::create_dir_all(form_path.parent().unwrap()).unwrap();
        std::fs::write(&form_path, MINIMAL).unwrap();
        std::fs::write(dir.path().join("answer.json"), "{}").unwrap();

        let files = discover_form_files(&[dir.path().to_path_buf()]).unwrap();
        assert_eq!(files, vec![form_path]);
    }

    #[test]
    fn discover_accepts_direct_file_and_dedups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("direct.json");
        std::fs::write(&path, MINIMAL).unwrap();
        let files = discover_form_files(&[path.clone(), path.clone()]).unwrap();
        assert_eq!(files, vec![path]);
    }

    #[test]
    fn load_and_compile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.form.json");
        std::fs::write(&path, MINIMAL).unwrap();
        let file = FormFile::load(&path).unwrap();
        assert_eq!(file.form.title, "Minimal");
        assert_eq!(file.compile().unwrap().fields.len(), 1);
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.form.json");
        std::fs::write(&path, "{\"title\": ").unwrap();
        assert!(matches!(
            FormFile::load(&path),
            Err(CliError::Json { .. })
        ));
    }
}
