use crate::error::{FormatError, Result};
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetEntry {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Default)]
pub struct Enumeration {
    pub sets: Vec<SetEntry>,
    /// Names of root entries that are not directories.
    pub skipped: Vec<String>,
}

pub struct SetWalker;

impl SetWalker {
    /// Lists the puzzle-set directories directly under `root`, sorted by name.
    pub fn walk(root: &Path, only: Option<&Pattern>) -> Result<Enumeration> {
        let entries =
            fs::read_dir(root).map_err(|e| FormatError::RootUnreadable(root.to_path_buf(), e))?;

        let mut found = Enumeration::default();
        for result in entries {
            let entry = result.map_err(|e| FormatError::Io(root.to_path_buf(), e))?;
            let name = entry.file_name().to_string_lossy().to_string();
            let path = entry.path();

            if let Some(pattern) = only {
                if !pattern.matches(&name) {
                    debug!(set = %name, pattern = %pattern, "set filtered out");
                    continue;
                }
            }
            if !path.is_dir() {
                warn!(entry = %name, "skipping non-directory entry in puzzle root");
                found.skipped.push(name);
                continue;
            }
            found.sets.push(SetEntry { name, path });
        }

        found.sets.sort_by(|a, b| a.name.cmp(&b.name));
        found.skipped.sort();
        Ok(found)
    }

    pub fn compile_filter(only: Option<&str>) -> Result<Option<Pattern>> {
        only.map(|raw| Pattern::new(raw).map_err(|e| FormatError::InvalidFilter(raw.to_string(), e)))
            .transpose()
    }
}
