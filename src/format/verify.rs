use crate::config::Settings;
use crate::error::{FormatError, Result};
use crate::format::puzzle_set::PuzzleSet;
use crate::format::report::SetFailure;
use crate::format::walker::SetWalker;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use tracing::{debug, warn};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Mismatch {
    Missing { index: usize },
    Content { index: usize },
    RowCount { index: usize, expected: usize, actual: usize },
    /// Left over from an earlier run over a longer source.
    Extra { index: usize },
}

#[derive(Debug, Clone, Serialize)]
pub struct SetVerification {
    pub name: String,
    pub checked: usize,
    pub mismatches: Vec<Mismatch>,
}

#[derive(Debug, Default, Serialize)]
pub struct VerifyReport {
    pub sets: Vec<SetVerification>,
    pub failures: Vec<SetFailure>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty() && self.sets.iter().all(|s| s.mismatches.is_empty())
    }

    pub fn mismatch_count(&self) -> usize {
        self.sets.iter().map(|s| s.mismatches.len()).sum()
    }
}

pub struct Verifier;

impl Verifier {
    /// Checks every set under the configured root. Sets that cannot be
    /// loaded are recorded as failures rather than aborting the check.
    pub fn verify_root(settings: &Settings) -> Result<VerifyReport> {
        let filter = SetWalker::compile_filter(settings.only.as_deref())?;
        let found = SetWalker::walk(&settings.root, filter.as_ref())?;

        let mut report = VerifyReport::default();
        for entry in &found.sets {
            match PuzzleSet::load(entry).and_then(|set| Self::verify_set(&set)) {
                Ok(checked) => report.sets.push(checked),
                Err(e) => report.failures.push(SetFailure {
                    name: entry.name.clone(),
                    error: e.to_string(),
                }),
            }
        }
        Ok(report)
    }

    pub fn verify_set(set: &PuzzleSet) -> Result<SetVerification> {
        let mut mismatches = Vec::new();

        for (index, puzzle) in set.numbered() {
            let path = set.output_path(index);
            let out = match fs::read_to_string(&path) {
                Ok(out) => out,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    mismatches.push(Mismatch::Missing { index });
                    continue;
                }
                Err(e) => return Err(FormatError::Io(path, e)),
            };

            if out.replace('\n', "") != puzzle {
                mismatches.push(Mismatch::Content { index });
                continue;
            }

            let expected = puzzle.chars().count().div_ceil(set.chunk_size);
            let actual = if out.is_empty() { 0 } else { out.split('\n').count() };
            if expected != actual {
                mismatches.push(Mismatch::RowCount { index, expected, actual });
            }
        }

        for index in Self::extra_outputs(set)? {
            mismatches.push(Mismatch::Extra { index });
        }

        if mismatches.is_empty() {
            debug!(set = %set.name, checked = set.puzzles.len(), "outputs match source");
        } else {
            warn!(set = %set.name, count = mismatches.len(), "outputs differ from source");
        }

        Ok(SetVerification {
            name: set.name.clone(),
            checked: set.puzzles.len(),
            mismatches,
        })
    }

    /// Indices of `formatted<k>.txt` files with `k` past the last source line.
    fn extra_outputs(set: &PuzzleSet) -> Result<Vec<usize>> {
        let dir = set.output_dir();
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(FormatError::Io(dir, e)),
        };

        let mut extra = Vec::new();
        for result in entries {
            let entry = result.map_err(|e| FormatError::Io(dir.clone(), e))?;
            let name = entry.file_name().to_string_lossy().to_string();
            let index = name
                .strip_prefix("formatted")
                .and_then(|rest| rest.strip_suffix(".txt"))
                .and_then(|digits| digits.parse::<usize>().ok());
            if let Some(index) = index.filter(|&i| i > set.puzzles.len()) {
                extra.push(index);
            }
        }
        extra.sort_unstable();
        Ok(extra)
    }
}
