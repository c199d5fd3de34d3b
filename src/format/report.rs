use serde::Serialize;

/// Outcome of formatting one puzzle set.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct SetReport {
    pub name: String,
    pub chunk_size: usize,
    pub written: usize,
    /// 1-based line numbers whose length is not `chunk_size²`.
    pub ragged: Vec<usize>,
    /// 1-based line numbers left unwritten by the ragged policy.
    pub skipped_lines: Vec<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetFailure {
    pub name: String,
    pub error: String,
}

#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub sets: Vec<SetReport>,
    pub skipped_entries: Vec<String>,
    pub failures: Vec<SetFailure>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn files_written(&self) -> usize {
        self.sets.iter().map(|s| s.written).sum()
    }
}
