use crate::error::{FormatError, Result};
use crate::format::chunker::Chunker;
use crate::format::walker::SetEntry;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const SOURCE_FILE: &str = "all_puzzles.txt";
pub const OUTPUT_DIR: &str = "formatted";

/// The trimmed puzzle strings of one `all_puzzles.txt`, in file order.
#[derive(Debug, Clone)]
pub struct PuzzleSet {
    pub name: String,
    pub dir: PathBuf,
    pub puzzles: Vec<String>,
    pub chunk_size: usize,
}

impl PuzzleSet {
    pub fn load(entry: &SetEntry) -> Result<Self> {
        let source = entry.path.join(SOURCE_FILE);
        let text = fs::read_to_string(&source).map_err(|e| match e.kind() {
            ErrorKind::NotFound => FormatError::SourceMissing(source.clone()),
            _ => FormatError::Io(source.clone(), e),
        })?;
        Self::parse(&entry.name, &entry.path, &text)
    }

    pub fn parse(name: &str, dir: &Path, text: &str) -> Result<Self> {
        let puzzles: Vec<String> = text.lines().map(|l| l.trim().to_string()).collect();

        let first = puzzles.first().ok_or_else(|| FormatError::EmptyPuzzleSet {
            set: name.to_string(),
        })?;
        let chunk_size = Chunker::chunk_size(first.chars().count());
        if chunk_size == 0 {
            return Err(FormatError::ZeroChunkSize { set: name.to_string() });
        }

        Ok(Self {
            name: name.to_string(),
            dir: dir.to_path_buf(),
            puzzles,
            chunk_size,
        })
    }

    pub fn expected_len(&self) -> usize {
        self.chunk_size * self.chunk_size
    }

    /// 1-based numbers of lines that don't fill an exact square.
    pub fn ragged_lines(&self) -> Vec<usize> {
        let expected = self.expected_len();
        self.numbered()
            .filter(|(_, p)| p.chars().count() != expected)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn numbered(&self) -> impl Iterator<Item = (usize, &str)> {
        self.puzzles.iter().enumerate().map(|(i, p)| (i + 1, p.as_str()))
    }

    pub fn output_dir(&self) -> PathBuf {
        self.dir.join(OUTPUT_DIR)
    }

    pub fn output_path(&self, index: usize) -> PathBuf {
        self.output_dir().join(format!("formatted{}.txt", index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_trims_and_keeps_order() {
        let set = PuzzleSet::parse("easy", Path::new("p/easy"), "  1234 \r\n5678\n").unwrap();
        assert_eq!(set.puzzles, vec!["1234", "5678"]);
        assert_eq!(set.chunk_size, 2);
        assert!(set.ragged_lines().is_empty());
    }

    #[test]
    fn test_empty_source_is_an_error() {
        let err = PuzzleSet::parse("easy", Path::new("p/easy"), "").unwrap_err();
        assert!(matches!(err, FormatError::EmptyPuzzleSet { ref set } if set == "easy"));
    }

    #[test]
    fn test_blank_first_line_is_an_error() {
        let err = PuzzleSet::parse("easy", Path::new("p/easy"), "   \nabcd\n").unwrap_err();
        assert!(matches!(err, FormatError::ZeroChunkSize { .. }));
    }

    #[test]
    fn test_ragged_lines_are_numbered_from_one() {
        let set = PuzzleSet::parse("mixed", Path::new("p/mixed"), "1234\nabcde\n5678\nxyz").unwrap();
        assert_eq!(set.ragged_lines(), vec![2, 4]);
    }

    #[test]
    fn test_output_paths() {
        let set = PuzzleSet::parse("easy", Path::new("p/easy"), "1234").unwrap();
        assert_eq!(set.output_path(1), PathBuf::from("p/easy/formatted/formatted1.txt"));
    }

    #[test]
    fn test_load_reports_missing_source() {
        let dir = TempDir::new().unwrap();
        let entry = SetEntry { name: "easy".into(), path: dir.path().to_path_buf() };
        let err = PuzzleSet::load(&entry).unwrap_err();
        assert!(matches!(err, FormatError::SourceMissing(p) if p.ends_with(SOURCE_FILE)));
    }
}
