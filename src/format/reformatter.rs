use crate::config::{RaggedPolicy, Settings};
use crate::error::{FormatError, Result};
use crate::format::chunker::Chunker;
use crate::format::puzzle_set::PuzzleSet;
use crate::format::report::{RunReport, SetFailure, SetReport};
use crate::format::walker::SetWalker;
use std::fs;
use tracing::{debug, error, info, warn};

pub struct Reformatter<'a> {
    settings: &'a Settings,
}

impl<'a> Reformatter<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Formats every puzzle set under the configured root.
    ///
    /// Without `keep_going` the first failing set aborts the run; otherwise
    /// failures are collected into the report.
    pub fn run(&self) -> Result<RunReport> {
        let filter = SetWalker::compile_filter(self.settings.only.as_deref())?;
        let found = SetWalker::walk(&self.settings.root, filter.as_ref())?;

        let mut report = RunReport {
            skipped_entries: found.skipped,
            ..Default::default()
        };

        for entry in &found.sets {
            match PuzzleSet::load(entry).and_then(|set| self.process(&set)) {
                Ok(set_report) => report.sets.push(set_report),
                Err(e) if self.settings.keep_going => {
                    error!(set = %entry.name, error = %e, "puzzle set failed");
                    report.failures.push(SetFailure {
                        name: entry.name.clone(),
                        error: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }
        Ok(report)
    }

    pub fn process(&self, set: &PuzzleSet) -> Result<SetReport> {
        let ragged = set.ragged_lines();
        let expected = set.expected_len();

        if let Some(&line) = ragged.first() {
            if self.settings.ragged_policy == RaggedPolicy::RejectSet {
                return Err(FormatError::RaggedPuzzleSet {
                    set: set.name.clone(),
                    line,
                    expected,
                    actual: set.puzzles[line - 1].chars().count(),
                });
            }
            warn!(
                set = %set.name,
                lines = ?ragged,
                expected,
                policy = ?self.settings.ragged_policy,
                "puzzle strings do not fill a square grid"
            );
        }

        self.ensure_output_dir(set)?;

        let mut report = SetReport {
            name: set.name.clone(),
            chunk_size: set.chunk_size,
            ragged: ragged.clone(),
            ..Default::default()
        };

        for (index, puzzle) in set.numbered() {
            if self.settings.ragged_policy == RaggedPolicy::SkipLine && ragged.contains(&index) {
                report.skipped_lines.push(index);
                continue;
            }
            let path = set.output_path(index);
            fs::write(&path, Chunker::format_puzzle(puzzle, set.chunk_size))
                .map_err(|e| FormatError::Io(path.clone(), e))?;
            debug!(path = %path.display(), "wrote formatted puzzle");
            report.written += 1;
        }

        info!(set = %set.name, n = set.chunk_size, written = report.written, "puzzle set formatted");
        Ok(report)
    }

    fn ensure_output_dir(&self, set: &PuzzleSet) -> Result<()> {
        let dir = set.output_dir();
        if dir.is_dir() {
            return Ok(());
        }
        if !self.settings.create_output_dir {
            return Err(FormatError::OutputDirMissing(dir));
        }
        fs::create_dir_all(&dir).map_err(|e| FormatError::Io(dir.clone(), e))?;
        info!(dir = %dir.display(), "created output directory");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::puzzle_set::{OUTPUT_DIR, SOURCE_FILE};
    use std::path::Path;
    use tempfile::TempDir;

    fn make_set(root: &Path, name: &str, source: &str) {
        let dir = root.join(name);
        fs::create_dir_all(dir.join(OUTPUT_DIR)).unwrap();
        fs::write(dir.join(SOURCE_FILE), source).unwrap();
    }

    fn settings_for(root: &Path) -> Settings {
        Settings {
            root: root.to_path_buf(),
            ..Default::default()
        }
    }

    fn read_output(root: &Path, set: &str, index: usize) -> String {
        fs::read_to_string(root.join(set).join(OUTPUT_DIR).join(format!("formatted{}.txt", index)))
            .unwrap()
    }

    fn output_count(root: &Path, set: &str) -> usize {
        fs::read_dir(root.join(set).join(OUTPUT_DIR)).unwrap().count()
    }

    #[test]
    fn test_single_nine_char_puzzle() {
        let dir = TempDir::new().unwrap();
        make_set(dir.path(), "tiny", "abcdefghi\n");

        let settings = settings_for(dir.path());
        let report = Reformatter::new(&settings).run().unwrap();

        assert_eq!(read_output(dir.path(), "tiny", 1), "abc\ndef\nghi");
        assert_eq!(report.files_written(), 1);
        assert_eq!(report.sets[0].chunk_size, 3);
    }

    #[test]
    fn test_every_line_gets_its_own_numbered_file() {
        let dir = TempDir::new().unwrap();
        make_set(dir.path(), "pairs", "1234\n5678\n");

        let settings = settings_for(dir.path());
        Reformatter::new(&settings).run().unwrap();

        assert_eq!(read_output(dir.path(), "pairs", 1), "12\n34");
        assert_eq!(read_output(dir.path(), "pairs", 2), "56\n78");
        assert_eq!(output_count(dir.path(), "pairs"), 2);
    }

    #[test]
    fn test_outputs_round_trip_and_are_square() {
        let dir = TempDir::new().unwrap();
        let lines = [
            "4.....8.5.3..........7......2.....6.....8.4......1.......6.3.7.5..2.....1.4......",
            "52...6.........7.13...........4..8..6......5...........418.........3..2...87.....",
            "6.....8.3.4.7.................5.4.7.3..2.....1.6.......2.....5.....8.6......1....",
        ];
        make_set(dir.path(), "sudoku", &lines.join("\n"));

        let settings = settings_for(dir.path());
        Reformatter::new(&settings).run().unwrap();

        assert_eq!(output_count(dir.path(), "sudoku"), lines.len());
        for (i, line) in lines.iter().enumerate() {
            let out = read_output(dir.path(), "sudoku", i + 1);
            assert_eq!(out.replace('\n', ""), *line);
            assert_eq!(out.lines().count(), 9);
            assert!(out.lines().all(|row| row.chars().count() == 9));
            assert!(!out.ends_with('\n'));
        }
    }

    #[test]
    fn test_second_run_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        make_set(dir.path(), "pairs", "1234\n5678\n");
        let settings = settings_for(dir.path());

        Reformatter::new(&settings).run().unwrap();
        let first: Vec<String> = (1..=2).map(|i| read_output(dir.path(), "pairs", i)).collect();
        Reformatter::new(&settings).run().unwrap();
        let second: Vec<String> = (1..=2).map(|i| read_output(dir.path(), "pairs", i)).collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_source_fails_the_run() {
        let dir = TempDir::new().unwrap();
        make_set(dir.path(), "empty", "");

        let settings = settings_for(dir.path());
        let err = Reformatter::new(&settings).run().unwrap_err();
        assert!(matches!(err, FormatError::EmptyPuzzleSet { .. }));
    }

    #[test]
    fn test_best_effort_leaves_short_last_row() {
        let dir = TempDir::new().unwrap();
        make_set(dir.path(), "ragged", "1234\nabcde\n");

        let settings = settings_for(dir.path());
        let report = Reformatter::new(&settings).run().unwrap();

        assert_eq!(read_output(dir.path(), "ragged", 2), "ab\ncd\ne");
        assert_eq!(report.sets[0].ragged, vec![2]);
        assert_eq!(report.sets[0].written, 2);
    }

    #[test]
    fn test_skip_line_keeps_numbering() {
        let dir = TempDir::new().unwrap();
        make_set(dir.path(), "ragged", "1234\nabcde\n5678\n");

        let settings = Settings {
            ragged_policy: RaggedPolicy::SkipLine,
            ..settings_for(dir.path())
        };
        let report = Reformatter::new(&settings).run().unwrap();

        let out = dir.path().join("ragged").join(OUTPUT_DIR);
        assert!(out.join("formatted1.txt").exists());
        assert!(!out.join("formatted2.txt").exists());
        assert_eq!(read_output(dir.path(), "ragged", 3), "56\n78");
        assert_eq!(report.sets[0].skipped_lines, vec![2]);
        assert_eq!(report.sets[0].written, 2);
    }

    #[test]
    fn test_reject_set_writes_nothing() {
        let dir = TempDir::new().unwrap();
        make_set(dir.path(), "ragged", "1234\nabcde\n");

        let settings = Settings {
            ragged_policy: RaggedPolicy::RejectSet,
            ..settings_for(dir.path())
        };
        let err = Reformatter::new(&settings).run().unwrap_err();

        assert!(matches!(
            err,
            FormatError::RaggedPuzzleSet { line: 2, expected: 4, actual: 5, .. }
        ));
        assert_eq!(output_count(dir.path(), "ragged"), 0);
    }

    #[test]
    fn test_missing_output_dir() {
        let dir = TempDir::new().unwrap();
        let set_dir = dir.path().join("bare");
        fs::create_dir(&set_dir).unwrap();
        fs::write(set_dir.join(SOURCE_FILE), "1234\n").unwrap();

        let settings = settings_for(dir.path());
        let err = Reformatter::new(&settings).run().unwrap_err();
        assert!(matches!(err, FormatError::OutputDirMissing(_)));

        let settings = Settings {
            create_output_dir: true,
            ..settings_for(dir.path())
        };
        Reformatter::new(&settings).run().unwrap();
        assert_eq!(read_output(dir.path(), "bare", 1), "12\n34");
    }

    #[test]
    fn test_keep_going_collects_failures() {
        let dir = TempDir::new().unwrap();
        make_set(dir.path(), "a_empty", "");
        make_set(dir.path(), "b_good", "1234\n");
        fs::write(dir.path().join("stray.txt"), "x").unwrap();

        let settings = Settings {
            keep_going: true,
            ..settings_for(dir.path())
        };
        let report = Reformatter::new(&settings).run().unwrap();

        assert!(!report.is_success());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].name, "a_empty");
        assert_eq!(report.sets.len(), 1);
        assert_eq!(report.skipped_entries, vec!["stray.txt".to_string()]);
        assert_eq!(read_output(dir.path(), "b_good", 1), "12\n34");
    }
}
