use crate::format::report::RunReport;
use crate::format::verify::{Mismatch, VerifyReport};
use crate::ui::theme;
use colored::Colorize;

pub fn print_run(report: &RunReport) {
    for entry in &report.skipped_entries {
        println!("{} {} (not a directory, skipped)", "•".yellow(), entry);
    }

    for set in &report.sets {
        print!(
            "{} {}: {} file(s), n = {}",
            "✓".green(),
            set.name.bold(),
            set.written,
            set.chunk_size
        );
        if !set.ragged.is_empty() {
            print!("  {}", format!("ragged lines {:?}", set.ragged).yellow());
        }
        if !set.skipped_lines.is_empty() {
            print!("  {}", format!("skipped {:?}", set.skipped_lines).yellow());
        }
        println!();
    }

    for failure in &report.failures {
        println!("{} {}: {}", "✗".red(), failure.name.bold(), failure.error);
    }

    println!("{}", theme::rule(40));
    println!(
        "{} set(s), {} file(s) written, {} failed",
        report.sets.len(),
        report.files_written(),
        report.failures.len()
    );
}

pub fn print_verify(report: &VerifyReport) {
    for set in &report.sets {
        if set.mismatches.is_empty() {
            println!("{} {}: {} output(s) match", "✓".green(), set.name.bold(), set.checked);
            continue;
        }
        println!("{} {}:", "✗".red(), set.name.bold());
        for mismatch in &set.mismatches {
            let line = match mismatch {
                Mismatch::Missing { index } => format!("formatted{}.txt is missing", index),
                Mismatch::Content { index } => format!("formatted{}.txt differs from line {}", index, index),
                Mismatch::Extra { index } => format!("formatted{}.txt has no source line", index),
                Mismatch::RowCount { index, expected, actual } => format!(
                    "formatted{}.txt has {} row(s), expected {}",
                    index, actual, expected
                ),
            };
            println!("    {}", line.red());
        }
    }

    for failure in &report.failures {
        println!("{} {}: {}", "✗".red(), failure.name.bold(), failure.error);
    }

    println!("{}", theme::rule(40));
    println!(
        "{} set(s) checked, {} mismatch(es), {} failed",
        report.sets.len(),
        report.mismatch_count(),
        report.failures.len()
    );
}
