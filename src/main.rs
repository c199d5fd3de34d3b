use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{Level, debug};
use tracing_subscriber::{EnvFilter, fmt};

mod config;
mod error;
mod format;
mod solve;
mod ui;

use config::{LogFormat, RaggedPolicy, Settings};
use format::reformatter::Reformatter;
use format::verify::Verifier;
use solve::solver::Solver;
use ui::grid_view::Grid;

/// Reshape flat puzzle strings into square grid files.
#[derive(Parser, Debug)]
#[command(name = "puzzle_formatter")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Settings file (defaults to ./puzzle_formatter.{toml,yaml,json} if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[arg(long, value_enum, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write formatted<i>.txt for every puzzle set (the default)
    Format(FormatArgs),
    /// Check existing outputs against all_puzzles.txt
    Verify(SetArgs),
    /// Pretty-print one formatted grid file
    Show { file: PathBuf },
    /// Solve a formatted Sudoku grid (4x4, 9x9, 16x16 or 25x25)
    Solve { file: PathBuf },
}

#[derive(Args, Debug, Default)]
struct SetArgs {
    /// Directory holding one subdirectory per puzzle set
    #[arg(long)]
    root: Option<PathBuf>,

    /// Only handle sets whose names match this glob
    #[arg(long)]
    only: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Default)]
struct FormatArgs {
    #[command(flatten)]
    sets: SetArgs,

    /// Handling of puzzle strings that are not n² long
    #[arg(long, value_enum)]
    policy: Option<RaggedPolicy>,

    /// Record failing sets and continue with the rest
    #[arg(long)]
    keep_going: bool,

    /// Create missing formatted/ directories
    #[arg(long)]
    create_output_dir: bool,
}

impl SetArgs {
    fn apply(&self, settings: &mut Settings) {
        if let Some(root) = &self.root {
            settings.root = root.clone();
        }
        if let Some(only) = &self.only {
            settings.only = Some(only.clone());
        }
    }
}

impl FormatArgs {
    fn apply(&self, settings: &mut Settings) {
        self.sets.apply(settings);
        if let Some(policy) = self.policy {
            settings.ragged_policy = policy;
        }
        settings.keep_going |= self.keep_going;
        settings.create_output_dir |= self.create_output_dir;
    }
}

fn setup_logging(verbose: u8, log_format: LogFormat) -> Result<()> {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    match log_format {
        LogFormat::Json => {
            let subscriber = fmt::Subscriber::builder()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .json()
                .flatten_event(true)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .context("Failed to set subscriber")?;
        }
        LogFormat::Plain => {
            let subscriber = fmt::Subscriber::builder()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .with_target(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .context("Failed to set subscriber")?;
        }
    }
    Ok(())
}

/// Returns `Ok(false)` when the command ran but found failures.
fn run(cli: Cli) -> Result<bool> {
    let mut settings = Settings::new(cli.config.as_deref()).context("Config Error")?;
    if let Some(log_format) = cli.log_format {
        settings.log_format = log_format;
    }
    setup_logging(cli.verbose, settings.log_format)?;

    let command = cli.command.unwrap_or(Command::Format(FormatArgs::default()));
    debug!(?command, "dispatching");

    match command {
        Command::Format(args) => {
            args.apply(&mut settings);
            let report = Reformatter::new(&settings)
                .run()
                .with_context(|| format!("formatting puzzles under {}", settings.root.display()))?;
            if args.sets.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                ui::summary::print_run(&report);
            }
            Ok(report.is_success())
        }
        Command::Verify(args) => {
            args.apply(&mut settings);
            let report = Verifier::verify_root(&settings)
                .with_context(|| format!("verifying puzzles under {}", settings.root.display()))?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                ui::summary::print_verify(&report);
            }
            Ok(report.is_clean())
        }
        Command::Show { file } => {
            let grid = Grid::load(&file).with_context(|| format!("reading {}", file.display()))?;
            println!("{} ({}x{})", file.display().to_string().bold(), grid.size, grid.size);
            grid.print();
            Ok(true)
        }
        Command::Solve { file } => {
            let grid = Grid::load(&file).with_context(|| format!("reading {}", file.display()))?;
            println!("{} ({}x{})", file.display().to_string().bold(), grid.size, grid.size);
            grid.print();

            let solution = Solver::for_grid(&grid)
                .and_then(|solver| solver.solve(&grid))
                .with_context(|| format!("solving {}", file.display()))?;
            println!("{} after {} guess(es)", "Solved".green().bold(), solution.guesses);
            solution.grid.print();
            Ok(true)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red(), e);
            ExitCode::FAILURE
        }
    }
}
