use clap::ValueEnum;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What to do with a puzzle string whose length is not `n²`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RaggedPolicy {
    /// Chunk it anyway and warn; the last row comes out short or long.
    BestEffort,
    /// Leave its output file unwritten but keep its index.
    SkipLine,
    /// Fail the whole set before anything is written.
    RejectSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum LogFormat {
    Plain,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub root: PathBuf,
    pub ragged_policy: RaggedPolicy,
    /// Glob over set names; sets that don't match are left alone.
    pub only: Option<String>,
    pub keep_going: bool,
    pub create_output_dir: bool,
    pub log_format: LogFormat,
}

impl Settings {
    pub fn new(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        dotenv().ok();

        Self::layered(config_file)?
            .add_source(Self::environment())
            .build()?
            .try_deserialize()
    }

    /// Built-in defaults plus the settings file, without the environment.
    fn layered(config_file: Option<&Path>) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let builder = Config::builder()
            .set_default("root", "puzzles")?
            .set_default("ragged_policy", "best-effort")?
            .set_default("only", None::<String>)?
            .set_default("keep_going", false)?
            .set_default("create_output_dir", false)?
            .set_default("log_format", "plain")?;

        Ok(match config_file {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name("puzzle_formatter").required(false)),
        })
    }

    fn environment() -> Environment {
        Environment::with_prefix("PUZZLEFMT").try_parsing(true)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: PathBuf::from("puzzles"),
            ragged_policy: RaggedPolicy::BestEffort,
            only: None,
            keep_going: false,
            create_output_dir: false,
            log_format: LogFormat::Plain,
        }
    }
}
