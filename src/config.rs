use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, TimeZone};
use serde::Deserialize;

use crate::error::BotError;
use crate::pipeline::services::agent::Agent;
use crate::pipeline::services::learning::LabelStrategyKind;
use crate::pipeline::services::recording::CsvEpisodeWriter;
use crate::pipeline::types::Side;

/// Configuration file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "paddle-oracle.toml";
/// Environment variables with this prefix override file values, e.g. `PADDLE_BALANCE_SEED=7`.
pub const ENV_PREFIX: &str = "PADDLE";

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Configuration {
    /// Directory holding captured episodes and the cleaned dataset.
    pub training_dir: PathBuf,
    /// File name prefix shared by captured episode files.
    pub source_prefix: String,
    pub cleaned_file_name: String,
    /// The only side that records samples; the other one spars.
    pub capture_side: Side,
    pub balance_seed: u64,
    pub label_strategy: LabelStrategyKind,
    /// Share of the cleaned rows held out for evaluation.
    pub test_fraction: f64,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            training_dir: PathBuf::from("training_data"),
            source_prefix: "game_data".to_string(),
            cleaned_file_name: "game_data_cleaned.csv".to_string(),
            capture_side: Side::Near,
            balance_seed: 42,
            label_strategy: LabelStrategyKind::OneStepLookahead,
            test_fraction: 0.2,
        }
    }
}

impl Configuration {
    /// Layers an optional file under `PADDLE_*` environment variables.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, BotError> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let configuration: Configuration = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        configuration.validate()?;
        Ok(configuration)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), BotError> {
        if self.source_prefix.is_empty() {
            return Err(BotError::InvalidConfiguration(
                "Source prefix must not be empty".to_string(),
            ));
        }

        if self.cleaned_file_name.is_empty() {
            return Err(BotError::InvalidConfiguration(
                "Cleaned file name must not be empty".to_string(),
            ));
        }

        if self.cleaned_file_name.starts_with(&self.source_prefix)
            && !self.cleaned_file_name.contains("cleaned")
        {
            return Err(BotError::InvalidConfiguration(
                "Cleaned file name would be picked up as a source file".to_string(),
            ));
        }

        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(BotError::InvalidConfiguration(
                "Test fraction must be between 0.0 and 1.0".to_string(),
            ));
        }

        Ok(())
    }

    pub fn cleaned_path(&self) -> PathBuf {
        self.training_dir.join(&self.cleaned_file_name)
    }

    /// Where a capture session started at `started_at` appends its episodes.
    pub fn episode_path<Tz>(&self, side: Side, started_at: &DateTime<Tz>) -> PathBuf
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        self.training_dir.join(format!(
            "{}_rule_based_{}_{}.csv",
            self.source_prefix,
            side.tag(),
            started_at.format("%Y%m%d_%H%M%S")
        ))
    }

    /// Agent for `capture_side`, appending to the file of a session started at `started_at`.
    pub fn capturing_agent<Tz>(&self, started_at: &DateTime<Tz>) -> Agent
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let path = self.episode_path(self.capture_side, started_at);
        Agent::capturing(self.capture_side, CsvEpisodeWriter::new(path))
    }

    pub fn sparring_agent(&self) -> Agent {
        Agent::sparring(self.capture_side.opponent())
    }

    /// Capturing and sparring agents for a session starting now.
    pub fn start_capture(&self) -> (Agent, Agent) {
        let started_at = Local::now();
        (self.capturing_agent(&started_at), self.sparring_agent())
    }
}
