use std::fs::{self, File};
use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use crate::config::Configuration;
use crate::error::DatasetError;
use crate::pipeline::types::{Sample, SAMPLE_COLUMNS};

use super::dataset_balancer::{ClassCounts, DatasetBalancer};
use super::dataset_loader::DatasetLoader;
use super::features::train_test_split;
use super::label_regenerator::LabelRegenerator;

#[derive(Debug, Clone, PartialEq)]
pub struct CleaningReport {
    pub files_read: usize,
    pub rows_loaded: usize,
    pub malformed_rows: usize,
    pub rows_after_filter: usize,
    pub disagreements: usize,
    pub before: ClassCounts,
    pub after: ClassCounts,
    /// Rows a trainer would fit on and hold out with the configured test fraction.
    pub train_rows: usize,
    pub test_rows: usize,
    pub output: PathBuf,
}

/// Offline stage turning captured episodes into one balanced, relabeled file.
pub struct CleaningService {
    training_dir: PathBuf,
    output: PathBuf,
    loader: DatasetLoader,
    regenerator: LabelRegenerator,
    balance_seed: u64,
    test_fraction: f64,
}

impl CleaningService {
    pub fn new(configuration: &Configuration) -> Self {
        Self {
            training_dir: configuration.training_dir.clone(),
            output: configuration.cleaned_path(),
            loader: DatasetLoader::new(configuration.source_prefix.clone()),
            regenerator: LabelRegenerator::new(configuration.label_strategy.build()),
            balance_seed: configuration.balance_seed,
            test_fraction: configuration.test_fraction,
        }
    }

    pub fn with_regenerator(mut self, regenerator: LabelRegenerator) -> Self {
        self.regenerator = regenerator;
        self
    }

    /// Runs the whole stage. Nothing is written unless every step succeeds.
    pub fn run(&self) -> Result<CleaningReport, DatasetError> {
        let files = self.loader.discover(&self.training_dir)?;
        info!("Found {} source files, merging...", files.len());

        let loaded = self.loader.load(&files)?;
        info!("Relabeling with {}", self.regenerator.strategy_name());
        let relabeled = self.regenerator.relabel(&loaded.rows);

        let before = ClassCounts::of(&relabeled.samples);
        let rows_after_filter = relabeled.samples.len();
        let balanced = DatasetBalancer::seeded(self.balance_seed).balance(relabeled.samples);
        let after = ClassCounts::of(&balanced);

        write_samples_atomically(&self.output, &balanced)?;
        let split = train_test_split(
            &balanced,
            self.test_fraction,
            &mut StdRng::seed_from_u64(self.balance_seed),
        );
        info!(
            "Cleaning finished: {} rows written to {} (MOVE: {}, NONE: {})",
            balanced.len(),
            self.output.display(),
            after.moves,
            after.none
        );
        info!(
            "Split with test fraction {}: {} train / {} test rows",
            self.test_fraction,
            split.train.len(),
            split.test.len()
        );

        Ok(CleaningReport {
            files_read: loaded.files_read,
            rows_loaded: loaded.rows.len(),
            malformed_rows: loaded.malformed_rows,
            rows_after_filter,
            disagreements: relabeled.disagreements,
            before,
            after,
            train_rows: split.train.len(),
            test_rows: split.test.len(),
            output: self.output.clone(),
        })
    }
}

/// Writes to a sibling temp file and renames it over `path`, so a failed run
/// leaves any previous output intact. The header is written even when there
/// are no rows.
pub fn write_samples_atomically(path: &Path, samples: &[Sample]) -> Result<(), DatasetError> {
    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);
    let csv_err = |e: csv::Error| DatasetError::CsvError(e, tmp.clone());

    let file = File::create(&tmp).map_err(|e| DatasetError::WriteError(e, tmp.clone()))?;
    let mut out = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    out.write_record(SAMPLE_COLUMNS).map_err(csv_err)?;
    for sample in samples {
        out.serialize(sample).map_err(csv_err)?;
    }
    out.flush()
        .map_err(|e| DatasetError::WriteError(e, tmp.clone()))?;
    drop(out);

    fs::rename(&tmp, path).map_err(|e| DatasetError::WriteError(e, path.to_path_buf()))
}
