use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::RecordingError;
use crate::pipeline::types::Sample;

/// Destination for closed episodes.
pub trait EpisodeWriter {
    /// Persists every sample of one episode and returns how many were written.
    fn write_episode(&mut self, samples: &[Sample]) -> Result<usize, RecordingError>;

    fn describe(&self) -> String;
}

/// Appends episodes to a CSV file, writing the header only when the file is new.
///
/// A single writer per path is assumed; nothing guards against concurrent
/// appends and a failure mid-write can leave a truncated final row.
#[derive(Debug, Clone)]
pub struct CsvEpisodeWriter {
    path: PathBuf,
}

impl CsvEpisodeWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EpisodeWriter for CsvEpisodeWriter {
    fn write_episode(&mut self, samples: &[Sample]) -> Result<usize, RecordingError> {
        if samples.is_empty() {
            return Ok(0);
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| RecordingError::CreateDirError(e, parent.to_path_buf()))?;
        }

        let needs_header = !self.path.exists();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| RecordingError::WriteError(e, self.path.clone()))?;

        // The header comes from the first serialized row, so it is only
        // requested for a file that did not exist yet.
        let mut out = csv::WriterBuilder::new()
            .has_headers(needs_header)
            .from_writer(file);
        for sample in samples {
            out.serialize(sample)
                .map_err(|e| RecordingError::EncodeError(e, self.path.clone()))?;
        }
        out.flush()
            .map_err(|e| RecordingError::WriteError(e, self.path.clone()))?;

        debug!(
            "Appended {} rows to {} (header: {})",
            samples.len(),
            self.path.display(),
            needs_header
        );
        Ok(samples.len())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory writer (for testing and development)
#[derive(Debug, Default)]
pub struct InMemoryEpisodeWriter {
    episodes: Vec<Vec<Sample>>,
}

impl InMemoryEpisodeWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn episodes(&self) -> &[Vec<Sample>] {
        &self.episodes
    }

    pub fn total_samples(&self) -> usize {
        self.episodes.iter().map(Vec::len).sum()
    }
}

impl EpisodeWriter for InMemoryEpisodeWriter {
    fn write_episode(&mut self, samples: &[Sample]) -> Result<usize, RecordingError> {
        self.episodes.push(samples.to_vec());
        Ok(samples.len())
    }

    fn describe(&self) -> String {
        "in-memory".to_string()
    }
}
