use tracing::{debug, info};
use uuid::Uuid;

use crate::error::RecordingError;
use crate::pipeline::services::recording::EpisodeWriter;
use crate::pipeline::types::{Sample, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecorderState {
    /// No episode open.
    Idle,
    /// Buffering samples for the episode with this id.
    Recording { episode_id: Uuid },
}

/// Outcome of closing an episode that had samples in it.
#[derive(Debug, Clone, PartialEq)]
pub struct FlushReport {
    pub episode_id: Uuid,
    pub samples_written: usize,
    pub destination: String,
}

/// Buffers one episode of samples at a time and hands it to an [`EpisodeWriter`]
/// when the round ends.
pub struct EpisodeRecorder<W> {
    side: Side,
    state: RecorderState,
    samples: Vec<Sample>,
    writer: W,
    episodes_flushed: usize,
    samples_flushed: usize,
}

impl<W: EpisodeWriter> EpisodeRecorder<W> {
    pub fn new(side: Side, writer: W) -> Self {
        Self {
            side,
            state: RecorderState::Idle,
            samples: Vec::new(),
            writer,
            episodes_flushed: 0,
            samples_flushed: 0,
        }
    }

    pub fn state(&self) -> RecorderState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.state, RecorderState::Recording { .. })
    }

    pub fn buffered(&self) -> &[Sample] {
        &self.samples
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn episodes_flushed(&self) -> usize {
        self.episodes_flushed
    }

    pub fn samples_flushed(&self) -> usize {
        self.samples_flushed
    }

    /// IDLE -> RECORDING. Calling it while already recording keeps the open episode.
    pub fn on_round_start(&mut self) {
        if self.is_recording() {
            return;
        }
        let episode_id = Uuid::new_v4();
        debug!("[{}] episode {} opened", self.side.tag(), episode_id);
        self.state = RecorderState::Recording { episode_id };
    }

    /// Buffers a sample, opening an episode first if none is open.
    pub fn on_tick(&mut self, sample: Sample) {
        if !self.is_recording() {
            self.on_round_start();
        }
        self.samples.push(sample);
    }

    /// RECORDING -> IDLE. A nonempty buffer is written out and cleared.
    ///
    /// The buffer is cleared even when the write fails: episodes are
    /// best-effort and never retried.
    pub fn on_round_end(&mut self) -> Result<Option<FlushReport>, RecordingError> {
        let state = std::mem::replace(&mut self.state, RecorderState::Idle);
        if self.samples.is_empty() {
            return Ok(None);
        }

        let episode_id = match state {
            RecorderState::Recording { episode_id } => episode_id,
            RecorderState::Idle => Uuid::new_v4(),
        };
        let samples = std::mem::take(&mut self.samples);
        let samples_written = self.writer.write_episode(&samples)?;

        self.episodes_flushed += 1;
        self.samples_flushed += samples_written;
        info!(
            "[{}] saved {} samples from episode {} to {}",
            self.side.tag(),
            samples_written,
            episode_id,
            self.writer.describe()
        );

        Ok(Some(FlushReport {
            episode_id,
            samples_written,
            destination: self.writer.describe(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::services::recording::InMemoryEpisodeWriter;
    use crate::pipeline::types::{Action, BallState};

    fn sample(x: f64) -> Sample {
        Sample::new(&BallState::new(x, 100.0, 3.0, 3.0), 80.0, Action::None)
    }

    #[test]
    fn starts_idle_and_opens_on_round_start() {
        let mut recorder = EpisodeRecorder::new(Side::Near, InMemoryEpisodeWriter::new());
        assert_eq!(recorder.state(), RecorderState::Idle);

        recorder.on_round_start();
        let opened = recorder.state();
        assert!(recorder.is_recording());

        recorder.on_round_start();
        assert_eq!(recorder.state(), opened);
    }

    #[test]
    fn round_end_flushes_then_clears() {
        let mut recorder = EpisodeRecorder::new(Side::Near, InMemoryEpisodeWriter::new());
        recorder.on_round_start();
        recorder.on_tick(sample(1.0));
        recorder.on_tick(sample(2.0));

        let report = recorder.on_round_end().unwrap().unwrap();
        assert_eq!(report.samples_written, 2);
        assert!(recorder.buffered().is_empty());
        assert_eq!(recorder.state(), RecorderState::Idle);
        assert_eq!(recorder.writer().episodes(), &[vec![sample(1.0), sample(2.0)]]);
    }

    #[test]
    fn empty_episode_is_not_written() {
        let mut recorder = EpisodeRecorder::new(Side::Near, InMemoryEpisodeWriter::new());
        recorder.on_round_start();
        assert_eq!(recorder.on_round_end().unwrap(), None);
        assert!(recorder.writer().episodes().is_empty());
        assert_eq!(recorder.episodes_flushed(), 0);
    }

    #[test]
    fn each_episode_gets_its_own_id() {
        let mut recorder = EpisodeRecorder::new(Side::Near, InMemoryEpisodeWriter::new());
        recorder.on_tick(sample(1.0));
        let first = recorder.on_round_end().unwrap().unwrap();
        recorder.on_tick(sample(2.0));
        let second = recorder.on_round_end().unwrap().unwrap();

        assert_ne!(first.episode_id, second.episode_id);
        assert_eq!(recorder.episodes_flushed(), 2);
        assert_eq!(recorder.samples_flushed(), 2);
    }

    struct FailingWriter;

    impl EpisodeWriter for FailingWriter {
        fn write_episode(&mut self, _samples: &[Sample]) -> Result<usize, RecordingError> {
            Err(RecordingError::WriteError(
                std::io::Error::other("disk full"),
                "broken.csv".into(),
            ))
        }

        fn describe(&self) -> String {
            "broken".to_string()
        }
    }

    #[test]
    fn failed_flush_discards_the_episode() {
        let mut recorder = EpisodeRecorder::new(Side::Near, FailingWriter);
        recorder.on_tick(sample(1.0));
        assert!(recorder.on_round_end().is_err());
        assert!(recorder.buffered().is_empty());
        assert_eq!(recorder.state(), RecorderState::Idle);
        assert_eq!(recorder.episodes_flushed(), 0);
    }
}
