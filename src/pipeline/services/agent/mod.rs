#[allow(clippy::module_inception)]
pub mod agent;
pub mod episode_recorder;

pub use agent::Agent;
pub use episode_recorder::{EpisodeRecorder, FlushReport, RecorderState};
