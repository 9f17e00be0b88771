pub mod agent;
pub mod learning;
pub mod physics;
pub mod policy;
pub mod recording;

pub use agent::{Agent, EpisodeRecorder, RecorderState};
pub use learning::{CleaningService, DatasetBalancer, LabelRegenerator};
pub use physics::TrajectoryPredictor;
pub use policy::ControlPolicy;
pub use recording::{CsvEpisodeWriter, EpisodeWriter, InMemoryEpisodeWriter};
