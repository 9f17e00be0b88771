pub mod config;
pub mod error;
pub mod pipeline;

pub use config::Configuration;
pub use error::{BotError, DatasetError, RecordingError};

pub use pipeline::{Action, Agent, SceneInfo, Side};
