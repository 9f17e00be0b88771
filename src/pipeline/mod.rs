pub mod services;
pub mod types;

pub use services::{Agent, CleaningService, ControlPolicy, TrajectoryPredictor};
pub use types::{Action, BallState, RoundStatus, Sample, SceneInfo, Side};
