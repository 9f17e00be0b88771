pub mod trajectory_predictor;

pub use trajectory_predictor::TrajectoryPredictor;
