use tracing::{error, info};

use crate::pipeline::services::physics::TrajectoryPredictor;
use crate::pipeline::services::policy::ControlPolicy;
use crate::pipeline::services::recording::{CsvEpisodeWriter, EpisodeWriter};
use crate::pipeline::types::{Action, Sample, SceneInfo, Side};

use super::episode_recorder::{EpisodeRecorder, FlushReport};

/// Rule-based player for one side of the table.
///
/// Both sides run the same physics so one can serve as a sparring partner;
/// only an agent built with [`Agent::capturing`] records samples.
pub struct Agent<W = CsvEpisodeWriter> {
    side: Side,
    predictor: TrajectoryPredictor,
    policy: ControlPolicy,
    recorder: Option<EpisodeRecorder<W>>,
}

impl Agent {
    pub fn sparring(side: Side) -> Self {
        info!("[{}] rule-based agent started (sparring, not recording)", side.tag());
        Self {
            side,
            predictor: TrajectoryPredictor::default(),
            policy: ControlPolicy::default(),
            recorder: None,
        }
    }
}

impl<W: EpisodeWriter> Agent<W> {
    pub fn capturing(side: Side, writer: W) -> Self {
        info!(
            "[{}] rule-based agent started, recording to {}",
            side.tag(),
            writer.describe()
        );
        Self {
            side,
            predictor: TrajectoryPredictor::default(),
            policy: ControlPolicy::default(),
            recorder: Some(EpisodeRecorder::new(side, writer)),
        }
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn is_capturing(&self) -> bool {
        self.recorder.is_some()
    }

    pub fn recorder(&self) -> Option<&EpisodeRecorder<W>> {
        self.recorder.as_ref()
    }

    /// Handles one tick of the game and returns the paddle command.
    pub fn step(&mut self, scene: &SceneInfo) -> Action {
        if !scene.status.is_active() {
            self.finish_round();
            return Action::Reset;
        }

        let action = self.decide(scene);

        if let Some(recorder) = self.recorder.as_mut() {
            recorder.on_round_start();
            if scene.ball.is_moving() {
                recorder.on_tick(Sample::new(&scene.ball, self.side.paddle_x(scene), action));
            }
        }

        action
    }

    /// Live decision for an active scene; never records.
    pub fn decide(&self, scene: &SceneInfo) -> Action {
        let ball = &scene.ball;
        if !self.side.is_incoming(ball.vy) {
            return Action::None;
        }
        let predicted_x = self.predictor.predict(ball, self.side.defended_line());
        self.policy.decide(self.side.paddle_x(scene), predicted_x)
    }

    /// Closes the open episode, if any. Write failures are logged and the
    /// episode is dropped.
    pub fn finish_round(&mut self) -> Option<FlushReport> {
        let recorder = self.recorder.as_mut()?;
        match recorder.on_round_end() {
            Ok(report) => report,
            Err(e) => {
                error!("[{}] episode lost: {}", self.side.tag(), e);
                None
            }
        }
    }
}
