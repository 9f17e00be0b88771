use serde::Serialize;

use super::game_action::Action;
use super::state::BallState;

/// Column names of every sample file, in write order.
pub const SAMPLE_COLUMNS: [&str; 6] = [
    "ball_x",
    "ball_y",
    "ball_vx",
    "ball_vy",
    "platform_x",
    "command",
];

/// One recorded tick: raw ball state, the capturing paddle, and a command.
///
/// Live capture stores the action actually taken; after relabeling the same
/// shape carries the recomputed command instead.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Sample {
    pub ball_x: f64,
    pub ball_y: f64,
    pub ball_vx: f64,
    pub ball_vy: f64,
    #[serde(rename = "platform_x")]
    pub paddle_x: f64,
    #[serde(rename = "command")]
    pub action: Action,
}

impl Sample {
    pub fn new(ball: &BallState, paddle_x: f64, action: Action) -> Self {
        Self {
            ball_x: ball.x,
            ball_y: ball.y,
            ball_vx: ball.vx,
            ball_vy: ball.vy,
            paddle_x,
            action,
        }
    }
}

/// A sample file row read back for relabeling.
///
/// `recorded` holds the stored command only when it names a live decision;
/// RESET, an empty cell or unknown text read back as `None`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedRow {
    pub ball: BallState,
    pub paddle_x: f64,
    pub recorded: Option<Action>,
}

impl RecordedRow {
    pub fn labeled(&self, action: Action) -> Sample {
        Sample::new(&self.ball, self.paddle_x, action)
    }
}
