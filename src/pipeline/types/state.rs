/// Status string the game reports while a round is in play.
pub const GAME_ALIVE: &str = "GAME_ALIVE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundStatus {
    Alive,
    Over,
}

impl RoundStatus {
    /// Any status other than `GAME_ALIVE` ends the round.
    pub fn from_status(status: &str) -> Self {
        if status == GAME_ALIVE {
            RoundStatus::Alive
        } else {
            RoundStatus::Over
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, RoundStatus::Alive)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BallState {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

impl BallState {
    pub fn new(x: f64, y: f64, vx: f64, vy: f64) -> Self {
        Self { x, y, vx, vy }
    }

    pub fn is_moving(&self) -> bool {
        self.vx != 0.0 || self.vy != 0.0
    }
}

/// Snapshot handed over by the game once per tick.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneInfo {
    pub status: RoundStatus,
    pub ball: BallState,
    pub near_paddle_x: f64,
    pub far_paddle_x: f64,
}

impl SceneInfo {
    pub fn alive(ball: BallState, near_paddle_x: f64, far_paddle_x: f64) -> Self {
        Self {
            status: RoundStatus::Alive,
            ball,
            near_paddle_x,
            far_paddle_x,
        }
    }

    pub fn over(ball: BallState, near_paddle_x: f64, far_paddle_x: f64) -> Self {
        Self {
            status: RoundStatus::Over,
            ball,
            near_paddle_x,
            far_paddle_x,
        }
    }
}
