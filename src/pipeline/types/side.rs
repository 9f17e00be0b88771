use serde::Deserialize;

use super::state::SceneInfo;

/// Line the NEAR paddle defends (ball travels down towards it).
pub const NEAR_LINE_Y: f64 = 420.0;
/// Line the FAR paddle defends (ball travels up towards it).
pub const FAR_LINE_Y: f64 = 80.0;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Near,
    Far,
}

impl Side {
    pub fn defended_line(&self) -> f64 {
        match self {
            Side::Near => NEAR_LINE_Y,
            Side::Far => FAR_LINE_Y,
        }
    }

    /// Whether a ball with vertical velocity `vy` is heading for this side's line.
    pub fn is_incoming(&self, vy: f64) -> bool {
        match self {
            Side::Near => vy > 0.0,
            Side::Far => vy < 0.0,
        }
    }

    pub fn paddle_x(&self, scene: &SceneInfo) -> f64 {
        match self {
            Side::Near => scene.near_paddle_x,
            Side::Far => scene.far_paddle_x,
        }
    }

    pub fn opponent(&self) -> Side {
        match self {
            Side::Near => Side::Far,
            Side::Far => Side::Near,
        }
    }

    /// Player tag used in file names and log lines.
    pub fn tag(&self) -> &'static str {
        match self {
            Side::Near => "1P",
            Side::Far => "2P",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::BallState;

    #[test]
    fn incoming_depends_on_vertical_direction() {
        assert!(Side::Near.is_incoming(3.0));
        assert!(!Side::Near.is_incoming(-3.0));
        assert!(!Side::Near.is_incoming(0.0));
        assert!(Side::Far.is_incoming(-3.0));
        assert!(!Side::Far.is_incoming(3.0));
        assert!(!Side::Far.is_incoming(0.0));
    }

    #[test]
    fn opponent_defends_the_other_line() {
        assert_eq!(Side::Near.opponent(), Side::Far);
        assert_eq!(Side::Far.opponent().defended_line(), NEAR_LINE_Y);
    }

    #[test]
    fn each_side_reads_its_own_paddle() {
        let scene = SceneInfo::alive(BallState::default(), 35.0, 140.0);
        assert_eq!(Side::Near.paddle_x(&scene), 35.0);
        assert_eq!(Side::Far.paddle_x(&scene), 140.0);
    }
}
