use crate::pipeline::types::{BallState, PLAYFIELD_WIDTH};

/// Extrapolates the ball to a horizontal line, bouncing it off the side walls.
#[derive(Debug, Clone, Copy)]
pub struct TrajectoryPredictor {
    width: f64,
}

impl Default for TrajectoryPredictor {
    fn default() -> Self {
        Self::new(PLAYFIELD_WIDTH)
    }
}

impl TrajectoryPredictor {
    pub fn new(width: f64) -> Self {
        Self { width }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    /// Horizontal position at which the ball will cross `target_y`.
    ///
    /// The caller must already know the ball is travelling towards
    /// `target_y`: a zero `vy` divides by zero and the result is meaningless.
    pub fn predict(&self, ball: &BallState, target_y: f64) -> f64 {
        debug_assert!(ball.vy != 0.0, "predict called with vy == 0");
        let steps = (target_y - ball.y) / ball.vy;
        self.fold(ball.x + ball.vx * steps)
    }

    /// Maps an unbounded x into `[0, width]` as if it had bounced off the walls.
    ///
    /// Reflecting across whichever wall was overshot until the value lands
    /// inside is a triangle wave with period `2 * width`, so the number of
    /// bounces does not matter.
    pub fn fold(&self, x: f64) -> f64 {
        if (0.0..=self.width).contains(&x) {
            return x;
        }
        let period = 2.0 * self.width;
        let phase = x.rem_euclid(period);
        if phase > self.width {
            period - phase
        } else {
            phase
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reflect_stepwise(mut x: f64, width: f64) -> f64 {
        while x < 0.0 || x > width {
            if x > width {
                x = 2.0 * width - x;
            } else {
                x = -x;
            }
        }
        x
    }

    #[test]
    fn predicts_single_right_wall_bounce() {
        let predictor = TrajectoryPredictor::default();
        let ball = BallState::new(100.0, 200.0, 5.0, 5.0);
        // steps = 44, raw x = 320, reflected off x = 200
        assert_eq!(predictor.predict(&ball, 420.0), 80.0);
    }

    #[test]
    fn predicts_upward_travel_towards_far_line() {
        let predictor = TrajectoryPredictor::default();
        let ball = BallState::new(50.0, 300.0, -4.0, -10.0);
        // steps = 22, raw x = -38
        assert_eq!(predictor.predict(&ball, 80.0), 38.0);
    }

    #[test]
    fn values_inside_the_field_are_fixed_points() {
        let predictor = TrajectoryPredictor::default();
        for x in [0.0, 0.5, 17.0, 100.0, 199.9, 200.0] {
            assert_eq!(predictor.fold(x), x);
        }
    }

    #[test]
    fn folds_many_bounces_like_repeated_reflection() {
        let predictor = TrajectoryPredictor::default();
        let mut x = -2_000.0f64;
        while x <= 2_000.0 {
            let folded = predictor.fold(x);
            let expected = reflect_stepwise(x, 200.0);
            assert!((folded - expected).abs() < 1e-3, "x={x}: {folded} != {expected}");
            x += 7.25;
        }
        assert_eq!(predictor.fold(400.0), 0.0);
        assert_eq!(predictor.fold(-200.0), 200.0);
        assert_eq!(predictor.fold(1_020.0), 180.0);
    }

    #[test]
    fn prediction_always_lands_inside_the_field() {
        let predictor = TrajectoryPredictor::default();
        for &vx in &[-31.0, -7.0, -0.5, 0.0, 3.0, 12.0, 45.0] {
            for &vy in &[-9.0, -1.0, 0.25, 2.0, 14.0] {
                for &y in &[0.0, 80.0, 233.0, 420.0, 500.0] {
                    for &x in &[0.0, 61.0, 200.0] {
                        let ball = BallState::new(x, y, vx, vy);
                        for target in [80.0, 420.0] {
                            let predicted = predictor.predict(&ball, target);
                            assert!(
                                (0.0..=200.0).contains(&predicted),
                                "{ball:?} -> {target}: {predicted}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn huge_overshoot_still_terminates_in_bounds() {
        let predictor = TrajectoryPredictor::default();
        assert!((0.0..=200.0).contains(&predictor.fold(3.0e12)));
        assert!((0.0..=200.0).contains(&predictor.fold(-3.0e12)));
        assert!((0.0..=200.0).contains(&predictor.fold(-1.0e-9)));
    }
}
