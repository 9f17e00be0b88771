/// Right wall of the playfield; the left wall sits at 0.
pub const PLAYFIELD_WIDTH: f64 = 200.0;

/// Paddles are a fixed 40 units wide; positions are reported by left edge.
pub const PADDLE_HALF_WIDTH: f64 = 20.0;
