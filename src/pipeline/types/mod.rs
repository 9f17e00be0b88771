mod game_action;
mod playfield;
mod sample;
mod side;
mod state;

pub use game_action::{Action, UnknownAction};
pub use playfield::{PADDLE_HALF_WIDTH, PLAYFIELD_WIDTH};
pub use sample::{RecordedRow, Sample, SAMPLE_COLUMNS};
pub use side::{Side, FAR_LINE_Y, NEAR_LINE_Y};
pub use state::{BallState, RoundStatus, SceneInfo, GAME_ALIVE};
