use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Discrete paddle command emitted once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    MoveLeft,
    MoveRight,
    None,
    /// Only ever returned while the round is not active.
    Reset,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::MoveLeft => "MOVE_LEFT",
            Action::MoveRight => "MOVE_RIGHT",
            Action::None => "NONE",
            Action::Reset => "RESET",
        }
    }

    /// MOVE_LEFT and MOVE_RIGHT form the "moved" class when balancing.
    pub fn is_move(&self) -> bool {
        matches!(self, Action::MoveLeft | Action::MoveRight)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown action '{}'", self.0)
    }
}

impl std::error::Error for UnknownAction {}

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "MOVE_LEFT" => Ok(Action::MoveLeft),
            "MOVE_RIGHT" => Ok(Action::MoveRight),
            "NONE" => Ok(Action::None),
            "RESET" => Ok(Action::Reset),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}
