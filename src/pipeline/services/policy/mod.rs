pub mod control_policy;

pub use control_policy::{ControlPolicy, LIVE_TOLERANCE};
