use serde::Deserialize;

use crate::types::Side;

/// Session options supplied by the host. Missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side that makes the first move.
    pub starting_side: Side,
}
