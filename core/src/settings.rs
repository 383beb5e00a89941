use serde::{Deserialize, Serialize};

use crate::*;

/// Player preferences that outlive a single grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub first_move: FirstMovePolicy,
}

impl StorageKey for Settings {
    const KEY: &'static str = "minegrid:settings";
}
