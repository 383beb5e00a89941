use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

pub trait GridGenerator {
    fn generate(self, config: GameConfig) -> Grid;
}

/// How the first reveal of a fresh grid is treated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FirstMovePolicy {
    /// Mines stay where they were placed, the first click may lose.
    #[default]
    Random,
    /// Mines are moved away from the first revealed cell.
    Safe,
}

/// Rejection sampling: draw uniform coordinates, skip duplicates, repeat until every mine is placed.
#[derive(Debug)]
pub struct RandomGridGenerator<'r, R> {
    rng: &'r mut R,
    safe_cell: Option<Coord2>,
}

impl<'r, R: Rng> RandomGridGenerator<'r, R> {
    pub fn new(rng: &'r mut R) -> Self {
        Self {
            rng,
            safe_cell: None,
        }
    }

    /// Keeps `coords` mine-free. A valid config always leaves at least one such cell.
    pub fn avoiding(mut self, coords: Coord2) -> Self {
        self.safe_cell = Some(coords);
        self
    }
}

impl<R: Rng> GridGenerator for RandomGridGenerator<'_, R> {
    fn generate(self, config: GameConfig) -> Grid {
        let Self { rng, safe_cell } = self;
        let side = config.size();
        let safe_cell = safe_cell.filter(|&(row, col)| row < side && col < side);

        let mut mine_mask = Array2::from_elem((side as usize, side as usize), false);
        let mut placed: CellCount = 0;
        let mut draws: u32 = 0;

        while placed < config.mines() {
            let coords = (rng.random_range(0..side), rng.random_range(0..side));
            draws += 1;

            if mine_mask[coords.to_nd_index()] || safe_cell == Some(coords) {
                continue;
            }
            mine_mask[coords.to_nd_index()] = true;
            placed += 1;
        }

        log::debug!(
            "Placed {} mines on {}x{} in {} draws",
            placed,
            side,
            side,
            draws
        );
        Grid::from_mine_mask(mine_mask)
    }
}
