use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A grid plus the win/loss state machine. Moves after the game finished, moves on cells that cannot change, and
/// moves outside the board are all silent no-ops.
#[derive(Clone, Debug, PartialEq)]
pub struct GridEngine {
    grid: Grid,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
}

impl GridEngine {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            status: GameStatus::Playing,
            triggered_mine: None,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    /// The mine that ended the game, if it was lost.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn check_win(&self) -> bool {
        self.grid.check_win()
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if self.is_finished() || !self.on_board(coords) {
            return RevealOutcome::NoChange;
        }

        let outcome = self.grid.reveal(coords);
        match outcome {
            RevealOutcome::HitMine => {
                self.triggered_mine = Some(coords);
                self.finish(GameStatus::Lost);
            }
            RevealOutcome::Won => self.finish(GameStatus::Won),
            RevealOutcome::Revealed | RevealOutcome::NoChange => {}
        }
        outcome
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        if self.is_finished() || !self.on_board(coords) {
            return MarkOutcome::NoChange;
        }
        self.grid.toggle_flag(coords)
    }

    /// Swaps in a different layout of the same size before anything was revealed, keeping the player's flags.
    pub(crate) fn relayout(&mut self, mut grid: Grid) {
        debug_assert_eq!(self.grid.revealed_count(), 0);
        grid.copy_flags_from(&self.grid);
        self.grid = grid;
    }

    fn on_board(&self, coords: Coord2) -> bool {
        let on_board = self.grid.contains(coords);
        if !on_board {
            log::warn!("Ignoring move outside the board at {:?}", coords);
        }
        on_board
    }

    fn finish(&mut self, status: GameStatus) {
        if self.status.is_finished() {
            return;
        }
        log::debug!("Game finished: {:?}", status);
        self.status = status;
    }
}
