use serde::{Deserialize, Serialize};

/// One square of the board. Mine placement and the adjacency count are fixed at generation, only the revealed and
/// flagged marks change during play.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    mine: bool,
    revealed: bool,
    flagged: bool,
    adjacent_mines: u8,
}

/// What a player is allowed to see of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    Mine,
}

impl Cell {
    pub(crate) const fn new(mine: bool, adjacent_mines: u8) -> Self {
        Self {
            mine,
            revealed: false,
            flagged: false,
            adjacent_mines,
        }
    }

    pub const fn is_mine(self) -> bool {
        self.mine
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    /// Mines among the neighbors. Meaningless for a mine cell.
    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    pub(crate) fn set_revealed(&mut self) {
        self.revealed = true;
    }

    pub(crate) fn set_flagged(&mut self, flagged: bool) {
        self.flagged = flagged;
    }

    pub const fn view(self) -> CellView {
        match (self.revealed, self.flagged, self.mine) {
            (true, _, true) => CellView::Mine,
            (true, _, false) => CellView::Revealed(self.adjacent_mines),
            (false, true, _) => CellView::Flagged,
            (false, false, _) => CellView::Hidden,
        }
    }
}
