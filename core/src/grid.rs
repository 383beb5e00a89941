use alloc::collections::VecDeque;
use core::ops::Index;
use ndarray::Array2;
use rand::Rng;
use serde::Serialize;

use crate::*;

/// Square board of cells with a fixed mine layout.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grid {
    cells: Array2<Cell>,
    mine_count: CellCount,
    revealed_count: CellCount,
    flagged_count: CellCount,
}

impl Grid {
    /// Places `mines` mines uniformly at random on a `size x size` board.
    pub fn generate<R: Rng>(size: Coord, mines: CellCount, rng: &mut R) -> Result<Self> {
        let config = GameConfig::new(size, mines)?;
        Ok(RandomGridGenerator::new(rng).generate(config))
    }

    /// Builds a board with mines at exactly the given coordinates. Duplicates count once.
    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask = Array2::from_elem((size as usize, size as usize), false);
        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        let mines = mine_mask.iter().filter(|&&mine| mine).count();
        // `mines <= size * size`, which always fits `CellCount`
        GameConfig::new(size, mines as CellCount)?;
        Ok(Self::from_mine_mask(mine_mask))
    }

    /// Computes adjacency counts for a square mask. Callers guarantee the mask is square and not full.
    pub(crate) fn from_mine_mask(mine_mask: Array2<bool>) -> Self {
        let side = mine_mask.nrows() as Coord;
        let mut mine_count: CellCount = 0;
        let cells = Array2::from_shape_fn(mine_mask.dim(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            if mine_mask[coords.to_nd_index()] {
                mine_count += 1;
                Cell::new(true, 0)
            } else {
                let adjacent = Neighbors::new(coords, side)
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count();
                Cell::new(false, adjacent as u8)
            }
        });

        Self {
            cells,
            mine_count,
            revealed_count: 0,
            flagged_count: 0,
        }
    }

    pub fn size(&self) -> Coord {
        self.cells.nrows() as Coord
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        square(self.size()) - self.mine_count
    }

    /// Safe cells revealed so far.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Mines minus flags, negative when the player over-flags.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.mine_count) - i32::from(self.flagged_count)
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let size = self.size();
        coords.0 < size && coords.1 < size
    }

    pub fn get(&self, coords: Coord2) -> Option<Cell> {
        self.contains(coords).then(|| self[coords])
    }

    pub fn neighbors(&self, coords: Coord2) -> Neighbors {
        Neighbors::new(coords, self.size())
    }

    /// Row-major walk over every cell and its coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| ((row as Coord, col as Coord), cell))
    }

    /// True iff every cell without a mine is revealed.
    pub fn check_win(&self) -> bool {
        self.revealed_count == self.safe_cell_count()
    }

    /// Reveals one cell and, when it has no adjacent mines, the zero region around it. Coordinates must be on the
    /// board; game status is the caller's concern.
    pub(crate) fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        let cell = self[coords];
        if cell.is_revealed() || cell.is_flagged() {
            return RevealOutcome::NoChange;
        }

        if cell.is_mine() {
            // the losing cell is shown but never counts toward the win
            self.cells[coords.to_nd_index()].set_revealed();
            return RevealOutcome::HitMine;
        }
        self.mark_revealed(coords);

        log::debug!(
            "Revealed cell at {:?}, adjacent mines: {}",
            coords,
            cell.adjacent_mines()
        );
        if cell.adjacent_mines() == 0 {
            self.flood_from(coords);
        }

        if self.check_win() {
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Expands a revealed zero cell. Every cell is revealed at most once, so the worklist drains.
    fn flood_from(&mut self, origin: Coord2) {
        let mut worklist = VecDeque::from([origin]);

        while let Some(current) = worklist.pop_front() {
            for pos in self.neighbors(current) {
                let cell = self[pos];
                if cell.is_revealed() || cell.is_flagged() {
                    continue;
                }

                self.mark_revealed(pos);
                log::trace!(
                    "Flood revealed cell at {:?}, adjacent mines: {}",
                    pos,
                    cell.adjacent_mines()
                );

                if cell.adjacent_mines() == 0 {
                    worklist.push_back(pos);
                }
            }
        }
    }

    pub(crate) fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_revealed() {
            return MarkOutcome::NoChange;
        }

        let flagged = !cell.is_flagged();
        cell.set_flagged(flagged);
        if flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        MarkOutcome::Changed
    }

    /// Copies the player's flags from another board of the same size.
    pub(crate) fn copy_flags_from(&mut self, other: &Grid) {
        debug_assert_eq!(self.size(), other.size());
        for (coords, cell) in other.iter() {
            if cell.is_flagged() && !self[coords].is_flagged() {
                self.toggle_flag(coords);
            }
        }
    }

    fn mark_revealed(&mut self, coords: Coord2) {
        self.cells[coords.to_nd_index()].set_revealed();
        self.revealed_count += 1;
    }
}

impl Index<Coord2> for Grid {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}
