use crate::error::{FormatError, Result};
use crate::solve::board::{BLANKS, Board};
use crate::ui::grid_view::Grid;
use tracing::{debug, info};

/// Bit `d` set means value `d` is still possible for the cell.
type Candidates = u32;

#[derive(Debug)]
pub struct Solution {
    pub grid: Grid,
    pub guesses: usize,
}

/// Constraint propagation over rows, columns and boxes, then depth-first
/// search on the open cell with the fewest candidates.
pub struct Solver {
    board: Board,
}

impl Solver {
    pub fn for_grid(grid: &Grid) -> Result<Self> {
        Ok(Self { board: Board::new(grid.size)? })
    }

    pub fn solve(&self, grid: &Grid) -> Result<Solution> {
        let size = self.board.size;
        let mut values: Vec<Candidates> = vec![(1 << size) - 1; self.board.cell_count()];

        for (cell, &symbol) in grid.cells().iter().enumerate() {
            if BLANKS.contains(&symbol) {
                continue;
            }
            let value = self.board.value_of(symbol).ok_or(FormatError::InvalidSymbol {
                symbol,
                row: cell / size + 1,
                col: cell % size + 1,
            })?;
            if !self.assign(&mut values, cell, value) {
                debug!(row = cell / size + 1, col = cell % size + 1, "givens contradict each other");
                return Err(FormatError::Unsolvable);
            }
        }

        let mut guesses = 0;
        let solved = self.search(values, &mut guesses).ok_or(FormatError::Unsolvable)?;
        info!(size, guesses, "puzzle solved");

        let cells = solved
            .iter()
            .map(|v| self.board.symbol(v.trailing_zeros() as usize))
            .collect();
        Ok(Solution {
            grid: Grid::from_cells(size, cells),
            guesses,
        })
    }

    /// Removes every other candidate from `cell`.
    fn assign(&self, values: &mut [Candidates], cell: usize, value: usize) -> bool {
        let others = values[cell] & !(1 << value);
        (0..self.board.size)
            .filter(|&other| others & (1 << other) != 0)
            .all(|other| self.eliminate(values, cell, other))
    }

    /// Drops `value` from `cell` and propagates: a cell down to one candidate
    /// clears it from its peers, and a unit with one place left for `value`
    /// gets it assigned there. Returns false on a contradiction.
    fn eliminate(&self, values: &mut [Candidates], cell: usize, value: usize) -> bool {
        let bit = 1 << value;
        if values[cell] & bit == 0 {
            return true;
        }
        values[cell] &= !bit;

        match values[cell].count_ones() {
            0 => return false,
            1 => {
                let last = values[cell].trailing_zeros() as usize;
                if !self.board.peers(cell).iter().all(|&peer| self.eliminate(values, peer, last)) {
                    return false;
                }
            }
            _ => {}
        }

        for unit in self.board.units_of(cell) {
            let mut places = unit.iter().copied().filter(|&c| values[c] & bit != 0);
            let (first, second) = (places.next(), places.next());
            match (first, second) {
                (None, _) => return false,
                (Some(only), None) => {
                    if !self.assign(values, only, value) {
                        return false;
                    }
                }
                _ => {}
            }
        }
        true
    }

    fn search(&self, values: Vec<Candidates>, guesses: &mut usize) -> Option<Vec<Candidates>> {
        let open = values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.count_ones() > 1)
            .min_by_key(|(_, v)| v.count_ones())
            .map(|(cell, _)| cell);
        let Some(cell) = open else {
            return Some(values);
        };

        for value in 0..self.board.size {
            if values[cell] & (1 << value) == 0 {
                continue;
            }
            *guesses += 1;
            let mut attempt = values.clone();
            if self.assign(&mut attempt, cell, value) {
                if let Some(solved) = self.search(attempt, guesses) {
                    return Some(solved);
                }
            }
        }
        None
    }
}
