//! Square grid of cells owned by one side: ship occupancy plus the record of
//! every shot fired at it.

use core::fmt;

use crate::common::{Rejection, ShotResult};
use crate::config::BOARD_SIZE;
use crate::ship::{Orientation, ShipId};

/// State of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum CellState {
    #[default]
    Empty,
    Occupied,
    Hit,
    Miss,
}

impl CellState {
    /// `true` once the cell has been fired upon.
    pub fn is_resolved(self) -> bool {
        matches!(self, CellState::Hit | CellState::Miss)
    }
}

/// A grid cell. `ship_id` is present exactly when the state is `Occupied` or
/// `Hit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct Cell {
    state: CellState,
    ship_id: Option<ShipId>,
}

impl Cell {
    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn ship_id(&self) -> Option<ShipId> {
        self.ship_id
    }

    pub fn is_resolved(&self) -> bool {
        self.state.is_resolved()
    }
}

/// Cells of a length-`length` run starting at `(row, col)`, or `None` when any
/// part of it would leave the grid.
pub fn run(
    row: usize,
    col: usize,
    length: usize,
    orientation: Orientation,
) -> Option<impl Iterator<Item = (usize, usize)>> {
    if row >= BOARD_SIZE || col >= BOARD_SIZE || length == 0 || length > BOARD_SIZE {
        return None;
    }
    let (dr, dc) = orientation.step();
    let end_row = row + dr * (length - 1);
    let end_col = col + dc * (length - 1);
    if end_row >= BOARD_SIZE || end_col >= BOARD_SIZE {
        return None;
    }
    Some((0..length).map(move |i| (row + dr * i, col + dc * i)))
}

/// Main board state.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board (no ships, no shots).
    pub fn new() -> Self {
        Board {
            cells: [[Cell::default(); BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Cell at `(row, col)`, or `None` outside the grid.
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells.get(row)?.get(col).copied()
    }

    /// Row-major iterator over `((row, col), cell)`.
    pub fn cells(&self) -> impl Iterator<Item = ((usize, usize), Cell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter().enumerate().map(move |(c, cell)| ((r, c), *cell))
        })
    }

    /// `true` if `(row, col)` is in bounds and not yet fired upon.
    pub fn is_unresolved(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).is_some_and(|cell| !cell.is_resolved())
    }

    /// Number of cells currently in `state`.
    pub fn count(&self, state: CellState) -> usize {
        self.cells().filter(|(_, cell)| cell.state == state).count()
    }

    /// Number of cells carrying a ship, hit or not.
    pub fn ship_cells(&self) -> usize {
        self.count(CellState::Occupied) + self.count(CellState::Hit)
    }

    /// `true` when no cell holds a ship or a shot.
    pub fn is_empty(&self) -> bool {
        self.count(CellState::Empty) == BOARD_SIZE * BOARD_SIZE
    }

    /// Check whether a ship run fits. Ships may touch; only bounds and
    /// occupied cells are checked.
    pub fn check_placement(
        &self,
        row: usize,
        col: usize,
        length: usize,
        orientation: Orientation,
    ) -> Result<(), Rejection> {
        let mut cells = run(row, col, length, orientation).ok_or(Rejection::OutOfBounds)?;
        if cells.any(|(r, c)| self.cells[r][c].state == CellState::Occupied) {
            return Err(Rejection::Overlap);
        }
        Ok(())
    }

    pub fn can_place(
        &self,
        row: usize,
        col: usize,
        length: usize,
        orientation: Orientation,
    ) -> bool {
        self.check_placement(row, col, length, orientation).is_ok()
    }

    /// Mark the run as occupied by `ship_id`. Callers validate the run with
    /// [`Board::check_placement`] first; cells outside the grid are skipped.
    /// No run longer than the grid can land, so longer lengths are clamped.
    pub fn place(
        &mut self,
        row: usize,
        col: usize,
        length: usize,
        orientation: Orientation,
        ship_id: ShipId,
    ) {
        let (dr, dc) = orientation.step();
        for i in 0..length.min(BOARD_SIZE) {
            let (Some(r), Some(c)) = (row.checked_add(dr * i), col.checked_add(dc * i)) else {
                break;
            };
            if let Some(cell) = self.cells.get_mut(r).and_then(|cells| cells.get_mut(c)) {
                *cell = Cell {
                    state: CellState::Occupied,
                    ship_id: Some(ship_id),
                };
            }
        }
    }

    /// Fire at `(row, col)`. Repeated shots are a no-op reported as
    /// [`ShotResult::AlreadyResolved`].
    pub fn resolve_shot(&mut self, row: usize, col: usize) -> Result<ShotResult, Rejection> {
        let cell = self
            .cells
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(Rejection::OutOfBounds)?;
        match (cell.state, cell.ship_id) {
            (CellState::Occupied, Some(id)) => {
                cell.state = CellState::Hit;
                Ok(ShotResult::Hit(id))
            }
            (CellState::Occupied, None) | (CellState::Empty, _) => {
                *cell = Cell {
                    state: CellState::Miss,
                    ship_id: None,
                };
                Ok(ShotResult::Miss)
            }
            (CellState::Hit | CellState::Miss, _) => Ok(ShotResult::AlreadyResolved),
        }
    }

    /// Cell states as seen by a collaborator. With `reveal == false`, intact
    /// ship segments are shown as empty water.
    pub fn snapshot(&self, reveal: bool) -> BoardView {
        let mut cells = [[CellState::Empty; BOARD_SIZE]; BOARD_SIZE];
        for ((r, c), cell) in self.cells() {
            cells[r][c] = match cell.state {
                CellState::Occupied if !reveal => CellState::Empty,
                state => state,
            };
        }
        BoardView { cells }
    }
}

/// Read-only grid of cell states handed to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct BoardView {
    pub cells: [[CellState; BOARD_SIZE]; BOARD_SIZE],
}

impl BoardView {
    pub fn get(&self, row: usize, col: usize) -> Option<CellState> {
        self.cells.get(row)?.get(col).copied()
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "   ")?;
        for c in 0..BOARD_SIZE {
            write!(f, " {}", (b'A' + c as u8) as char)?;
        }
        for (r, row) in self.cells.iter().enumerate() {
            write!(f, "\n{:2} ", r + 1)?;
            for state in row {
                let ch = match state {
                    CellState::Empty => '.',
                    CellState::Occupied => 'S',
                    CellState::Hit => 'X',
                    CellState::Miss => 'o',
                };
                write!(f, " {}", ch)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.snapshot(true), f)
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Board {{")?;
        writeln!(f, "{}", self)?;
        write!(f, "}}")
    }
}
