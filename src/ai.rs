// Hunt/target shot selection for the computer.
// Reads only what a shooter can observe: hit and miss cells, the ship id
// revealed by each hit, and which ships are already sunk. It keeps no memory
// between turns; the stance is rebuilt from the board every time.

use alloc::vec::Vec;

use log::debug;
use rand::Rng;

use crate::{
    board::{Board, CellState},
    config::BOARD_SIZE,
    fleet::Fleet,
    ship::{Orientation, ShipId},
};

/// What the targeting engine is doing this turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stance {
    /// No damaged, afloat ship is known.
    Hunt,
    /// Pursuing `ship`, whose known hit cells are listed in row-major order.
    Target {
        ship: ShipId,
        hits: Vec<(usize, usize)>,
    },
}

/// Hit cells of ships that are still afloat, grouped per ship in the order
/// each ship is first met during a row-major scan.
pub fn damaged_ships(board: &Board, fleet: &Fleet) -> Vec<(ShipId, Vec<(usize, usize)>)> {
    let mut groups: Vec<(ShipId, Vec<(usize, usize)>)> = Vec::new();
    for (pos, cell) in board.cells() {
        if cell.state() != CellState::Hit {
            continue;
        }
        let Some(id) = cell.ship_id() else { continue };
        if fleet.is_sunk(id) {
            continue;
        }
        match groups.iter_mut().find(|(gid, _)| *gid == id) {
            Some((_, hits)) => hits.push(pos),
            None => groups.push((id, alloc::vec![pos])),
        }
    }
    groups
}

/// Current stance: target the first damaged ship, otherwise hunt.
pub fn stance(board: &Board, fleet: &Fleet) -> Stance {
    match damaged_ships(board, fleet).into_iter().next() {
        Some((ship, hits)) => Stance::Target { ship, hits },
        None => Stance::Hunt,
    }
}

/// Pick the next cell to fire at. Returns `None` only when every cell has
/// already been fired upon.
pub fn choose_target<R: Rng + ?Sized>(
    board: &Board,
    fleet: &Fleet,
    rng: &mut R,
) -> Option<(usize, usize)> {
    if let Stance::Target { ship, hits } = stance(board, fleet) {
        let target = if hits.len() == 1 {
            adjacent_target(board, hits[0], rng)
        } else {
            extend_line(board, hits)
        };
        if let Some(pos) = target {
            debug!("targeting ship {} at {:?}", ship, pos);
            return Some(pos);
        }
        debug!("ship {} has no open continuation, hunting", ship);
    }
    hunt_target(board, rng)
}

/// Uniformly random unresolved neighbour of a single hit (up, down, left,
/// right before filtering).
fn adjacent_target<R: Rng + ?Sized>(
    board: &Board,
    (row, col): (usize, usize),
    rng: &mut R,
) -> Option<(usize, usize)> {
    let candidates: Vec<(usize, usize)> = [
        row.checked_sub(1).map(|r| (r, col)),
        Some((row + 1, col)),
        col.checked_sub(1).map(|c| (row, c)),
        Some((row, col + 1)),
    ]
    .into_iter()
    .flatten()
    .filter(|&(r, c)| board.is_unresolved(r, c))
    .collect();
    pick(&candidates, rng)
}

/// Continue a line of two or more hits: past the far end first, then before
/// the near end.
fn extend_line(board: &Board, mut hits: Vec<(usize, usize)>) -> Option<(usize, usize)> {
    hits.sort_unstable();
    let orientation = if hits[0].0 == hits[1].0 {
        Orientation::Horizontal
    } else if hits[0].1 == hits[1].1 {
        Orientation::Vertical
    } else {
        return None;
    };
    let axis = |&(r, c): &(usize, usize)| match orientation {
        Orientation::Horizontal => c,
        Orientation::Vertical => r,
    };
    let min = hits.iter().map(axis).min()?;
    let max = hits.iter().map(axis).max()?;
    let at = |i: usize| match orientation {
        Orientation::Horizontal => (hits[0].0, i),
        Orientation::Vertical => (i, hits[0].1),
    };

    [Some(max + 1), min.checked_sub(1)]
        .into_iter()
        .flatten()
        .filter(|&i| i < BOARD_SIZE)
        .map(at)
        .find(|&(r, c)| board.is_unresolved(r, c))
}

/// Uniformly random cell among those not yet fired upon.
pub fn hunt_target<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<(usize, usize)> {
    let open: Vec<(usize, usize)> = board
        .cells()
        .filter(|(_, cell)| !cell.is_resolved())
        .map(|(pos, _)| pos)
        .collect();
    pick(&open, rng)
}

fn pick<R: Rng + ?Sized>(cells: &[(usize, usize)], rng: &mut R) -> Option<(usize, usize)> {
    if cells.is_empty() {
        return None;
    }
    Some(cells[rng.random_range(0..cells.len())])
}
