//! Manual fleet setup and randomized fleet generation.

use alloc::vec::Vec;

use log::{debug, error, warn};
use rand::Rng;

use crate::board::Board;
use crate::common::Rejection;
use crate::config::{BOARD_SIZE, NUM_SHIPS, PLACEMENT_ATTEMPTS, SHIPS};
use crate::fleet::Fleet;
use crate::ship::{Orientation, ShipId, ShipType};

/// Tracks which ship of the configured order is placed next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Setup {
    next: usize,
}

impl Setup {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Ship awaiting placement, or `None` once the fleet is complete.
    pub fn next_ship(&self) -> Option<ShipType> {
        SHIPS.get(self.next).copied()
    }

    /// Number of ships placed so far.
    pub fn placed(&self) -> usize {
        self.next
    }

    pub fn is_complete(&self) -> bool {
        self.next >= NUM_SHIPS
    }

    /// Validate and place the next ship at `(row, col)`. On rejection the
    /// board, fleet and index are left untouched.
    pub fn place_next(
        &mut self,
        board: &mut Board,
        fleet: &mut Fleet,
        row: usize,
        col: usize,
        orientation: Orientation,
    ) -> Result<ShipType, Rejection> {
        let def = self.next_ship().ok_or(Rejection::FleetComplete)?;
        board.check_placement(row, col, def.length(), orientation)?;
        board.place(row, col, def.length(), orientation, def.id());
        if let Err(e) = fleet.mark_placed(def.id()) {
            error!("placed ship missing from fleet: {}", e);
        }
        self.next += 1;
        Ok(def)
    }
}

/// Try up to [`PLACEMENT_ATTEMPTS`] random starts for a ship of `length`.
/// Each attempt draws an orientation, then a row and a column uniformly from
/// the whole grid, so starts that overflow the edge count as failures.
pub fn random_placement<R: Rng + ?Sized>(
    board: &Board,
    length: usize,
    rng: &mut R,
) -> Option<(usize, usize, Orientation)> {
    for attempt in 0..PLACEMENT_ATTEMPTS {
        let orientation = Orientation::random(rng);
        let row = rng.random_range(0..BOARD_SIZE);
        let col = rng.random_range(0..BOARD_SIZE);
        if board.can_place(row, col, length, orientation) {
            debug!("length {} placed after {} attempt(s)", length, attempt + 1);
            return Some((row, col, orientation));
        }
    }
    None
}

/// Board and fleet produced by [`random_fleet`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomLayout {
    pub board: Board,
    pub fleet: Fleet,
    /// Ships for which every attempt failed. They are absent from the board.
    pub unplaced: Vec<ShipId>,
}

impl RandomLayout {
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }
}

/// Best-effort random layout of the whole fleet. A ship that fails all of its
/// attempts is skipped and reported in [`RandomLayout::unplaced`]; the
/// remaining ships are still placed.
pub fn random_fleet<R: Rng + ?Sized>(rng: &mut R) -> RandomLayout {
    let mut board = Board::new();
    let mut fleet = Fleet::new();
    let mut unplaced = Vec::new();
    for def in SHIPS {
        match random_placement(&board, def.length(), rng) {
            Some((row, col, orientation)) => {
                board.place(row, col, def.length(), orientation, def.id());
                if let Err(e) = fleet.mark_placed(def.id()) {
                    error!("generated ship missing from fleet: {}", e);
                }
            }
            None => {
                warn!(
                    "{} left unplaced after {} attempts",
                    def.name(),
                    PLACEMENT_ATTEMPTS
                );
                unplaced.push(def.id());
            }
        }
    }
    RandomLayout {
        board,
        fleet,
        unplaced,
    }
}
