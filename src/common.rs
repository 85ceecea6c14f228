//! Common types: sides, shot results and the reasons an operation is refused.

use crate::ship::ShipId;

/// One of the two participants of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum Side {
    Human,
    Computer,
}

impl Side {
    /// The side being fired upon by `self`.
    pub fn opponent(self) -> Self {
        match self {
            Side::Human => Side::Computer,
            Side::Computer => Side::Human,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Side::Human => 0,
            Side::Computer => 1,
        }
    }
}

/// Outcome of resolving a single shot against a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum ShotResult {
    /// Shot struck a segment of the given ship.
    Hit(ShipId),
    /// Shot landed in open water.
    Miss,
    /// Cell had already been fired upon; nothing changed.
    AlreadyResolved,
}

/// Why a request was refused. Refusals never change any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum Rejection {
    /// Coordinate or ship run falls outside the grid.
    OutOfBounds,
    /// Ship run crosses a cell already occupied by another ship.
    Overlap,
    /// Target cell was already hit or missed.
    AlreadyResolved,
    /// Operation is not allowed in the current phase.
    WrongPhase,
    /// It is the other side's turn.
    NotYourTurn,
    /// The game cannot start before every ship has been placed.
    SetupIncomplete,
    /// Every ship has already been placed.
    FleetComplete,
    /// A deferred move was issued for a match that has since been reset.
    StaleMove,
}

impl core::fmt::Display for Rejection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Rejection::OutOfBounds => write!(f, "Position is outside the board"),
            Rejection::Overlap => write!(f, "Ship placement overlaps with another ship"),
            Rejection::AlreadyResolved => write!(f, "Cell was already fired upon"),
            Rejection::WrongPhase => write!(f, "Not allowed in the current phase"),
            Rejection::NotYourTurn => write!(f, "It is not this side's turn"),
            Rejection::SetupIncomplete => write!(f, "Not every ship has been placed"),
            Rejection::FleetComplete => write!(f, "Every ship has already been placed"),
            Rejection::StaleMove => write!(f, "Move belongs to a match that was reset"),
        }
    }
}

/// Fleet bookkeeping errors. These indicate a caller bug: board invariants
/// guarantee a hit cell always names a live ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FleetError {
    UnknownShip(ShipId),
    AlreadySunk(ShipId),
}

impl core::fmt::Display for FleetError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FleetError::UnknownShip(id) => write!(f, "No ship with id {} in fleet", id),
            FleetError::AlreadySunk(id) => write!(f, "Ship {} is already sunk", id),
        }
    }
}
