//! Ship definitions and per-ship damage tracking.

use rand::Rng;

/// Identifier of a ship within a fleet (1-based, unique).
pub type ShipId = u8;

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Pick either orientation with equal probability.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }

    /// Row/column step taken when walking along a run.
    pub(crate) fn step(self) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }
}

/// Type of ship: id, name and length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct ShipType {
    id: ShipId,
    name: &'static str,
    length: usize,
}

impl ShipType {
    /// Create a new ship type.
    pub const fn new(id: ShipId, name: &'static str, length: usize) -> Self {
        Self { id, name, length }
    }

    pub fn id(&self) -> ShipId {
        self.id
    }

    /// Ship's name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Ship's length.
    pub fn length(&self) -> usize {
        self.length
    }
}

/// A fleet member: its type, whether it made it onto the board, and the
/// number of its cells that have been hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct Ship {
    ship_type: ShipType,
    placed: bool,
    damage: usize,
}

impl Ship {
    pub fn new(ship_type: ShipType) -> Self {
        Self {
            ship_type,
            placed: false,
            damage: 0,
        }
    }

    pub fn id(&self) -> ShipId {
        self.ship_type.id()
    }

    pub fn name(&self) -> &'static str {
        self.ship_type.name()
    }

    pub fn length(&self) -> usize {
        self.ship_type.length()
    }

    pub fn ship_type(&self) -> ShipType {
        self.ship_type
    }

    /// Count of hit cells belonging to this ship.
    pub fn damage(&self) -> usize {
        self.damage
    }

    pub fn is_placed(&self) -> bool {
        self.placed
    }

    /// A ship is sunk once every one of its cells has been hit.
    pub fn is_sunk(&self) -> bool {
        self.damage == self.ship_type.length()
    }

    pub(crate) fn mark_placed(&mut self) {
        self.placed = true;
    }

    /// Add one point of damage. Returns `false` (and changes nothing) when the
    /// ship is already sunk.
    pub(crate) fn register_hit(&mut self) -> bool {
        if self.is_sunk() {
            return false;
        }
        self.damage += 1;
        true
    }
}
