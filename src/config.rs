use crate::ship::{ShipId, ShipType};

pub const BOARD_SIZE: usize = 10;
pub const NUM_SHIPS: usize = 5;
pub const SHIPS: [ShipType; NUM_SHIPS] = [
    ShipType::new(1, "Carrier", 5),
    ShipType::new(2, "Battleship", 4),
    ShipType::new(3, "Cruiser", 3),
    ShipType::new(4, "Submarine", 3),
    ShipType::new(5, "Destroyer", 2),
];

/// Total number of ship segments used in the standard configuration.
pub const TOTAL_SHIP_CELLS: usize = 5 + 4 + 3 + 3 + 2;

/// Random placement gives up on a ship after this many failed tries.
pub const PLACEMENT_ATTEMPTS: usize = 100;

/// Pause before the computer's shot is revealed.
pub const DEFAULT_AI_DELAY_MS: u64 = 1000;

/// Look up a configured ship by id.
pub fn ship_type(id: ShipId) -> Option<ShipType> {
    SHIPS.iter().copied().find(|def| def.id() == id)
}

/// Name of the configured ship with `id`, if any.
pub fn ship_name(id: ShipId) -> Option<&'static str> {
    ship_type(id).map(|def| def.name())
}

/// Runtime settings for a paced [`Session`](crate::Session).
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub ai_delay: core::time::Duration,
}

#[cfg(feature = "std")]
impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ai_delay: core::time::Duration::from_millis(DEFAULT_AI_DELAY_MS),
        }
    }
}
