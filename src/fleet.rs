//! One side's ships and their cumulative damage.

use crate::common::FleetError;
use crate::config::{NUM_SHIPS, SHIPS};
use crate::ship::{Ship, ShipId};

/// Ordered set of ships built from the configured fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fleet {
    ships: [Ship; NUM_SHIPS],
}

impl Default for Fleet {
    fn default() -> Self {
        Self::new()
    }
}

impl Fleet {
    /// Fresh fleet: nothing placed, no damage.
    pub fn new() -> Self {
        Self {
            ships: SHIPS.map(Ship::new),
        }
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn get(&self, id: ShipId) -> Option<&Ship> {
        self.ships.iter().find(|s| s.id() == id)
    }

    fn get_mut(&mut self, id: ShipId) -> Result<&mut Ship, FleetError> {
        self.ships
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or(FleetError::UnknownShip(id))
    }

    /// `true` if the ship exists and has been sunk.
    pub fn is_sunk(&self, id: ShipId) -> bool {
        self.get(id).is_some_and(Ship::is_sunk)
    }

    /// Add one point of damage to `id`, returning the updated ship.
    pub fn record_hit(&mut self, id: ShipId) -> Result<Ship, FleetError> {
        let ship = self.get_mut(id)?;
        if !ship.register_hit() {
            return Err(FleetError::AlreadySunk(id));
        }
        Ok(*ship)
    }

    pub(crate) fn mark_placed(&mut self, id: ShipId) -> Result<(), FleetError> {
        self.get_mut(id)?.mark_placed();
        Ok(())
    }

    /// Returns `true` when all ships are sunk.
    pub fn is_destroyed(&self) -> bool {
        self.ships.iter().all(Ship::is_sunk)
    }

    /// Sum of damage across the fleet.
    pub fn total_damage(&self) -> usize {
        self.ships.iter().map(Ship::damage).sum()
    }

    /// Per-ship summary for the presentation layer.
    pub fn summary(&self) -> [ShipSummary; NUM_SHIPS] {
        self.ships.map(|s| ShipSummary {
            id: s.id(),
            name: s.name(),
            length: s.length(),
            damage: s.damage(),
            placed: s.is_placed(),
            sunk: s.is_sunk(),
        })
    }
}

/// Snapshot of a single ship's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct ShipSummary {
    pub id: ShipId,
    pub name: &'static str,
    pub length: usize,
    pub damage: usize,
    pub placed: bool,
    pub sunk: bool,
}
