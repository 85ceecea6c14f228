use rand::rngs::SmallRng;

use crate::{ai, board::Board, fleet::Fleet};

/// Interface implemented by automated shooters.
pub trait Player {
    /// Choose the next target coordinate on the board being fired upon.
    /// `fleet` is consulted only for which ships are already sunk.
    fn select_target(
        &mut self,
        rng: &mut SmallRng,
        board: &Board,
        fleet: &Fleet,
    ) -> Option<(usize, usize)>;
}

/// Hunt/target shooter used by the computer side.
#[derive(Debug, Default, Clone, Copy)]
pub struct AiPlayer;

impl AiPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Player for AiPlayer {
    fn select_target(
        &mut self,
        rng: &mut SmallRng,
        board: &Board,
        fleet: &Fleet,
    ) -> Option<(usize, usize)> {
        ai::choose_target(board, fleet, rng)
    }
}

/// Shooter that never leaves hunt mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPlayer;

impl RandomPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Player for RandomPlayer {
    fn select_target(
        &mut self,
        rng: &mut SmallRng,
        board: &Board,
        _fleet: &Fleet,
    ) -> Option<(usize, usize)> {
        ai::hunt_target(board, rng)
    }
}
