//! Match state machine: setup, alternating shots, game over and reset.

use log::{debug, error, info, warn};
use rand::Rng;

use crate::{
    ai,
    board::{Board, BoardView},
    common::{Rejection, ShotResult, Side},
    config::NUM_SHIPS,
    fleet::{Fleet, ShipSummary},
    placement::{self, Setup},
    ship::{Orientation, ShipId, ShipType},
};

/// Phase of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum GamePhase {
    Setup,
    Playing,
    GameOver,
}

/// Effect of a resolved shot on the fleet that was fired upon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum ShotOutcome {
    Miss,
    Hit(ShipId),
    Sunk(ShipId),
}

/// A shot that changed the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct ShotReport {
    pub shooter: Side,
    pub row: usize,
    pub col: usize,
    pub outcome: ShotOutcome,
}

/// Machine-readable result of the last operation. Display text is left to
/// the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum Status {
    /// Setup is waiting for this ship.
    AwaitingPlacement(ShipType),
    /// A ship was placed; `next` is `None` once the fleet is complete.
    Placed { ship: ShipType, next: Option<ShipType> },
    /// The computer fleet is deployed and the human fires first.
    Started,
    /// A shot was resolved and the turn passed to the other side.
    Shot(ShotReport),
    /// The shot sank the last ship of the opposing fleet.
    GameOver { winner: Side, shot: ShotReport },
    /// The request was refused; nothing changed.
    Rejected(Rejection),
}

/// Everything a presentation layer needs to draw the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct Snapshot {
    pub phase: GamePhase,
    pub turn: Side,
    pub winner: Option<Side>,
    pub status: Status,
    pub human_board: BoardView,
    pub computer_board: BoardView,
    pub human_fleet: [ShipSummary; NUM_SHIPS],
    pub computer_fleet: [ShipSummary; NUM_SHIPS],
}

/// Core game logic holding both sides' boards and fleets.
#[derive(Debug, Clone)]
pub struct Game {
    phase: GamePhase,
    boards: [Board; 2],
    fleets: [Fleet; 2],
    setup: Setup,
    turn: Side,
    winner: Option<Side>,
    status: Status,
    generation: u64,
    shots: [usize; 2],
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Create a match in setup with empty boards.
    pub fn new() -> Self {
        let setup = Setup::new();
        Self {
            phase: GamePhase::Setup,
            boards: [Board::new(); 2],
            fleets: [Fleet::new(); 2],
            status: awaiting(&setup),
            setup,
            turn: Side::Human,
            winner: None,
            generation: 0,
            shots: [0; 2],
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Side whose shot is expected next.
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Result of the most recent operation.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Bumped on every reset; deferred moves compare against it.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Board belonging to `side`.
    pub fn board(&self, side: Side) -> &Board {
        &self.boards[side.index()]
    }

    /// Fleet belonging to `side`.
    pub fn fleet(&self, side: Side) -> &Fleet {
        &self.fleets[side.index()]
    }

    /// Shots `side` has landed on the board (repeats excluded).
    pub fn shots_fired(&self, side: Side) -> usize {
        self.shots[side.index()]
    }

    /// Human ship awaiting placement during setup.
    pub fn next_ship(&self) -> Option<ShipType> {
        match self.phase {
            GamePhase::Setup => self.setup.next_ship(),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            turn: self.turn,
            winner: self.winner,
            status: self.status,
            human_board: self.board(Side::Human).snapshot(true),
            computer_board: self
                .board(Side::Computer)
                .snapshot(self.phase == GamePhase::GameOver),
            human_fleet: self.fleet(Side::Human).summary(),
            computer_fleet: self.fleet(Side::Computer).summary(),
        }
    }

    /// Place the next human ship.
    pub fn place_ship(&mut self, row: usize, col: usize, orientation: Orientation) -> Status {
        if self.phase != GamePhase::Setup {
            return self.reject(Rejection::WrongPhase);
        }
        let human = Side::Human.index();
        match self.setup.place_next(
            &mut self.boards[human],
            &mut self.fleets[human],
            row,
            col,
            orientation,
        ) {
            Ok(ship) => {
                let next = self.setup.next_ship();
                self.report(Status::Placed { ship, next })
            }
            Err(rejection) => self.reject(rejection),
        }
    }

    /// Deploy the computer fleet and begin play with the human to move.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Status {
        if self.phase != GamePhase::Setup {
            return self.reject(Rejection::WrongPhase);
        }
        if !self.setup.is_complete() {
            return self.reject(Rejection::SetupIncomplete);
        }
        let layout = placement::random_fleet(rng);
        if !layout.is_complete() {
            // The human cannot win this match; the gap is rare and kept as is.
            warn!("computer fleet deployed without ships {:?}", layout.unplaced);
        }
        let computer = Side::Computer.index();
        self.boards[computer] = layout.board;
        self.fleets[computer] = layout.fleet;
        self.phase = GamePhase::Playing;
        self.turn = Side::Human;
        info!("match started");
        self.report(Status::Started)
    }

    /// Human shot at the computer's board.
    pub fn fire(&mut self, row: usize, col: usize) -> Status {
        self.shoot(Side::Human, row, col)
    }

    /// Let the targeting engine choose and fire the computer's shot.
    pub fn computer_turn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Status {
        if let Err(rejection) = self.check_turn(Side::Computer) {
            return self.reject(rejection);
        }
        let target = ai::choose_target(
            self.board(Side::Human),
            self.fleet(Side::Human),
            rng,
        );
        match target {
            Some((row, col)) => self.shoot(Side::Computer, row, col),
            // Unreachable while the human fleet is afloat: its cells are open.
            None => self.reject(Rejection::AlreadyResolved),
        }
    }

    /// Like [`Game::computer_turn`], but refuses a move scheduled before the
    /// most recent reset. A stale move leaves the match, including its last
    /// status, untouched.
    pub fn deferred_computer_turn<R: Rng + ?Sized>(
        &mut self,
        generation: u64,
        rng: &mut R,
    ) -> Status {
        if generation != self.generation {
            debug!("discarding move from generation {}", generation);
            return Status::Rejected(Rejection::StaleMove);
        }
        self.computer_turn(rng)
    }

    /// Shared shot path for both sides.
    pub fn shoot(&mut self, shooter: Side, row: usize, col: usize) -> Status {
        if let Err(rejection) = self.check_turn(shooter) {
            return self.reject(rejection);
        }
        let target = shooter.opponent().index();
        let result = match self.boards[target].resolve_shot(row, col) {
            Ok(result) => result,
            Err(rejection) => return self.reject(rejection),
        };
        let outcome = match result {
            ShotResult::AlreadyResolved => return self.reject(Rejection::AlreadyResolved),
            ShotResult::Miss => ShotOutcome::Miss,
            ShotResult::Hit(id) => match self.fleets[target].record_hit(id) {
                Ok(ship) if ship.is_sunk() => {
                    info!("{:?} sank {}", shooter, ship.name());
                    ShotOutcome::Sunk(id)
                }
                Ok(_) => ShotOutcome::Hit(id),
                Err(e) => {
                    error!("fleet out of sync with board: {}", e);
                    ShotOutcome::Hit(id)
                }
            },
        };
        self.shots[shooter.index()] += 1;
        let shot = ShotReport {
            shooter,
            row,
            col,
            outcome,
        };
        if self.fleets[target].is_destroyed() {
            self.phase = GamePhase::GameOver;
            self.winner = Some(shooter);
            info!("game over, {:?} wins", shooter);
            return self.report(Status::GameOver {
                winner: shooter,
                shot,
            });
        }
        self.turn = shooter.opponent();
        self.report(Status::Shot(shot))
    }

    /// Return to setup with empty boards, undamaged fleets and the human to
    /// move. Invalidates any deferred computer move.
    pub fn reset(&mut self) -> Status {
        let generation = self.generation.wrapping_add(1);
        *self = Self::new();
        self.generation = generation;
        info!("match reset");
        self.status
    }

    fn check_turn(&self, shooter: Side) -> Result<(), Rejection> {
        if self.phase != GamePhase::Playing {
            return Err(Rejection::WrongPhase);
        }
        if self.turn != shooter {
            return Err(Rejection::NotYourTurn);
        }
        Ok(())
    }

    fn reject(&mut self, rejection: Rejection) -> Status {
        debug!("rejected: {}", rejection);
        self.report(Status::Rejected(rejection))
    }

    fn report(&mut self, status: Status) -> Status {
        self.status = status;
        status
    }
}

fn awaiting(setup: &Setup) -> Status {
    match setup.next_ship() {
        Some(ship) => Status::AwaitingPlacement(ship),
        None => Status::Rejected(Rejection::FleetComplete),
    }
}
