#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;
mod ai;
mod board;
mod common;
mod config;
mod fleet;
mod game;
#[cfg(feature = "std")]
mod logging;
pub mod placement;
mod player;
#[cfg(feature = "std")]
mod session;
mod ship;

pub use ai::{choose_target, damaged_ships, hunt_target, stance, Stance};
pub use board::{Board, BoardView, Cell, CellState};
pub use common::*;
pub use config::*;
pub use fleet::*;
pub use game::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, level_from, LOG_ENV};
pub use placement::{random_fleet, random_placement, RandomLayout, Setup};
pub use player::*;
#[cfg(feature = "std")]
pub use session::Session;
pub use ship::*;
