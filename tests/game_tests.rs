use broadside::{
    CellState, Game, GamePhase, Orientation, Rejection, ShotOutcome, ShotReport, Side, Status,
    NUM_SHIPS, SHIPS, TOTAL_SHIP_CELLS,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Human ships on rows 0, 2, 4, 6 and 8, starting at column 0.
fn place_human_fleet(game: &mut Game) {
    for i in 0..NUM_SHIPS {
        let status = game.place_ship(i * 2, 0, Orientation::Horizontal);
        assert!(matches!(status, Status::Placed { .. }), "{:?}", status);
    }
}

fn started_game(seed: u64) -> (Game, SmallRng) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut game = Game::new();
    place_human_fleet(&mut game);
    assert_eq!(game.start(&mut rng), Status::Started);
    (game, rng)
}

/// Cells of the computer's board that hold a ship.
fn computer_ship_cells(game: &Game) -> Vec<(usize, usize)> {
    game.board(Side::Computer)
        .cells()
        .filter(|(_, cell)| cell.ship_id().is_some())
        .map(|(pos, _)| pos)
        .collect()
}

/// Any open cell of the computer's board without a ship.
fn computer_water(game: &Game) -> (usize, usize) {
    game.board(Side::Computer)
        .cells()
        .find(|(_, cell)| cell.state() == CellState::Empty)
        .map(|(pos, _)| pos)
        .unwrap()
}

#[test]
fn test_new_game_awaits_first_ship() {
    let game = Game::new();
    assert_eq!(game.phase(), GamePhase::Setup);
    assert_eq!(game.turn(), Side::Human);
    assert_eq!(game.status(), Status::AwaitingPlacement(SHIPS[0]));
    assert_eq!(game.next_ship(), Some(SHIPS[0]));
}

#[test]
fn test_setup_progression() {
    let mut game = Game::new();
    assert_eq!(
        game.place_ship(0, 0, Orientation::Horizontal),
        Status::Placed {
            ship: SHIPS[0],
            next: Some(SHIPS[1])
        }
    );
    assert_eq!(
        game.place_ship(0, 2, Orientation::Vertical),
        Status::Rejected(Rejection::Overlap)
    );
    assert_eq!(
        game.place_ship(9, 9, Orientation::Horizontal),
        Status::Rejected(Rejection::OutOfBounds)
    );
    assert_eq!(game.next_ship(), Some(SHIPS[1]));
    assert_eq!(game.fire(5, 5), Status::Rejected(Rejection::WrongPhase));

    let mut rng = SmallRng::seed_from_u64(0);
    assert_eq!(
        game.start(&mut rng),
        Status::Rejected(Rejection::SetupIncomplete)
    );
    assert_eq!(game.phase(), GamePhase::Setup);
    assert!(game.board(Side::Computer).is_empty());

    for i in 1..NUM_SHIPS {
        game.place_ship(i * 2, 0, Orientation::Horizontal);
    }
    assert_eq!(game.next_ship(), None);
    assert_eq!(
        game.place_ship(9, 0, Orientation::Horizontal),
        Status::Rejected(Rejection::FleetComplete)
    );
    assert_eq!(game.board(Side::Human).ship_cells(), TOTAL_SHIP_CELLS);
}

#[test]
fn test_start_deploys_computer_fleet() {
    let (game, _) = started_game(42);
    assert_eq!(game.phase(), GamePhase::Playing);
    assert_eq!(game.turn(), Side::Human);
    assert_eq!(game.board(Side::Computer).ship_cells(), TOTAL_SHIP_CELLS);
    assert!(game.fleet(Side::Computer).ships().iter().all(|s| s.is_placed()));
}

#[test]
fn test_placement_and_start_refused_while_playing() {
    let (mut game, mut rng) = started_game(1);
    assert_eq!(
        game.place_ship(9, 0, Orientation::Horizontal),
        Status::Rejected(Rejection::WrongPhase)
    );
    assert_eq!(game.start(&mut rng), Status::Rejected(Rejection::WrongPhase));
}

#[test]
fn test_turns_alternate() {
    let (mut game, mut rng) = started_game(3);
    assert_eq!(
        game.computer_turn(&mut rng),
        Status::Rejected(Rejection::NotYourTurn)
    );

    let (row, col) = computer_water(&game);
    assert_eq!(
        game.fire(row, col),
        Status::Shot(ShotReport {
            shooter: Side::Human,
            row,
            col,
            outcome: ShotOutcome::Miss
        })
    );
    assert_eq!(game.turn(), Side::Computer);
    assert_eq!(game.fire(0, 0), Status::Rejected(Rejection::NotYourTurn));

    let status = game.computer_turn(&mut rng);
    assert!(
        matches!(
            status,
            Status::Shot(ShotReport {
                shooter: Side::Computer,
                ..
            })
        ),
        "{:?}",
        status
    );
    assert_eq!(game.turn(), Side::Human);
    assert_eq!(game.shots_fired(Side::Human), 1);
    assert_eq!(game.shots_fired(Side::Computer), 1);
}

#[test]
fn test_repeat_shot_is_a_no_op() {
    let (mut game, mut rng) = started_game(5);
    let (row, col) = computer_ship_cells(&game)[0];
    let first = game.fire(row, col);
    assert!(matches!(
        first,
        Status::Shot(ShotReport {
            outcome: ShotOutcome::Hit(_),
            ..
        })
    ));
    game.computer_turn(&mut rng);

    let damage = game.fleet(Side::Computer).total_damage();
    assert_eq!(
        game.fire(row, col),
        Status::Rejected(Rejection::AlreadyResolved)
    );
    assert_eq!(game.fleet(Side::Computer).total_damage(), damage);
    assert_eq!(game.turn(), Side::Human);
    assert_eq!(game.shots_fired(Side::Human), 1);
}

#[test]
fn test_out_of_bounds_shot_keeps_turn() {
    let (mut game, _) = started_game(6);
    assert_eq!(game.fire(10, 0), Status::Rejected(Rejection::OutOfBounds));
    assert_eq!(game.turn(), Side::Human);
}

#[test]
fn test_game_over_exactly_on_last_hit() {
    let (mut game, mut rng) = started_game(9);
    let targets = computer_ship_cells(&game);
    assert_eq!(targets.len(), TOTAL_SHIP_CELLS);

    let mut sunk = 0;
    for (i, &(row, col)) in targets.iter().enumerate() {
        let status = game.fire(row, col);
        if i + 1 < targets.len() {
            assert_eq!(game.phase(), GamePhase::Playing, "ended early at shot {}", i);
            match status {
                Status::Shot(ShotReport {
                    outcome: ShotOutcome::Sunk(_),
                    ..
                }) => sunk += 1,
                Status::Shot(ShotReport {
                    outcome: ShotOutcome::Hit(_),
                    ..
                }) => {}
                other => panic!("unexpected status {:?}", other),
            }
            assert!(!game.fleet(Side::Computer).is_destroyed());
            let reply = game.computer_turn(&mut rng);
            assert!(matches!(reply, Status::Shot(_)), "{:?}", reply);
        } else {
            assert_eq!(
                status,
                Status::GameOver {
                    winner: Side::Human,
                    shot: ShotReport {
                        shooter: Side::Human,
                        row,
                        col,
                        outcome: ShotOutcome::Sunk(
                            game.board(Side::Computer).cell(row, col).unwrap().ship_id().unwrap()
                        ),
                    },
                }
            );
        }
    }
    assert_eq!(sunk, NUM_SHIPS - 1);
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert_eq!(game.winner(), Some(Side::Human));
    assert!(game.fleet(Side::Computer).is_destroyed());

    assert_eq!(game.fire(0, 0), Status::Rejected(Rejection::WrongPhase));
    assert_eq!(
        game.computer_turn(&mut rng),
        Status::Rejected(Rejection::WrongPhase)
    );
}

#[test]
fn test_computer_can_win() {
    let (mut game, mut rng) = started_game(12);
    // Every miss first, then all but the final ship cell, so the human can
    // never finish first.
    let mut ships = computer_ship_cells(&game);
    ships.pop();
    let mut shots = game
        .board(Side::Computer)
        .cells()
        .filter(|(_, cell)| cell.state() == CellState::Empty)
        .map(|(pos, _)| pos)
        .chain(ships)
        .collect::<Vec<_>>()
        .into_iter();

    while game.phase() == GamePhase::Playing {
        let (row, col) = shots.next().expect("human ran out of safe shots");
        game.fire(row, col);
        game.computer_turn(&mut rng);
    }
    assert_eq!(game.winner(), Some(Side::Computer));
    assert!(game.fleet(Side::Human).is_destroyed());
    assert_eq!(
        game.board(Side::Human).count(CellState::Hit),
        TOTAL_SHIP_CELLS
    );
    assert!(matches!(
        game.status(),
        Status::GameOver {
            winner: Side::Computer,
            ..
        }
    ));
}

#[test]
fn test_reset_restores_setup() {
    let (mut game, mut rng) = started_game(21);
    let (row, col) = computer_ship_cells(&game)[0];
    game.fire(row, col);
    game.computer_turn(&mut rng);
    let generation = game.generation();

    assert_eq!(game.reset(), Status::AwaitingPlacement(SHIPS[0]));
    assert_eq!(game.phase(), GamePhase::Setup);
    assert_eq!(game.turn(), Side::Human);
    assert_eq!(game.winner(), None);
    assert_eq!(game.generation(), generation + 1);
    for side in [Side::Human, Side::Computer] {
        assert!(game.board(side).is_empty());
        assert_eq!(game.fleet(side).total_damage(), 0);
        assert_eq!(game.shots_fired(side), 0);
    }
    assert_eq!(game.next_ship(), Some(SHIPS[0]));
}

#[test]
fn test_stale_deferred_move_is_discarded() {
    let (mut game, _) = started_game(30);
    let stale = game.generation();
    let (row, col) = computer_water(&game);
    game.fire(row, col);
    assert_eq!(game.turn(), Side::Computer);

    game.reset();
    let mut rng = SmallRng::seed_from_u64(31);
    place_human_fleet(&mut game);
    game.start(&mut rng);
    let (row, col) = computer_water(&game);
    game.fire(row, col);
    let before = game.status();

    assert_eq!(
        game.deferred_computer_turn(stale, &mut rng),
        Status::Rejected(Rejection::StaleMove)
    );
    assert_eq!(game.status(), before);
    assert_eq!(game.turn(), Side::Computer);
    assert_eq!(game.board(Side::Human).count(CellState::Hit), 0);
    assert_eq!(game.board(Side::Human).count(CellState::Miss), 0);

    let current = game.generation();
    assert!(matches!(
        game.deferred_computer_turn(current, &mut rng),
        Status::Shot(_)
    ));
}

#[test]
fn test_snapshot_hides_computer_ships_until_game_over() {
    let (mut game, _) = started_game(40);
    let (row, col) = computer_ship_cells(&game)[0];
    let snapshot = game.snapshot();
    assert_eq!(snapshot.computer_board.get(row, col), Some(CellState::Empty));
    assert_eq!(snapshot.human_board.get(0, 0), Some(CellState::Occupied));
    assert_eq!(snapshot.phase, GamePhase::Playing);

    game.fire(row, col);
    let snapshot = game.snapshot();
    assert_eq!(snapshot.computer_board.get(row, col), Some(CellState::Hit));
    assert_eq!(snapshot.computer_fleet.iter().map(|s| s.damage).sum::<usize>(), 1);
    assert_eq!(snapshot.turn, Side::Computer);
}
