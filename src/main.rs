#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use broadside::{
    init_logging, random_placement, ship_name, AiPlayer, Board, Game, GamePhase, Orientation,
    Player, RandomPlayer, Session, SessionConfig, ShotOutcome, Side, Status, DEFAULT_AI_DELAY_MS,
    SHIPS,
};
#[cfg(feature = "std")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "std")]
use log::info;
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use serde::Serialize;
#[cfg(feature = "std")]
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
#[cfg(feature = "std")]
enum Shooter {
    Random,
    HuntTarget,
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Play automated matches against the computer and print a JSON summary.
    Sim {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = 1)]
        games: u64,
        #[arg(long, value_enum, default_value_t = Shooter::Random, help = "Strategy driving the human side")]
        shooter: Shooter,
    },
    /// Play one paced match, logging every shot.
    Demo {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, default_value_t = DEFAULT_AI_DELAY_MS, help = "Pause before each computer shot")]
        delay_ms: u64,
    },
}

#[cfg(feature = "std")]
#[derive(Serialize)]
struct MatchResult {
    seed: u64,
    winner: Option<Side>,
    human_shots: usize,
    computer_shots: usize,
    computer_fleet_complete: bool,
}

#[cfg(feature = "std")]
#[derive(Serialize)]
struct SimSummary {
    games: u64,
    shooter: Shooter,
    human_wins: usize,
    computer_wins: usize,
    average_computer_shots: f64,
    results: Vec<MatchResult>,
}

#[cfg(feature = "std")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sim {
            seed,
            games,
            shooter,
        } => {
            let base = seed.unwrap_or_else(random_seed);
            let mut results = Vec::new();
            for i in 0..games {
                results.push(simulate(base.wrapping_add(i), shooter)?);
            }
            let wins = |side| results.iter().filter(|r| r.winner == Some(side)).count();
            let computer_shots: usize = results.iter().map(|r| r.computer_shots).sum();
            let summary = SimSummary {
                games,
                shooter,
                human_wins: wins(Side::Human),
                computer_wins: wins(Side::Computer),
                average_computer_shots: computer_shots as f64 / games.max(1) as f64,
                results,
            };
            println!("{}", serde_json::to_string(&summary)?);
        }
        Commands::Demo { seed, delay_ms } => {
            let seed = seed.unwrap_or_else(random_seed);
            info!("demo match with seed {}", seed);
            demo(seed, Duration::from_millis(delay_ms)).await?;
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
fn random_seed() -> u64 {
    use rand::Rng;
    rand::rng().random()
}

/// Random start for every configured ship, computed on a scratch board.
#[cfg(feature = "std")]
fn human_layout(rng: &mut SmallRng) -> anyhow::Result<Vec<(usize, usize, Orientation)>> {
    let mut board = Board::new();
    let mut layout = Vec::new();
    for def in SHIPS {
        let (row, col, orientation) = random_placement(&board, def.length(), rng)
            .ok_or_else(|| anyhow::anyhow!("unable to place {}", def.name()))?;
        board.place(row, col, def.length(), orientation, def.id());
        layout.push((row, col, orientation));
    }
    Ok(layout)
}

#[cfg(feature = "std")]
fn simulate(seed: u64, shooter: Shooter) -> anyhow::Result<MatchResult> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut player: Box<dyn Player> = match shooter {
        Shooter::Random => Box::new(RandomPlayer::new()),
        Shooter::HuntTarget => Box::new(AiPlayer::new()),
    };
    let mut game = Game::new();
    for (row, col, orientation) in human_layout(&mut rng)? {
        if let Status::Rejected(r) = game.place_ship(row, col, orientation) {
            anyhow::bail!("placement refused: {}", r);
        }
    }
    if let Status::Rejected(r) = game.start(&mut rng) {
        anyhow::bail!("start refused: {}", r);
    }

    while game.phase() == GamePhase::Playing {
        let status = match game.turn() {
            Side::Human => {
                let (row, col) = player
                    .select_target(
                        &mut rng,
                        game.board(Side::Computer),
                        game.fleet(Side::Computer),
                    )
                    .ok_or_else(|| anyhow::anyhow!("no open cell left"))?;
                game.fire(row, col)
            }
            Side::Computer => game.computer_turn(&mut rng),
        };
        if let Status::Rejected(r) = status {
            anyhow::bail!("shot refused: {}", r);
        }
    }

    Ok(MatchResult {
        seed,
        winner: game.winner(),
        human_shots: game.shots_fired(Side::Human),
        computer_shots: game.shots_fired(Side::Computer),
        computer_fleet_complete: game
            .fleet(Side::Computer)
            .ships()
            .iter()
            .all(|s| s.is_placed()),
    })
}

#[cfg(feature = "std")]
async fn demo(seed: u64, delay: Duration) -> anyhow::Result<()> {
    let config = SessionConfig { ai_delay: delay };
    let mut session = Session::new(config, SmallRng::seed_from_u64(seed));
    let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(1));
    let mut player = AiPlayer::new();

    for (row, col, orientation) in human_layout(&mut rng)? {
        info!("{:?}", session.place_ship(row, col, orientation).await);
    }
    info!("{:?}", session.start().await);

    loop {
        let (row, col) = session
            .inspect(|game| {
                player.select_target(
                    &mut rng,
                    game.board(Side::Computer),
                    game.fleet(Side::Computer),
                )
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("no open cell left"))?;
        let status = session.fire(row, col).await;
        log_status(&status);
        match status {
            Status::GameOver { .. } => break,
            Status::Rejected(r) => anyhow::bail!("shot refused: {}", r),
            _ => {}
        }

        let reply = session
            .next_reply()
            .await
            .ok_or_else(|| anyhow::anyhow!("session closed"))?;
        log_status(&reply);
        match reply {
            Status::GameOver { .. } => break,
            Status::Rejected(r) => anyhow::bail!("computer shot refused: {}", r),
            _ => {}
        }
    }

    let snapshot = session.snapshot().await;
    println!("Your fleet:\n{}\n", snapshot.human_board);
    println!("Computer fleet:\n{}\n", snapshot.computer_board);
    println!("{}", serde_json::to_string(&snapshot.winner)?);
    Ok(())
}

#[cfg(feature = "std")]
fn log_status(status: &Status) {
    let shot = match status {
        Status::Shot(shot) | Status::GameOver { shot, .. } => shot,
        other => {
            info!("{:?}", other);
            return;
        }
    };
    let name = |id| ship_name(id).unwrap_or("unknown ship");
    match shot.outcome {
        ShotOutcome::Miss => info!("{:?} missed at ({}, {})", shot.shooter, shot.row, shot.col),
        ShotOutcome::Hit(id) => info!(
            "{:?} hit the {} at ({}, {})",
            shot.shooter,
            name(id),
            shot.row,
            shot.col
        ),
        ShotOutcome::Sunk(id) => info!("{:?} sank the {}", shot.shooter, name(id)),
    }
    if let Status::GameOver { winner, .. } = status {
        info!("{:?} wins", winner);
    }
}
