#![cfg(feature = "std")]

//! Paced match driver: the computer's reply is resolved by a tokio task after
//! a fixed delay, and a reset cancels it. Replies are tagged with the match
//! generation they were resolved under, so nothing from before a reset is
//! ever handed out afterwards.

use std::sync::Arc;

use log::debug;
use rand::rngs::SmallRng;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time;

use crate::{
    common::Side,
    config::SessionConfig,
    game::{Game, ShotReport, Snapshot, Status},
    ship::Orientation,
};

/// Computer reply together with the match it belongs to.
#[derive(Debug)]
struct Reply {
    generation: u64,
    status: Status,
}

pub struct Session {
    game: Arc<Mutex<Game>>,
    rng: Arc<Mutex<SmallRng>>,
    outbox: mpsc::UnboundedSender<Reply>,
    inbox: mpsc::UnboundedReceiver<Reply>,
    pending: Option<JoinHandle<()>>,
    config: SessionConfig,
}

impl Session {
    /// Create a session in setup. Statuses produced by deferred computer
    /// moves are read back with [`Session::next_reply`].
    pub fn new(config: SessionConfig, rng: SmallRng) -> Self {
        let (outbox, inbox) = mpsc::unbounded_channel();
        Self {
            game: Arc::new(Mutex::new(Game::new())),
            rng: Arc::new(Mutex::new(rng)),
            outbox,
            inbox,
            pending: None,
            config,
        }
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub async fn place_ship(&self, row: usize, col: usize, orientation: Orientation) -> Status {
        self.game.lock().await.place_ship(row, col, orientation)
    }

    pub async fn start(&self) -> Status {
        let mut rng = self.rng.lock().await;
        self.game.lock().await.start(&mut *rng)
    }

    /// Fire the human shot. When it hands the turn to the computer, the
    /// computer's reply is scheduled after the configured delay.
    pub async fn fire(&mut self, row: usize, col: usize) -> Status {
        let (status, generation) = {
            let mut game = self.game.lock().await;
            (game.fire(row, col), game.generation())
        };
        if let Status::Shot(ShotReport {
            shooter: Side::Human,
            ..
        }) = status
        {
            self.schedule_computer_turn(generation);
        }
        status
    }

    fn schedule_computer_turn(&mut self, generation: u64) {
        let game = Arc::clone(&self.game);
        let rng = Arc::clone(&self.rng);
        let outbox = self.outbox.clone();
        let delay = self.config.ai_delay;
        debug!("computer move scheduled in {:?}", delay);
        self.pending = Some(tokio::spawn(async move {
            time::sleep(delay).await;
            let status = {
                let mut rng = rng.lock().await;
                game.lock().await.deferred_computer_turn(generation, &mut *rng)
            };
            let _ = outbox.send(Reply { generation, status });
        }));
    }

    /// Wait for the computer's reply to the last human shot. Replies resolved
    /// before the most recent reset are skipped.
    ///
    /// Waits indefinitely when no move is pending.
    pub async fn next_reply(&mut self) -> Option<Status> {
        loop {
            let reply = self.inbox.recv().await?;
            if let Some(status) = self.current(reply).await {
                return Some(status);
            }
        }
    }

    /// Like [`Session::next_reply`], but returns `None` at once when no
    /// current reply is queued.
    pub async fn try_next_reply(&mut self) -> Option<Status> {
        while let Ok(reply) = self.inbox.try_recv() {
            if let Some(status) = self.current(reply).await {
                return Some(status);
            }
        }
        None
    }

    async fn current(&self, reply: Reply) -> Option<Status> {
        let generation = self.game.lock().await.generation();
        if reply.generation != generation {
            debug!(
                "dropping reply from generation {} (now {})",
                reply.generation, generation
            );
            return None;
        }
        Some(reply.status)
    }

    /// `true` while a computer move is waiting to be applied.
    pub fn has_pending_move(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel any pending computer move, discard queued replies and return
    /// to setup.
    pub async fn reset(&mut self) -> Status {
        if let Some(handle) = self.pending.take() {
            handle.abort();
            debug!("pending computer move cancelled");
        }
        let status = self.game.lock().await.reset();
        while self.inbox.try_recv().is_ok() {}
        status
    }

    pub async fn snapshot(&self) -> Snapshot {
        self.game.lock().await.snapshot()
    }

    /// Run `f` against the current match state.
    pub async fn inspect<T>(&self, f: impl FnOnce(&Game) -> T) -> T {
        f(&*self.game.lock().await)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
