/// Race simulation state machine.
pub mod race_machine;
/// Final countdown session.
pub mod reveal_machine;
/// Feed server scoreboard.
pub mod scoreboard;
mod server;
/// Entries and their visual arrangement.
pub mod standings;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    config::BoardConfig,
    services::scheduler::AnimationScheduler,
    surface::RenderSurface,
};

pub use self::server::{ScoreboardState, SharedScoreboard};
use self::{race_machine::RaceStateMachine, reveal_machine::RevealSession, standings::Standings};

/// Shared handle on the board state.
pub type SharedBoard = Arc<BoardState>;

/// Central state of the board client: entries, controller state machines and the scheduler.
///
/// Race and reveal are assumed mutually exclusive by the feed protocol; nothing here
/// serialises one against the other.
pub struct BoardState {
    config: BoardConfig,
    standings: RwLock<Standings>,
    race: RwLock<RaceStateMachine>,
    reveal: RwLock<RevealSession>,
    scheduler: AnimationScheduler,
}

impl BoardState {
    /// Construct a new [`BoardState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(config: BoardConfig, surface: Arc<dyn RenderSurface>) -> SharedBoard {
        let scheduler = AnimationScheduler::new(surface, config.animation.clone());
        Arc::new(Self {
            standings: RwLock::new(Standings::new(config.team_count)),
            race: RwLock::new(RaceStateMachine::new()),
            reveal: RwLock::new(RevealSession::new()),
            scheduler,
            config,
        })
    }

    /// Runtime configuration of the board.
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Entries and their visual arrangement.
    pub fn standings(&self) -> &RwLock<Standings> {
        &self.standings
    }

    /// Race simulation state machine.
    pub fn race(&self) -> &RwLock<RaceStateMachine> {
        &self.race
    }

    /// Final countdown session.
    pub fn reveal(&self) -> &RwLock<RevealSession> {
        &self.reveal
    }

    /// Scheduler driving the render surface.
    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }
}
