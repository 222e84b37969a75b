use std::time::Duration;

use thiserror::Error;
use tokio::time::Instant;

/// Phases of the race simulation show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RacePhase {
    /// Nothing is running; a trigger may start a new show.
    Idle,
    /// Entries are being thrown around in random permutations.
    Shuffling,
    /// Shuffling is over and the board pauses before settling.
    Resolving,
    /// The real ranking is being animated one overtake at a time.
    Settling,
}

/// Events driving the race state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceEvent {
    /// The feed asked for a race.
    Trigger,
    /// The fixed number of shuffle steps has been performed.
    ShuffleFinished,
    /// The pause between shuffling and settling is over.
    SettleDelayElapsed,
    /// The real ranking is on screen and the cool-down elapsed.
    RankingSettled,
}

/// Error returned when attempting to apply an invalid transition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid transition: {event:?} cannot be applied while in {from:?}")]
pub struct InvalidTransition {
    /// The phase the state machine was in when the invalid event was received.
    pub from: RacePhase,
    /// The event that cannot be applied from this phase.
    pub event: RaceEvent,
}

/// Reasons a trigger was ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerRejected {
    /// A race is already in flight.
    Busy(RacePhase),
    /// The previous trigger is too recent.
    CoolingDown {
        /// Time left before a new trigger is accepted.
        remaining: Duration,
    },
}

/// State machine for the race simulation, also remembering when the last trigger was accepted.
#[derive(Debug, Clone)]
pub struct RaceStateMachine {
    phase: RacePhase,
    version: usize,
    last_trigger: Option<Instant>,
}

impl Default for RaceStateMachine {
    fn default() -> Self {
        Self {
            phase: RacePhase::Idle,
            version: 0,
            last_trigger: None,
        }
    }
}

impl RaceStateMachine {
    /// Create a new state machine initialised in the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect the current phase.
    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    /// Number of transitions applied so far.
    pub fn version(&self) -> usize {
        self.version
    }

    /// Accept a trigger at `now` unless a race is running or the previous
    /// trigger happened less than `cooldown` ago.
    pub fn try_trigger(
        &mut self,
        now: Instant,
        cooldown: Duration,
    ) -> Result<RacePhase, TriggerRejected> {
        if self.phase != RacePhase::Idle {
            return Err(TriggerRejected::Busy(self.phase));
        }

        if let Some(previous) = self.last_trigger {
            let elapsed = now.saturating_duration_since(previous);
            if elapsed < cooldown {
                return Err(TriggerRejected::CoolingDown {
                    remaining: cooldown - elapsed,
                });
            }
        }

        let next = self
            .apply(RaceEvent::Trigger)
            .map_err(|invalid| TriggerRejected::Busy(invalid.from))?;
        self.last_trigger = Some(now);
        Ok(next)
    }

    /// Apply an event, moving the state machine to the next phase.
    pub fn apply(&mut self, event: RaceEvent) -> Result<RacePhase, InvalidTransition> {
        let next = self.compute_transition(event)?;
        self.phase = next;
        self.version += 1;
        Ok(next)
    }

    fn compute_transition(&self, event: RaceEvent) -> Result<RacePhase, InvalidTransition> {
        let next = match (self.phase, event) {
            (RacePhase::Idle, RaceEvent::Trigger) => RacePhase::Shuffling,
            (RacePhase::Shuffling, RaceEvent::ShuffleFinished) => RacePhase::Resolving,
            (RacePhase::Resolving, RaceEvent::SettleDelayElapsed) => RacePhase::Settling,
            (RacePhase::Settling, RaceEvent::RankingSettled) => RacePhase::Idle,
            (from, event) => return Err(InvalidTransition { from, event }),
        };

        Ok(next)
    }
}
