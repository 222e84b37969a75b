//! Race simulation: random shuffles that degrade into the real ranking.
//!
//! The shuffle phase moves every row at once since legibility does not matter
//! there; the real ranking is then reached one adjacent overtake at a time so
//! each one can be followed on screen.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use tokio::{task::JoinHandle, time::{Instant, sleep}};
use tracing::{debug, info, warn};

use crate::{
    services::planner::plan_swaps,
    state::{SharedBoard, race_machine::RaceEvent},
};

/// Start a race unless one is running or the last trigger is still cooling down.
///
/// Returns the handle of the spawned show when the trigger was accepted.
pub async fn trigger_race(state: &SharedBoard) -> Option<JoinHandle<()>> {
    trigger_race_with(state, StdRng::from_os_rng()).await
}

/// [`trigger_race`] with an explicit source of randomness for the shuffles.
pub async fn trigger_race_with<R>(state: &SharedBoard, rng: R) -> Option<JoinHandle<()>>
where
    R: Rng + Send + 'static,
{
    let cooldown = state.config().race.retrigger_cooldown;
    let accepted = state.race().write().await.try_trigger(Instant::now(), cooldown);

    match accepted {
        Ok(_) => {
            info!("race simulation started");
            Some(tokio::spawn(run_race(state.clone(), rng)))
        }
        Err(reason) => {
            debug!(?reason, "race trigger ignored");
            None
        }
    }
}

async fn run_race<R: Rng>(state: SharedBoard, mut rng: R) {
    let race = state.config().race.clone();

    for step in 0..race.shuffle_steps {
        let mut order = state.standings().read().await.visual_order().to_vec();
        order.shuffle(&mut rng);
        debug!(step, "shuffling board");
        state
            .scheduler()
            .reposition(state.standings(), &order)
            .await;
        sleep(race.shuffle_interval).await;
    }
    advance(&state, RaceEvent::ShuffleFinished).await;

    sleep(race.settle_delay).await;
    advance(&state, RaceEvent::SettleDelayElapsed).await;

    animate_final_ranking(&state).await;

    sleep(race.cooldown).await;
    advance(&state, RaceEvent::RankingSettled).await;
    info!("race simulation finished");
}

/// Walk the board to the real ranking through sequential overtakes, refreshing
/// the rank labels of each settled pair.
pub async fn animate_final_ranking(state: &SharedBoard) {
    let (current, target) = {
        let standings = state.standings().read().await;
        (standings.visual_order().to_vec(), standings.ranking())
    };

    let swaps = plan_swaps(&current, &target);
    info!(swaps = swaps.len(), "settling into real ranking");

    let scheduler = state.scheduler();
    for swap in swaps {
        scheduler.run_swap(state.standings(), swap).await;
        scheduler.set_rank_label(swap.upper());
        scheduler.set_rank_label(swap.lower());
    }

    for position in 0..current.len() {
        scheduler.set_rank_label(position);
    }
}

async fn advance(state: &SharedBoard, event: RaceEvent) {
    if let Err(err) = state.race().write().await.apply(event) {
        warn!(error = %err, "race state machine rejected transition");
    }
}
