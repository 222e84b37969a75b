//! Final countdown: entries are disclosed one rank at a time, worst first.

use std::time::Duration;

use tokio::{task::JoinHandle, time::sleep};
use tracing::{debug, info, warn};

use crate::{
    config::RevealPolicy,
    state::{SharedBoard, reveal_machine::DisclosureOutcome},
};

/// Number of top ranks paced with the podium spacing.
const PODIUM_SIZE: usize = 3;

/// Arm the countdown: freeze the current ranking, lay the board out in that
/// order and hide every entry.
///
/// Tied entries are frozen in row order, the order the feed server announces
/// them in, regardless of where a race left them on screen.
///
/// With the self-paced policy the whole countdown is spawned and its handle
/// returned; otherwise disclosures wait for [`request_disclosure`].
pub async fn start_reveal(state: &SharedBoard) -> Option<JoinHandle<()>> {
    let ranking = state.standings().read().await.row_ranking();
    if !state.reveal().write().await.arm(ranking.clone()) {
        debug!("final countdown already started; ignoring start signal");
        return None;
    }

    let scheduler = state.scheduler();
    scheduler.layout(state.standings(), &ranking).await;
    for id in &ranking {
        scheduler.hide(*id);
    }

    let policy = state.config().reveal.policy;
    info!(entries = ranking.len(), ?policy, "final countdown armed");

    match policy {
        RevealPolicy::SelfPaced => Some(tokio::spawn(run_self_paced(state.clone()))),
        RevealPolicy::ExternallyPaced => None,
    }
}

/// Handle a disclosure request coming from the final feed.
pub async fn request_disclosure(state: &SharedBoard, index: usize) {
    if state.config().reveal.policy == RevealPolicy::SelfPaced {
        debug!(index, "self-paced countdown ignores disclosure requests");
        return;
    }
    disclose(state, index).await;
}

async fn run_self_paced(state: SharedBoard) {
    let count = state.reveal().read().await.sorted_order().len();
    for index in (0..count).rev() {
        sleep(spacing_before(&state, index)).await;
        disclose(&state, index).await;
    }
    info!("final countdown complete");
}

fn spacing_before(state: &SharedBoard, index: usize) -> Duration {
    let reveal = &state.config().reveal;
    if index < PODIUM_SIZE {
        reveal.podium_spacing
    } else {
        reveal.spacing
    }
}

async fn disclose(state: &SharedBoard, index: usize) -> bool {
    let outcome = state.reveal().write().await.request(index);
    match outcome {
        DisclosureOutcome::Disclose { index, id } => {
            state.scheduler().run_reveal_one(index, id);
            info!(rank = index + 1, %id, "entry disclosed");
            true
        }
        DisclosureOutcome::Duplicate => false,
        DisclosureOutcome::OutOfRange => {
            warn!(index, "disclosure request outside the frozen ranking");
            false
        }
        DisclosureOutcome::NotArmed => {
            debug!(index, "disclosure requested before the countdown started");
            false
        }
    }
}
