//! Animation scheduler: the only place visual positions change and the owner
//! of every transition's lifecycle.

use std::sync::Arc;

use futures::{FutureExt, future};
use tokio::{sync::RwLock, time::sleep};
use tracing::{debug, warn};

use crate::{
    config::AnimationConfig,
    state::standings::{EntryId, Standings, Swap},
    surface::{RenderSurface, SurfaceResult, Transition, TransitionDone, Visibility},
};

/// Drives the render surface on behalf of the controllers.
pub struct AnimationScheduler {
    surface: Arc<dyn RenderSurface>,
    timing: AnimationConfig,
}

impl AnimationScheduler {
    /// Build a scheduler drawing on `surface` with the configured timings.
    pub fn new(surface: Arc<dyn RenderSurface>, timing: AnimationConfig) -> Self {
        Self { surface, timing }
    }

    /// Commit `swap` and animate it as an overtake.
    ///
    /// Resolves only once the surface reports both transitions finished. A
    /// surface that never completes a transition stalls the caller.
    pub async fn run_swap(&self, standings: &RwLock<Standings>, swap: Swap) {
        let Some((upper, lower)) = standings.write().await.swap(swap) else {
            warn!(?swap, "swap outside the board; skipping");
            return;
        };

        self.report(upper, self.surface.set_overtaking(upper, true));
        self.report(lower, self.surface.set_overtaking(lower, true));

        let upper_done = self.begin_move(upper, swap.upper(), &self.timing.swap);
        let lower_done = self.begin_move(lower, swap.lower(), &self.timing.swap);
        future::join(upper_done, lower_done).await;

        self.report(upper, self.surface.set_overtaking(upper, false));
        self.report(lower, self.surface.set_overtaking(lower, false));
    }

    /// Reposition every entry at once without waiting for the transitions.
    pub async fn reposition(&self, standings: &RwLock<Standings>, order: &[EntryId]) {
        self.arrange(standings, order, &self.timing.swap).await;
    }

    /// Lay the board out in `order` instantly.
    pub async fn layout(&self, standings: &RwLock<Standings>, order: &[EntryId]) {
        self.arrange(standings, order, &Transition::none()).await;
    }

    /// Fire-and-forget disclosure of `id` at rank `index`.
    pub fn run_reveal_one(&self, index: usize, id: EntryId) {
        self.report(
            id,
            self.surface
                .set_visibility(id, Visibility::Emphasized, &self.timing.reveal),
        );
        self.set_rank_label(index);

        let surface = Arc::clone(&self.surface);
        let transition = self.timing.reveal.clone();
        let pop = self.timing.reveal_pop;
        tokio::spawn(async move {
            sleep(pop).await;
            if let Err(err) = surface.set_visibility(id, Visibility::Shown, &transition) {
                debug!(%id, error = %err, "skipping settle of disclosed entry");
            }
        });
    }

    /// Hide `id` ahead of the final countdown.
    pub fn hide(&self, id: EntryId) {
        self.report(
            id,
            self.surface
                .set_visibility(id, Visibility::Hidden, &self.timing.reveal),
        );
    }

    /// Write the zero-padded rank of `position` into its label.
    pub fn set_rank_label(&self, position: usize) {
        if let Err(err) = self
            .surface
            .set_rank_label(position, &rank_label(position))
        {
            debug!(position, error = %err, "skipping rank label update");
        }
    }

    /// Display the latest score of `id`.
    pub fn show_score(&self, id: EntryId, score: i64) {
        self.report(id, self.surface.set_score_label(id, score));
    }

    async fn arrange(&self, standings: &RwLock<Standings>, order: &[EntryId], transition: &Transition) {
        if !standings.write().await.arrange(order) {
            warn!(?order, "arrangement is not a permutation of the board; skipping");
            return;
        }

        for (position, id) in order.iter().enumerate() {
            // Intentionally not awaited: every row moves at the same time.
            drop(self.begin_move(*id, position, transition));
        }
    }

    fn begin_move(&self, id: EntryId, position: usize, transition: &Transition) -> TransitionDone {
        match self.surface.begin_transition(id, position, transition) {
            Ok(done) => done,
            Err(err) => {
                debug!(%id, position, error = %err, "skipping move");
                future::ready(()).boxed()
            }
        }
    }

    fn report(&self, id: EntryId, result: SurfaceResult<()>) {
        if let Err(err) = result {
            debug!(%id, error = %err, "skipping surface update");
        }
    }
}

/// Rank label text for a zero-based position: `0` becomes `"01"`.
pub fn rank_label(position: usize) -> String {
    format!("{:02}", position + 1)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{
        config::BoardConfig,
        surface::recording::{RecordingSurface, SurfaceCall},
    };

    fn scheduler(rows: usize) -> (Arc<RecordingSurface>, AnimationScheduler) {
        let surface = Arc::new(RecordingSurface::new(rows));
        let scheduler = AnimationScheduler::new(surface.clone(), BoardConfig::default().animation);
        (surface, scheduler)
    }

    #[test]
    fn rank_labels_are_zero_padded() {
        assert_eq!(rank_label(0), "01");
        assert_eq!(rank_label(10), "11");
        assert_eq!(rank_label(99), "100");
    }

    #[tokio::test(start_paused = true)]
    async fn swap_commits_positions_and_clears_overtake_on_completion() {
        let (surface, scheduler) = scheduler(3);
        let standings = RwLock::new(Standings::new(3));

        let started = tokio::time::Instant::now();
        scheduler.run_swap(&standings, Swap::at(0)).await;

        assert!(started.elapsed() >= Duration::from_millis(500));
        assert_eq!(
            standings.read().await.visual_order(),
            &[EntryId(2), EntryId(1), EntryId(3)]
        );
        assert_eq!(
            surface.calls(),
            vec![
                SurfaceCall::Overtaking { id: EntryId(2), active: true },
                SurfaceCall::Overtaking { id: EntryId(1), active: true },
                SurfaceCall::Move { id: EntryId(2), position: 0 },
                SurfaceCall::Move { id: EntryId(1), position: 1 },
                SurfaceCall::Overtaking { id: EntryId(2), active: false },
                SurfaceCall::Overtaking { id: EntryId(1), active: false },
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn missing_rows_are_skipped_without_blocking() {
        // The surface only draws two of the three rows.
        let (surface, scheduler) = scheduler(2);
        let standings = RwLock::new(Standings::new(3));

        scheduler.run_swap(&standings, Swap::at(1)).await;

        assert_eq!(
            standings.read().await.visual_order(),
            &[EntryId(1), EntryId(3), EntryId(2)]
        );
        assert!(surface.calls().contains(&SurfaceCall::Move {
            id: EntryId(2),
            position: 2
        }));
        assert!(!surface.calls().iter().any(|call| matches!(
            call,
            SurfaceCall::Move { id: EntryId(3), .. }
        )));
    }

    #[tokio::test(start_paused = true)]
    async fn reveal_one_emphasises_then_settles() {
        let (surface, scheduler) = scheduler(3);

        scheduler.run_reveal_one(2, EntryId(1));
        assert_eq!(
            surface.calls(),
            vec![
                SurfaceCall::Visibility { id: EntryId(1), visibility: Visibility::Emphasized },
                SurfaceCall::RankLabel { position: 2, text: "03".into() },
            ]
        );

        sleep(Duration::from_millis(301)).await;
        assert_eq!(
            surface.calls().last(),
            Some(&SurfaceCall::Visibility { id: EntryId(1), visibility: Visibility::Shown })
        );
    }

    #[tokio::test(start_paused = true)]
    async fn reposition_rejects_invalid_orders() {
        let (surface, scheduler) = scheduler(3);
        let standings = RwLock::new(Standings::new(3));

        scheduler
            .reposition(&standings, &[EntryId(1), EntryId(1), EntryId(2)])
            .await;
        assert!(surface.calls().is_empty());

        scheduler
            .reposition(&standings, &[EntryId(3), EntryId(1), EntryId(2)])
            .await;
        assert_eq!(surface.calls().len(), 3);
        assert_eq!(standings.read().await.at_position(0), Some(EntryId(3)));
    }
}
