use futures::FutureExt;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::state::standings::EntryId;

use super::{
    RenderSurface, RenderTarget, SurfaceError, SurfaceResult, Transition, TransitionDone,
    Visibility,
};

/// Headless surface that logs every drawing operation and finishes transitions
/// once their duration elapsed.
#[derive(Debug, Clone)]
pub struct TracingSurface {
    rows: usize,
}

impl TracingSurface {
    /// Surface with `rows` team rows and as many rank labels.
    pub fn new(rows: usize) -> Self {
        Self { rows }
    }

    fn row(&self, id: EntryId) -> SurfaceResult<usize> {
        id.row()
            .filter(|row| *row < self.rows)
            .ok_or(SurfaceError::MissingTarget(RenderTarget::Row(id)))
    }
}

impl RenderSurface for TracingSurface {
    fn begin_transition(
        &self,
        id: EntryId,
        position: usize,
        transition: &Transition,
    ) -> SurfaceResult<TransitionDone> {
        let row = self.row(id)?;
        debug!(
            %id,
            row,
            position,
            duration_ms = transition.duration.as_millis() as u64,
            easing = %transition.easing,
            "move row"
        );
        Ok(sleep(transition.duration).boxed())
    }

    fn set_overtaking(&self, id: EntryId, active: bool) -> SurfaceResult<()> {
        self.row(id)?;
        debug!(%id, active, "overtake style");
        Ok(())
    }

    fn set_visibility(
        &self,
        id: EntryId,
        visibility: Visibility,
        transition: &Transition,
    ) -> SurfaceResult<()> {
        self.row(id)?;
        debug!(
            %id,
            ?visibility,
            duration_ms = transition.duration.as_millis() as u64,
            "visibility"
        );
        Ok(())
    }

    fn set_rank_label(&self, position: usize, text: &str) -> SurfaceResult<()> {
        if position >= self.rows {
            return Err(SurfaceError::MissingTarget(RenderTarget::RankLabel(
                position,
            )));
        }
        info!(position, text, "rank label");
        Ok(())
    }

    fn set_score_label(&self, id: EntryId, score: i64) -> SurfaceResult<()> {
        self.row(id)?;
        info!(%id, score, "score label");
        Ok(())
    }
}
