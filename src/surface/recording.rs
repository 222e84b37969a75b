use std::sync::Mutex;

use futures::FutureExt;
use tokio::time::sleep;

use crate::state::standings::EntryId;

use super::{
    RenderSurface, RenderTarget, SurfaceError, SurfaceResult, Transition, TransitionDone,
    Visibility,
};

/// Surface call captured by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    Move { id: EntryId, position: usize },
    Overtaking { id: EntryId, active: bool },
    Visibility { id: EntryId, visibility: Visibility },
    RankLabel { position: usize, text: String },
    ScoreLabel { id: EntryId, score: i64 },
}

/// Test double recording every call; transitions finish after their duration.
pub struct RecordingSurface {
    rows: usize,
    calls: Mutex<Vec<SurfaceCall>>,
}

impl RecordingSurface {
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Entries that were emphasised, in disclosure order.
    pub fn disclosed(&self) -> Vec<EntryId> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                SurfaceCall::Visibility {
                    id,
                    visibility: Visibility::Emphasized,
                } => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn rank_labels(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                SurfaceCall::RankLabel { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: SurfaceCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn row(&self, id: EntryId) -> SurfaceResult<()> {
        match id.row() {
            Some(row) if row < self.rows => Ok(()),
            _ => Err(SurfaceError::MissingTarget(RenderTarget::Row(id))),
        }
    }
}

impl RenderSurface for RecordingSurface {
    fn begin_transition(
        &self,
        id: EntryId,
        position: usize,
        transition: &Transition,
    ) -> SurfaceResult<TransitionDone> {
        self.row(id)?;
        self.record(SurfaceCall::Move { id, position });
        Ok(sleep(transition.duration).boxed())
    }

    fn set_overtaking(&self, id: EntryId, active: bool) -> SurfaceResult<()> {
        self.row(id)?;
        self.record(SurfaceCall::Overtaking { id, active });
        Ok(())
    }

    fn set_visibility(
        &self,
        id: EntryId,
        visibility: Visibility,
        _transition: &Transition,
    ) -> SurfaceResult<()> {
        self.row(id)?;
        self.record(SurfaceCall::Visibility { id, visibility });
        Ok(())
    }

    fn set_rank_label(&self, position: usize, text: &str) -> SurfaceResult<()> {
        if position >= self.rows {
            return Err(SurfaceError::MissingTarget(RenderTarget::RankLabel(
                position,
            )));
        }
        self.record(SurfaceCall::RankLabel {
            position,
            text: text.to_string(),
        });
        Ok(())
    }

    fn set_score_label(&self, id: EntryId, score: i64) -> SurfaceResult<()> {
        self.row(id)?;
        self.record(SurfaceCall::ScoreLabel { id, score });
        Ok(())
    }
}
