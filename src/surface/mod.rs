//! Render surface abstraction the board draws onto.

#[cfg(test)]
pub(crate) mod recording;
mod tracing_surface;

use std::{fmt, sync::Arc, time::Duration};

use futures::future::BoxFuture;
use thiserror::Error;

use crate::state::standings::EntryId;

pub use self::tracing_surface::TracingSurface;

/// Resolves once the rendering of a transition has actually finished.
pub type TransitionDone = BoxFuture<'static, ()>;

/// Result alias for render surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;

/// Timed visual transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// How long the transition runs.
    pub duration: Duration,
    /// Easing curve, in the notation the surface understands.
    pub easing: Arc<str>,
}

impl Transition {
    /// Build a transition from its duration and easing curve.
    pub fn new(duration: Duration, easing: impl Into<Arc<str>>) -> Self {
        Self {
            duration,
            easing: easing.into(),
        }
    }

    /// Apply the change immediately.
    pub fn none() -> Self {
        Self::new(Duration::ZERO, "none")
    }
}

/// How visible an entry is during the final countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Transparent and slightly offset downward.
    Hidden,
    /// Fully opaque and briefly scaled up.
    Emphasized,
    /// Fully opaque at rest.
    Shown,
}

/// Element of the board a surface call addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    /// Row drawing an entry.
    Row(EntryId),
    /// Rank label of a visual position.
    RankLabel(usize),
}

impl fmt::Display for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderTarget::Row(id) => write!(f, "row {id}"),
            RenderTarget::RankLabel(position) => write!(f, "rank label {position}"),
        }
    }
}

/// Failures reported by a render surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// The element the update was meant for does not exist.
    #[error("render target {0} is missing")]
    MissingTarget(RenderTarget),
}

/// Per-entry drawing operations consumed by the animation scheduler.
pub trait RenderSurface: Send + Sync {
    /// Move `id` to `position` using `transition`; the returned future resolves
    /// when the surface reports the transition as finished.
    fn begin_transition(
        &self,
        id: EntryId,
        position: usize,
        transition: &Transition,
    ) -> SurfaceResult<TransitionDone>;
    /// Set or clear the transient overtake style of `id`.
    fn set_overtaking(&self, id: EntryId, active: bool) -> SurfaceResult<()>;
    /// Change how visible `id` is.
    fn set_visibility(
        &self,
        id: EntryId,
        visibility: Visibility,
        transition: &Transition,
    ) -> SurfaceResult<()>;
    /// Replace the text of the rank label drawn next to `position`.
    fn set_rank_label(&self, position: usize, text: &str) -> SurfaceResult<()>;
    /// Replace the displayed score of `id`.
    fn set_score_label(&self, id: EntryId, score: i64) -> SurfaceResult<()>;
}
