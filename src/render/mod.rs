mod primitives;
mod recording;

pub use primitives::Color;
pub use recording::RecordingBackend;

use crate::api::{ChartOptions, ChartOptionsPatch};
use crate::core::{HierarchyNode, SurfaceSize};
use crate::error::TreemapResult;

/// Contract implemented by any treemap charting engine.
///
/// Backends receive a fully materialized hierarchy so drawing code remains
/// isolated from the update pipeline. The synthetic root node is passed for
/// context but is never itself rendered; only its two descendant levels are
/// addressable as branch/leaf nodes. Dimensional changes always arrive via
/// `resize`, never through an options patch.
pub trait TreemapBackend {
    /// Binds the engine to a measurable surface. Called exactly once per
    /// instance, before any other call.
    fn mount(&mut self, surface: SurfaceSize, options: &ChartOptions) -> TreemapResult<()>;

    /// Replaces the displayed tree with `root`.
    fn draw(&mut self, root: &HierarchyNode) -> TreemapResult<()>;

    /// Merges a partial visual-option update without discarding the
    /// currently displayed tree.
    fn apply_options(&mut self, patch: &ChartOptionsPatch) -> TreemapResult<()>;

    /// Relays new surface dimensions without requiring a new `draw`.
    fn resize(&mut self, size: SurfaceSize) -> TreemapResult<()>;

    /// Releases engine resources and event hooks. Called at most once.
    fn unmount(&mut self);
}
