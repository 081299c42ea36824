use tracing::{debug, trace};

use crate::api::{ChartOptions, ChartOptionsPatch};
use crate::core::{Hierarchy, HierarchyNode, SurfaceSize};
use crate::error::{TreemapError, TreemapResult};
use crate::render::TreemapBackend;

/// Stateful adapter owning one chart-backend instance bound to one surface.
///
/// A service is exclusively owned by a single mounted visualization and is
/// never shared. `destroy` must be called before the owning surface goes
/// away; a second `destroy` is a no-op so teardown races stay harmless.
pub struct ChartService<B: TreemapBackend> {
    backend: B,
    surface: SurfaceSize,
    options: ChartOptions,
    last_root: Option<HierarchyNode>,
    destroyed: bool,
}

impl<B: TreemapBackend> ChartService<B> {
    /// Binds `backend` to a measurable surface and applies the initial
    /// options. Fails with `InvalidSurface` before layout has produced
    /// nonzero dimensions.
    pub fn create(
        mut backend: B,
        surface: SurfaceSize,
        options: ChartOptions,
    ) -> TreemapResult<Self> {
        options.validate()?;
        if !surface.is_measurable() {
            return Err(TreemapError::InvalidSurface {
                width: surface.width,
                height: surface.height,
            });
        }

        backend.mount(surface, &options)?;
        debug!(
            width = surface.width,
            height = surface.height,
            "chart backend mounted"
        );

        Ok(Self {
            backend,
            surface,
            options,
            last_root: None,
            destroyed: false,
        })
    }

    /// Replaces the displayed tree. Idempotent: an unchanged tree produces
    /// no second backend draw. Returns whether a draw happened.
    pub fn render(&mut self, hierarchy: &Hierarchy) -> TreemapResult<bool> {
        self.ensure_live("render")?;
        if self.last_root.as_ref() == Some(&hierarchy.root) {
            trace!("skipping draw of unchanged tree");
            return Ok(false);
        }

        self.backend.draw(&hierarchy.root)?;
        self.last_root = Some(hierarchy.root.clone());
        trace!(
            countries = hierarchy.root.children.len(),
            total_words = hierarchy.totals.word_count,
            "tree drawn"
        );
        Ok(true)
    }

    /// Merges a partial visual-option update into the live options and
    /// relays it to the backend. The displayed tree is untouched.
    pub fn update_options(&mut self, patch: &ChartOptionsPatch) -> TreemapResult<()> {
        self.ensure_live("update_options")?;
        patch.validate()?;
        if patch.is_empty() {
            trace!("skipping empty options patch");
            return Ok(());
        }

        self.backend.apply_options(patch)?;
        patch.apply_to(&mut self.options);
        Ok(())
    }

    /// Relays newly measured surface dimensions. A no-op when unchanged.
    pub fn resize(&mut self, size: SurfaceSize) -> TreemapResult<()> {
        self.ensure_live("resize")?;
        if size == self.surface {
            trace!("surface size unchanged; skipping resize");
            return Ok(());
        }
        if !size.is_measurable() {
            return Err(TreemapError::InvalidSurface {
                width: size.width,
                height: size.height,
            });
        }

        self.backend.resize(size)?;
        self.surface = size;
        debug!(width = size.width, height = size.height, "chart resized");
        Ok(())
    }

    /// Releases backend resources. Safe to call more than once; only the
    /// first call reaches the backend.
    pub fn destroy(&mut self) {
        if self.destroyed {
            trace!("destroy called on already destroyed chart service");
            return;
        }
        self.backend.unmount();
        self.destroyed = true;
        debug!("chart backend destroyed");
    }

    fn ensure_live(&self, operation: &str) -> TreemapResult<()> {
        if self.destroyed {
            return Err(TreemapError::Backend(format!(
                "{operation} called on destroyed chart service"
            )));
        }
        Ok(())
    }

    #[must_use]
    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    #[must_use]
    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    #[must_use]
    pub fn last_rendered_root(&self) -> Option<&HierarchyNode> {
        self.last_root.as_ref()
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    #[must_use]
    pub fn into_backend(self) -> B {
        self.backend
    }
}
