use std::cell::RefCell;
use std::rc::Rc;

use crate::api::{ChartOptions, ChartOptionsPatch};
use crate::core::{HierarchyNode, SurfaceSize};
use crate::error::{TreemapError, TreemapResult};
use crate::render::TreemapBackend;

/// Call log shared between a `RecordingBackend` and its probe clones.
#[derive(Debug, Default)]
struct RecordingLog {
    mount_calls: usize,
    draw_calls: usize,
    apply_calls: usize,
    resize_calls: usize,
    unmount_calls: usize,
    last_surface: Option<SurfaceSize>,
    last_root: Option<HierarchyNode>,
    last_patch: Option<ChartOptionsPatch>,
    fail_next_draw: bool,
}

/// In-memory backend used by tests and headless pipeline usage.
///
/// It validates inputs the way a real engine would and records every call,
/// so suites can assert which backend operations a pipeline change actually
/// triggered. Clones share one log: keep a probe clone before handing the
/// backend to a service or scheduler. Single-threaded by design, like the
/// pipeline itself.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    log: Rc<RefCell<RecordingLog>>,
}

impl RecordingBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mount_calls(&self) -> usize {
        self.log.borrow().mount_calls
    }

    #[must_use]
    pub fn draw_calls(&self) -> usize {
        self.log.borrow().draw_calls
    }

    #[must_use]
    pub fn apply_calls(&self) -> usize {
        self.log.borrow().apply_calls
    }

    #[must_use]
    pub fn resize_calls(&self) -> usize {
        self.log.borrow().resize_calls
    }

    #[must_use]
    pub fn unmount_calls(&self) -> usize {
        self.log.borrow().unmount_calls
    }

    #[must_use]
    pub fn last_surface(&self) -> Option<SurfaceSize> {
        self.log.borrow().last_surface
    }

    #[must_use]
    pub fn last_root(&self) -> Option<HierarchyNode> {
        self.log.borrow().last_root.clone()
    }

    #[must_use]
    pub fn last_patch(&self) -> Option<ChartOptionsPatch> {
        self.log.borrow().last_patch.clone()
    }

    /// Makes the next `draw` fail, emulating an engine-side render error.
    pub fn fail_next_draw(&self) {
        self.log.borrow_mut().fail_next_draw = true;
    }
}

impl TreemapBackend for RecordingBackend {
    fn mount(&mut self, surface: SurfaceSize, options: &ChartOptions) -> TreemapResult<()> {
        if !surface.is_measurable() {
            return Err(TreemapError::InvalidSurface {
                width: surface.width,
                height: surface.height,
            });
        }
        options.validate()?;
        let mut log = self.log.borrow_mut();
        log.mount_calls += 1;
        log.last_surface = Some(surface);
        Ok(())
    }

    fn draw(&mut self, root: &HierarchyNode) -> TreemapResult<()> {
        let mut log = self.log.borrow_mut();
        if log.fail_next_draw {
            log.fail_next_draw = false;
            return Err(TreemapError::Backend("injected draw failure".to_owned()));
        }
        log.draw_calls += 1;
        log.last_root = Some(root.clone());
        Ok(())
    }

    fn apply_options(&mut self, patch: &ChartOptionsPatch) -> TreemapResult<()> {
        let mut log = self.log.borrow_mut();
        log.apply_calls += 1;
        log.last_patch = Some(patch.clone());
        Ok(())
    }

    fn resize(&mut self, size: SurfaceSize) -> TreemapResult<()> {
        if !size.is_measurable() {
            return Err(TreemapError::InvalidSurface {
                width: size.width,
                height: size.height,
            });
        }
        let mut log = self.log.borrow_mut();
        log.resize_calls += 1;
        log.last_surface = Some(size);
        Ok(())
    }

    fn unmount(&mut self) {
        self.log.borrow_mut().unmount_calls += 1;
    }
}
