use tracing::{debug, trace, warn};

use crate::api::invalidation::{RenderReason, RenderReasons};
use crate::api::{ChartOptions, ChartOptionsPatch, ChartService, StoreSnapshot, SummaryView};
use crate::core::hierarchy::FallbackLabels;
use crate::core::{Hierarchy, SurfaceSize, build_hierarchy};
use crate::locale::Localizer;
use crate::render::TreemapBackend;

/// Lifecycle of one mounted visualization instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Unmounted,
    /// Mounted but waiting for the surface's first measurable size.
    Mounting,
    Live,
}

/// What the host should display in place of, or around, the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewPhase {
    Loading,
    /// Carries the upstream store's error message.
    Error(String),
    Empty,
    Ready,
}

/// Snapshot of the values the wrapper chrome displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostChrome {
    pub title_text: String,
    pub total_word_count: u64,
    pub total_item_count: u64,
    pub zoomed_node_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum StoreGate {
    Loading,
    Errored(String),
    Ready,
}

/// Change-detection and re-render orchestration for one visualization.
///
/// The host forwards store changes, language switches, and surface resizes
/// as notifications, and drives `on_frame` once per animation frame. Each
/// notification is compared against the last-recorded value for its source,
/// so notification storms and render feedback loops are suppressed. All
/// rebuild and draw failures are swallowed here: the instance degrades to
/// its last-good rendered state (or a placeholder) and never panics the
/// host.
pub struct UpdateScheduler<B: TreemapBackend, L: Localizer> {
    localizer: L,
    options: ChartOptions,
    phase: LifecyclePhase,
    // Parked while Mounting waits for a measurable surface.
    backend: Option<B>,
    chart: Option<ChartService<B>>,
    surface: SurfaceSize,
    items: Vec<crate::core::ContentItem>,
    hierarchy: Hierarchy,
    pending: RenderReasons,
    last_item_count: Option<usize>,
    last_language: String,
    store_gate: StoreGate,
    zoomed_node: Option<String>,
}

impl<B: TreemapBackend, L: Localizer> UpdateScheduler<B, L> {
    #[must_use]
    pub fn new(localizer: L, options: ChartOptions) -> Self {
        let last_language = localizer.language().to_owned();
        Self {
            localizer,
            options,
            phase: LifecyclePhase::Unmounted,
            backend: None,
            chart: None,
            surface: SurfaceSize::new(0, 0),
            items: Vec::new(),
            hierarchy: Hierarchy::empty(),
            pending: RenderReasons::none(),
            last_item_count: None,
            last_language,
            store_gate: StoreGate::Loading,
            zoomed_node: None,
        }
    }

    /// Takes ownership of a backend and begins mounting. If the surface is
    /// not yet measurable, the mount defers until the first measurable
    /// `notify_resize`.
    pub fn mount(&mut self, backend: B, initial_size: SurfaceSize) {
        if self.phase != LifecyclePhase::Unmounted {
            warn!("mount called on an already mounted instance; ignoring");
            return;
        }

        self.backend = Some(backend);
        self.surface = initial_size;
        self.phase = LifecyclePhase::Mounting;
        debug!(
            width = initial_size.width,
            height = initial_size.height,
            "mounting visualization"
        );
        self.try_complete_mount();
    }

    /// Handles one observed store state. Loading/error states only move the
    /// display gate; a settled store rebuilds when the observed item count
    /// differs from the last-recorded one, then schedules a coalesced
    /// render.
    pub fn notify_data(&mut self, snapshot: &StoreSnapshot<'_>) {
        if self.phase == LifecyclePhase::Unmounted {
            trace!("ignoring data notification while unmounted");
            return;
        }

        if snapshot.loading {
            self.store_gate = StoreGate::Loading;
            trace!("store loading; chart suppressed");
            return;
        }
        if let Some(message) = snapshot.error {
            self.store_gate = StoreGate::Errored(message.to_owned());
            debug!(error = message, "store reported an error; chart suppressed");
            return;
        }
        self.store_gate = StoreGate::Ready;

        let count = snapshot.items.len();
        if self.last_item_count == Some(count) {
            trace!(count, "item count unchanged; skipping rebuild");
            return;
        }

        self.last_item_count = Some(count);
        self.items = snapshot.items.to_vec();
        self.rebuild();
        self.schedule(RenderReason::Data);
    }

    /// Re-checks the localizer's active language and, on change, rebuilds
    /// the hierarchy (labels are language-dependent) and schedules a
    /// render. Numeric totals are unaffected.
    pub fn notify_language(&mut self) {
        if self.phase == LifecyclePhase::Unmounted {
            trace!("ignoring language notification while unmounted");
            return;
        }

        let language = self.localizer.language().to_owned();
        if language == self.last_language {
            trace!(%language, "language unchanged; skipping rebuild");
            return;
        }

        debug!(from = %self.last_language, to = %language, "language changed");
        self.last_language = language;
        self.rebuild();
        self.schedule(RenderReason::Language);
    }

    /// Handles a container resize. While mounting, a measurable size
    /// completes the deferred mount; while live, an actually-changed size is
    /// relayed to the chart service. A pure size change never rebuilds the
    /// hierarchy and never schedules a render.
    pub fn notify_resize(&mut self, size: SurfaceSize) {
        match self.phase {
            LifecyclePhase::Unmounted => {
                trace!("ignoring resize notification while unmounted");
            }
            LifecyclePhase::Mounting => {
                self.surface = size;
                self.try_complete_mount();
            }
            LifecyclePhase::Live => {
                if size == self.surface {
                    trace!("surface size unchanged; skipping resize");
                    return;
                }
                self.surface = size;
                if let Some(chart) = self.chart.as_mut() {
                    if let Err(err) = chart.resize(size) {
                        warn!(error = %err, "resize relay failed");
                    }
                }
            }
        }
    }

    /// Records the engine's zoom/breadcrumb selection for the chrome.
    pub fn notify_zoom(&mut self, node_name: Option<String>) {
        if self.phase == LifecyclePhase::Unmounted {
            return;
        }
        trace!(node = ?node_name, "zoom selection changed");
        self.zoomed_node = node_name;
    }

    /// Merges a visual-option patch into the instance options and, when
    /// live, relays it to the chart service.
    pub fn update_options(&mut self, patch: &ChartOptionsPatch) {
        if let Err(err) = patch.validate() {
            warn!(error = %err, "rejecting invalid options patch");
            return;
        }
        patch.apply_to(&mut self.options);
        if let Some(chart) = self.chart.as_mut() {
            if let Err(err) = chart.update_options(patch) {
                warn!(error = %err, "options relay failed");
            }
        }
    }

    /// Frame boundary: draws at most once, using the latest rebuilt state,
    /// and consumes the merged pending reasons. Returns whether a draw
    /// happened. Draw failures keep the last-good rendered state; the next
    /// qualifying notification naturally retries.
    pub fn on_frame(&mut self) -> bool {
        if self.phase != LifecyclePhase::Live || self.pending.is_none() {
            return false;
        }

        self.pending = RenderReasons::none();
        let Some(chart) = self.chart.as_mut() else {
            return false;
        };
        match chart.render(&self.hierarchy) {
            Ok(drew) => {
                trace!(drew, "frame processed");
                drew
            }
            Err(err) => {
                warn!(error = %err, "scheduled render failed; keeping last rendered state");
                false
            }
        }
    }

    /// Cancels any pending render, destroys the chart service, and resets
    /// per-instance observed state. Idempotent, and tolerates a mount that
    /// never produced a chart.
    pub fn unmount(&mut self) {
        if self.phase == LifecyclePhase::Unmounted {
            trace!("unmount called on unmounted instance");
            return;
        }

        self.pending = RenderReasons::none();
        self.backend = None;
        if let Some(mut chart) = self.chart.take() {
            chart.destroy();
        }
        self.phase = LifecyclePhase::Unmounted;
        self.items.clear();
        self.hierarchy = Hierarchy::empty();
        self.last_item_count = None;
        self.store_gate = StoreGate::Loading;
        self.zoomed_node = None;
        debug!("visualization unmounted");
    }

    fn try_complete_mount(&mut self) {
        if !self.surface.is_measurable() {
            trace!("deferring mount until surface is measurable");
            return;
        }
        let Some(backend) = self.backend.take() else {
            return;
        };

        match ChartService::create(backend, self.surface, self.options.clone()) {
            Ok(mut chart) => {
                self.phase = LifecyclePhase::Live;
                match chart.render(&self.hierarchy) {
                    Ok(_) => self.pending = RenderReasons::none(),
                    Err(err) => {
                        warn!(error = %err, "initial render failed");
                        self.pending = self.pending.with_reason(RenderReason::InitialMount);
                    }
                }
                self.chart = Some(chart);
                debug!("visualization live");
            }
            Err(err) => {
                // The backend was consumed by the failed creation; the host
                // must re-mount with a fresh one.
                warn!(error = %err, "chart service creation failed; unmounting");
                self.phase = LifecyclePhase::Unmounted;
            }
        }
    }

    fn rebuild(&mut self) {
        let labels = FallbackLabels {
            unknown_country: self.localizer.translate("country.unknown"),
            unnamed_set: self.localizer.translate("set.none"),
        };
        self.hierarchy = match build_hierarchy(&self.items, &labels) {
            Ok(hierarchy) => hierarchy,
            Err(err) => {
                warn!(error = %err, "hierarchy rebuild failed; degrading to empty tree");
                Hierarchy::empty()
            }
        };
    }

    fn schedule(&mut self, reason: RenderReason) {
        self.pending = self.pending.with_reason(reason);
        trace!(?reason, "render scheduled");
    }

    #[must_use]
    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    /// Current display gate derived from the store state and the hierarchy.
    #[must_use]
    pub fn view_phase(&self) -> ViewPhase {
        match &self.store_gate {
            StoreGate::Loading => ViewPhase::Loading,
            StoreGate::Errored(message) => ViewPhase::Error(message.clone()),
            StoreGate::Ready if self.hierarchy.root.children.is_empty() => ViewPhase::Empty,
            StoreGate::Ready => ViewPhase::Ready,
        }
    }

    /// Localized placeholder message for non-ready view phases.
    #[must_use]
    pub fn placeholder_text(&self) -> Option<String> {
        let key = match self.view_phase() {
            ViewPhase::Loading => "placeholder.loading",
            ViewPhase::Error(_) => "placeholder.error",
            ViewPhase::Empty => "placeholder.empty",
            ViewPhase::Ready => return None,
        };
        Some(self.localizer.translate(key))
    }

    /// Values the wrapper chrome displays around the chart.
    #[must_use]
    pub fn chrome(&self) -> HostChrome {
        HostChrome {
            title_text: self.localizer.translate(&self.options.title_key),
            total_word_count: self.hierarchy.totals.word_count,
            total_item_count: self.hierarchy.totals.item_count,
            zoomed_node_name: self.zoomed_node.clone(),
        }
    }

    /// Localized summary panel values for the current totals.
    #[must_use]
    pub fn summary(&self) -> SummaryView {
        crate::api::build_summary(self.hierarchy.totals, &self.localizer)
    }

    #[must_use]
    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    #[must_use]
    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    #[must_use]
    pub fn has_pending_render(&self) -> bool {
        !self.pending.is_none()
    }

    #[must_use]
    pub fn pending_reasons(&self) -> RenderReasons {
        self.pending
    }

    #[must_use]
    pub fn localizer(&self) -> &L {
        &self.localizer
    }

    /// Mutable access so hosts can switch the active language before
    /// calling `notify_language`.
    pub fn localizer_mut(&mut self) -> &mut L {
        &mut self.localizer
    }

    #[must_use]
    pub fn chart(&self) -> Option<&ChartService<B>> {
        self.chart.as_ref()
    }

    #[must_use]
    pub fn options(&self) -> &ChartOptions {
        &self.options
    }
}
