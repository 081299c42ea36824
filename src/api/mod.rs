mod chart_service;
mod invalidation;
mod options;
mod presentation;
mod scheduler;
mod store;
mod tooltip;

pub use chart_service::ChartService;
pub use invalidation::{RenderReason, RenderReasons};
pub use options::{ChartOptions, ChartOptionsPatch, LabelStyle};
pub use presentation::{SummaryView, build_summary};
pub use scheduler::{HostChrome, LifecyclePhase, UpdateScheduler, ViewPhase};
pub use store::StoreSnapshot;
pub use tooltip::{TooltipContext, TooltipFormatter, format_tooltip};
