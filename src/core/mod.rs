pub mod hierarchy;
pub mod types;

pub use hierarchy::{FallbackLabels, Hierarchy, HierarchyNode, build_hierarchy};
pub use types::{ContentItem, SurfaceSize, WordTotals};
