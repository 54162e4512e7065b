mod context_ext;
mod graph;
mod loader;
mod reference;

// `ContextRegionExt` is the public API to the installed `RegionGraph`.
pub(crate) use context_ext::ContextRegionExtInternal;

pub use context_ext::ContextRegionExt;
pub use graph::{Coordinates, Region, RegionGraph, RegionId, RegionSpec, RegionState};
pub use loader::load_region_specs;
pub use reference::reference_districts;
