/*!

A district-level epidemic model. Each district ("region") has a fixed population split into
susceptible and infected people. Every simulated day, infection spreads inside each region,
from each region's declared neighbors, and over random long-range contacts between regions
that are not neighbors.

All state lives in a [`Context`]: the region graph, the run's [`Parameters`], the seeded
random number generators, the displays that receive each day's results, and the driver that
ticks the model forward on the context's plan queue.

```rust
use district_spread::{
    initialize, reference_districts, Context, ContextDisplayExt, ContextDriverExt, Parameters,
    SnapshotRecorder,
};

let mut context = Context::new();
initialize(&mut context, Parameters::default(), reference_districts()).unwrap();

let recorder = SnapshotRecorder::new();
context.add_display(recorder.clone());

context.start_simulation();
context.execute();
assert_eq!(recorder.len(), 50);
```

*/

pub mod context;
pub mod driver;
pub mod error;
pub mod hashing;
pub mod log;
pub mod model;
mod new_trait;
pub mod parameters;
mod plan;
pub mod random;
pub mod region;
pub mod report;

// All modules import `crate::TypeId` in case we want to change the underlying type of `TypeId`.
pub(crate) use std::any::TypeId;

pub use context::Context;
pub use driver::{initialize, ContextDriverExt, SimulationStatus};
pub use error::SpreadError;
pub use hashing::{HashMap, HashSet};
pub use model::{
    advance_graph, compute_next_day, sample_long_range_contacts, ContextModelExt,
    LongRangeContactRng,
};
pub use new_trait::New;
pub use parameters::{load_parameters_from_json, ContextParametersExt, Parameters};
pub use plan::PlanId;
pub use random::ContextRandomExt;
pub use region::{
    load_region_specs, reference_districts, ContextRegionExt, Coordinates, Region, RegionGraph,
    RegionId, RegionSpec, RegionState,
};
pub use report::{
    ContextDisplayExt, CsvDisplay, DaySnapshot, JsonLinesDisplay, LogDisplay, Marker, MarkerLayer,
    MarkerView, RegionCounts, SimulationDisplay, SnapshotRecorder,
};

// Re-exported for `define_rng!`.
pub use rand;

#[inline(always)]
pub(crate) fn type_of<T: 'static>() -> TypeId {
    TypeId::of::<T>()
}
