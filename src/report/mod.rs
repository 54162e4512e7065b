mod display;
mod log_display;
mod markers;
mod recorder;
mod snapshot;
mod writers;

pub use display::{ContextDisplayExt, SimulationDisplay};
pub use log_display::LogDisplay;
pub use markers::{Marker, MarkerLayer, MarkerView, DEFAULT_JITTER, DEFAULT_PEOPLE_PER_MARKER};
pub use recorder::SnapshotRecorder;
pub use snapshot::{DaySnapshot, RegionCounts};
pub use writers::{CsvDisplay, JsonLinesDisplay};
