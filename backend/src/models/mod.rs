// Domain models
pub mod event;
pub mod params;
pub mod step;

pub use event::{Event, EventLog, OperationKind};
pub use params::{BbsParams, RouletteConfig};
pub use step::{OperationResult, StepRecord};
