mod engine;
mod format;
mod reconcile;
mod types;
mod workbench;

pub use engine::{project, round_half_up, try_project};
pub use format::format_currency;
pub use reconcile::reconcile;
pub use types::{
    AlignedRow, Frequency, MAX_COMPOUNDING_FREQUENCY, MAX_HORIZON_YEARS, ParameterError,
    Projection, ScenarioId, ScenarioParameters, ScenarioResult, SeriesValues, YearPoint,
};
pub use workbench::{
    Comparison, MAX_SCENARIOS, ParameterChange, Workbench, WorkbenchError, default_scenarios,
};
