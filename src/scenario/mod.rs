//! Scenario sequencing and reporting
//!
//! The runner executes the fixed Hello OpenFin step sequence against one
//! session and produces a per-step report; assertions are made against
//! structured reply data rather than string matching.

pub mod report;
pub mod runner;

pub use report::{ScenarioOutcome, ScenarioReport, StepRecord, StepStatus};
pub use runner::{run, SCENARIO_NAME, STEP_NAMES};
