//! Scenario outcome reporting

use colored::Colorize;

/// Outcome of a single scenario step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Passed,
    Failed,
    /// Not executed because an earlier step failed
    Skipped,
}

/// One executed (or skipped) step
#[derive(Debug)]
pub struct StepRecord {
    pub name: &'static str,
    pub status: StepStatus,
    /// Captured value on success (e.g. the reported version), or the
    /// failure rendering
    pub detail: Option<String>,
}

/// Terminal outcome of a scenario run
#[derive(Debug)]
pub enum ScenarioOutcome {
    Completed,
    Failed {
        step: &'static str,
        cause: String,
    },
}

/// Result of a full scenario run, one record per step in execution order
#[derive(Debug)]
pub struct ScenarioReport {
    pub name: &'static str,
    pub steps: Vec<StepRecord>,
    pub outcome: ScenarioOutcome,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        matches!(self.outcome, ScenarioOutcome::Completed)
    }

    /// Print the closing summary, after the per-step progress lines
    pub fn print_summary(&self) {
        let run = self
            .steps
            .iter()
            .filter(|s| s.status != StepStatus::Skipped)
            .count();

        match &self.outcome {
            ScenarioOutcome::Completed => {
                println!(
                    "\n{} {} ({} steps)\n",
                    "✓".green().bold(),
                    "Scenario Completed".green().bold(),
                    run
                );
            }
            ScenarioOutcome::Failed { step, cause } => {
                println!(
                    "\n{} {} at '{}' ({} of {} steps run)\n  {}\n",
                    "✗".red().bold(),
                    "Scenario Failed".red().bold(),
                    step,
                    run,
                    self.steps.len(),
                    cause.red()
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_report_passes() {
        let report = ScenarioReport {
            name: "hello",
            steps: vec![StepRecord {
                name: "a",
                status: StepStatus::Passed,
                detail: None,
            }],
            outcome: ScenarioOutcome::Completed,
        };
        assert!(report.passed());
    }

    #[test]
    fn failed_report_carries_step_and_cause() {
        let report = ScenarioReport {
            name: "hello",
            steps: vec![
                StepRecord {
                    name: "a",
                    status: StepStatus::Failed,
                    detail: Some("boom".to_string()),
                },
                StepRecord {
                    name: "b",
                    status: StepStatus::Skipped,
                    detail: None,
                },
            ],
            outcome: ScenarioOutcome::Failed {
                step: "a",
                cause: "boom".to_string(),
            },
        };
        assert!(!report.passed());
        match report.outcome {
            ScenarioOutcome::Failed { step, .. } => assert_eq!(step, "a"),
            _ => panic!("expected failure"),
        }
    }
}
