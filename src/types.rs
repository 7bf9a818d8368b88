//! termsetup - Type Definitions
//!
//! Shared types for the provisioning pipeline: per-step outcomes,
//! the run summary, and the single error kind that crosses the
//! pipeline boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ─── Step outcomes ───────────────────────────────────────────────

/// What a single step did during a run.
///
/// A failure is not a status: it aborts the run as a
/// [`ProvisionError::StepFailed`] instead.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// The precondition already held; the action was skipped.
    AlreadySatisfied,
    /// The action ran and succeeded.
    Applied,
    /// The operator refused the step's destructive action.
    /// The pipeline continues past a declined step.
    Declined,
}

/// Record of one step's outcome, in run order.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepReport {
    pub name: String,
    pub status: StepStatus,
}

/// Ordered record of a completed run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub reports: Vec<StepReport>,
}

impl RunSummary {
    /// Number of steps whose action actually ran.
    pub fn applied(&self) -> usize {
        self.count(StepStatus::Applied)
    }

    /// Number of steps skipped because their precondition held.
    pub fn already_satisfied(&self) -> usize {
        self.count(StepStatus::AlreadySatisfied)
    }

    /// Number of steps the operator declined.
    pub fn declined(&self) -> usize {
        self.count(StepStatus::Declined)
    }

    fn count(&self, status: StepStatus) -> usize {
        self.reports.iter().filter(|r| r.status == status).count()
    }
}

// ─── Errors ──────────────────────────────────────────────────────

/// The one failure kind a run can end with. Any step whose
/// precondition check or action errors aborts the whole run;
/// nothing is retried and no partial effects are cleaned up.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("ERROR: {step} failed.")]
    StepFailed {
        step: String,
        #[source]
        source: anyhow::Error,
    },
}

impl ProvisionError {
    pub fn step_failed(step: &str, source: anyhow::Error) -> Self {
        Self::StepFailed {
            step: step.to_string(),
            source,
        }
    }
}
