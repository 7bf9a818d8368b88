//! Provisioner
//!
//! Drives the fixed step catalog in order: evaluate each step's
//! precondition, skip if it holds, otherwise run the action. Any
//! failure aborts the whole run immediately -- no later step runs and
//! no partial effects are cleaned up. Steps run strictly one after
//! another; there is no parallelism and nothing is retried.

use colored::Colorize;
use tracing::{info, warn};

use crate::host::HostEnvironment;
use crate::prompts::Prompter;
use crate::steps::ProvisionStep;
use crate::types::{ProvisionError, RunSummary, StepReport, StepStatus};

pub struct Provisioner<'a> {
    host: &'a dyn HostEnvironment,
    prompter: &'a dyn Prompter,
    steps: Vec<Box<dyn ProvisionStep>>,
}

impl<'a> Provisioner<'a> {
    pub fn new(
        host: &'a dyn HostEnvironment,
        prompter: &'a dyn Prompter,
        steps: Vec<Box<dyn ProvisionStep>>,
    ) -> Self {
        Self {
            host,
            prompter,
            steps,
        }
    }

    /// Run every step in order. Returns the ordered summary on
    /// completion, or the first failure.
    pub async fn run(&self) -> Result<RunSummary, ProvisionError> {
        let total = self.steps.len();
        let mut reports = Vec::with_capacity(total);

        for (index, step) in self.steps.iter().enumerate() {
            let name = step.name();
            println!(
                "{}",
                format!("  [{}/{}] {}...", index + 1, total, name).cyan()
            );

            let satisfied = step
                .is_satisfied(self.host)
                .await
                .map_err(|e| ProvisionError::step_failed(name, e))?;

            if satisfied {
                info!(step = name, "already done, skipping");
                println!("{}", "        already done".dimmed());
                reports.push(StepReport {
                    name: name.to_string(),
                    status: StepStatus::AlreadySatisfied,
                });
                continue;
            }

            match step.apply(self.host, self.prompter).await {
                Ok(StepStatus::Declined) => {
                    warn!(step = name, "declined by operator, continuing");
                    println!("{}", "        kept existing, skipping".yellow());
                    reports.push(StepReport {
                        name: name.to_string(),
                        status: StepStatus::Declined,
                    });
                }
                Ok(status) => {
                    info!(step = name, "done");
                    println!("{}", "        done".green());
                    reports.push(StepReport {
                        name: name.to_string(),
                        status,
                    });
                }
                Err(e) => return Err(ProvisionError::step_failed(name, e)),
            }
        }

        Ok(RunSummary { reports })
    }
}
