//! Provisioning Steps
//!
//! Each step is one named unit of work with a precondition check and
//! an action. Preconditions make the run idempotent-by-check: the
//! filesystem and installed packages are the only record of prior
//! runs, re-inspected every time.

pub mod editor;
pub mod font;
pub mod packages;
pub mod shell;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::SetupConfig;
use crate::host::HostEnvironment;
use crate::prompts::Prompter;
use crate::types::StepStatus;

pub use editor::InstallEditorConfig;
pub use font::InstallFont;
pub use packages::{InstallPackages, UpdatePackages};
pub use shell::{InstallOhMyZsh, InstallZshTheme, SetZshTheme};

/// One named provisioning step.
#[async_trait]
pub trait ProvisionStep: Send + Sync {
    /// Human-readable label, used in progress output and failures.
    fn name(&self) -> &str;

    /// Whether the step's effect is already present on the host.
    /// When true the action is skipped entirely.
    async fn is_satisfied(&self, host: &dyn HostEnvironment) -> Result<bool>;

    /// Perform the step's side effects. Only the editor-config step
    /// ever consults the prompter.
    async fn apply(
        &self,
        host: &dyn HostEnvironment,
        prompter: &dyn Prompter,
    ) -> Result<StepStatus>;
}

/// The fixed ordered catalog. Position is the only identity a step
/// has; the driver runs them top to bottom.
pub fn catalog(config: &SetupConfig) -> Vec<Box<dyn ProvisionStep>> {
    vec![
        Box::new(UpdatePackages),
        Box::new(InstallPackages::new(config)),
        Box::new(InstallOhMyZsh::new(config)),
        Box::new(InstallZshTheme::new(config)),
        Box::new(SetZshTheme::new(config)),
        Box::new(InstallFont::new(config)),
        Box::new(InstallEditorConfig::new(config)),
    ]
}
