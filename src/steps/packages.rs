//! Package Steps
//!
//! Refresh the package index and install the fixed package list.
//! The index refresh has no filesystem precondition and always runs;
//! the install step is satisfied once every required binary resolves
//! on PATH.

use anyhow::Result;
use async_trait::async_trait;

use crate::config::{PackageSpec, SetupConfig};
use crate::host::HostEnvironment;
use crate::prompts::Prompter;
use crate::types::StepStatus;

use super::ProvisionStep;

/// Package index update + full upgrade.
pub struct UpdatePackages;

#[async_trait]
impl ProvisionStep for UpdatePackages {
    fn name(&self) -> &str {
        "update packages"
    }

    async fn is_satisfied(&self, _host: &dyn HostEnvironment) -> Result<bool> {
        // A stale index is invisible from the filesystem; always refresh.
        Ok(false)
    }

    async fn apply(
        &self,
        host: &dyn HostEnvironment,
        _prompter: &dyn Prompter,
    ) -> Result<StepStatus> {
        host.update_packages().await?;
        host.upgrade_packages().await?;
        Ok(StepStatus::Applied)
    }
}

/// Install git, zsh, curl, wget, and neovim.
pub struct InstallPackages {
    packages: Vec<PackageSpec>,
}

impl InstallPackages {
    pub fn new(config: &SetupConfig) -> Self {
        Self {
            packages: config.packages.clone(),
        }
    }
}

#[async_trait]
impl ProvisionStep for InstallPackages {
    fn name(&self) -> &str {
        "install packages"
    }

    async fn is_satisfied(&self, host: &dyn HostEnvironment) -> Result<bool> {
        Ok(self
            .packages
            .iter()
            .all(|p| host.command_available(&p.binary)))
    }

    async fn apply(
        &self,
        host: &dyn HostEnvironment,
        _prompter: &dyn Prompter,
    ) -> Result<StepStatus> {
        let names: Vec<String> = self.packages.iter().map(|p| p.name.clone()).collect();
        host.install_packages(&names).await?;
        Ok(StepStatus::Applied)
    }
}
