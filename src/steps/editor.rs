//! Editor Config Step
//!
//! Clone the editor configuration into `~/.config/nvim`. This is the
//! only step with an interactive branch: when a config directory
//! already exists, the operator decides whether to replace it. A
//! decline leaves the directory untouched and the pipeline continues.
//! The clone's internal `.git` metadata is stripped afterwards so the
//! config is a plain directory, not a checkout.

use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::SetupConfig;
use crate::host::HostEnvironment;
use crate::prompts::Prompter;
use crate::types::StepStatus;

use super::ProvisionStep;

pub struct InstallEditorConfig {
    repo_url: String,
    config_dir: PathBuf,
}

impl InstallEditorConfig {
    pub fn new(config: &SetupConfig) -> Self {
        Self {
            repo_url: config.editor_repo_url.clone(),
            config_dir: config.editor_config_dir.clone(),
        }
    }
}

#[async_trait]
impl ProvisionStep for InstallEditorConfig {
    fn name(&self) -> &str {
        "install editor config"
    }

    async fn is_satisfied(&self, _host: &dyn HostEnvironment) -> Result<bool> {
        // An existing directory is not "satisfied": whether to keep it
        // is the operator's call, made in apply.
        Ok(false)
    }

    async fn apply(
        &self,
        host: &dyn HostEnvironment,
        prompter: &dyn Prompter,
    ) -> Result<StepStatus> {
        if host.path_exists(&self.config_dir) {
            let replace = prompter.confirm(&format!(
                "Existing editor config found at {}. Replace it?",
                self.config_dir.display()
            ))?;
            if !replace {
                return Ok(StepStatus::Declined);
            }
            host.remove_dir_all(&self.config_dir)?;
        }

        host.clone_repository(&self.repo_url, &self.config_dir, Some(1))
            .await?;
        host.remove_dir_all(&self.config_dir.join(".git"))?;

        Ok(StepStatus::Applied)
    }
}
