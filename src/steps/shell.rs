//! Shell Steps
//!
//! Install the zsh framework, clone the theme into the custom themes
//! directory, and point `.zshrc` at the new theme.

use std::path::PathBuf;

use anyhow::{bail, Result};
use async_trait::async_trait;
use regex::Regex;

use crate::config::SetupConfig;
use crate::host::HostEnvironment;
use crate::prompts::Prompter;
use crate::types::StepStatus;

use super::ProvisionStep;

/// Pattern for the theme line in `.zshrc`. Matched per line, first
/// hit is replaced wholesale.
const THEME_LINE_PATTERN: &str = r"^ZSH_THEME=.*$";

/// Fetch and run the oh-my-zsh installer, unattended.
pub struct InstallOhMyZsh {
    install_url: String,
    omz_dir: PathBuf,
}

impl InstallOhMyZsh {
    pub fn new(config: &SetupConfig) -> Self {
        Self {
            install_url: config.omz_install_url.clone(),
            omz_dir: config.omz_dir.clone(),
        }
    }
}

#[async_trait]
impl ProvisionStep for InstallOhMyZsh {
    fn name(&self) -> &str {
        "install oh-my-zsh"
    }

    async fn is_satisfied(&self, host: &dyn HostEnvironment) -> Result<bool> {
        Ok(host.path_exists(&self.omz_dir))
    }

    async fn apply(
        &self,
        host: &dyn HostEnvironment,
        _prompter: &dyn Prompter,
    ) -> Result<StepStatus> {
        // The installer would normally chsh and exec zsh; both are
        // suppressed so the pipeline keeps control of the terminal.
        let envs = vec![
            ("RUNZSH".to_string(), "no".to_string()),
            ("CHSH".to_string(), "no".to_string()),
        ];
        host.run_remote_script(&self.install_url, &envs).await?;
        Ok(StepStatus::Applied)
    }
}

/// Shallow-clone the theme repository.
pub struct InstallZshTheme {
    repo_url: String,
    theme_dir: PathBuf,
}

impl InstallZshTheme {
    pub fn new(config: &SetupConfig) -> Self {
        Self {
            repo_url: config.theme_repo_url.clone(),
            theme_dir: config.theme_dir.clone(),
        }
    }
}

#[async_trait]
impl ProvisionStep for InstallZshTheme {
    fn name(&self) -> &str {
        "install zsh theme"
    }

    async fn is_satisfied(&self, host: &dyn HostEnvironment) -> Result<bool> {
        Ok(host.path_exists(&self.theme_dir))
    }

    async fn apply(
        &self,
        host: &dyn HostEnvironment,
        _prompter: &dyn Prompter,
    ) -> Result<StepStatus> {
        host.clone_repository(&self.repo_url, &self.theme_dir, Some(1))
            .await?;
        Ok(StepStatus::Applied)
    }
}

/// Rewrite the `ZSH_THEME=...` line in `.zshrc`.
pub struct SetZshTheme {
    zshrc_path: PathBuf,
    theme_name: String,
}

impl SetZshTheme {
    pub fn new(config: &SetupConfig) -> Self {
        Self {
            zshrc_path: config.zshrc_path.clone(),
            theme_name: config.theme_name.clone(),
        }
    }

    fn theme_line(&self) -> String {
        format!("ZSH_THEME=\"{}\"", self.theme_name)
    }
}

#[async_trait]
impl ProvisionStep for SetZshTheme {
    fn name(&self) -> &str {
        "set zsh theme"
    }

    async fn is_satisfied(&self, host: &dyn HostEnvironment) -> Result<bool> {
        if !host.path_exists(&self.zshrc_path) {
            return Ok(false);
        }
        let contents = host.read_file(&self.zshrc_path)?;
        Ok(contents.contains(&self.theme_line()))
    }

    async fn apply(
        &self,
        host: &dyn HostEnvironment,
        _prompter: &dyn Prompter,
    ) -> Result<StepStatus> {
        let pattern = Regex::new(THEME_LINE_PATTERN)?;
        let changed = host.replace_line(&self.zshrc_path, &pattern, &self.theme_line())?;
        if !changed {
            bail!(
                "no ZSH_THEME line found in {}",
                self.zshrc_path.display()
            );
        }
        Ok(StepStatus::Applied)
    }
}
