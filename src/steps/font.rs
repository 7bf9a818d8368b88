//! Font Step
//!
//! Download the patched terminal font and reload the terminal's
//! settings so it takes effect. The reload is part of this step's
//! action and fatal on failure, like every other action; a re-run
//! with the font already in place skips both.

use std::path::PathBuf;

use anyhow::Result;
use async_trait::async_trait;

use crate::config::SetupConfig;
use crate::host::HostEnvironment;
use crate::prompts::Prompter;
use crate::types::StepStatus;

use super::ProvisionStep;

pub struct InstallFont {
    font_url: String,
    font_path: PathBuf,
}

impl InstallFont {
    pub fn new(config: &SetupConfig) -> Self {
        Self {
            font_url: config.font_url.clone(),
            font_path: config.font_path.clone(),
        }
    }
}

#[async_trait]
impl ProvisionStep for InstallFont {
    fn name(&self) -> &str {
        "install terminal font"
    }

    async fn is_satisfied(&self, host: &dyn HostEnvironment) -> Result<bool> {
        Ok(host.path_exists(&self.font_path))
    }

    async fn apply(
        &self,
        host: &dyn HostEnvironment,
        _prompter: &dyn Prompter,
    ) -> Result<StepStatus> {
        host.download_file(&self.font_url, &self.font_path).await?;
        host.reload_terminal_settings().await?;
        Ok(StepStatus::Applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fake::FakeHost;
    use crate::prompts::ScriptedPrompter;

    #[tokio::test]
    async fn test_download_then_reload() {
        let host = FakeHost::new();
        let config = SetupConfig::from_host(&host);
        let step = InstallFont::new(&config);
        let prompter = ScriptedPrompter::new(true);

        step.apply(&host, &prompter).await.unwrap();

        assert_eq!(
            host.actions(),
            vec![
                format!("download {} {}", config.font_url, config.font_path.display()),
                "reload-settings".to_string(),
            ]
        );
        // Font is now present; the step (and the reload) skip on re-run.
        assert!(step.is_satisfied(&host).await.unwrap());
    }

    #[tokio::test]
    async fn test_reload_failure_is_fatal() {
        let host = FakeHost::new();
        host.fail_on("reload-settings");

        let config = SetupConfig::from_host(&host);
        let step = InstallFont::new(&config);
        let prompter = ScriptedPrompter::new(true);

        assert!(step.apply(&host, &prompter).await.is_err());
    }
}
