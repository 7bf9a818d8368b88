//! Local Host
//!
//! The real [`HostEnvironment`]: shells out to the package manager and
//! git, downloads over HTTP with `reqwest`, and edits files in place.
//! Network operations inherit the HTTP client's default timeout
//! behavior; nothing here retries.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use regex::Regex;
use tokio::process::Command;

use super::HostEnvironment;

/// The package manager binary on a Termux-style host.
const PKG_COMMAND: &str = "pkg";

/// The terminal emulator's settings-reload binary.
const RELOAD_COMMAND: &str = "termux-reload-settings";

pub struct LocalHost {
    client: reqwest::Client,
}

impl LocalHost {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Run a command to completion and fail with its stderr on a
    /// non-zero exit.
    async fn run_checked(
        &self,
        program: &str,
        args: &[&str],
        envs: &[(String, String)],
    ) -> Result<()> {
        let mut cmd = Command::new(program);
        cmd.args(args);
        for (key, value) in envs {
            cmd.env(key, value);
        }

        let output = cmd
            .output()
            .await
            .with_context(|| format!("Failed to execute {}", program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let detail = if stderr.trim().is_empty() {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            } else {
                stderr.trim().to_string()
            };
            bail!(
                "{} {} exited with {}: {}",
                program,
                args.join(" "),
                output.status,
                detail
            );
        }

        Ok(())
    }
}

impl Default for LocalHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostEnvironment for LocalHost {
    fn home_dir(&self) -> PathBuf {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from("/root"))
    }

    fn env_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    fn path_exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn command_available(&self, name: &str) -> bool {
        let Some(path) = std::env::var_os("PATH") else {
            return false;
        };
        std::env::split_paths(&path).any(|dir| dir.join(name).is_file())
    }

    async fn update_packages(&self) -> Result<()> {
        self.run_checked(PKG_COMMAND, &["update", "-y"], &[]).await
    }

    async fn upgrade_packages(&self) -> Result<()> {
        self.run_checked(PKG_COMMAND, &["upgrade", "-y"], &[]).await
    }

    async fn install_packages(&self, packages: &[String]) -> Result<()> {
        let mut args = vec!["install", "-y"];
        args.extend(packages.iter().map(String::as_str));
        self.run_checked(PKG_COMMAND, &args, &[]).await
    }

    async fn run_remote_script(&self, url: &str, envs: &[(String, String)]) -> Result<()> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch installer from {}", url))?;

        if !resp.status().is_success() {
            bail!("Installer fetch failed: {} {}", resp.status(), url);
        }

        let body = resp
            .text()
            .await
            .context("Failed to read installer script body")?;

        let script_path = std::env::temp_dir().join("termsetup-installer.sh");
        fs::write(&script_path, body).context("Failed to write installer script")?;

        let script_str = script_path.to_string_lossy().to_string();
        let result = self.run_checked("sh", &[&script_str], envs).await;

        let _ = fs::remove_file(&script_path);
        result
    }

    async fn download_file(&self, url: &str, dest: &Path) -> Result<()> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to download {}", url))?;

        if !resp.status().is_success() {
            bail!("Download failed: {} {}", resp.status(), url);
        }

        let bytes = resp
            .bytes()
            .await
            .context("Failed to read download body")?;

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        fs::write(dest, &bytes).with_context(|| format!("Failed to write {}", dest.display()))
    }

    async fn clone_repository(&self, url: &str, dest: &Path, depth: Option<u32>) -> Result<()> {
        let dest_str = dest.to_string_lossy().to_string();
        let depth_str;
        let mut args = vec!["clone"];
        if let Some(d) = depth {
            depth_str = d.to_string();
            args.push("--depth");
            args.push(&depth_str);
        }
        args.push(url);
        args.push(&dest_str);

        self.run_checked("git", &args, &[]).await
    }

    fn read_file(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
    }

    fn replace_line(&self, path: &Path, pattern: &Regex, replacement: &str) -> Result<bool> {
        let contents = self.read_file(path)?;

        let mut changed = false;
        let mut lines: Vec<String> = Vec::new();
        for line in contents.lines() {
            if !changed && pattern.is_match(line) {
                lines.push(replacement.to_string());
                changed = true;
            } else {
                lines.push(line.to_string());
            }
        }

        if changed {
            let mut rewritten = lines.join("\n");
            if contents.ends_with('\n') {
                rewritten.push('\n');
            }
            fs::write(path, rewritten)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }

        Ok(changed)
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        fs::remove_dir_all(path).with_context(|| format!("Failed to remove {}", path.display()))
    }

    async fn reload_terminal_settings(&self) -> Result<()> {
        self.run_checked(RELOAD_COMMAND, &[], &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_line_rewrites_first_match_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zshrc");
        fs::write(&path, "# header\nZSH_THEME=\"robbyrussell\"\nZSH_THEME=\"other\"\n").unwrap();

        let host = LocalHost::new();
        let pattern = Regex::new(r"^ZSH_THEME=.*$").unwrap();
        let changed = host
            .replace_line(&path, &pattern, "ZSH_THEME=\"powerlevel10k/powerlevel10k\"")
            .unwrap();

        assert!(changed);
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "# header\nZSH_THEME=\"powerlevel10k/powerlevel10k\"\nZSH_THEME=\"other\"\n"
        );
    }

    #[test]
    fn test_replace_line_reports_no_match() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zshrc");
        fs::write(&path, "# nothing relevant\n").unwrap();

        let host = LocalHost::new();
        let pattern = Regex::new(r"^ZSH_THEME=.*$").unwrap();
        let changed = host.replace_line(&path, &pattern, "x").unwrap();

        assert!(!changed);
        assert_eq!(fs::read_to_string(&path).unwrap(), "# nothing relevant\n");
    }

    #[test]
    fn test_remove_dir_all() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nvim");
        fs::create_dir_all(target.join(".git")).unwrap();

        let host = LocalHost::new();
        assert!(host.path_exists(&target));
        host.remove_dir_all(&target).unwrap();
        assert!(!host.path_exists(&target));
    }

    #[test]
    fn test_command_available_finds_sh() {
        let host = LocalHost::new();
        assert!(host.command_available("sh"));
        assert!(!host.command_available("definitely-not-a-real-binary"));
    }
}
