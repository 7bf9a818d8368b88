//! Host Environment
//!
//! Everything the pipeline touches on the machine goes through the
//! [`HostEnvironment`] trait: package manager, network fetches,
//! repository clones, file edits, and existence checks. Steps only
//! ever see `&dyn HostEnvironment`, so the whole pipeline runs
//! against a fake host in tests without touching a real machine.

pub mod local;

#[cfg(test)]
pub mod fake;

use std::path::{Path, PathBuf};

use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;

pub use local::LocalHost;

/// Capabilities of the machine being provisioned.
#[async_trait]
pub trait HostEnvironment: Send + Sync {
    /// The user's home directory.
    fn home_dir(&self) -> PathBuf;

    /// Read an environment variable, if set.
    fn env_var(&self, name: &str) -> Option<String>;

    /// Whether a file or directory exists at `path`.
    fn path_exists(&self, path: &Path) -> bool;

    /// Whether `name` resolves to an executable on PATH.
    fn command_available(&self, name: &str) -> bool;

    /// Refresh the package manager's index.
    async fn update_packages(&self) -> Result<()>;

    /// Upgrade all installed packages.
    async fn upgrade_packages(&self) -> Result<()>;

    /// Install the named packages.
    async fn install_packages(&self, packages: &[String]) -> Result<()>;

    /// Fetch an installer script from `url` and execute it with the
    /// given environment variables.
    async fn run_remote_script(&self, url: &str, envs: &[(String, String)]) -> Result<()>;

    /// Download `url` to `dest`, creating parent directories as needed.
    async fn download_file(&self, url: &str, dest: &Path) -> Result<()>;

    /// Clone a repository to `dest`, optionally shallow.
    async fn clone_repository(&self, url: &str, dest: &Path, depth: Option<u32>) -> Result<()>;

    /// Read a file to a string.
    fn read_file(&self, path: &Path) -> Result<String>;

    /// Replace the first line of `path` matching `pattern` with
    /// `replacement` (the whole line is substituted). Returns whether
    /// any line changed.
    fn replace_line(&self, path: &Path, pattern: &Regex, replacement: &str) -> Result<bool>;

    /// Remove a directory and everything under it.
    fn remove_dir_all(&self, path: &Path) -> Result<()>;

    /// Ask the terminal emulator to reload its settings (font, colors).
    async fn reload_terminal_settings(&self) -> Result<()>;
}
