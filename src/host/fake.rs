//! Fake Host
//!
//! In-memory [`HostEnvironment`] for tests. Existence checks are
//! answered from a path set, file edits operate on an in-memory map,
//! and every mutating call is recorded in order so tests can assert
//! exactly which actions a run performed.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{bail, Result};
use async_trait::async_trait;
use regex::Regex;

use super::HostEnvironment;

#[derive(Default)]
struct FakeState {
    home: PathBuf,
    env: HashMap<String, String>,
    paths: HashSet<PathBuf>,
    files: HashMap<PathBuf, String>,
    commands: HashSet<String>,
    actions: Vec<String>,
    fail_on: Option<String>,
}

pub struct FakeHost {
    state: Mutex<FakeState>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                home: PathBuf::from("/home/tester"),
                ..Default::default()
            }),
        }
    }

    pub fn set_env(&self, name: &str, value: &str) {
        let mut state = self.state.lock().unwrap();
        state.env.insert(name.to_string(), value.to_string());
    }

    pub fn add_path(&self, path: impl Into<PathBuf>) {
        let mut state = self.state.lock().unwrap();
        state.paths.insert(path.into());
    }

    pub fn add_command(&self, name: &str) {
        let mut state = self.state.lock().unwrap();
        state.commands.insert(name.to_string());
    }

    /// Seed a file with contents; the path also becomes existent.
    pub fn write_file(&self, path: impl Into<PathBuf>, contents: &str) {
        let mut state = self.state.lock().unwrap();
        let path = path.into();
        state.paths.insert(path.clone());
        state.files.insert(path, contents.to_string());
    }

    pub fn file_contents(&self, path: &Path) -> Option<String> {
        let state = self.state.lock().unwrap();
        state.files.get(path).cloned()
    }

    /// Every recorded mutating action, in the order it ran.
    pub fn actions(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.actions.clone()
    }

    /// Make the action whose label starts with `prefix` fail.
    pub fn fail_on(&self, prefix: &str) {
        let mut state = self.state.lock().unwrap();
        state.fail_on = Some(prefix.to_string());
    }

    fn record(&self, label: String) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(prefix) = &state.fail_on {
            if label.starts_with(prefix.as_str()) {
                bail!("injected failure: {}", label);
            }
        }
        state.actions.push(label);
        Ok(())
    }
}

impl Default for FakeHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HostEnvironment for FakeHost {
    fn home_dir(&self) -> PathBuf {
        self.state.lock().unwrap().home.clone()
    }

    fn env_var(&self, name: &str) -> Option<String> {
        self.state.lock().unwrap().env.get(name).cloned()
    }

    fn path_exists(&self, path: &Path) -> bool {
        self.state.lock().unwrap().paths.contains(path)
    }

    fn command_available(&self, name: &str) -> bool {
        self.state.lock().unwrap().commands.contains(name)
    }

    async fn update_packages(&self) -> Result<()> {
        self.record("update-packages".to_string())
    }

    async fn upgrade_packages(&self) -> Result<()> {
        self.record("upgrade-packages".to_string())
    }

    async fn install_packages(&self, packages: &[String]) -> Result<()> {
        self.record(format!("install-packages {}", packages.join(" ")))?;
        let mut state = self.state.lock().unwrap();
        for package in packages {
            state.commands.insert(package.clone());
        }
        Ok(())
    }

    async fn run_remote_script(&self, url: &str, _envs: &[(String, String)]) -> Result<()> {
        self.record(format!("run-remote-script {}", url))
    }

    async fn download_file(&self, url: &str, dest: &Path) -> Result<()> {
        self.record(format!("download {} {}", url, dest.display()))?;
        let mut state = self.state.lock().unwrap();
        state.paths.insert(dest.to_path_buf());
        Ok(())
    }

    async fn clone_repository(&self, url: &str, dest: &Path, _depth: Option<u32>) -> Result<()> {
        self.record(format!("clone {} {}", url, dest.display()))?;
        let mut state = self.state.lock().unwrap();
        state.paths.insert(dest.to_path_buf());
        state.paths.insert(dest.join(".git"));
        Ok(())
    }

    fn read_file(&self, path: &Path) -> Result<String> {
        let state = self.state.lock().unwrap();
        match state.files.get(path) {
            Some(contents) => Ok(contents.clone()),
            None => bail!("no such file: {}", path.display()),
        }
    }

    fn replace_line(&self, path: &Path, pattern: &Regex, replacement: &str) -> Result<bool> {
        self.record(format!("replace-line {}", path.display()))?;

        let mut state = self.state.lock().unwrap();
        let Some(contents) = state.files.get(path).cloned() else {
            bail!("no such file: {}", path.display());
        };

        let mut changed = false;
        let lines: Vec<String> = contents
            .lines()
            .map(|line| {
                if !changed && pattern.is_match(line) {
                    changed = true;
                    replacement.to_string()
                } else {
                    line.to_string()
                }
            })
            .collect();

        if changed {
            state.files.insert(path.to_path_buf(), lines.join("\n"));
        }

        Ok(changed)
    }

    fn remove_dir_all(&self, path: &Path) -> Result<()> {
        self.record(format!("remove-dir {}", path.display()))?;
        let mut state = self.state.lock().unwrap();
        state.paths.retain(|p| !p.starts_with(path));
        state.files.retain(|p, _| !p.starts_with(path));
        Ok(())
    }

    async fn reload_terminal_settings(&self) -> Result<()> {
        self.record("reload-settings".to_string())
    }
}
