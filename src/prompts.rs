//! Prompts
//!
//! The one interactive capability the pipeline needs: a yes/no
//! confirmation. Uses the `dialoguer` crate for input handling,
//! injected as a trait so tests can script the answer.

use anyhow::Result;
use colored::Colorize;
use dialoguer::Confirm;

/// A yes/no question put to the operator.
pub trait Prompter: Send + Sync {
    fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Real terminal prompter. Defaults to "no" on a bare Enter, since
/// the only prompted action is destructive.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        let answer = Confirm::new()
            .with_prompt(format!("  {} {}", "\u{2192}".cyan(), prompt.white()))
            .default(false)
            .interact()?;
        Ok(answer)
    }
}

/// Scripted prompter for tests: always answers the same, and counts
/// how many times it was consulted.
#[cfg(test)]
pub struct ScriptedPrompter {
    answer: bool,
    asked: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub fn times_asked(&self) -> usize {
        self.asked.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn confirm(&self, _prompt: &str) -> Result<bool> {
        self.asked
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(self.answer)
    }
}
