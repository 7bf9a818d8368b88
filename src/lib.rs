//! termsetup -- Terminal Environment Provisioner
//!
//! One-shot first-run setup for a Termux-style terminal emulator:
//! packages, zsh framework and theme, terminal font, and editor
//! configuration. Every step is idempotent-by-check and the run
//! as a whole is fail-fast.

pub mod types;
pub mod config;
pub mod host;
pub mod prompts;
pub mod steps;
pub mod pipeline;
