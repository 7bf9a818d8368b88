//! Setup Configuration
//!
//! Package lists, URLs, and filesystem targets for the provisioning
//! run -- all of it is data, resolved once against the host at
//! startup. The only environment variable honored is the optional
//! custom-themes directory (`ZSH_CUSTOM`), read defensively with a
//! default fallback.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::host::HostEnvironment;

/// Upstream installer script for the zsh framework.
const OMZ_INSTALL_URL: &str =
    "https://raw.githubusercontent.com/ohmyzsh/ohmyzsh/master/tools/install.sh";

/// Theme repository, cloned shallow into the custom themes directory.
const THEME_REPO_URL: &str = "https://github.com/romkatv/powerlevel10k.git";

/// Theme identifier written into `.zshrc`.
const THEME_NAME: &str = "powerlevel10k/powerlevel10k";

/// Patched nerd font the theme's glyphs need.
const FONT_URL: &str =
    "https://github.com/romkatv/powerlevel10k-media/raw/master/MesloLGS%20NF%20Regular.ttf";

/// Editor configuration repository.
const EDITOR_REPO_URL: &str = "https://github.com/NvChad/NvChad";

/// Optional override for the zsh custom directory.
const ZSH_CUSTOM_VAR: &str = "ZSH_CUSTOM";

/// One package to install, with the binary name its presence is
/// checked by (they differ for neovim).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSpec {
    pub name: String,
    pub binary: String,
}

impl PackageSpec {
    fn new(name: &str, binary: &str) -> Self {
        Self {
            name: name.to_string(),
            binary: binary.to_string(),
        }
    }
}

/// Everything the step catalog needs, resolved against one host.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupConfig {
    pub packages: Vec<PackageSpec>,
    pub omz_install_url: String,
    pub omz_dir: PathBuf,
    pub theme_repo_url: String,
    pub theme_name: String,
    pub theme_dir: PathBuf,
    pub zshrc_path: PathBuf,
    pub font_url: String,
    pub font_path: PathBuf,
    pub editor_repo_url: String,
    pub editor_config_dir: PathBuf,
}

impl SetupConfig {
    /// Build the default configuration against a host: resolve the
    /// home directory and the optional custom-themes override.
    pub fn from_host(host: &dyn HostEnvironment) -> Self {
        let home = host.home_dir();

        let custom_dir = host
            .env_var(ZSH_CUSTOM_VAR)
            .map(|value| resolve_path(&value, &home))
            .unwrap_or_else(|| home.join(".oh-my-zsh").join("custom"));

        Self {
            packages: vec![
                PackageSpec::new("git", "git"),
                PackageSpec::new("zsh", "zsh"),
                PackageSpec::new("curl", "curl"),
                PackageSpec::new("wget", "wget"),
                PackageSpec::new("neovim", "nvim"),
            ],
            omz_install_url: OMZ_INSTALL_URL.to_string(),
            omz_dir: home.join(".oh-my-zsh"),
            theme_repo_url: THEME_REPO_URL.to_string(),
            theme_name: THEME_NAME.to_string(),
            theme_dir: custom_dir.join("themes").join("powerlevel10k"),
            zshrc_path: home.join(".zshrc"),
            font_url: FONT_URL.to_string(),
            font_path: home.join(".termux").join("font.ttf"),
            editor_repo_url: EDITOR_REPO_URL.to_string(),
            editor_config_dir: home.join(".config").join("nvim"),
        }
    }
}

/// Resolve a path that may start with `~` against the given home
/// directory. Anything else is returned as-is.
pub fn resolve_path(p: &str, home: &Path) -> PathBuf {
    if let Some(rest) = p.strip_prefix('~') {
        let rest = rest.strip_prefix('/').unwrap_or(rest);
        home.join(rest)
    } else {
        PathBuf::from(p)
    }
}
