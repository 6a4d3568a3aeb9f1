//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use shop_state::{Storefront, StorefrontConfig};

use crate::output::{Output, SpinnerProgress};

/// Config file names searched for, nearest directory first.
const CONFIG_NAMES: [&str; 3] = ["shop.toml", ".shop.toml", "shop.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Storefront configuration, environment overrides applied.
    pub config: StorefrontConfig,
    /// Where the configuration came from, if a file was used.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let config = StorefrontConfig::load(path)
                    .with_context(|| format!("Failed to load config: {}", path))?;
                (config, Some(PathBuf::from(path)))
            }
            // Try to find config in current directory or parent directories
            None => match find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (StorefrontConfig::default(), None),
            },
        };

        let mut config = config.with_env();
        if config.auth.token_file.is_none() {
            config.auth.token_file = Some(default_session_file());
        }

        Ok(Self {
            config,
            config_path,
            output,
        })
    }

    /// Open a storefront session whose requests drive the spinner.
    pub fn storefront(&self) -> Result<Storefront> {
        let progress = Arc::new(SpinnerProgress::new(
            self.output.clone(),
            self.config.loading.indicator(),
        ));
        let storefront = Storefront::native(self.config.clone(), progress)
            .context("Failed to set up storefront client")?;
        Ok(storefront)
    }
}

/// Find config file in directory tree.
fn find_config(start: &Path) -> Option<(StorefrontConfig, PathBuf)> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                if let Ok(config) = StorefrontConfig::load(&config_path) {
                    return Some((config, config_path));
                }
            }
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Session file used when the config names none.
fn default_session_file() -> PathBuf {
    data_dir().join("shop-cli").join("session.json")
}

/// Get the platform-specific data directory.
fn data_dir() -> PathBuf {
    if let Some(home) = std::env::var_os("HOME") {
        PathBuf::from(home).join(".local").join("share")
    } else {
        PathBuf::from("/tmp")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(
            root.path().join("shop.toml"),
            "[api]\nbase_url = \"https://api.shop.test\"\n",
        )
        .unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, path) = find_config(&nested).unwrap();
        assert_eq!(config.api.base_url, "https://api.shop.test");
        assert_eq!(path, root.path().join("shop.toml"));
    }

    #[test]
    fn test_default_session_file() {
        assert!(default_session_file().ends_with("shop-cli/session.json"));
    }
}
