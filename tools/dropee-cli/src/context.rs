//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use dropee_cache::{FileStorage, MemoryStorage, Storage};
use dropee_commerce::prelude::*;
use tracing::{debug, warn};

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names, checked in order in each directory.
const CONFIG_NAMES: [&str; 3] = ["dropee.toml", ".dropee.toml", "dropee.json"];

/// Cart store as the commands use it.
pub type Cart = CartStore<Box<dyn Storage>, PromotionBook>;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Directory relative paths in the config resolve against.
    pub root: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, root) = if let Some(path) = config_path {
            let config = CliConfig::load(path)?;
            let root = Path::new(path)
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| cwd.clone());
            (config, root)
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_else(|| (CliConfig::default(), cwd.clone()))
        };

        Ok(Self::new(config, output, root))
    }

    /// Context over an already loaded config.
    pub fn new(config: CliConfig, output: Output, root: PathBuf) -> Self {
        Self {
            config,
            output,
            root,
        }
    }

    /// Find config file in directory tree, returning it with its directory.
    fn find_config(start: &Path) -> Option<(CliConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match CliConfig::load(config_path.to_str()?) {
                        Ok(config) => {
                            debug!(path = %config_path.display(), "using config");
                            return Some((config, current));
                        }
                        Err(e) => warn!(path = %config_path.display(), "skipping config: {:#}", e),
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the context root.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    /// Directory the cart is saved in.
    pub fn storage_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.dir)
    }

    /// Storage backend for the cart.
    ///
    /// Falls back to in-memory storage when the directory cannot be used, so
    /// the command still runs; nothing is saved in that case.
    pub fn storage(&self) -> Box<dyn Storage> {
        let dir = self.storage_dir();
        match FileStorage::open(&dir) {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "cart storage unavailable, using memory");
                self.output
                    .warn("Cart storage is unavailable; changes will not be saved.");
                Box::new(MemoryStorage::new())
            }
        }
    }

    /// The configured catalog, or the built-in one.
    pub fn catalog(&self) -> Result<Catalog> {
        match &self.config.catalog.path {
            Some(path) => {
                let path = self.resolve_path(path);
                Catalog::load(&path)
                    .with_context(|| format!("Failed to load catalog: {}", path.display()))
            }
            None => Ok(Catalog::demo()),
        }
    }

    /// The configured promotions, or the built-in sample codes.
    pub fn promotions(&self) -> Result<PromotionBook> {
        let book = match &self.config.promotions.path {
            Some(path) => {
                let path = self.resolve_path(path);
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read promotions: {}", path.display()))?;
                PromotionBook::from_json(&content)
                    .with_context(|| format!("Failed to parse promotions: {}", path.display()))?
            }
            None => PromotionBook::demo(),
        };

        Ok(match self.config.promotions.as_of {
            Some(date) => book.as_of(date),
            None => book,
        })
    }

    /// Open the saved cart.
    pub fn open_cart(&self) -> Result<Cart> {
        let cart = CartStore::open_with_key(
            self.storage(),
            self.config.storage.cart_key.clone(),
            self.config.pricing_config(),
        )
        .with_promotions(self.promotions()?);
        Ok(cart)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_config_in_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("dropee.toml"),
            "[pricing]\ndelivery_fee = 15\n",
        )
        .unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, root) = Context::find_config(&nested).unwrap();
        assert_eq!(config.pricing.delivery_fee, 15);
        assert_eq!(root, dir.path());
    }

    #[test]
    fn storage_dir_is_relative_to_root() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::new(
            CliConfig::default(),
            Output::new(false, true),
            dir.path().to_path_buf(),
        );
        assert_eq!(ctx.storage_dir(), dir.path().join(".dropee"));
    }

    #[test]
    fn cart_persists_across_contexts() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = Context::new(
            CliConfig::default(),
            Output::new(false, true),
            dir.path().to_path_buf(),
        );
        let catalog = ctx.catalog().unwrap();

        let mut cart = ctx.open_cart().unwrap();
        cart.add_item(catalog.get(&ProductId::new("4")).unwrap());
        assert!(!cart.is_memory_only());

        let reopened = ctx.open_cart().unwrap();
        assert_eq!(reopened.total_items(), 1);
        assert!(dir.path().join(".dropee").join("hashtagDropeeCart.json").exists());
    }

    #[test]
    fn missing_catalog_file_is_an_error() {
        let mut config = CliConfig::default();
        config.catalog.path = Some(PathBuf::from("missing.json"));
        let ctx = Context::new(config, Output::new(false, true), PathBuf::from("/nonexistent"));
        assert!(ctx.catalog().is_err());
    }
}
