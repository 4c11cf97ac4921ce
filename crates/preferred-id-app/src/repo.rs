// Rust guideline compliant 2026-10-12

//! Repository discovery and path management utilities.
//!
//! A repository is any directory holding a `.preferred-id/` folder with the
//! resource file and an optional `config.toml`.

use crate::error::{AppError, Result};
use preferred_id_core::{Config, ResourceStore};
use std::path::{Path, PathBuf};

/// Name of the data directory inside a repository root.
pub const DATA_DIR_NAME: &str = ".preferred-id";

/// Repository path metadata for a preferred-id workspace.
#[derive(Debug, Clone)]
pub struct RepoContext {
    root: PathBuf,
    data_dir: PathBuf,
    resources_path: PathBuf,
    config_path: PathBuf,
}

impl RepoContext {
    /// Discovers a repository starting from an optional root.
    ///
    /// # Arguments
    ///
    /// * `repo_root` - Optional repository root; defaults to the current directory
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The current directory cannot be resolved
    /// - The `.preferred-id` directory is missing
    pub fn discover(repo_root: Option<&Path>) -> Result<Self> {
        let root = match repo_root {
            Some(root) => root.to_path_buf(),
            None => std::env::current_dir()?,
        };
        let context = Self::at(root);
        if !context.data_dir.exists() {
            return Err(AppError::RepoNotInitialized {
                path: context.data_dir,
            });
        }
        Ok(context)
    }

    /// Creates the data directory with a default config if missing.
    ///
    /// Existing files are left untouched, so running it twice is harmless.
    ///
    /// # Arguments
    ///
    /// * `root` - Repository root directory
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or config file cannot be written.
    pub fn init(root: &Path) -> Result<Self> {
        let context = Self::at(root.to_path_buf());
        std::fs::create_dir_all(&context.data_dir)?;
        if !context.config_path.exists() {
            Config::default().save(&context.data_dir)?;
        }
        if !context.resources_path.exists() {
            context.open_store()?.save_all(&[])?;
        }
        Ok(context)
    }

    fn at(root: PathBuf) -> Self {
        let data_dir = root.join(DATA_DIR_NAME);
        Self {
            root,
            resources_path: data_dir.join("resources.jsonl"),
            config_path: data_dir.join("config.toml"),
            data_dir,
        }
    }

    /// Returns the repository root path.
    #[must_use]
    pub fn root(&self) -> &Path {
        self.root.as_path()
    }

    /// Returns the `.preferred-id` directory path.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        self.data_dir.as_path()
    }

    /// Returns the resources JSONL path.
    #[must_use]
    pub fn resources_path(&self) -> &Path {
        self.resources_path.as_path()
    }

    /// Returns the config TOML path.
    #[must_use]
    pub fn config_path(&self) -> &Path {
        self.config_path.as_path()
    }

    /// Opens the resource store.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be initialized.
    pub fn open_store(&self) -> Result<ResourceStore> {
        Ok(ResourceStore::new(self.resources_path.clone())?)
    }

    /// Loads repository configuration with environment overrides applied.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or is invalid.
    pub fn load_config(&self) -> Result<Config> {
        Ok(Config::load(self.data_dir())?)
    }
}
