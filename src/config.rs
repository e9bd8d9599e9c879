//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/rsbench/rsbench.toml`
//! 3. Explicit config file (`--config <FILE>`)
//! 4. Environment variables: `RSBENCH_*` prefix, `__` between sections,
//!    e.g. `RSBENCH_BINARY_TREES__KIND=arena`
//!
//! Command-line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::{NodeBudget, TreeKind, DEFAULT_MIN_DEPTH};

/// Default benchmark parameter `n`.
pub const DEFAULT_N: i64 = 10;

/// Binary-trees run settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BinaryTreesConfig {
    /// Benchmark parameter; `max_depth = max(n, min_depth + 2)`
    pub n: i64,
    /// First depth of the per-depth loop
    pub min_depth: u32,
    /// Tree representation
    pub kind: TreeKind,
    /// Spread each batch over the rayon pool
    pub parallel: bool,
    /// Per-tree node budget; unlimited when absent
    pub max_nodes: Option<usize>,
}

impl Default for BinaryTreesConfig {
    fn default() -> Self {
        Self {
            n: DEFAULT_N,
            min_depth: DEFAULT_MIN_DEPTH,
            kind: TreeKind::default(),
            parallel: false,
            max_nodes: None,
        }
    }
}

impl BinaryTreesConfig {
    pub fn budget(&self) -> NodeBudget {
        self.max_nodes
            .map(NodeBudget::limited)
            .unwrap_or_else(NodeBudget::unlimited)
    }

    fn merge(&self, overlay: &RawBinaryTreesConfig) -> Self {
        Self {
            n: overlay.n.unwrap_or(self.n),
            min_depth: overlay.min_depth.unwrap_or(self.min_depth),
            kind: overlay.kind.unwrap_or(self.kind),
            parallel: overlay.parallel.unwrap_or(self.parallel),
            max_nodes: overlay.max_nodes.or(self.max_nodes),
        }
    }
}

/// Regex-redux run settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RegexReduxConfig {
    /// Count variants on the rayon pool
    pub parallel: bool,
}

/// Raw binary-trees config for intermediate parsing (Option detects "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawBinaryTreesConfig {
    pub n: Option<i64>,
    pub min_depth: Option<u32>,
    pub kind: Option<TreeKind>,
    pub parallel: Option<bool>,
    pub max_nodes: Option<usize>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRegexReduxConfig {
    pub parallel: Option<bool>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub binary_trees: RawBinaryTreesConfig,
    pub regex_redux: RawRegexReduxConfig,
}

/// Unified configuration for rsbench.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub binary_trees: BinaryTreesConfig,
    pub regex_redux: RegexReduxConfig,
}

/// Get the XDG config directory for rsbench.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rsbench").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rsbench.toml"))
}

/// Environment source for `RSBENCH_*` overrides.
pub fn env_source() -> Environment {
    Environment::with_prefix("RSBENCH")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

/// Missing keys are not an error; malformed values are.
fn lookup<T: DeserializeOwned>(config: &Config, key: &str) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

impl Settings {
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            binary_trees: self.binary_trees.merge(&overlay.binary_trees),
            regex_redux: RegexReduxConfig {
                parallel: overlay
                    .regex_redux
                    .parallel
                    .unwrap_or(self.regex_redux.parallel),
            },
        }
    }

    /// Load settings with layered precedence from the standard locations.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), config_file, env_source())
    }

    /// Load settings from explicit sources.
    ///
    /// # Arguments
    /// * `global_path` - Global config; skipped when absent or missing on disk
    /// * `config_file` - Explicit config; must exist when given
    /// * `env` - Environment source for overrides
    pub fn load_from(
        global_path: Option<&Path>,
        config_file: Option<&Path>,
        env: Environment,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_path {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Explicit config file
        if let Some(path) = config_file {
            debug!("config file: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables
        Self::apply_env_overrides(current, env)
    }

    /// Apply RSBENCH_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Some(val) = lookup::<i64>(&config, "binary_trees.n")? {
            settings.binary_trees.n = val;
        }
        if let Some(val) = lookup::<u32>(&config, "binary_trees.min_depth")? {
            settings.binary_trees.min_depth = val;
        }
        if let Some(val) = lookup::<String>(&config, "binary_trees.kind")? {
            settings.binary_trees.kind = val
                .parse()
                .map_err(|message| ApplicationError::Config { message })?;
        }
        if let Some(val) = lookup::<bool>(&config, "binary_trees.parallel")? {
            settings.binary_trees.parallel = val;
        }
        if let Some(val) = lookup::<usize>(&config, "binary_trees.max_nodes")? {
            settings.binary_trees.max_nodes = Some(val);
        }
        if let Some(val) = lookup::<bool>(&config, "regex_redux.parallel")? {
            settings.regex_redux.parallel = val;
        }

        Ok(settings)
    }

    /// Render the merged settings as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize settings: {}", e),
        })
    }
}
