//! Process-wide configuration.
//!
//! Built once at startup from the environment and CLI flags, then shared
//! read-only by every tool call.

use clap::Parser;
use recordbridge_bridge::{BridgeConfig, DEFAULT_EVALUATOR};
use std::path::{Path, PathBuf};

pub const PROJECTS_ROOT_ENV: &str = "RECORDBRIDGE_PROJECTS_ROOT";
pub const MODELS_PATH_ENV: &str = "RECORDBRIDGE_MODELS_PATH";
pub const EVALUATOR_ENV: &str = "RECORDBRIDGE_EVALUATOR";

const DEFAULT_MODELS_PATH: &str = "app/models";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Application root; working directory of every evaluator process.
    pub projects_root: PathBuf,
    /// Model source directory, relative to `projects_root` unless absolute.
    pub models_path: PathBuf,
    /// Interpreter that evaluates compiled queries.
    pub evaluator: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            projects_root: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            models_path: PathBuf::from(DEFAULT_MODELS_PATH),
            evaluator: DEFAULT_EVALUATOR.to_string(),
        }
    }
}

impl Config {
    /// Defaults overridden by `RECORDBRIDGE_*` variables. Blank values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(root) = var(PROJECTS_ROOT_ENV) {
            config.projects_root = PathBuf::from(root);
        }
        if let Some(models) = var(MODELS_PATH_ENV) {
            config.models_path = PathBuf::from(models);
        }
        if let Some(evaluator) = var(EVALUATOR_ENV) {
            config.evaluator = evaluator;
        }
        config
    }

    /// CLI flags win over the environment.
    pub fn apply_args(mut self, args: &Args) -> Self {
        if let Some(root) = &args.projects_root {
            self.projects_root = root.clone();
        }
        if let Some(models) = &args.models_path {
            self.models_path = models.clone();
        }
        if let Some(evaluator) = &args.evaluator {
            self.evaluator = evaluator.clone();
        }
        self
    }

    pub fn models_dir(&self) -> PathBuf {
        resolve_under(&self.projects_root, &self.models_path)
    }

    pub fn bridge_config(&self) -> BridgeConfig {
        BridgeConfig::new(self.projects_root.clone()).with_evaluator(self.evaluator.clone())
    }
}

fn resolve_under(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[derive(Debug, Default, Parser)]
#[command(name = "recordbridge-mcp")]
#[command(about = "Read-only record queries for AI agents via MCP", long_about = None)]
#[command(version)]
pub struct Args {
    /// Application root (overrides RECORDBRIDGE_PROJECTS_ROOT; default: cwd)
    #[arg(long)]
    pub projects_root: Option<PathBuf>,

    /// Model directory relative to the root (overrides RECORDBRIDGE_MODELS_PATH)
    #[arg(long)]
    pub models_path: Option<PathBuf>,

    /// Interpreter used to evaluate queries (overrides RECORDBRIDGE_EVALUATOR)
    #[arg(long)]
    pub evaluator: Option<String>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
