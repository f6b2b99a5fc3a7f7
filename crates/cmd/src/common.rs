// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use newsletter::{Clock, PipelineConfig, SystemClock};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "retro.yaml";

/// Everything a command needs from the command line and environment.
pub struct CommandContext {
    /// Explicit `--config` / `RETRO_CONFIG`
    pub config_path: Option<PathBuf>,
    /// Directory the default config and default paths are relative to
    pub working_dir: PathBuf,
    pub clock: Box<dyn Clock>,
}

impl CommandContext {
    pub fn new(config_path: Option<PathBuf>) -> Result<Self> {
        let working_dir =
            std::env::current_dir().with_context(|| "Failed to read the working directory")?;
        Ok(Self {
            config_path,
            working_dir,
            clock: Box::new(SystemClock),
        })
    }

    /// Context rooted at `working_dir` with a caller-supplied clock.
    pub fn with_clock(
        config_path: Option<PathBuf>,
        working_dir: &Path,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            config_path,
            working_dir: working_dir.to_path_buf(),
            clock,
        }
    }

    /// Resolve configuration: the explicit file if one was named, else
    /// `retro.yaml` in the working directory if present, else defaults.
    pub fn load_config(&self) -> Result<PipelineConfig> {
        if let Some(path) = &self.config_path {
            let path = self.working_dir.join(path);
            return newsletter::load_config(&path)
                .with_context(|| format!("Failed to load config {}", path.display()));
        }

        let default_path = self.working_dir.join(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            return newsletter::load_config(&default_path)
                .with_context(|| format!("Failed to load config {}", default_path.display()));
        }

        Ok(PipelineConfig::default().resolve_paths(&self.working_dir))
    }
}

/// Path relative to the working directory when possible, for display.
pub fn display_path(path: &Path, working_dir: &Path) -> String {
    path.strip_prefix(working_dir)
        .unwrap_or(path)
        .display()
        .to_string()
}
