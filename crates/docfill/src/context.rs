//! Global context for CLI commands

use anyhow::{Context as _, Result};
use docfill_core::config::Config;
use docfill_core::config::consts::CONFIG_FILE_NAME;
use docfill_templates::{TemplateRegistry, TemplateSession, source_from_config};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loaded configuration and where it came from
pub struct Context {
    pub config: Config,
    /// Directory relative config paths resolve against
    pub base_dir: PathBuf,
    pub verbose: bool,
}

impl Context {
    /// Load `--config`, or `./docfill.toml`, or the built-in defaults
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit config file is missing, or if any
    /// config file cannot be parsed or fails validation
    pub fn new(config_path: Option<&Path>, verbose: bool) -> Result<Self> {
        let current_dir = env::current_dir()?;

        let (config, base_dir) = match config_path {
            Some(path) => {
                let config = Config::from_file(path)
                    .with_context(|| format!("Failed to load {}", path.display()))?;
                let base_dir = path
                    .parent()
                    .filter(|p| !p.as_os_str().is_empty())
                    .map(|p| current_dir.join(p))
                    .unwrap_or_else(|| current_dir.clone());
                (config, base_dir)
            }
            None => {
                let config = Config::load_or_default(&current_dir)
                    .with_context(|| format!("Failed to load {}", CONFIG_FILE_NAME))?;
                (config, current_dir)
            }
        };
        debug!(base_dir = %base_dir.display(), source = %config.templates.source, "loaded config");

        Ok(Self {
            config,
            base_dir,
            verbose,
        })
    }

    /// Fresh session over the configured registry and source
    pub fn session(&self) -> Result<TemplateSession> {
        let registry = TemplateRegistry::from_config(&self.config.templates);
        let source = source_from_config(&self.config.templates, &self.base_dir)?;

        Ok(
            TemplateSession::new(registry, source, self.config.form.clone())
                .with_report_prefix(self.config.output.prefix.clone()),
        )
    }

    /// Configured output directory, resolved against the config location
    pub fn output_dir(&self) -> PathBuf {
        self.base_dir.join(&self.config.output.dir)
    }
}
