//! Session configuration loaded from TOML.

use std::path::Path;

use serde::Deserialize;

use crate::error::{OssimError, Result};

/// Tunables for one simulated session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShellConfig {
    /// Name reported by `whoami` and shown in the prompt.
    pub user: String,
    /// Host name shown in the prompt.
    pub hostname: String,
    /// Maximum number of retained history entries.
    pub history_limit: usize,
    /// Pids below this value belong to the system and cannot be killed.
    pub system_pid_limit: u32,
    /// Total simulated memory reported by `mem`.
    pub total_memory_mb: u32,
    /// Simulated disk capacity.
    pub disk_capacity_mb: u32,
    /// Simulated disk usage at boot.
    pub disk_used_mb: u32,
    /// Simulated read duration per MB.
    pub read_ms_per_mb: u64,
    /// Simulated write duration per MB.
    pub write_ms_per_mb: u64,
    /// Create `/home/user/welcome.txt` at boot.
    pub seed_demo_files: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            user: "user".to_string(),
            hostname: "os".to_string(),
            history_limit: 50,
            system_pid_limit: 10,
            total_memory_mb: 8192,
            disk_capacity_mb: 1000,
            disk_used_mb: 250,
            read_ms_per_mb: 200,
            write_ms_per_mb: 300,
            seed_demo_files: true,
        }
    }
}

impl ShellConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: ShellConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.history_limit == 0 {
            return Err(OssimError::Config(
                "history_limit must be at least 1".to_string(),
            ));
        }
        if self.user.is_empty() {
            return Err(OssimError::Config("user must not be empty".to_string()));
        }
        if self.disk_used_mb > self.disk_capacity_mb {
            return Err(OssimError::Config(format!(
                "disk_used_mb ({}) exceeds disk_capacity_mb ({})",
                self.disk_used_mb, self.disk_capacity_mb
            )));
        }
        Ok(())
    }
}
