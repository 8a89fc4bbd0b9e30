// ABOUTME: Configuration loading and the fixed known_hosts path layout
// ABOUTME: User settings cover file permissions and colour; the hosts file location is not configurable

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const KNOWN_HOSTS_PATH: &str = ".ssh/known_hosts";
const BACKUP_SUFFIX: &str = ".backup";
const PRE_UNDO_SUFFIX: &str = ".pre-undo";

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub backup: BackupConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BackupConfig {
    #[serde(default = "default_file_mode")]
    pub file_mode: u32,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_file_mode() -> u32 {
    0o666
}

fn default_color() -> bool {
    true
}

impl Default for BackupConfig {
    fn default() -> Self {
        BackupConfig {
            file_mode: default_file_mode(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            color: default_color(),
        }
    }
}

impl Config {
    pub fn default_config_content() -> &'static str {
        r#"# khfix configuration

[backup]
# Permission bits for the rewritten known_hosts file and its
# .backup / .pre-undo copies
file_mode = 0o666

[output]
# Set to false to print plain, uncoloured messages
color = true
"#
    }

    pub fn load_from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse configuration")
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
        Self::load_from_str(&content)
    }

    /// Loads the user's config file, falling back to defaults when there is none.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }
        let config = Self::load_from_file(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Failed to determine config directory")?;
        Ok(config_dir.join("khfix").join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.backup.file_mode > 0o777 {
            anyhow::bail!(
                "file_mode must be a permission mode no larger than 0o777, got {:#o}",
                self.backup.file_mode
            );
        }
        Ok(())
    }
}

/// The known_hosts file and the two single-slot snapshots kept next to it.
#[derive(Debug, Clone, PartialEq)]
pub struct HostsPaths {
    pub known_hosts: PathBuf,
    pub backup: PathBuf,
    pub pre_undo: PathBuf,
    pub file_mode: u32,
}

impl HostsPaths {
    pub fn new(known_hosts: PathBuf, file_mode: u32) -> Self {
        let backup = with_suffix(&known_hosts, BACKUP_SUFFIX);
        let pre_undo = with_suffix(&known_hosts, PRE_UNDO_SUFFIX);
        Self {
            known_hosts,
            backup,
            pre_undo,
            file_mode,
        }
    }

    /// Resolves `~/.ssh/known_hosts` for the invoking user. `None` when the
    /// home directory can't be determined.
    pub fn for_current_user(file_mode: u32) -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self::new(home.join(KNOWN_HOSTS_PATH), file_mode))
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}
