use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

/// Environment variable naming the data file.
pub const DATA_ENV_VAR: &str = "WORLD_INDICATORS_DATA";
/// Looked up in the working directory when the variable is unset.
pub const DEFAULT_DATA_FILE: &str = "Life.csv";

/// Where the data file comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Path(PathBuf),
    /// Ask the user once with a native file dialog.
    Prompt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub source: DataSource,
}

impl Config {
    pub fn from_env() -> Self {
        let env_value = std::env::var(DATA_ENV_VAR).ok();
        let default_exists = Path::new(DEFAULT_DATA_FILE).is_file();
        Self::resolve_with(env_value, default_exists)
    }

    /// Env var first, then `Life.csv` in the working directory, then a prompt.
    pub fn resolve_with(env_value: Option<String>, default_exists: bool) -> Self {
        let source = match env_value.filter(|v| !v.trim().is_empty()) {
            Some(path) => DataSource::Path(PathBuf::from(path)),
            None if default_exists => DataSource::Path(PathBuf::from(DEFAULT_DATA_FILE)),
            None => DataSource::Prompt,
        };
        Config { source }
    }

    /// Turn the source into a concrete path, prompting if needed.
    pub fn data_path(&self) -> Result<PathBuf> {
        match &self.source {
            DataSource::Path(p) => Ok(p.clone()),
            DataSource::Prompt => {
                let picked = rfd::FileDialog::new()
                    .set_title("Open indicator data")
                    .add_filter("Supported files", &["csv", "tsv", "txt", "json"])
                    .add_filter("CSV", &["csv"])
                    .add_filter("JSON", &["json"])
                    .pick_file();
                match picked {
                    Some(path) => Ok(path),
                    None => bail!(
                        "no data file: set {DATA_ENV_VAR} or place {DEFAULT_DATA_FILE} in the working directory"
                    ),
                }
            }
        }
    }
}
