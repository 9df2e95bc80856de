use crate::Result;
use crate::registry::{DEFAULT_CONCURRENCY, LoadOptions};
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the current directory.
pub const CONFIG_FILE_NAME: &str = "wowref.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the table files
    #[serde(default = "default_dbc_dir")]
    pub dbc_dir: Utf8PathBuf,

    /// Directory holding decode-cache side-cars, `dbc_dir` when absent
    #[serde(default)]
    pub cache_dir: Option<Utf8PathBuf>,

    /// Number of tables decoded at the same time
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Whether to reuse and write decode-cache side-cars
    #[serde(default = "default_decode_cache")]
    pub decode_cache: bool,
}

fn default_dbc_dir() -> Utf8PathBuf {
    Utf8PathBuf::from("dbc")
}

const fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

const fn default_decode_cache() -> bool {
    true
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// An explicit `config_path` must exist. Otherwise `wowref.toml` is looked up in `base_dir`,
    /// falling back to the defaults when there is none.
    pub fn load(base_dir: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading wowref configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = base_dir.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading wowref configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.concurrency == 0 {
            return Err(app_err!("concurrency must be at least 1"));
        }

        if self.dbc_dir.as_str().is_empty() {
            return Err(app_err!("dbc_dir must not be empty"));
        }

        Ok(())
    }

    #[must_use]
    pub fn load_options(&self) -> LoadOptions {
        let mut options = LoadOptions::new(self.dbc_dir.clone().into_std_path_buf());
        if let Some(cache_dir) = &self.cache_dir {
            options.cache_dir = cache_dir.clone().into_std_path_buf();
        }
        options.concurrency = self.concurrency;
        options.decode_cache = self.decode_cache;
        options
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
