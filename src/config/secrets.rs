use std::fmt;
use std::path::{Path, PathBuf};

use super::ConfigError;

/// Environment variable carrying the web reader API key.
pub const API_KEY_VAR: &str = "WEB_READER_API_KEY";

/// Web reader API key. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve the key the way dotenv does: a variable already set in the
    /// process environment wins, then the `.env` file.
    ///
    /// With `env_file` set, only that file is consulted and it must be
    /// readable. Otherwise `.env` next to the executable is tried first,
    /// then `.env` in the working directory; missing files are skipped.
    pub fn load(env_file: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(key) = std::env::var(API_KEY_VAR).ok().filter(|k| !k.is_empty()) {
            return Ok(Self(key));
        }

        match env_file {
            Some(path) => {
                if let Some(key) = read_key(path)? {
                    return Ok(Self(key));
                }
            }
            None => {
                for path in default_env_files() {
                    if !path.is_file() {
                        continue;
                    }
                    if let Some(key) = read_key(&path)? {
                        tracing::debug!("Loaded {} from {}", API_KEY_VAR, path.display());
                        return Ok(Self(key));
                    }
                }
            }
        }

        Err(ConfigError::MissingApiKey(API_KEY_VAR))
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

fn default_env_files() -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        files.push(dir.join(".env"));
    }
    files.push(PathBuf::from(".env"));
    files
}

/// Look up the API key in one env file without touching the process environment.
fn read_key(path: &Path) -> Result<Option<String>, ConfigError> {
    let env_error = |source| ConfigError::EnvFile {
        path: path.to_path_buf(),
        source,
    };

    for entry in dotenvy::from_path_iter(path).map_err(env_error)? {
        let (name, value) = entry.map_err(env_error)?;
        if name == API_KEY_VAR && !value.is_empty() {
            return Ok(Some(value));
        }
    }

    Ok(None)
}
