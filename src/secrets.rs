use crate::error::SecretError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const API_KEY_NAME: &str = "auth_api_key";
pub const API_KEY_ENV: &str = "AUTH_API_KEY";

#[derive(Deserialize)]
struct SecretsFile {
    auth_api_key: Option<String>,
}

/// Reads the API credential on demand; nothing is cached.
#[derive(Debug, Clone)]
pub struct SecretStore {
    path: PathBuf,
}

impl SecretStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The file wins over the environment; a missing file is not an error.
    pub fn api_key(&self) -> Result<String, SecretError> {
        if let Some(key) = self.read_file()? {
            return Ok(key);
        }
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
            _ => Err(SecretError::Missing(API_KEY_NAME)),
        }
    }

    fn read_file(&self) -> Result<Option<String>, SecretError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(SecretError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let secrets: SecretsFile = toml::from_str(&content).map_err(|source| SecretError::Parse {
            path: self.path.clone(),
            source,
        })?;
        Ok(secrets.auth_api_key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()))
    }
}
