use anyhow::{Context, Result};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::{config::Config, model::Credential};

/// Takes precedence over the stored key and is never written to disk.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

const API_KEY_FILE: &str = "api_key.txt";

/// Plain-text file holding the raw API key.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store next to the config file.
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(Config::config_dir()?.join(API_KEY_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored key, or `None` if the file is missing or blank.
    pub fn load(&self) -> Result<Option<Credential>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read API key file: {}", self.path.display()))?;

        Ok(Credential::new(raw))
    }

    pub fn save(&self, credential: &Credential) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(&self.path, credential.expose())
            .with_context(|| format!("Failed to write API key file: {}", self.path.display()))?;

        tracing::info!(path = %self.path.display(), "API key stored");
        Ok(())
    }

    /// Environment override first, then the stored file.
    pub fn resolve(&self) -> Result<Option<Credential>> {
        self.resolve_with(env::var(API_KEY_ENV).ok())
    }

    /// [`CredentialStore::resolve`] with the override value supplied by the caller.
    /// A blank override falls through to the file; the file is never written.
    pub fn resolve_with(&self, override_key: Option<String>) -> Result<Option<Credential>> {
        if let Some(cred) = override_key.and_then(Credential::new) {
            tracing::debug!("using API key from {API_KEY_ENV}");
            return Ok(Some(cred));
        }

        self.load()
    }
}
