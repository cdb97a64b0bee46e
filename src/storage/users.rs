//! JSON-backed user allow-list with password-gated registration.

use std::fs;
use std::path::PathBuf;

use crate::errors::Result;
use crate::storage::AuthStore;

/// Allow-list stored as a JSON array of user ids. A missing file reads as
/// an empty list.
#[derive(Debug, Clone)]
pub struct JsonUserStore {
    path: PathBuf,
    register_password: String,
}

impl JsonUserStore {
    pub fn new(path: PathBuf, register_password: String) -> Self {
        Self {
            path,
            register_password,
        }
    }

    fn load(&self) -> Result<Vec<i64>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data)?)
    }

    fn save(&self, users: &[i64]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(users)?)?;
        Ok(())
    }
}

impl AuthStore for JsonUserStore {
    fn is_registered(&self, user_id: i64) -> Result<bool> {
        Ok(self.load()?.contains(&user_id))
    }

    fn register(&mut self, user_id: i64, credential: &str) -> Result<bool> {
        if credential != self.register_password || self.register_password.is_empty() {
            return Ok(false);
        }
        let mut users = self.load()?;
        if users.contains(&user_id) {
            return Ok(false);
        }
        users.push(user_id);
        self.save(&users)?;
        tracing::info!(user = user_id, "user registered");
        Ok(true)
    }
}
