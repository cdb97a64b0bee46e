//! Resolution of the data directory and the files the bot keeps there.

use std::env;
use std::path::PathBuf;

/// Overrides the base data directory when set.
pub const DATA_DIR_ENV: &str = "GASTOBOT_DATA_DIR";
/// Shared password new users must present to register.
pub const REGISTER_PWD_ENV: &str = "GASTOBOT_REGISTER_PWD";

const LEDGER_FILE: &str = "gastos.csv";
const CATEGORIES_FILE: &str = "categories.json";
const USERS_FILE: &str = "users.json";

#[derive(Debug, Clone)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub register_password: String,
}

impl Settings {
    /// Reads settings from the environment, falling back to the platform
    /// data directory.
    pub fn from_env() -> Self {
        let data_dir = env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("gastobot")
            });
        let register_password = env::var(REGISTER_PWD_ENV).unwrap_or_default();
        Self {
            data_dir,
            register_password,
        }
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self {
            data_dir: base,
            register_password: String::new(),
        }
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.data_dir.join(LEDGER_FILE)
    }

    pub fn categories_path(&self) -> PathBuf {
        self.data_dir.join(CATEGORIES_FILE)
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(USERS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_paths_live_under_base_dir() {
        let settings = Settings::with_base_dir(PathBuf::from("/tmp/gastobot-test"));
        assert_eq!(
            settings.ledger_path(),
            PathBuf::from("/tmp/gastobot-test/gastos.csv")
        );
        assert_eq!(
            settings.categories_path(),
            PathBuf::from("/tmp/gastobot-test/categories.json")
        );
        assert_eq!(
            settings.users_path(),
            PathBuf::from("/tmp/gastobot-test/users.json")
        );
    }
}
