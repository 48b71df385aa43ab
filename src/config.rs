use anyhow::Result;
use ::config::{Config, Environment};
use serde::Deserialize;

const DEFAULT_DB_PATH: &str = "data/p4k.sqlite";
const DEFAULT_CHUNK_SIZE: usize = 500;

/// Runtime settings, overridable with `P4K_DB_PATH` and `P4K_CHUNK_SIZE`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub db_path: String,
    pub chunk_size: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            db_path: DEFAULT_DB_PATH.to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .set_default("db_path", DEFAULT_DB_PATH)?
            .set_default("chunk_size", DEFAULT_CHUNK_SIZE as i64)?
            .add_source(Environment::with_prefix("P4K").try_parsing(true))
            .build()?;
        let mut settings: Settings = settings.try_deserialize()?;
        settings.chunk_size = settings.chunk_size.max(1);
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.db_path, "data/p4k.sqlite");
        assert_eq!(s.chunk_size, 500);
    }

    #[test]
    fn load_without_env_uses_defaults() {
        if std::env::vars().any(|(k, _)| k.starts_with("P4K_")) {
            return;
        }
        assert_eq!(Settings::load().unwrap(), Settings::default());
    }
}
