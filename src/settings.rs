use std::path::PathBuf;

use anyhow::{Context, Result};
use config::{Config, Environment};
use serde::Deserialize;

use crate::model::Chamber;

const ENV_PREFIX: &str = "DIET";

pub const REPRESENTATIVES_URL: &str = "https://yashino.me/house-r";
pub const COUNCILLORS_URL: &str = "https://yashino.me/house-c";
pub const OUT_DIR: &str = "static/politicians";
pub const FETCH_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub representatives_url: String,
    pub councillors_url: String,
    pub out_dir: PathBuf,
    pub fetch_timeout_secs: u64,
    pub user_agent: String,
}

impl Settings {
    /// Built-in defaults overlaid with `DIET_*` environment variables.
    pub fn load() -> Result<Self> {
        Self::from_config(Config::builder().add_source(Environment::with_prefix(ENV_PREFIX)))
    }

    fn from_config(builder: config::ConfigBuilder<config::builder::DefaultState>) -> Result<Self> {
        builder
            .set_default("representatives_url", REPRESENTATIVES_URL)?
            .set_default("councillors_url", COUNCILLORS_URL)?
            .set_default("out_dir", OUT_DIR)?
            .set_default("fetch_timeout_secs", FETCH_TIMEOUT_SECS)?
            .set_default("user_agent", concat!("diet_stances/", env!("CARGO_PKG_VERSION")))?
            .build()
            .context("Failed to load settings")?
            .try_deserialize()
            .context("Invalid settings")
    }

    pub fn url(&self, chamber: Chamber) -> &str {
        match chamber {
            Chamber::Representatives => &self.representatives_url,
            Chamber::Councillors => &self.councillors_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let s = Settings::from_config(Config::builder()).unwrap();
        assert_eq!(s.url(Chamber::Representatives), REPRESENTATIVES_URL);
        assert_eq!(s.url(Chamber::Councillors), COUNCILLORS_URL);
        assert_eq!(s.out_dir, PathBuf::from(OUT_DIR));
        assert_eq!(s.fetch_timeout_secs, 30);
        assert!(s.user_agent.starts_with("diet_stances/"));
    }

    #[test]
    fn overrides_win_over_defaults() {
        let builder = Config::builder()
            .set_override("out_dir", "/tmp/out")
            .unwrap()
            .set_override("fetch_timeout_secs", 5)
            .unwrap();
        let s = Settings::from_config(builder).unwrap();
        assert_eq!(s.out_dir, PathBuf::from("/tmp/out"));
        assert_eq!(s.fetch_timeout_secs, 5);
        assert_eq!(s.url(Chamber::Representatives), REPRESENTATIVES_URL);
    }
}
