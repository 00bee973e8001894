//! Process configuration

use thiserror::Error;

/// Startup failures. All of these are fatal: the process logs and exits.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("BOT_TOKEN environment variable is not set")]
    MissingToken,
}

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Telegram bot API token.
    pub bot_token: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bot_token = std::env::var("BOT_TOKEN")
            .ok()
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::MissingToken)?;
        Ok(Self { bot_token })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env-var tests mutate process state; keep them in one test so they
    // cannot race each other.
    #[test]
    fn from_env_requires_a_nonempty_token() {
        std::env::remove_var("BOT_TOKEN");
        assert!(matches!(Config::from_env(), Err(ConfigError::MissingToken)));

        std::env::set_var("BOT_TOKEN", "");
        assert!(matches!(Config::from_env(), Err(ConfigError::MissingToken)));

        std::env::set_var("BOT_TOKEN", "123456:token");
        let config = Config::from_env().unwrap();
        assert_eq!(config.bot_token, "123456:token");
        std::env::remove_var("BOT_TOKEN");
    }
}
