use std::env;
use std::fmt;

use anyhow::{Context, Result, bail};
use url::Url;

pub const URL_VAR: &str = "WORDPRESS_URL";
pub const USERNAME_VAR: &str = "WORDPRESS_USERNAME";
pub const APP_PASSWORD_VAR: &str = "WORDPRESS_APP_PASSWORD";

/// Connection settings for the WordPress site.
#[derive(Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
    pub username: String,
    pub app_password: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let (Some(base_url), Some(username), Some(app_password)) = (
            read(URL_VAR),
            read(USERNAME_VAR),
            read(APP_PASSWORD_VAR),
        ) else {
            bail!(
                "required environment variables are not set \
                 (必要な環境変数が設定されていません)\n\
                 set {URL_VAR}, {USERNAME_VAR} and {APP_PASSWORD_VAR}"
            );
        };

        let config = Self {
            base_url: base_url.trim().to_string(),
            username,
            app_password,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let parsed = Url::parse(&self.base_url)
            .with_context(|| format!("{URL_VAR} '{}' is not a valid URL", self.base_url))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("{URL_VAR} must use http or https");
        }
        Ok(())
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("app_password", &"<redacted>")
            .finish()
    }
}
