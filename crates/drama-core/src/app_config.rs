use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::ConfigError;

/// Named bundle of posting-site defaults.
///
/// A preset only picks defaults; any field can still be overridden through
/// its own environment variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    /// A locally running copy of the site over plain HTTP with a short delay.
    LocalTest,
    /// The live site over HTTPS with a conservative delay.
    Production,
}

impl Preset {
    #[must_use]
    pub fn default_site(self) -> &'static str {
        match self {
            Preset::LocalTest => "localhost",
            Preset::Production => "rdrama.net",
        }
    }

    #[must_use]
    pub fn default_https(self) -> bool {
        matches!(self, Preset::Production)
    }

    #[must_use]
    pub fn default_request_delay_secs(self) -> u64 {
        match self {
            Preset::LocalTest => 1,
            Preset::Production => 10,
        }
    }

    /// Token used against a local instance when none is configured.
    /// Production has no default and requires `DRAMA_AUTH_TOKEN`.
    #[must_use]
    pub fn default_auth_token(self) -> Option<&'static str> {
        match self {
            Preset::LocalTest => Some("local-test-token"),
            Preset::Production => None,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::LocalTest => write!(f, "local-test"),
            Preset::Production => write!(f, "production"),
        }
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local-test" => Ok(Preset::LocalTest),
            "production" => Ok(Preset::Production),
            other => Err(ConfigError::InvalidEnvVar {
                var: "DRAMA_PRESET".to_string(),
                reason: format!("unknown preset '{other}' (expected local-test or production)"),
            }),
        }
    }
}

/// Reddit script-app credentials for the client-credentials grant.
#[derive(Clone)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub user_agent: String,
}

impl fmt::Debug for RedditCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedditCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub preset: Preset,
    pub site: String,
    pub https: bool,
    pub auth_token: String,
    pub request_delay_secs: u64,
    pub request_timeout_secs: u64,
    pub log_level: String,
    pub subreddit: String,
    pub submission_limit: usize,
    pub daily_cron: String,
    pub reddit: RedditCredentials,
}

impl AppConfig {
    /// Base address of the posting site, e.g. `https://rdrama.net`.
    #[must_use]
    pub fn site_base_url(&self) -> String {
        let protocol = if self.https { "https" } else { "http" };
        format!("{protocol}://{}", self.site)
    }

    #[must_use]
    pub fn request_delay(&self) -> Duration {
        Duration::from_secs(self.request_delay_secs)
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("preset", &self.preset)
            .field("site", &self.site)
            .field("https", &self.https)
            .field("auth_token", &"[redacted]")
            .field("request_delay_secs", &self.request_delay_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("log_level", &self.log_level)
            .field("subreddit", &self.subreddit)
            .field("submission_limit", &self.submission_limit)
            .field("daily_cron", &self.daily_cron)
            .field("reddit", &self.reddit)
            .finish()
    }
}
