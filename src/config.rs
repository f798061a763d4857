//! Configuration options for the Telphin API client.
//!
//! [`Configuration`] holds credentials, the transport, retry count and the
//! logging toggles. A freshly constructed value already carries every default,
//! so consumers can read it before anything has been configured.
//!
//! ```
//! use telphin_api::{Adapter, Configuration};
//!
//! let mut config = Configuration::new();
//! config.configure(|c| {
//!     c.app_key = Some("key".into());
//!     c.app_secret = Some("secret".into());
//!     c.adapter = Adapter::Http1;
//! });
//! assert_eq!(config.max_retries, 2);
//! ```

use std::collections::HashMap;
use std::time::Duration;

use log::debug;
use reqwest::{Client, Method, Proxy};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    adapter::Adapter,
    error::{Error, Result},
    logger::Logger,
};

const ENV_PREFIX: &str = "TELPHIN_";

/// Default url for the site api.
pub const DEFAULT_URL: &str = "https://pbx.telphin.ru/uapi";

/// Default HTTP adapter.
pub const DEFAULT_ADAPTER: Adapter = Adapter::Reqwest;

/// HTTP verb used for API methods. Not configurable.
pub const DEFAULT_HTTP_VERB: Method = Method::POST;

/// Default max retries count.
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Logger default options.
pub const DEFAULT_LOGGER_OPTIONS: LoggerOptions = LoggerOptions {
    requests: true,
    errors: true,
    responses: false,
};

/// Which parts of an API exchange get written to the logger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerOptions {
    pub requests: bool,
    pub errors: bool,
    pub responses: bool,
}

impl Default for LoggerOptions {
    fn default() -> Self {
        DEFAULT_LOGGER_OPTIONS
    }
}

/// Configuration for the Telphin client.
#[derive(Clone, Debug)]
pub struct Configuration {
    /// Application key issued by the PBX.
    pub app_key: Option<String>,
    /// Application secret paired with `app_key`.
    pub app_secret: Option<String>,
    /// Base url of the API.
    pub site: String,
    /// HTTP transport.
    pub adapter: Adapter,
    /// Extra transport options, applied by [`Configuration::http_client`].
    pub http_options: HashMap<String, Value>,
    /// How many times a failed request is retried.
    pub max_retries: u32,
    /// Sink for the request, response and error log.
    pub logger: Logger,
    pub log_requests: bool,
    pub log_errors: bool,
    pub log_responses: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            app_key: None,
            app_secret: None,
            site: DEFAULT_URL.to_string(),
            adapter: DEFAULT_ADAPTER,
            http_options: HashMap::new(),
            max_retries: DEFAULT_MAX_RETRIES,
            logger: Logger::stdout(),
            log_requests: DEFAULT_LOGGER_OPTIONS.requests,
            log_errors: DEFAULT_LOGGER_OPTIONS.errors,
            log_responses: DEFAULT_LOGGER_OPTIONS.responses,
        }
    }
}

impl Configuration {
    /// Creates a configuration holding every default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration from the defaults overlaid with `TELPHIN_*`
    /// environment variables.
    ///
    /// Variables outside the `TELPHIN_` prefix are skipped whatever their
    /// encoding; a `TELPHIN_*` value that is not UTF-8 is an error.
    pub fn from_env() -> Result<Self> {
        let mut vars = Vec::new();
        for (name, value) in std::env::vars_os() {
            let Some(name) = name.to_str().filter(|name| name.starts_with(ENV_PREFIX)) else {
                continue;
            };
            match value.into_string() {
                Ok(value) => vars.push((name.to_string(), value)),
                Err(value) => return Err(invalid_env(name, value.to_string_lossy().into_owned())),
            }
        }
        let mut config = Self::new();
        config.apply_vars(vars)?;
        Ok(config)
    }

    /// Runs `callback` once against this configuration.
    ///
    /// Values are stored as given; nothing is validated here.
    pub fn configure<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.configure_with(Some(callback))
    }

    /// Like [`configure`](Self::configure), but a missing callback leaves the
    /// configuration untouched.
    pub fn configure_with<F>(&mut self, callback: Option<F>) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        if let Some(callback) = callback {
            callback(self);
        }
        self
    }

    /// Resets all configuration options to defaults, credentials and logger
    /// included.
    pub fn reset(&mut self) -> &mut Self {
        *self = Self::default();
        debug!("configuration reset to defaults");
        self
    }

    pub fn logs_requests(&self) -> bool {
        self.log_requests
    }

    pub fn logs_errors(&self) -> bool {
        self.log_errors
    }

    pub fn logs_responses(&self) -> bool {
        self.log_responses
    }

    pub fn logger_options(&self) -> LoggerOptions {
        LoggerOptions {
            requests: self.log_requests,
            errors: self.log_errors,
            responses: self.log_responses,
        }
    }

    /// Returns the key and secret when both are set.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (&self.app_key, &self.app_secret) {
            (Some(key), Some(secret)) => Some((key.as_str(), secret.as_str())),
            _ => None,
        }
    }

    /// Joins `path` onto the site url with a single slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.site.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Builds an HTTP client for the configured adapter and options.
    ///
    /// Recognised options are `timeout` and `connect_timeout` (seconds),
    /// `user_agent`, `proxy` and `pool_max_idle_per_host`. Other keys are
    /// ignored.
    pub fn http_client(&self) -> Result<Client> {
        let mut builder = self.adapter.client_builder();
        for (key, value) in &self.http_options {
            builder = match key.as_str() {
                "timeout" => builder.timeout(seconds_option(key, value)?),
                "connect_timeout" => builder.connect_timeout(seconds_option(key, value)?),
                "user_agent" => builder.user_agent(str_option(key, value)?),
                "proxy" => builder.proxy(Proxy::all(str_option(key, value)?)?),
                "pool_max_idle_per_host" => {
                    let max = value
                        .as_u64()
                        .and_then(|n| usize::try_from(n).ok())
                        .ok_or_else(|| {
                            Error::invalid_option(key, "expected a non-negative integer")
                        })?;
                    builder.pool_max_idle_per_host(max)
                }
                _ => {
                    debug!("ignoring unknown http option `{}`", key);
                    builder
                }
            };
        }
        Ok(builder.build()?)
    }

    /// Overlays `TELPHIN_*` variables from `vars` onto this configuration.
    /// Unrelated variables are skipped. On error nothing is applied.
    pub fn apply_vars<I, K, V>(&mut self, vars: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut next = self.clone();
        for (name, value) in vars {
            let name = name.as_ref();
            let value: String = value.into();
            match name {
                "TELPHIN_APP_KEY" => next.app_key = Some(value),
                "TELPHIN_APP_SECRET" => next.app_secret = Some(value),
                "TELPHIN_SITE" => {
                    if value.trim().is_empty() {
                        return Err(invalid_env(name, value));
                    }
                    next.site = value;
                }
                "TELPHIN_ADAPTER" => next.adapter = value.parse()?,
                "TELPHIN_MAX_RETRIES" => {
                    next.max_retries = value
                        .trim()
                        .parse()
                        .map_err(|_| invalid_env(name, value.clone()))?;
                }
                "TELPHIN_HTTP_OPTIONS" => {
                    next.http_options = serde_json::from_str(&value)?;
                }
                "TELPHIN_LOG_REQUESTS" => next.log_requests = parse_flag(name, value)?,
                "TELPHIN_LOG_ERRORS" => next.log_errors = parse_flag(name, value)?,
                "TELPHIN_LOG_RESPONSES" => next.log_responses = parse_flag(name, value)?,
                _ => {}
            }
        }
        *self = next;
        Ok(self)
    }
}

fn seconds_option(key: &str, value: &Value) -> Result<Duration> {
    let secs = value
        .as_f64()
        .ok_or_else(|| Error::invalid_option(key, "expected a number of seconds"))?;
    Duration::try_from_secs_f64(secs).map_err(|_| {
        Error::invalid_option(key, "expected a non-negative finite number of seconds")
    })
}

fn str_option<'a>(key: &str, value: &'a Value) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| Error::invalid_option(key, "expected a string"))
}

fn parse_flag(var: &str, value: String) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid_env(var, value)),
    }
}

fn invalid_env(var: &str, value: String) -> Error {
    Error::InvalidEnv {
        var: var.to_string(),
        value,
    }
}
