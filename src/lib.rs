//! # Telphin API
//!
//! Configuration for the Telphin PBX API client. It holds:
//!
//! - Application credentials (`app_key`, `app_secret`)
//! - The API site url and the HTTP transport ([`Adapter`]) with its options
//! - The retry count for failed requests
//! - A [`Logger`] and the toggles deciding what gets logged
//!
//! A [`Configuration`] can be owned and passed around explicitly, or the
//! process-wide one can be used through [`configure`], [`reset`] and
//! [`configuration`]:
//!
//! ```
//! telphin_api::configure(|config| {
//!     config.app_key = Some("key".into());
//!     config.max_retries = 3;
//! });
//! assert_eq!(telphin_api::configuration().max_retries, 3);
//! ```

pub mod adapter;
pub mod config;
pub mod error;
pub mod logger;

use std::sync::{LazyLock, PoisonError, RwLock};

pub use adapter::Adapter;
pub use config::{Configuration, LoggerOptions};
pub use error::{Error, Result};
pub use logger::{Logger, LoggerTarget};

// Defaults are applied the first time anything touches it.
static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::new()));

/// Runs `callback` against the process-wide configuration under its write
/// lock and returns a snapshot of the result.
pub fn configure<F>(callback: F) -> Configuration
where
    F: FnOnce(&mut Configuration),
{
    let mut config = CONFIGURATION.write().unwrap_or_else(PoisonError::into_inner);
    config.configure(callback).clone()
}

/// Resets the process-wide configuration to defaults.
pub fn reset() {
    CONFIGURATION
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .reset();
}

/// Returns a snapshot of the process-wide configuration.
pub fn configuration() -> Configuration {
    CONFIGURATION
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}
