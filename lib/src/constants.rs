//! Constants used throughout the anypay library

use std::path::PathBuf;

/// Application name, also the name of the home directory entry (`~/.anypay`)
pub const APP_NAME: &str = "anypay";

/// Config file name
pub const CONFIG_FILE: &str = "config.toml";

/// Base URL of the JSON API. Requests go to `{API_URL}/{endpoint}/{account_id}`.
pub const API_URL: &str = "https://anypay.io/api";

/// Base URL of the hosted payment page that payment links point at
pub const MERCHANT_URL: &str = "https://anypay.io/merchant";

/// Default HTTP request timeout in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent sent with API requests
pub const DEFAULT_USER_AGENT: &str = concat!("anypay-rs/", env!("CARGO_PKG_VERSION"));

/// Get the anypay home directory (`~/.anypay/`)
///
/// # Examples
///
/// ```
/// use anypay_lib::constants::anypay_home_dir;
///
/// if let Some(path) = anypay_home_dir() {
///     assert!(path.ends_with(".anypay"));
/// }
/// ```
pub fn anypay_home_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(format!(".{APP_NAME}")))
}

/// Get the default config file path (`~/.anypay/config.toml`)
///
/// Returns `None` if the home directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    anypay_home_dir().map(|p| p.join(CONFIG_FILE))
}
