//! Runtime configuration from environment variables.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;

use crate::mtr::MtrConfig;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 3000));

/// Default static asset directory.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Errors reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
}

/// Server and upstream settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub static_dir: PathBuf,
    /// Serve sample schedules from this directory instead of the live API.
    pub mock_dir: Option<PathBuf>,
    pub mtr: MtrConfig,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Read configuration through a variable lookup function.
    ///
    /// Unset and empty variables take their defaults.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_addr =
            parse_var("ETA_BIND_ADDR", var("ETA_BIND_ADDR"))?.unwrap_or(DEFAULT_BIND_ADDR);

        let mut mtr = MtrConfig::new();
        if let Some(url) = var("MTR_API_BASE_URL") {
            mtr = mtr.with_base_url(url);
        }
        if let Some(lang) = var("MTR_LANG") {
            mtr = mtr.with_lang(lang.trim().to_uppercase());
        }
        if let Some(secs) = parse_var("MTR_TIMEOUT_SECS", var("MTR_TIMEOUT_SECS"))? {
            mtr = mtr.with_timeout(secs);
        }

        Ok(Self {
            bind_addr,
            static_dir: var("ETA_STATIC_DIR")
                .map_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR), PathBuf::from),
            mock_dir: var("MTR_MOCK_DIR").map(PathBuf::from),
            mtr,
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
) -> Result<Option<T>, ConfigError> {
    value
        .map(|v| {
            v.trim().parse().map_err(|_| ConfigError::Invalid {
                var: name,
                value: v.clone(),
            })
        })
        .transpose()
}
