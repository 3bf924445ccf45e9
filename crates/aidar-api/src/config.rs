use std::env;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use aidar_forms::RequiredPolicy;
use eyre::{eyre, WrapErr};

pub const DEFAULT_PORT: u16 = 5500;
pub const DEFAULT_BUCKET: &str = "aidar";

/// Where records are kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StoreBackend {
    #[default]
    Memory,
    S3,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StoreBackend::Memory => "memory",
            StoreBackend::S3 => "s3",
        })
    }
}

impl FromStr for StoreBackend {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "memory" => Ok(StoreBackend::Memory),
            "s3" => Ok(StoreBackend::S3),
            other => Err(eyre!("unknown store backend: {other}")),
        }
    }
}

/// Server settings read from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub store: StoreBackend,
    pub bucket: String,
    pub bind: IpAddr,
    pub port: u16,
    pub policy: RequiredPolicy,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            store: StoreBackend::default(),
            bucket: DEFAULT_BUCKET.to_string(),
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            policy: RequiredPolicy::default(),
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read settings through `lookup`. Unset variables take their default;
    /// set but unparseable ones are an error.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let mut config = Self::default();

        if let Some(value) = lookup("AIDAR_STORE") {
            config.store = value.parse()?;
        }
        if let Some(value) = lookup("AIDAR_BUCKET") {
            config.bucket = value;
        }
        if let Some(value) = lookup("AIDAR_BIND") {
            config.bind = value
                .parse()
                .wrap_err_with(|| format!("invalid AIDAR_BIND: {value}"))?;
        }
        if let Some(value) = lookup("PORT") {
            config.port = value
                .parse()
                .wrap_err_with(|| format!("invalid PORT: {value}"))?;
        }
        if let Some(value) = lookup("AIDAR_REQUIRED_POLICY") {
            config.policy = value.parse()?;
        }

        Ok(config)
    }

    pub fn address(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}
