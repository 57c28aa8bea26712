use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};
use std::time::Duration;

use memory_catalog::{DEFAULT_PERIOD_SECS, ScanOptions};
use serde::Deserialize;

use crate::error::Error;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Root of the photo library. Usually supplied through `IMAGE_PATH`.
    #[serde(default)]
    pub image_path: Option<PathBuf>,
    #[serde(default = "default_bind_address")]
    pub bind_address: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
    /// How long each photo stays current.
    #[serde(default = "default_rotation_period", with = "humantime_serde")]
    pub rotation_period: Duration,
    /// Recognized image extensions.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub follow_links: bool,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// Cache headers for each image-bearing endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CacheConfig {
    #[serde(default = "CachePolicy::no_cache")]
    pub current: CachePolicy,
    #[serde(default = "CachePolicy::one_year")]
    pub memory: CachePolicy,
    #[serde(default = "CachePolicy::one_year")]
    pub empty: CachePolicy,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum CachePolicy {
    NoCache,
    Public {
        #[serde(with = "humantime_serde", rename = "max-age")]
        max_age: Duration,
    },
}

impl CachePolicy {
    const ONE_YEAR: Duration = Duration::from_secs(365 * 24 * 60 * 60);

    fn no_cache() -> Self {
        Self::NoCache
    }

    fn one_year() -> Self {
        Self::Public {
            max_age: Self::ONE_YEAR,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            current: CachePolicy::no_cache(),
            memory: CachePolicy::one_year(),
            empty: CachePolicy::one_year(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            image_path: None,
            bind_address: default_bind_address(),
            port: default_port(),
            rotation_period: default_rotation_period(),
            extensions: default_extensions(),
            follow_links: false,
            cache: CacheConfig::default(),
        }
    }
}

impl Config {
    /// Load from a YAML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let data = fs::read(path)?;
        let cfg: Config = serde_yaml::from_slice(&data)?;
        Ok(cfg)
    }

    /// Check invariants that serde cannot express.
    ///
    /// # Errors
    /// Returns [`Error::MissingImagePath`] or [`Error::InvalidConfig`].
    pub fn validated(self) -> Result<Self, Error> {
        if self.image_path.is_none() {
            return Err(Error::MissingImagePath);
        }
        if self.rotation_period.as_secs() == 0 || self.rotation_period.subsec_nanos() != 0 {
            return Err(Error::InvalidConfig(
                "rotation-period must be a whole number of seconds, at least one".to_string(),
            ));
        }
        if self.scan_options().extensions.is_empty() {
            return Err(Error::InvalidConfig(
                "extensions must list at least one image extension".to_string(),
            ));
        }
        Ok(self)
    }

    /// Whole seconds per rotation window, never zero.
    #[must_use]
    pub fn period_secs(&self) -> NonZeroU64 {
        NonZeroU64::new(self.rotation_period.as_secs())
            .or(NonZeroU64::new(DEFAULT_PERIOD_SECS))
            .unwrap_or(NonZeroU64::MIN)
    }

    #[must_use]
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            follow_links: self.follow_links,
            ..ScanOptions::with_extensions(&self.extensions)
        }
    }

    #[must_use]
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_address, self.port)
    }
}

fn default_bind_address() -> IpAddr {
    IpAddr::V4(Ipv4Addr::UNSPECIFIED)
}

fn default_port() -> u16 {
    8080
}

fn default_rotation_period() -> Duration {
    Duration::from_secs(DEFAULT_PERIOD_SECS)
}

fn default_extensions() -> Vec<String> {
    vec!["jpg".to_string()]
}
