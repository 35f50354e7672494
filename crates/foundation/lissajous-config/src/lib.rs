//! Viewer configuration
//!
//! Stored as YAML. Lookup order for the file:
//!
//! 1. an explicit path (`--config`)
//! 2. `$LISSAJOUS_CONFIG`
//! 3. `~/.config/lissajous/config.yaml`
//!
//! A missing file is not an error, the defaults are used instead.
//! `LISSAJOUS_HOST` and `LISSAJOUS_PORT` override the server section
//! after the file is read.

use std::f64::consts::{FRAC_PI_4, TAU};
use std::path::{Path, PathBuf};

use lissajous_core::{ParameterSet, DEFAULT_SHADOW_OFFSET};
use serde::{Deserialize, Serialize};

pub const CONFIG_ENV: &str = "LISSAJOUS_CONFIG";
pub const HOST_ENV: &str = "LISSAJOUS_HOST";
pub const PORT_ENV: &str = "LISSAJOUS_PORT";

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors from loading or validating a configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Where the server listens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8050,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr())
    }
}

/// Bounds and step of one slider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl SliderRange {
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        Self { min, max, step }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    fn check(&self, name: &str) -> Result<()> {
        let finite = self.min.is_finite() && self.max.is_finite() && self.step.is_finite();
        if !finite || self.min >= self.max || self.step <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "slider '{}' needs min < max and step > 0 (got {}..{} step {})",
                name, self.min, self.max, self.step
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub samples: SliderRange,
    pub phase: SliderRange,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            samples: SliderRange::new(10.0, 600.0, 10.0),
            phase: SliderRange::new(0.0, TAU, FRAC_PI_4),
        }
    }
}

/// Plot appearance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    /// Width and height of the square plot in pixels
    pub size: u32,
    pub shadow_offset: f64,
    /// Initial camera preset name
    pub camera: String,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            size: 850,
            shadow_offset: DEFAULT_SHADOW_OFFSET,
            camera: "default".to_string(),
        }
    }
}

/// Top-level viewer configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub server: ServerConfig,
    pub defaults: ParameterSet,
    pub sliders: SliderConfig,
    pub figure: FigureConfig,
}

impl ViewerConfig {
    /// `~/.config/lissajous/config.yaml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("lissajous").join("config.yaml"))
    }

    /// Pick the config file: explicit path, then env, then the default location
    pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV).map(PathBuf::from))
            .or_else(Self::default_path)
    }

    /// Read and validate a config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&text)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Resolve, load and apply environment overrides
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match Self::resolve_path(explicit) {
            Some(path) => Self::load(&path)?,
            None => {
                tracing::warn!("No config directory available, using defaults");
                Self::default()
            }
        };
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Write the config, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        let io_err = |source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(path, self.to_yaml()?).map_err(io_err)
    }

    /// Apply `LISSAJOUS_HOST` / `LISSAJOUS_PORT`
    pub fn apply_env(&mut self) {
        self.apply_overrides(std::env::var(HOST_ENV).ok(), std::env::var(PORT_ENV).ok());
    }

    /// Override host and port; an unparseable port is ignored with a warning
    pub fn apply_overrides(&mut self, host: Option<String>, port: Option<String>) {
        if let Some(host) = host.filter(|h| !h.trim().is_empty()) {
            self.server.host = host.trim().to_string();
        }
        if let Some(port) = port {
            match port.trim().parse::<u16>() {
                Ok(p) => self.server.port = p,
                Err(_) => tracing::warn!("Ignoring invalid port override: {:?}", port),
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".into()));
        }
        if self.figure.size == 0 {
            return Err(ConfigError::Invalid("figure.size must be positive".into()));
        }
        if !(self.figure.shadow_offset.is_finite() && self.figure.shadow_offset > 0.0) {
            return Err(ConfigError::Invalid(
                "figure.shadow_offset must be a positive number".into(),
            ));
        }
        self.sliders.samples.check("samples")?;
        self.sliders.phase.check("phase")?;
        self.defaults
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("defaults: {}", e)))
    }
}
