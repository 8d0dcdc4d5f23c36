use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::tools::{ToolKind, ToolStyle, ToolType};

/// Environment variable the binary reads the config path from
pub const CONFIG_ENV_VAR: &str = "RASTER_PAINT_CONFIG";

/// Editor settings, loadable from JSON.
///
/// Missing fields fall back to their defaults, so `{}` is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Maximum number of undo entries kept
    pub history_limit: usize,
    /// Tool selected at startup; `None` starts without a tool
    pub default_tool: Option<ToolKind>,
    pub default_style: ToolStyle,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1000,
            canvas_height: 600,
            history_limit: DEFAULT_HISTORY_LIMIT,
            default_tool: Some(ToolKind::Brush),
            default_style: ToolStyle::default(),
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded editor config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load from the path in `RASTER_PAINT_CONFIG`, or use defaults
    pub fn from_env() -> Self {
        let Ok(path) = std::env::var(CONFIG_ENV_VAR) else {
            return Self::default();
        };
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path, e);
                Self::default()
            }
        }
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width == 0 || self.canvas_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "canvas must be at least 1x1, got {}x{}",
                self.canvas_width, self.canvas_height
            )));
        }
        if self.history_limit == 0 {
            return Err(ConfigError::Invalid("history_limit must be at least 1".to_owned()));
        }
        if self.default_style.width.is_nan() || self.default_style.width <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "default_style.width must be positive, got {}",
                self.default_style.width
            )));
        }
        Ok(())
    }

    /// The tool the editor starts with
    pub fn initial_tool(&self) -> Option<ToolType> {
        self.default_tool.map(|kind| kind.instantiate(self.default_style))
    }
}
