//! Runtime configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working desktop.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{FolioError, Result};
use crate::geometry::Point;

/// Top-level FOLIO_OS configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FolioConfig {
    pub window_title: String,
    pub screen_width: u32,
    pub screen_height: u32,
    /// Height reserved at the bottom of the screen for the taskbar.
    pub taskbar_height: u32,
    /// Height of each window's draggable title bar.
    pub titlebar_height: u32,
    /// Where the first window opens.
    pub cascade_origin_x: i32,
    pub cascade_origin_y: i32,
    /// Down-and-right offset between successively opened windows.
    pub cascade_step: i32,
    /// Number of cascade steps before wrapping back to the origin.
    pub cascade_wrap: u32,
    /// z-index given to the first window.
    pub first_z_index: i32,
    pub timers: TimerConfig,
    /// JSON file backing on-device storage. `None` keeps state in memory.
    pub storage_path: Option<PathBuf>,
}

/// Periods (milliseconds) of the cosmetic timers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimerConfig {
    pub clock_ms: u32,
    pub quote_ms: u32,
    pub cert_poll_ms: u32,
    pub counter_ms: u32,
    pub typing_char_ms: u32,
    pub typing_line_pause_ms: u32,
    pub typing_restart_ms: u32,
    pub code_reveal_ms: u32,
    pub welcome_delay_ms: u32,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            window_title: "FOLIO_OS".to_string(),
            screen_width: 1280,
            screen_height: 800,
            taskbar_height: 48,
            titlebar_height: 36,
            cascade_origin_x: 150,
            cascade_origin_y: 50,
            cascade_step: 30,
            cascade_wrap: 10,
            first_z_index: 10,
            timers: TimerConfig::default(),
            storage_path: None,
        }
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            clock_ms: 1000,
            quote_ms: 5000,
            cert_poll_ms: 1000,
            counter_ms: 50,
            typing_char_ms: 50,
            typing_line_pause_ms: 500,
            typing_restart_ms: 1000,
            code_reveal_ms: 15,
            welcome_delay_ms: 500,
        }
    }
}

impl FolioConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&text)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Top-left corner of the first cascaded window.
    pub fn cascade_origin(&self) -> Point {
        Point::new(self.cascade_origin_x, self.cascade_origin_y)
    }

    /// Height of the desktop area above the taskbar.
    pub fn workspace_height(&self) -> u32 {
        self.screen_height.saturating_sub(self.taskbar_height)
    }

    fn validate(&self) -> Result<()> {
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(FolioError::Config("screen size must be non-zero".into()));
        }
        if self.taskbar_height >= self.screen_height {
            return Err(FolioError::Config(format!(
                "taskbar height {} does not fit screen height {}",
                self.taskbar_height, self.screen_height
            )));
        }
        if self.cascade_wrap == 0 {
            return Err(FolioError::Config("cascade_wrap must be at least 1".into()));
        }
        Ok(())
    }
}
