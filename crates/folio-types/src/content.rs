//! Content keys: the closed set of things a window can display.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FolioError;
use crate::geometry::Size;

/// Size given to windows whose content has no dedicated default.
pub const GENERIC_WINDOW_SIZE: Size = Size::new(650, 450);

/// Identifies which static content fills a window.
///
/// At most one window per key may be open at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKey {
    About,
    Documents,
    VsCode,
    Jupyter,
    Excel,
    MlModels,
    Skills,
    Experience,
    Certifications,
    Browser,
    Terminal,
    Settings,
}

impl ContentKey {
    /// Every key, in launcher order.
    pub const ALL: [ContentKey; 12] = [
        Self::About,
        Self::Documents,
        Self::VsCode,
        Self::Jupyter,
        Self::Excel,
        Self::MlModels,
        Self::Skills,
        Self::Experience,
        Self::Certifications,
        Self::Browser,
        Self::Terminal,
        Self::Settings,
    ];

    /// Stable lowercase identifier used in storage and commands.
    pub fn slug(self) -> &'static str {
        match self {
            Self::About => "about",
            Self::Documents => "documents",
            Self::VsCode => "vscode",
            Self::Jupyter => "jupyter",
            Self::Excel => "excel",
            Self::MlModels => "mlmodels",
            Self::Skills => "skills",
            Self::Experience => "experience",
            Self::Certifications => "certifications",
            Self::Browser => "browser",
            Self::Terminal => "terminal",
            Self::Settings => "settings",
        }
    }

    /// Default window size for this content.
    pub fn default_size(self) -> Size {
        match self {
            Self::VsCode | Self::Jupyter | Self::Excel => Size::new(950, 620),
            Self::MlModels => Size::new(1000, 650),
            Self::Terminal => Size::new(700, 400),
            Self::About
            | Self::Documents
            | Self::Skills
            | Self::Experience
            | Self::Certifications
            | Self::Browser
            | Self::Settings => GENERIC_WINDOW_SIZE,
        }
    }
}

impl fmt::Display for ContentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ContentKey {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.slug() == wanted)
            .ok_or_else(|| FolioError::Command(format!("unknown content key: {s}")))
    }
}
