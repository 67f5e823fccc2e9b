//! Desktop shell for FOLIO_OS.
//!
//! Wraps the window manager from `folio-wm` in a complete desktop: taskbar,
//! start menu, icons, sidebar widgets, per-window content, and the scoped
//! timers that animate them. [`desktop::Desktop`] owns all of it.

pub mod content;
pub mod desktop;
pub mod effects;
pub mod icons;
pub mod platform;
pub mod render;
pub mod sidebar;
pub mod startmenu;
pub mod taskbar;
pub mod timers;
pub mod welcome;

// Re-export foundation crates so the binary only depends on folio-core.
pub use folio_storage as storage;
pub use folio_types::{config, error, geometry, input};
pub use folio_wm as wm;

pub use desktop::{Desktop, ShellStage};
pub use render::{Scene, render};
pub use folio_types::content::ContentKey;
