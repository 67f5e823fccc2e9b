//! Window manager for FOLIO_OS.
//!
//! [`manager::WindowManager`] is the single source of truth for which
//! windows are open, their stacking order, and which one is active.
//! [`chrome::WindowChrome`] is the per-window title bar: it turns pointer
//! gestures into manager calls and owns view-local state (maximize, drag).
//! [`subscriptions::PointerSubscriptions`] tracks the pointer listeners a
//! drag holds so they can be released unconditionally.

pub mod chrome;
pub mod manager;
pub mod subscriptions;
pub mod window;

pub use chrome::{ChromeButton, ChromeHit, ChromeMetrics, WindowChrome};
pub use manager::WindowManager;
pub use subscriptions::{PointerSubscriptions, SubscriptionId};
pub use window::{WindowId, WindowRecord};
