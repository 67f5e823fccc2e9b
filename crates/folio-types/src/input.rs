//! Platform-agnostic input event types.
//!
//! Every frontend maps its native pointer input to these events. A `Click`
//! is delivered after the `PointerDown`/`PointerUp` pair that produced it,
//! and a `DoubleClick` after the second `Click`, matching the order browsers
//! and most windowing systems use.

use crate::geometry::Point;

/// A platform-agnostic input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Primary pointer pressed at absolute position.
    PointerDown { x: i32, y: i32 },
    /// Pointer moved to absolute position.
    PointerMove { x: i32, y: i32 },
    /// Primary pointer released.
    PointerUp { x: i32, y: i32 },
    /// Press and release on the same spot.
    Click { x: i32, y: i32 },
    /// Second click in quick succession.
    DoubleClick { x: i32, y: i32 },
    /// User requested quit.
    Quit,
}

impl InputEvent {
    /// Pointer position carried by the event, if any.
    pub fn position(&self) -> Option<Point> {
        match *self {
            Self::PointerDown { x, y }
            | Self::PointerMove { x, y }
            | Self::PointerUp { x, y }
            | Self::Click { x, y }
            | Self::DoubleClick { x, y } => Some(Point::new(x, y)),
            Self::Quit => None,
        }
    }
}
