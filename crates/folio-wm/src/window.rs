//! The data describing one open window.

use std::fmt;
use std::str::FromStr;

use folio_types::content::ContentKey;
use folio_types::error::FolioError;
use folio_types::geometry::{Point, Rect, Size};

/// Unique window identity, never reused within a process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u64);

impl WindowId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "w{}", self.0)
    }
}

impl FromStr for WindowId {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('w').unwrap_or(s);
        digits
            .parse::<u64>()
            .map(Self)
            .map_err(|_| FolioError::Command(format!("invalid window id: {s}")))
    }
}

/// One open window.
///
/// Identity, title, and content are fixed at creation; the rest is mutated
/// by [`crate::manager::WindowManager`] only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
    id: WindowId,
    title: String,
    content: ContentKey,
    pub(crate) minimized: bool,
    pub(crate) position: Point,
    pub(crate) size: Size,
    pub(crate) z_index: i32,
}

impl WindowRecord {
    pub(crate) fn new(
        id: WindowId,
        title: String,
        content: ContentKey,
        position: Point,
        size: Size,
        z_index: i32,
    ) -> Self {
        Self {
            id,
            title,
            content,
            minimized: false,
            position,
            size,
            z_index,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> ContentKey {
        self.content
    }

    pub fn is_minimized(&self) -> bool {
        self.minimized
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Stored frame, ignoring any view-local maximize override.
    pub fn frame(&self) -> Rect {
        Rect::from_parts(self.position, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_display_and_parse() {
        let id = WindowId::from_raw(7);
        assert_eq!(id.to_string(), "w7");
        assert_eq!("w7".parse::<WindowId>().unwrap(), id);
        assert_eq!("7".parse::<WindowId>().unwrap(), id);
        assert!("wx".parse::<WindowId>().is_err());
    }

    #[test]
    fn new_record_is_visible() {
        let rec = WindowRecord::new(
            WindowId::from_raw(1),
            "Terminal".into(),
            ContentKey::Terminal,
            Point::new(150, 50),
            Size::new(700, 400),
            10,
        );
        assert!(!rec.is_minimized());
        assert_eq!(rec.frame(), Rect::new(150, 50, 700, 400));
        assert_eq!(rec.title(), "Terminal");
        assert_eq!(rec.content(), ContentKey::Terminal);
    }
}
