//! Desktop icons.
//!
//! Single click selects an icon (one at a time), double click asks the
//! desktop to open it. Icons never touch the window manager directly.

use folio_types::content::ContentKey;
use folio_types::geometry::{Point, Rect};

// -- Layout constants ---------------------------------------------------------

const GRID_X: i32 = 24;
const GRID_Y: i32 = 24;
const CELL_W: i32 = 100;
const CELL_H: i32 = 100;
const ICON_W: u32 = 80;
const ICON_H: u32 = 90;

/// Visual kind of an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconKind {
    Folder,
    File,
    Browser,
    Terminal,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesktopIcon {
    pub key: ContentKey,
    /// Label under the icon, also used as the window title.
    pub name: &'static str,
    pub kind: IconKind,
    pub row: u8,
    pub col: u8,
}

impl DesktopIcon {
    pub fn rect(&self) -> Rect {
        Rect::new(
            GRID_X + i32::from(self.col) * CELL_W,
            GRID_Y + i32::from(self.row) * CELL_H,
            ICON_W,
            ICON_H,
        )
    }

    /// Only the certifications folder carries a badge: the number of
    /// stored certifications.
    pub fn badge(&self, certification_count: usize) -> Option<usize> {
        (self.key == ContentKey::Certifications).then_some(certification_count)
    }
}

/// The default icon layout: two columns.
pub const DESKTOP_ICONS: [DesktopIcon; 9] = [
    icon(ContentKey::About, "About Me", IconKind::Folder, 0, 0),
    icon(ContentKey::VsCode, "AboutMe.py", IconKind::File, 1, 0),
    icon(ContentKey::Excel, "Skills & Technologies", IconKind::File, 2, 0),
    icon(ContentKey::MlModels, "ML Models", IconKind::File, 3, 0),
    icon(ContentKey::Experience, "Experience", IconKind::Folder, 0, 1),
    icon(ContentKey::Certifications, "Certifications", IconKind::Folder, 1, 1),
    icon(ContentKey::Browser, "Browser", IconKind::Browser, 2, 1),
    icon(ContentKey::Terminal, "Terminal", IconKind::Terminal, 3, 1),
    icon(ContentKey::Settings, "Settings", IconKind::Settings, 4, 1),
];

const fn icon(key: ContentKey, name: &'static str, kind: IconKind, row: u8, col: u8) -> DesktopIcon {
    DesktopIcon {
        key,
        name,
        kind,
        row,
        col,
    }
}

/// Icon label for `key`, if there is a desktop icon for it.
pub fn icon_name(key: ContentKey) -> Option<&'static str> {
    DESKTOP_ICONS.iter().find(|i| i.key == key).map(|i| i.name)
}

/// Icon grid plus the selection.
#[derive(Debug)]
pub struct IconGrid {
    icons: Vec<DesktopIcon>,
    selected: Option<ContentKey>,
}

impl Default for IconGrid {
    fn default() -> Self {
        Self::new(DESKTOP_ICONS.to_vec())
    }
}

impl IconGrid {
    pub fn new(icons: Vec<DesktopIcon>) -> Self {
        Self {
            icons,
            selected: None,
        }
    }

    pub fn icons(&self) -> &[DesktopIcon] {
        &self.icons
    }

    pub fn hit_test(&self, p: Point) -> Option<&DesktopIcon> {
        self.icons.iter().find(|i| i.rect().contains(p))
    }

    /// Select `key`, deselecting whatever was selected before.
    pub fn select(&mut self, key: ContentKey) {
        self.selected = Some(key);
    }

    pub fn deselect_all(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<ContentKey> {
        self.selected
    }

    pub fn is_selected(&self, key: ContentKey) -> bool {
        self.selected == Some(key)
    }
}
