//! Start menu popup toggled by the taskbar's start button.
//!
//! A single column of launch items anchored above the taskbar, with an
//! owner header and a shutdown footer. The item list can be narrowed by a
//! search query.

use folio_types::config::FolioConfig;
use folio_types::content::ContentKey;
use folio_types::geometry::{Point, Rect};

// -- Layout constants ---------------------------------------------------------

const MENU_X: i32 = 4;
const MENU_W: u32 = 320;
const HEADER_H: u32 = 64;
const ITEM_H: u32 = 36;
const FOOTER_H: u32 = 40;
/// Gap between the panel and the top of the taskbar.
const MENU_GAP: i32 = 8;

pub const OWNER_NAME: &str = "Chanakya Yadav";
pub const OWNER_TITLE: &str = "Data Scientist";

// -- Types --------------------------------------------------------------------

/// Action returned when the menu is clicked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartMenuAction {
    /// Open (or bring forward) the window for this content.
    Open { key: ContentKey, label: &'static str },
    /// Leave the desktop.
    Shutdown,
    None,
}

/// A single launch entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartMenuItem {
    pub label: &'static str,
    pub key: ContentKey,
}

/// What a point on or around the open menu lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartMenuHit {
    Header,
    /// Index into [`StartMenuState::visible_items`].
    Item(usize),
    Shutdown,
    /// Inside the panel but not on anything actionable.
    Panel,
    Outside,
}

/// Runtime state for the start menu.
#[derive(Debug)]
pub struct StartMenuState {
    open: bool,
    items: Vec<StartMenuItem>,
    query: String,
    /// Y of the taskbar's top edge.
    bar_y: i32,
}

impl StartMenuState {
    pub fn new(items: Vec<StartMenuItem>, config: &FolioConfig) -> Self {
        Self {
            open: false,
            items,
            query: String::new(),
            bar_y: config.workspace_height() as i32,
        }
    }

    /// Default launch items.
    pub fn default_items() -> Vec<StartMenuItem> {
        [
            ("About Me", ContentKey::About),
            ("About Me (Code)", ContentKey::VsCode),
            ("Skills & Technologies", ContentKey::Excel),
            ("Experience", ContentKey::Experience),
            ("Certifications", ContentKey::Certifications),
            ("Terminal", ContentKey::Terminal),
            ("Browser", ContentKey::Browser),
            ("Settings", ContentKey::Settings),
        ]
        .into_iter()
        .map(|(label, key)| StartMenuItem { label, key })
        .collect()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Toggle the menu open/closed. Opening clears the search.
    pub fn toggle(&mut self) {
        self.open = !self.open;
        if self.open {
            self.query.clear();
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.trim().to_string();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Items matching the search query (case-insensitive substring).
    pub fn visible_items(&self) -> Vec<StartMenuItem> {
        let needle = self.query.to_lowercase();
        self.items
            .iter()
            .filter(|item| needle.is_empty() || item.label.to_lowercase().contains(&needle))
            .copied()
            .collect()
    }

    /// Activate the visible item at `index`. Closes the menu on success.
    pub fn activate(&mut self, index: usize) -> StartMenuAction {
        if !self.open {
            return StartMenuAction::None;
        }
        match self.visible_items().get(index) {
            Some(item) => {
                self.close();
                StartMenuAction::Open {
                    key: item.key,
                    label: item.label,
                }
            },
            None => StartMenuAction::None,
        }
    }

    pub fn panel_rect(&self) -> Rect {
        let h = HEADER_H + self.visible_items().len() as u32 * ITEM_H + FOOTER_H;
        Rect::new(MENU_X, self.bar_y - MENU_GAP - h as i32, MENU_W, h)
    }

    pub fn item_rect(&self, index: usize) -> Rect {
        let panel = self.panel_rect();
        Rect::new(
            panel.x,
            panel.y + HEADER_H as i32 + index as i32 * ITEM_H as i32,
            panel.w,
            ITEM_H,
        )
    }

    pub fn footer_rect(&self) -> Rect {
        let panel = self.panel_rect();
        Rect::new(panel.x, panel.bottom() - FOOTER_H as i32, panel.w, FOOTER_H)
    }

    pub fn hit_test(&self, p: Point) -> StartMenuHit {
        if !self.open {
            return StartMenuHit::Outside;
        }
        let panel = self.panel_rect();
        if !panel.contains(p) {
            return StartMenuHit::Outside;
        }
        if p.y < panel.y + HEADER_H as i32 {
            return StartMenuHit::Header;
        }
        if self.footer_rect().contains(p) {
            return StartMenuHit::Shutdown;
        }
        let count = self.visible_items().len();
        (0..count)
            .find(|i| self.item_rect(*i).contains(p))
            .map_or(StartMenuHit::Panel, StartMenuHit::Item)
    }

    /// Handle a click while the menu is open.
    ///
    /// Items open their content, the footer shuts down, and a click
    /// outside the panel closes the menu.
    pub fn click(&mut self, p: Point) -> StartMenuAction {
        match self.hit_test(p) {
            StartMenuHit::Item(index) => self.activate(index),
            StartMenuHit::Shutdown => {
                self.close();
                StartMenuAction::Shutdown
            },
            StartMenuHit::Outside => {
                self.close();
                StartMenuAction::None
            },
            StartMenuHit::Header | StartMenuHit::Panel => StartMenuAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> StartMenuState {
        StartMenuState::new(StartMenuState::default_items(), &FolioConfig::default())
    }

    #[test]
    fn toggle_and_close() {
        let mut m = menu();
        assert!(!m.is_open());
        m.toggle();
        assert!(m.is_open());
        m.toggle();
        assert!(!m.is_open());
        m.toggle();
        m.close();
        assert!(!m.is_open());
    }

    #[test]
    fn activate_opens_and_closes_menu() {
        let mut m = menu();
        assert_eq!(m.activate(0), StartMenuAction::None);
        m.toggle();
        assert_eq!(
            m.activate(1),
            StartMenuAction::Open {
                key: ContentKey::VsCode,
                label: "About Me (Code)"
            }
        );
        assert!(!m.is_open());
    }

    #[test]
    fn activate_out_of_range_keeps_menu_open() {
        let mut m = menu();
        m.toggle();
        assert_eq!(m.activate(99), StartMenuAction::None);
        assert!(m.is_open());
    }

    #[test]
    fn search_filters_items() {
        let mut m = menu();
        m.toggle();
        m.set_query("  TERM ");
        let items = m.visible_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].key, ContentKey::Terminal);
        m.toggle();
        m.toggle();
        assert_eq!(m.visible_items().len(), 8);
    }

    #[test]
    fn panel_sits_above_taskbar() {
        let m = menu();
        let panel = m.panel_rect();
        assert!(panel.bottom() <= FolioConfig::default().workspace_height() as i32);
        assert!(panel.y >= 0);
    }

    #[test]
    fn click_routes_to_item_footer_and_outside() {
        let mut m = menu();
        m.toggle();
        let item = m.item_rect(4);
        assert_eq!(
            m.click(Point::new(item.x + 10, item.y + 5)),
            StartMenuAction::Open {
                key: ContentKey::Certifications,
                label: "Certifications"
            }
        );

        m.toggle();
        let footer = m.footer_rect();
        assert_eq!(m.click(Point::new(footer.x + 10, footer.y + 5)), StartMenuAction::Shutdown);
        assert!(!m.is_open());

        m.toggle();
        assert_eq!(m.click(Point::new(1000, 10)), StartMenuAction::None);
        assert!(!m.is_open());
    }

    #[test]
    fn header_click_keeps_menu_open() {
        let mut m = menu();
        m.toggle();
        let panel = m.panel_rect();
        assert_eq!(m.hit_test(Point::new(panel.x + 5, panel.y + 5)), StartMenuHit::Header);
        assert_eq!(m.click(Point::new(panel.x + 5, panel.y + 5)), StartMenuAction::None);
        assert!(m.is_open());
    }
}
