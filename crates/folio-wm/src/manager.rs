//! Window manager: open windows, stacking order, and the active window.
//!
//! All operations are synchronous and infallible. Requests naming a window
//! that no longer exists are ignored, since pointer events can race window
//! removal (a close button clicked twice, a taskbar click on a window closed
//! a moment earlier).

use folio_types::config::FolioConfig;
use folio_types::content::ContentKey;
use folio_types::geometry::{Point, Size};

use crate::window::{WindowId, WindowRecord};

/// Placement of newly opened windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeLayout {
    pub origin: Point,
    pub step: i32,
    pub wrap: u32,
}

impl Default for CascadeLayout {
    fn default() -> Self {
        Self {
            origin: Point::new(150, 50),
            step: 30,
            wrap: 10,
        }
    }
}

impl CascadeLayout {
    /// Top-left corner of the `n`th window created.
    pub fn position(&self, n: u64) -> Point {
        let k = (n % u64::from(self.wrap.max(1))) as i32;
        Point::new(self.origin.x + k * self.step, self.origin.y + k * self.step)
    }
}

/// Owns every open [`WindowRecord`].
#[derive(Debug)]
pub struct WindowManager {
    /// Records in creation order.
    windows: Vec<WindowRecord>,
    active: Option<WindowId>,
    next_id: u64,
    next_z: i32,
    /// Where z-indices restart when the counter is compacted.
    base_z: i32,
    /// Windows created so far (drives the cascade).
    created: u64,
    cascade: CascadeLayout,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new(CascadeLayout::default(), 10)
    }
}

impl WindowManager {
    pub fn new(cascade: CascadeLayout, first_z_index: i32) -> Self {
        Self {
            windows: Vec::new(),
            active: None,
            next_id: 1,
            next_z: first_z_index,
            base_z: first_z_index.min(i32::MAX / 2),
            created: 0,
            cascade,
        }
    }

    pub fn from_config(config: &FolioConfig) -> Self {
        let cascade = CascadeLayout {
            origin: config.cascade_origin(),
            step: config.cascade_step,
            wrap: config.cascade_wrap,
        };
        Self::new(cascade, config.first_z_index)
    }

    /// Open a window for `content`, or bring the existing one forward.
    ///
    /// Re-opening restores a minimized window and focuses it; the existing
    /// id is returned and `title` is ignored.
    pub fn open(&mut self, content: ContentKey, title: &str) -> WindowId {
        if let Some(existing) = self.find_by_content(content).map(WindowRecord::id) {
            log::debug!("{content} already open as {existing}, focusing");
            self.restore(existing);
            return existing;
        }

        let id = WindowId::from_raw(self.next_id);
        self.next_id += 1;
        let position = self.cascade.position(self.created);
        self.created += 1;
        let z = self.take_z();
        self.windows.push(WindowRecord::new(
            id,
            title.to_string(),
            content,
            position,
            content.default_size(),
            z,
        ));
        self.active = Some(id);
        log::info!("Opened {id} '{title}' ({content}) at {},{} z={z}", position.x, position.y);
        id
    }

    /// Remove a window. Returns the removed record, or `None` if absent.
    pub fn close(&mut self, id: WindowId) -> Option<WindowRecord> {
        let idx = self.index_of(id)?;
        let record = self.windows.remove(idx);
        if self.active == Some(id) {
            self.reassign_active();
        }
        log::info!("Closed {id} '{}'", record.title());
        Some(record)
    }

    /// Hide a window, passing active status on if it held it.
    pub fn minimize(&mut self, id: WindowId) {
        let Some(rec) = self.get_mut(id) else {
            log::debug!("minimize: {id} not open");
            return;
        };
        if rec.minimized {
            return;
        }
        rec.minimized = true;
        if self.active == Some(id) {
            self.reassign_active();
        }
        log::debug!("Minimized {id}, active now {:?}", self.active);
    }

    /// Un-hide a window and focus it.
    pub fn restore(&mut self, id: WindowId) {
        let Some(rec) = self.get_mut(id) else {
            log::debug!("restore: {id} not open");
            return;
        };
        rec.minimized = false;
        self.focus(id);
    }

    /// Raise a window above all others and make it active.
    ///
    /// A minimized window is left untouched: the active window must always
    /// be visible, and restoring is a separate request.
    pub fn focus(&mut self, id: WindowId) {
        match self.get(id) {
            None => {
                log::debug!("focus: {id} not open");
                return;
            },
            Some(rec) if rec.is_minimized() => {
                log::debug!("focus: {id} is minimized, ignoring");
                return;
            },
            Some(_) => {},
        }
        let z = self.take_z();
        if let Some(rec) = self.get_mut(id) {
            rec.z_index = z;
        }
        self.active = Some(id);
        log::debug!("Focused {id} z={z}");
    }

    /// Move a window. Stacking order and active status are unchanged.
    pub fn update_position(&mut self, id: WindowId, position: Point) {
        if let Some(rec) = self.get_mut(id) {
            rec.position = position;
        }
    }

    /// Change a window's stored size.
    pub fn resize(&mut self, id: WindowId, size: Size) {
        if let Some(rec) = self.get_mut(id) {
            rec.size = size;
        }
    }

    pub fn get(&self, id: WindowId) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.id() == id)
    }

    pub fn find_by_content(&self, content: ContentKey) -> Option<&WindowRecord> {
        self.windows.iter().find(|w| w.content() == content)
    }

    /// The active window, if any. Always open and not minimized.
    pub fn active(&self) -> Option<WindowId> {
        self.active
    }

    pub fn is_active(&self, id: WindowId) -> bool {
        self.active == Some(id)
    }

    /// All windows in creation order, minimized ones included.
    pub fn windows(&self) -> impl Iterator<Item = &WindowRecord> {
        self.windows.iter()
    }

    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// Visible windows from bottom to top.
    pub fn draw_order(&self) -> Vec<&WindowRecord> {
        let mut visible: Vec<&WindowRecord> =
            self.windows.iter().filter(|w| !w.is_minimized()).collect();
        visible.sort_by_key(|w| w.z_index());
        visible
    }

    // -- Private helpers ------------------------------------------------------

    fn index_of(&self, id: WindowId) -> Option<usize> {
        self.windows.iter().position(|w| w.id() == id)
    }

    fn get_mut(&mut self, id: WindowId) -> Option<&mut WindowRecord> {
        self.windows.iter_mut().find(|w| w.id() == id)
    }

    fn take_z(&mut self) -> i32 {
        if self.next_z == i32::MAX {
            self.compact_z();
        }
        let z = self.next_z;
        self.next_z += 1;
        z
    }

    /// Renumber z-indices from `base_z`, keeping the stacking order.
    fn compact_z(&mut self) {
        let mut order: Vec<usize> = (0..self.windows.len()).collect();
        order.sort_by_key(|&i| self.windows[i].z_index);
        let mut z = self.base_z;
        for i in order {
            self.windows[i].z_index = z;
            z += 1;
        }
        self.next_z = z;
        log::debug!("Compacted z-indices, next is {z}");
    }

    /// Hand active status to the highest visible window, or nobody.
    fn reassign_active(&mut self) {
        self.active = self
            .windows
            .iter()
            .filter(|w| !w.is_minimized())
            .max_by_key(|w| w.z_index())
            .map(WindowRecord::id);
    }
}
