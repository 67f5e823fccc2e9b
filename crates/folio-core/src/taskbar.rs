//! Taskbar along the bottom of the screen.
//!
//! Shows the start button, one entry per open window (minimized ones
//! included) in creation order, and a clock. Entry clicks follow the
//! toggle convention in [`click_entry`].

use folio_types::config::FolioConfig;
use folio_types::geometry::{Point, Rect};
use folio_wm::{WindowId, WindowManager};

use crate::effects::{format_clock, format_date};
use crate::platform::TimeService;

// -- Layout constants ---------------------------------------------------------

const PAD: i32 = 4;
const START_BUTTON_W: u32 = 40;
const ENTRY_X: i32 = 56;
/// Widest an entry gets. Entries shrink towards [`MIN_ENTRY_W`] as windows open.
const ENTRY_W: u32 = 160;
const MIN_ENTRY_W: u32 = 48;
const ENTRY_GAP: i32 = 4;
/// Width of the close affordance at the right end of each entry.
const ENTRY_CLOSE_W: u32 = 20;
const CLOCK_W: u32 = 120;

// -- Types --------------------------------------------------------------------

/// One taskbar entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskbarEntry {
    pub id: WindowId,
    pub title: String,
    /// Styled as active: the window is active and visible.
    pub active: bool,
    pub minimized: bool,
}

/// What a point on the taskbar lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskbarHit {
    StartButton,
    Entry(usize),
    EntryClose(usize),
    Clock,
    /// Empty bar area.
    Bar,
    Outside,
}

/// Taskbar geometry and cached clock text.
#[derive(Debug)]
pub struct Taskbar {
    bar: Rect,
    clock_text: String,
    date_text: String,
}

impl Taskbar {
    pub fn new(config: &FolioConfig) -> Self {
        let y = config.screen_height.saturating_sub(config.taskbar_height) as i32;
        Self {
            bar: Rect::new(0, y, config.screen_width, config.taskbar_height),
            clock_text: "--:--".to_string(),
            date_text: String::new(),
        }
    }

    pub fn bar_rect(&self) -> Rect {
        self.bar
    }

    pub fn start_button_rect(&self) -> Rect {
        Rect::new(
            PAD,
            self.bar.y + PAD,
            START_BUTTON_W,
            self.bar.h.saturating_sub(2 * PAD as u32),
        )
    }

    /// Rect of the `index`-th of `count` entries.
    pub fn entry_rect(&self, index: usize, count: usize) -> Rect {
        let w = self.entry_width(count);
        let x = ENTRY_X + index as i32 * (w as i32 + ENTRY_GAP);
        Rect::new(x, self.bar.y + PAD, w, self.bar.h.saturating_sub(2 * PAD as u32))
    }

    pub fn entry_close_rect(&self, index: usize, count: usize) -> Rect {
        let entry = self.entry_rect(index, count);
        let w = ENTRY_CLOSE_W.min(entry.w / 2);
        Rect::new(entry.right() - w as i32, entry.y, w, entry.h)
    }

    /// Share of the span between the start button and the clock.
    fn entry_width(&self, count: usize) -> u32 {
        let span = (self.clock_rect().x - PAD - ENTRY_X).max(0);
        let slots = i32::try_from(count.max(1)).unwrap_or(i32::MAX);
        let share = (span / slots - ENTRY_GAP).max(0) as u32;
        share.clamp(MIN_ENTRY_W, ENTRY_W)
    }

    pub fn clock_rect(&self) -> Rect {
        Rect::new(
            self.bar.right() - CLOCK_W as i32 - PAD,
            self.bar.y + PAD,
            CLOCK_W,
            self.bar.h.saturating_sub(2 * PAD as u32),
        )
    }

    /// Classify `p` given the current number of entries.
    pub fn hit_test(&self, p: Point, entry_count: usize) -> TaskbarHit {
        if !self.bar.contains(p) {
            return TaskbarHit::Outside;
        }
        if self.start_button_rect().contains(p) {
            return TaskbarHit::StartButton;
        }
        if self.clock_rect().contains(p) {
            return TaskbarHit::Clock;
        }
        for index in 0..entry_count {
            if self.entry_close_rect(index, entry_count).contains(p) {
                return TaskbarHit::EntryClose(index);
            }
            if self.entry_rect(index, entry_count).contains(p) {
                return TaskbarHit::Entry(index);
            }
        }
        TaskbarHit::Bar
    }

    /// Refresh the cached clock. A failing clock keeps the previous text.
    pub fn update_clock(&mut self, time: &dyn TimeService) {
        match time.now() {
            Ok(now) => {
                self.clock_text = format_clock(&now);
                self.date_text = format_date(&now);
            },
            Err(e) => log::warn!("Clock unavailable: {e}"),
        }
    }

    pub fn clock_text(&self) -> &str {
        &self.clock_text
    }

    pub fn date_text(&self) -> &str {
        &self.date_text
    }
}

/// Entries for every open window, in creation order.
pub fn entries(wm: &WindowManager) -> Vec<TaskbarEntry> {
    wm.windows()
        .map(|w| TaskbarEntry {
            id: w.id(),
            title: w.title().to_string(),
            active: wm.is_active(w.id()) && !w.is_minimized(),
            minimized: w.is_minimized(),
        })
        .collect()
}

/// Click on a window's taskbar entry.
///
/// Minimized windows are restored and focused, the active window is
/// minimized, and any other window is focused.
pub fn click_entry(wm: &mut WindowManager, id: WindowId) {
    let Some(window) = wm.get(id) else {
        log::debug!("Taskbar click on unknown window {id}");
        return;
    };
    if window.is_minimized() {
        wm.restore(id);
        wm.focus(id);
    } else if wm.is_active(id) {
        wm.minimize(id);
    } else {
        wm.focus(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{FixedClock, SystemTime};
    use folio_types::content::ContentKey;
    use folio_types::error::{FolioError, Result};

    fn bar() -> Taskbar {
        Taskbar::new(&FolioConfig::default())
    }

    #[test]
    fn click_toggles_active_window() {
        let mut wm = WindowManager::default();
        let id = wm.open(ContentKey::About, "About Me");
        click_entry(&mut wm, id);
        assert!(wm.get(id).is_some_and(|w| w.is_minimized()));
        assert_eq!(wm.active(), None);

        let before = wm.get(id).map(|w| w.z_index()).unwrap_or_default();
        click_entry(&mut wm, id);
        let w = wm.get(id).expect("window");
        assert!(!w.is_minimized());
        assert_eq!(wm.active(), Some(id));
        assert!(w.z_index() > before);
    }

    #[test]
    fn click_inactive_focuses_without_hiding() {
        let mut wm = WindowManager::default();
        let a = wm.open(ContentKey::VsCode, "AboutMe.py");
        let b = wm.open(ContentKey::Excel, "Skills");
        click_entry(&mut wm, a);
        assert_eq!(wm.active(), Some(a));
        assert!(wm.windows().all(|w| !w.is_minimized()));
        let za = wm.get(a).map(|w| w.z_index());
        let zb = wm.get(b).map(|w| w.z_index());
        assert!(za > zb);
    }

    #[test]
    fn click_unknown_is_noop() {
        let mut wm = WindowManager::default();
        click_entry(&mut wm, WindowId::from_raw(42));
        assert!(wm.is_empty());
    }

    #[test]
    fn entries_track_state() {
        let mut wm = WindowManager::default();
        let a = wm.open(ContentKey::About, "About Me");
        let b = wm.open(ContentKey::Terminal, "Terminal");
        wm.minimize(b);
        let list = entries(&wm);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, a);
        assert!(list[0].active);
        assert!(list[1].minimized);
        assert!(!list[1].active);
    }

    #[test]
    fn hit_test_layout() {
        let t = bar();
        let y = t.bar_rect().y + 10;
        assert_eq!(t.hit_test(Point::new(10, y), 0), TaskbarHit::StartButton);
        assert_eq!(t.hit_test(Point::new(ENTRY_X + 5, y), 2), TaskbarHit::Entry(0));
        let close = t.entry_close_rect(1, 2);
        assert_eq!(t.hit_test(Point::new(close.x + 1, y), 2), TaskbarHit::EntryClose(1));
        assert_eq!(t.hit_test(Point::new(ENTRY_X + 5, y), 0), TaskbarHit::Bar);
        assert_eq!(t.hit_test(Point::new(1270, y), 0), TaskbarHit::Clock);
        assert_eq!(t.hit_test(Point::new(10, 10), 0), TaskbarHit::Outside);
    }

    #[test]
    fn entries_shrink_to_stay_clickable() {
        let t = bar();
        let count = ContentKey::ALL.len();
        let clock = t.clock_rect();
        for index in 0..count {
            let r = t.entry_rect(index, count);
            assert!(r.right() <= clock.x, "entry {index} runs under the clock");
            let p = Point::new(r.x + 2, r.y + 2);
            assert_eq!(t.hit_test(p, count), TaskbarHit::Entry(index));
            let close = t.entry_close_rect(index, count);
            let p = Point::new(close.x + 1, close.y + 1);
            assert_eq!(t.hit_test(p, count), TaskbarHit::EntryClose(index));
        }
        assert_eq!(t.entry_rect(0, 1).w, ENTRY_W);
    }

    #[test]
    fn clock_updates_from_service() {
        let mut t = bar();
        let clock = FixedClock(SystemTime {
            year: 2025,
            month: 12,
            day: 31,
            hour: 23,
            minute: 59,
            second: 0,
        });
        t.update_clock(&clock);
        assert_eq!(t.clock_text(), "23:59");
        assert_eq!(t.date_text(), "Dec 31, 2025");
    }

    struct BrokenClock;

    impl TimeService for BrokenClock {
        fn now(&self) -> Result<crate::platform::SystemTime> {
            Err(FolioError::Io(std::io::Error::other("no rtc")))
        }
    }

    #[test]
    fn broken_clock_keeps_text() {
        let mut t = bar();
        t.update_clock(&BrokenClock);
        assert_eq!(t.clock_text(), "--:--");
    }
}
