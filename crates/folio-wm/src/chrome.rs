//! Window chrome: title bar, control buttons, drag, and maximize.
//!
//! One [`WindowChrome`] exists per open window. It owns only view-local
//! state (whether the window is maximized, whether a drag is in progress)
//! and reports everything else to the [`WindowManager`].

use folio_types::config::FolioConfig;
use folio_types::geometry::{Point, Rect, Size};

use crate::manager::WindowManager;
use crate::subscriptions::{PointerSubscriptions, SubscriptionId};
use crate::window::WindowId;

/// Title bar control buttons, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeButton {
    Close,
    Minimize,
    Maximize,
}

impl ChromeButton {
    pub const ALL: [ChromeButton; 3] = [Self::Close, Self::Minimize, Self::Maximize];

    fn slot(self) -> i32 {
        match self {
            Self::Close => 0,
            Self::Minimize => 1,
            Self::Maximize => 2,
        }
    }
}

/// What a point lands on within a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeHit {
    Button(ChromeButton),
    TitleBar,
    Content,
    Outside,
}

/// Chrome geometry shared by every window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromeMetrics {
    pub titlebar_height: u32,
    pub button_diameter: u32,
    pub button_gap: u32,
    /// Distance from the frame's left edge to the first button.
    pub button_inset: i32,
    pub screen: Size,
    pub taskbar_height: u32,
}

impl Default for ChromeMetrics {
    fn default() -> Self {
        Self {
            titlebar_height: 36,
            button_diameter: 12,
            button_gap: 8,
            button_inset: 16,
            screen: Size::new(1280, 800),
            taskbar_height: 48,
        }
    }
}

impl ChromeMetrics {
    pub fn from_config(config: &FolioConfig) -> Self {
        Self {
            titlebar_height: config.titlebar_height,
            screen: Size::new(config.screen_width, config.screen_height),
            taskbar_height: config.taskbar_height,
            ..Self::default()
        }
    }

    /// Frame of a maximized window: the whole screen above the taskbar.
    pub fn maximized_frame(&self) -> Rect {
        Rect::new(
            0,
            0,
            self.screen.width,
            self.screen.height.saturating_sub(self.taskbar_height),
        )
    }

    pub fn titlebar_rect(&self, frame: Rect) -> Rect {
        Rect::new(frame.x, frame.y, frame.w, self.titlebar_height.min(frame.h))
    }

    /// Bounding square of a control button.
    pub fn button_rect(&self, frame: Rect, button: ChromeButton) -> Rect {
        let d = self.button_diameter;
        let x = frame.x + self.button_inset + button.slot() * (d + self.button_gap) as i32;
        let y = frame.y + (self.titlebar_height as i32 - d as i32) / 2;
        Rect::new(x, y, d, d)
    }

    /// Classify `p` against a window occupying `frame`.
    pub fn hit_test(&self, frame: Rect, p: Point) -> ChromeHit {
        if !frame.contains(p) {
            return ChromeHit::Outside;
        }
        if let Some(button) = ChromeButton::ALL
            .into_iter()
            .find(|b| self.button_rect(frame, *b).contains(p))
        {
            return ChromeHit::Button(button);
        }
        if self.titlebar_rect(frame).contains(p) {
            ChromeHit::TitleBar
        } else {
            ChromeHit::Content
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    /// Pointer position relative to the window's top-left corner.
    offset: Point,
    subscription: SubscriptionId,
}

/// View-local state and gesture handling for one window.
#[derive(Debug)]
pub struct WindowChrome {
    id: WindowId,
    maximized: bool,
    drag: Option<Drag>,
}

impl WindowChrome {
    pub fn new(id: WindowId) -> Self {
        Self {
            id,
            maximized: false,
            drag: None,
        }
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Where the window is drawn, or `None` when it is minimized or gone.
    pub fn frame(&self, wm: &WindowManager, metrics: &ChromeMetrics) -> Option<Rect> {
        let rec = wm.get(self.id)?;
        if rec.is_minimized() {
            return None;
        }
        if self.maximized {
            Some(metrics.maximized_frame())
        } else {
            Some(rec.frame())
        }
    }

    pub fn hit_test(&self, wm: &WindowManager, metrics: &ChromeMetrics, p: Point) -> ChromeHit {
        match self.frame(wm, metrics) {
            Some(frame) => metrics.hit_test(frame, p),
            None => ChromeHit::Outside,
        }
    }

    /// Pointer pressed. Any press inside the window focuses it; a press on
    /// the title bar (but not on a button) also starts a drag.
    ///
    /// Returns `false` if the press was outside the window.
    pub fn pointer_down(
        &mut self,
        wm: &mut WindowManager,
        subs: &mut PointerSubscriptions,
        metrics: &ChromeMetrics,
        p: Point,
    ) -> bool {
        let hit = self.hit_test(wm, metrics, p);
        if hit == ChromeHit::Outside {
            return false;
        }
        if hit == ChromeHit::TitleBar
            && !self.maximized
            && let Some(rec) = wm.get(self.id)
        {
            let offset = p.offset_from(rec.position());
            self.end_drag(subs);
            let subscription = subs.subscribe(self.id);
            self.drag = Some(Drag {
                offset,
                subscription,
            });
            log::debug!("Drag start {} offset {},{}", self.id, offset.x, offset.y);
        }
        wm.focus(self.id);
        true
    }

    /// Pointer moved while subscribed. Keeps the title bar on screen by
    /// clamping the top edge at zero.
    pub fn pointer_move(&self, wm: &mut WindowManager, p: Point) {
        let Some(drag) = self.drag else {
            return;
        };
        if self.maximized {
            return;
        }
        let position = Point::new(p.x - drag.offset.x, (p.y - drag.offset.y).max(0));
        wm.update_position(self.id, position);
    }

    /// Pointer released: the drag (if any) ends and its listener goes away.
    pub fn pointer_up(&mut self, subs: &mut PointerSubscriptions) {
        if self.drag.is_some() {
            log::debug!("Drag end {}", self.id);
        }
        self.end_drag(subs);
    }

    /// Click completed on the window. Fires the control button under the
    /// pointer, if any, and returns it.
    pub fn click(
        &mut self,
        wm: &mut WindowManager,
        subs: &mut PointerSubscriptions,
        metrics: &ChromeMetrics,
        p: Point,
    ) -> Option<ChromeButton> {
        let ChromeHit::Button(button) = self.hit_test(wm, metrics, p) else {
            return None;
        };
        match button {
            ChromeButton::Close => {
                self.teardown(subs);
                wm.close(self.id);
            },
            ChromeButton::Minimize => {
                self.end_drag(subs);
                wm.minimize(self.id);
            },
            ChromeButton::Maximize => self.toggle_maximize(wm),
        }
        Some(button)
    }

    /// Flip between maximized and stored geometry, bringing the window forward.
    pub fn toggle_maximize(&mut self, wm: &mut WindowManager) {
        self.maximized = !self.maximized;
        wm.focus(self.id);
    }

    /// Release everything this view holds. Safe to call mid-drag.
    pub fn teardown(&mut self, subs: &mut PointerSubscriptions) {
        self.end_drag(subs);
        subs.release_window(self.id);
    }

    fn end_drag(&mut self, subs: &mut PointerSubscriptions) {
        if let Some(drag) = self.drag.take() {
            subs.unsubscribe(drag.subscription);
        }
    }
}
