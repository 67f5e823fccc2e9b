//! The desktop shell.
//!
//! [`Desktop`] is the single root that owns the window manager and every
//! piece of shell chrome around it. Input events come in through
//! [`Desktop::handle_input`], time through [`Desktop::tick`]; nothing else
//! mutates shell state.

use std::collections::BTreeMap;

use folio_storage::{
    Certification, CertificationRepository, KeyValueStore, NewCertification, ProfileImageRepository,
    Repository,
};
use folio_types::config::FolioConfig;
use folio_types::content::ContentKey;
use folio_types::geometry::Point;
use folio_types::input::InputEvent;
use folio_wm::{ChromeButton, ChromeMetrics, PointerSubscriptions, WindowChrome, WindowId, WindowManager};

use crate::content::ContentView;
use crate::icons::{IconGrid, icon_name};
use crate::platform::TimeService;
use crate::sidebar::Sidebar;
use crate::startmenu::{StartMenuAction, StartMenuHit, StartMenuState};
use crate::taskbar::{self, Taskbar, TaskbarHit};
use crate::timers::{Fired, Scheduler, TimerKind, TimerOwner};
use crate::welcome::{WelcomeScreen, WelcomeStage};

/// Which screen the shell is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellStage {
    Welcome(WelcomeStage),
    Desktop,
    /// Shut down; no further input is processed.
    Off,
}

/// Root of the running shell.
pub struct Desktop {
    config: FolioConfig,
    metrics: ChromeMetrics,
    wm: WindowManager,
    /// One chrome per open window, in creation order.
    chromes: Vec<WindowChrome>,
    views: BTreeMap<WindowId, ContentView>,
    subs: PointerSubscriptions,
    scheduler: Scheduler,
    taskbar: Taskbar,
    start_menu: StartMenuState,
    icons: IconGrid,
    sidebar: Sidebar,
    welcome: Option<WelcomeScreen>,
    visitor: Option<String>,
    store: Box<dyn KeyValueStore>,
    clock: Box<dyn TimeService>,
    powered: bool,
}

impl Desktop {
    /// Boot to the welcome screen.
    pub fn new(config: FolioConfig, mut store: Box<dyn KeyValueStore>, clock: Box<dyn TimeService>) -> Self {
        let certification_count = CertificationRepository::new(store.as_mut()).count();
        let welcome = WelcomeScreen::new();
        let mut scheduler = Scheduler::new();
        welcome.mount(&mut scheduler, &config.timers);
        log::info!(
            "{} booting ({}x{})",
            config.window_title,
            config.screen_width,
            config.screen_height
        );
        Self {
            metrics: ChromeMetrics::from_config(&config),
            wm: WindowManager::from_config(&config),
            chromes: Vec::new(),
            views: BTreeMap::new(),
            subs: PointerSubscriptions::new(),
            scheduler,
            taskbar: Taskbar::new(&config),
            start_menu: StartMenuState::new(StartMenuState::default_items(), &config),
            icons: IconGrid::default(),
            sidebar: Sidebar::new(&config, certification_count),
            welcome: Some(welcome),
            visitor: None,
            store,
            clock,
            powered: true,
            config,
        }
    }

    // -- Stage ----------------------------------------------------------------

    pub fn stage(&self) -> ShellStage {
        if !self.powered {
            ShellStage::Off
        } else if let Some(welcome) = &self.welcome {
            ShellStage::Welcome(welcome.stage())
        } else {
            ShellStage::Desktop
        }
    }

    pub fn is_running(&self) -> bool {
        self.powered
    }

    /// Enter the visitor's name on the welcome screen.
    pub fn submit_name(&mut self, name: &str) -> bool {
        self.welcome.as_mut().is_some_and(|w| w.submit_name(name))
    }

    /// Leave the welcome screen once a name was accepted.
    pub fn enter(&mut self) -> bool {
        let Some(name) = self.welcome.as_ref().and_then(|w| w.enter()).map(str::to_string) else {
            return false;
        };
        log::info!("Welcome, {name}");
        self.visitor = Some(name);
        self.mount_desktop();
        true
    }

    /// Go straight to the desktop without a visitor name.
    pub fn skip_welcome(&mut self) {
        if self.welcome.is_some() {
            self.mount_desktop();
        }
    }

    pub fn visitor(&self) -> Option<&str> {
        self.visitor.as_deref()
    }

    fn mount_desktop(&mut self) {
        self.scheduler.cancel_owner(TimerOwner::Welcome);
        self.welcome = None;
        self.taskbar.update_clock(self.clock.as_ref());
        self.scheduler
            .start(TimerOwner::Taskbar, TimerKind::Clock, self.config.timers.clock_ms);
        self.sidebar.mount(&mut self.scheduler, &self.config.timers);
    }

    /// Tear everything down: every drag listener and every timer.
    pub fn shutdown(&mut self) {
        if !self.powered {
            return;
        }
        for chrome in &mut self.chromes {
            chrome.teardown(&mut self.subs);
        }
        self.subs.clear();
        self.scheduler.cancel_all();
        self.start_menu.close();
        self.powered = false;
        log::info!("{} shut down", self.config.window_title);
    }

    // -- Windows --------------------------------------------------------------

    /// Open `key` (or bring its window forward) and return the window id.
    pub fn open(&mut self, key: ContentKey, title: &str) -> WindowId {
        let existed = self.wm.find_by_content(key).is_some();
        let id = self.wm.open(key, title);
        if !existed {
            self.chromes.push(WindowChrome::new(id));
            let certs = if key == ContentKey::Certifications {
                CertificationRepository::new(self.store.as_mut()).load_or_seed()
            } else {
                Vec::new()
            };
            self.views.insert(id, ContentView::mount(key, &certs));
            if ContentView::reveals_progressively(key) {
                self.scheduler.start(
                    TimerOwner::Window(id),
                    TimerKind::CodeReveal,
                    self.config.timers.code_reveal_ms,
                );
            }
        }
        id
    }

    /// Open `key` titled after its desktop icon, falling back to `label`.
    pub fn open_labelled(&mut self, key: ContentKey, label: &str) -> WindowId {
        let title = icon_name(key).unwrap_or(label);
        self.open(key, title)
    }

    /// Close a window and release everything its view held.
    pub fn close_window(&mut self, id: WindowId) {
        if let Some(pos) = self.chromes.iter().position(|c| c.id() == id) {
            self.chromes[pos].teardown(&mut self.subs);
        }
        self.wm.close(id);
        self.release_window(id);
    }

    pub fn minimize_window(&mut self, id: WindowId) {
        if let Some(pos) = self.chromes.iter().position(|c| c.id() == id) {
            self.chromes[pos].pointer_up(&mut self.subs);
        }
        self.wm.minimize(id);
    }

    pub fn restore_window(&mut self, id: WindowId) {
        self.wm.restore(id);
    }

    pub fn focus_window(&mut self, id: WindowId) {
        self.wm.focus(id);
    }

    /// Flip a window between maximized and its stored geometry.
    /// Minimized windows are left alone.
    pub fn toggle_maximize(&mut self, id: WindowId) {
        if self.wm.get(id).is_none_or(|w| w.is_minimized()) {
            log::debug!("Ignoring maximize of hidden window {id}");
            return;
        }
        if let Some(pos) = self.chromes.iter().position(|c| c.id() == id) {
            self.chromes[pos].toggle_maximize(&mut self.wm);
        }
    }

    fn release_window(&mut self, id: WindowId) {
        self.chromes.retain(|c| c.id() != id);
        self.views.remove(&id);
        self.subs.release_window(id);
        self.scheduler.cancel_owner(TimerOwner::Window(id));
    }

    /// Top-most visible window under `p`.
    pub fn window_at(&self, p: Point) -> Option<WindowId> {
        self.wm
            .draw_order()
            .into_iter()
            .rev()
            .map(|rec| rec.id())
            .find(|id| {
                self.chrome(*id)
                    .and_then(|c| c.frame(&self.wm, &self.metrics))
                    .is_some_and(|frame| frame.contains(p))
            })
    }

    // -- Taskbar and start menu -----------------------------------------------

    /// Click the `index`-th taskbar entry.
    pub fn taskbar_click(&mut self, index: usize) -> bool {
        let Some(id) = self.entry_id(index) else {
            return false;
        };
        taskbar::click_entry(&mut self.wm, id);
        if self.wm.get(id).is_some_and(|w| w.is_minimized())
            && let Some(pos) = self.chromes.iter().position(|c| c.id() == id)
        {
            self.chromes[pos].pointer_up(&mut self.subs);
        }
        true
    }

    /// Click the close affordance of the `index`-th taskbar entry.
    pub fn taskbar_close(&mut self, index: usize) -> bool {
        let Some(id) = self.entry_id(index) else {
            return false;
        };
        self.close_window(id);
        true
    }

    fn entry_id(&self, index: usize) -> Option<WindowId> {
        self.wm.windows().nth(index).map(|w| w.id())
    }

    pub fn toggle_start_menu(&mut self) {
        self.start_menu.toggle();
    }

    /// Activate the `index`-th visible start menu item.
    pub fn start_menu_activate(&mut self, index: usize) -> Option<WindowId> {
        let action = self.start_menu.activate(index);
        self.apply_menu_action(action)
    }

    pub fn set_start_menu_query(&mut self, query: &str) {
        self.start_menu.set_query(query);
    }

    fn apply_menu_action(&mut self, action: StartMenuAction) -> Option<WindowId> {
        match action {
            StartMenuAction::Open { key, label } => Some(self.open_labelled(key, label)),
            StartMenuAction::Shutdown => {
                self.shutdown();
                None
            },
            StartMenuAction::None => None,
        }
    }

    // -- Sidebar --------------------------------------------------------------

    /// Click the `index`-th sidebar stat tile.
    pub fn click_tile(&mut self, index: usize) -> Option<WindowId> {
        let (key, name) = self.sidebar.tile(index).map(|t| (t.key, t.window_name))?;
        Some(self.open(key, name))
    }

    // -- Input ----------------------------------------------------------------

    /// Dispatch one input event. Returns `false` once the shell is off.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        if !self.powered {
            return false;
        }
        if self.welcome.is_some() {
            if event == InputEvent::Quit {
                self.shutdown();
            }
            return self.powered;
        }
        match event {
            InputEvent::PointerDown { x, y } => self.pointer_down(Point::new(x, y)),
            InputEvent::PointerMove { x, y } => self.pointer_move(Point::new(x, y)),
            InputEvent::PointerUp { .. } => self.pointer_up(),
            InputEvent::Click { x, y } => self.click(Point::new(x, y)),
            InputEvent::DoubleClick { x, y } => self.double_click(Point::new(x, y)),
            InputEvent::Quit => self.shutdown(),
        }
        self.powered
    }

    fn pointer_down(&mut self, p: Point) {
        if self.start_menu.is_open() || self.taskbar.bar_rect().contains(p) {
            return;
        }
        if let Some(id) = self.window_at(p)
            && let Some(pos) = self.chromes.iter().position(|c| c.id() == id)
        {
            self.chromes[pos].pointer_down(&mut self.wm, &mut self.subs, &self.metrics, p);
        }
    }

    /// Moves reach only windows holding a pointer subscription.
    fn pointer_move(&mut self, p: Point) {
        for id in self.subs.subscribers() {
            if let Some(chrome) = self.chromes.iter().find(|c| c.id() == id) {
                chrome.pointer_move(&mut self.wm, p);
            }
        }
    }

    fn pointer_up(&mut self) {
        for id in self.subs.subscribers() {
            if let Some(pos) = self.chromes.iter().position(|c| c.id() == id) {
                self.chromes[pos].pointer_up(&mut self.subs);
            }
        }
    }

    fn click(&mut self, p: Point) {
        if self.start_menu.is_open() {
            if self.taskbar.hit_test(p, 0) == TaskbarHit::StartButton {
                self.start_menu.toggle();
                return;
            }
            let outside = self.start_menu.hit_test(p) == StartMenuHit::Outside;
            let action = self.start_menu.click(p);
            self.apply_menu_action(action);
            // Outside clicks close the menu and still reach the desktop
            // surface, but not windows, tiles, or the taskbar.
            if outside
                && !self.taskbar.bar_rect().contains(p)
                && self.window_at(p).is_none()
                && self.sidebar.hit_test_tile(p).is_none()
            {
                self.click_desktop_surface(p);
            }
            return;
        }

        let entry_count = self.wm.window_count();
        match self.taskbar.hit_test(p, entry_count) {
            TaskbarHit::StartButton => {
                self.start_menu.toggle();
                return;
            },
            TaskbarHit::Entry(index) => {
                self.taskbar_click(index);
                return;
            },
            TaskbarHit::EntryClose(index) => {
                self.taskbar_close(index);
                return;
            },
            TaskbarHit::Clock | TaskbarHit::Bar => return,
            TaskbarHit::Outside => {},
        }

        if let Some(id) = self.window_at(p) {
            if let Some(pos) = self.chromes.iter().position(|c| c.id() == id) {
                let pressed = self.chromes[pos].click(&mut self.wm, &mut self.subs, &self.metrics, p);
                if pressed == Some(ChromeButton::Close) {
                    self.release_window(id);
                }
            }
            return;
        }

        if let Some(index) = self.sidebar.hit_test_tile(p) {
            self.click_tile(index);
            return;
        }

        self.click_desktop_surface(p);
    }

    /// A click on an icon selects it. Anywhere else clears the selection.
    fn click_desktop_surface(&mut self, p: Point) {
        match self.icons.hit_test(p).map(|i| i.key) {
            Some(key) => self.icons.select(key),
            None => self.icons.deselect_all(),
        }
        self.start_menu.close();
    }

    fn double_click(&mut self, p: Point) {
        if self.start_menu.is_open()
            || self.taskbar.bar_rect().contains(p)
            || self.window_at(p).is_some()
        {
            return;
        }
        if let Some((key, name)) = self.icons.hit_test(p).map(|i| (i.key, i.name)) {
            self.open(key, name);
        }
    }

    /// Select a desktop icon without going through pointer hit-testing.
    pub fn select_icon(&mut self, key: ContentKey) {
        self.icons.select(key);
        self.start_menu.close();
    }

    // -- Time -----------------------------------------------------------------

    /// Advance every scoped timer by `dt_ms`.
    pub fn tick(&mut self, dt_ms: u32) -> Vec<Fired> {
        if !self.powered {
            return Vec::new();
        }
        let mut fired = self.scheduler.tick(dt_ms);
        // A handler may cancel an interval timer that still has catch-up
        // expiries queued behind it in this batch.
        fired.retain(|f| {
            let live = !f.repeating || self.scheduler.is_running(f.owner, f.kind);
            if live {
                self.on_timer(*f);
            }
            live
        });
        fired
    }

    fn on_timer(&mut self, fired: Fired) {
        match (fired.owner, fired.kind) {
            (TimerOwner::Welcome, kind) => {
                if let Some(welcome) = self.welcome.as_mut() {
                    welcome.on_timer(kind);
                }
            },
            (TimerOwner::Taskbar, TimerKind::Clock) => self.taskbar.update_clock(self.clock.as_ref()),
            (TimerOwner::Sidebar, TimerKind::CertificationPoll) => self.poll_certifications(),
            (TimerOwner::Sidebar, kind) => {
                self.sidebar.on_timer(kind, &mut self.scheduler, &self.config.timers);
            },
            (TimerOwner::Window(id), TimerKind::CodeReveal) => {
                let done = self.views.get_mut(&id).is_none_or(ContentView::reveal_step);
                if done {
                    self.scheduler.cancel(fired.owner, fired.kind);
                }
            },
            (owner, kind) => log::debug!("Unhandled timer {kind:?} for {owner:?}"),
        }
    }

    fn poll_certifications(&mut self) {
        let count = CertificationRepository::new(self.store.as_mut()).count();
        self.sidebar
            .set_certification_count(count, &mut self.scheduler, &self.config.timers);
    }

    // -- Content persistence --------------------------------------------------

    /// Current certification list (defaults when nothing is stored).
    pub fn certifications(&mut self) -> Vec<Certification> {
        CertificationRepository::new(self.store.as_mut()).load()
    }

    pub fn add_certification(&mut self, input: NewCertification) -> Option<Certification> {
        let added = CertificationRepository::new(self.store.as_mut()).add(input)?;
        self.refresh_certifications();
        Some(added)
    }

    pub fn delete_certification(&mut self, id: &str) -> bool {
        let deleted = CertificationRepository::new(self.store.as_mut()).delete(id);
        if deleted {
            self.refresh_certifications();
        }
        deleted
    }

    fn refresh_certifications(&mut self) {
        let certs = CertificationRepository::new(self.store.as_mut()).load();
        for view in self.views.values_mut() {
            view.refresh_certifications(&certs);
        }
        if self.welcome.is_none() && self.powered {
            self.sidebar
                .set_certification_count(certs.len(), &mut self.scheduler, &self.config.timers);
        }
    }

    pub fn profile_image(&mut self) -> Option<String> {
        ProfileImageRepository::new(self.store.as_mut()).load()
    }

    /// Store (or with `None`, forget) the profile picture data URL.
    pub fn set_profile_image(&mut self, data_url: Option<String>) {
        ProfileImageRepository::new(self.store.as_mut()).save(&data_url);
    }

    // -- Accessors ------------------------------------------------------------

    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    pub fn metrics(&self) -> &ChromeMetrics {
        &self.metrics
    }

    pub fn wm(&self) -> &WindowManager {
        &self.wm
    }

    pub fn chrome(&self, id: WindowId) -> Option<&WindowChrome> {
        self.chromes.iter().find(|c| c.id() == id)
    }

    pub fn view(&self, id: WindowId) -> Option<&ContentView> {
        self.views.get(&id)
    }

    pub fn subscriptions(&self) -> &PointerSubscriptions {
        &self.subs
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn taskbar(&self) -> &Taskbar {
        &self.taskbar
    }

    pub fn start_menu(&self) -> &StartMenuState {
        &self.start_menu
    }

    pub fn icons(&self) -> &IconGrid {
        &self.icons
    }

    pub fn sidebar(&self) -> &Sidebar {
        &self.sidebar
    }
}

impl Drop for Desktop {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{FixedClock, SystemTime};
    use folio_storage::MemoryStore;
    use folio_types::geometry::Rect;

    fn clock() -> Box<dyn TimeService> {
        Box::new(FixedClock(SystemTime {
            year: 2025,
            month: 3,
            day: 14,
            hour: 9,
            minute: 26,
            second: 53,
        }))
    }

    fn desktop_with(store: MemoryStore) -> Desktop {
        let mut d = Desktop::new(FolioConfig::default(), Box::new(store), clock());
        d.skip_welcome();
        d
    }

    fn desktop() -> Desktop {
        desktop_with(MemoryStore::new())
    }

    fn frame(d: &Desktop, id: WindowId) -> Rect {
        d.chrome(id)
            .and_then(|c| c.frame(d.wm(), d.metrics()))
            .expect("visible window")
    }

    fn z(d: &Desktop, id: WindowId) -> i32 {
        d.wm().get(id).map(|w| w.z_index()).unwrap_or(i32::MIN)
    }

    fn title_point(d: &Desktop, id: WindowId) -> Point {
        let f = frame(d, id);
        Point::new(f.x + f.w as i32 / 2, f.y + 10)
    }

    fn button_point(d: &Desktop, id: WindowId, button: ChromeButton) -> Point {
        let r = d.metrics().button_rect(frame(d, id), button);
        Point::new(r.x + 1, r.y + 1)
    }

    fn click(d: &mut Desktop, p: Point) {
        d.handle_input(InputEvent::PointerDown { x: p.x, y: p.y });
        d.handle_input(InputEvent::PointerUp { x: p.x, y: p.y });
        d.handle_input(InputEvent::Click { x: p.x, y: p.y });
    }

    #[test]
    fn welcome_flow_then_desktop() {
        let mut d = Desktop::new(FolioConfig::default(), Box::new(MemoryStore::new()), clock());
        assert_eq!(d.stage(), ShellStage::Welcome(WelcomeStage::Intro));
        assert!(!d.enter());
        d.tick(500);
        assert_eq!(d.stage(), ShellStage::Welcome(WelcomeStage::NameEntry));
        assert!(d.submit_name("Grace"));
        assert!(d.enter());
        assert_eq!(d.stage(), ShellStage::Desktop);
        assert_eq!(d.visitor(), Some("Grace"));
        assert_eq!(d.scheduler().owned_by(TimerOwner::Welcome), 0);
        assert!(d.scheduler().is_running(TimerOwner::Taskbar, TimerKind::Clock));
        assert_eq!(d.taskbar().clock_text(), "09:26");
    }

    #[test]
    fn input_ignored_on_welcome_screen() {
        let mut d = Desktop::new(FolioConfig::default(), Box::new(MemoryStore::new()), clock());
        let icon = d.icons().icons()[0].rect();
        d.handle_input(InputEvent::DoubleClick { x: icon.x + 1, y: icon.y + 1 });
        assert!(d.wm().is_empty());
    }

    #[test]
    fn documented_scenario() {
        let mut d = desktop();
        let w1 = d.open(ContentKey::VsCode, "AboutMe.py");
        assert_eq!(w1.raw(), 1);
        assert_eq!(d.wm().active(), Some(w1));

        let w2 = d.open(ContentKey::Excel, "Skills");
        assert_eq!(w2.raw(), 2);
        assert_eq!(d.wm().active(), Some(w2));
        assert!(z(&d, w2) > z(&d, w1));

        assert!(d.taskbar_click(0));
        assert_eq!(d.wm().active(), Some(w1));
        assert!(z(&d, w1) > z(&d, w2));
        assert!(d.wm().windows().all(|w| !w.is_minimized()));

        let p = button_point(&d, w1, ChromeButton::Minimize);
        click(&mut d, p);
        assert!(d.wm().get(w1).is_some_and(|w| w.is_minimized()));
        assert_eq!(d.wm().active(), Some(w2));

        let p = button_point(&d, w2, ChromeButton::Close);
        click(&mut d, p);
        assert!(d.wm().get(w2).is_none());
        assert_eq!(d.wm().active(), None);
        assert!(d.chrome(w2).is_none());

        d.close_window(w1);
        assert!(d.wm().is_empty());
        assert_eq!(d.wm().active(), None);
    }

    #[test]
    fn drag_moves_and_clamps_to_top() {
        let mut d = desktop();
        let id = d.open(ContentKey::About, "About Me");
        let start = title_point(&d, id);
        d.handle_input(InputEvent::PointerDown { x: start.x, y: start.y });
        d.handle_input(InputEvent::PointerMove { x: start.x + 40, y: start.y + 25 });
        let pos = d.wm().get(id).map(|w| w.position()).unwrap_or_default();
        assert_eq!(pos, Point::new(150 + 40, 50 + 25));

        d.handle_input(InputEvent::PointerMove { x: start.x, y: -300 });
        let pos = d.wm().get(id).map(|w| w.position()).unwrap_or_default();
        assert_eq!(pos.y, 0);

        d.handle_input(InputEvent::PointerUp { x: start.x, y: -300 });
        assert!(d.subscriptions().is_empty());
        d.handle_input(InputEvent::PointerMove { x: 900, y: 600 });
        let after = d.wm().get(id).map(|w| w.position()).unwrap_or_default();
        assert_eq!(after.y, 0);
        assert_ne!(after.x, 900);
    }

    #[test]
    fn hundred_drag_cycles_leave_no_listeners() {
        let mut d = desktop();
        let id = d.open(ContentKey::Terminal, "Terminal");
        for i in 0..100 {
            let p = title_point(&d, id);
            d.handle_input(InputEvent::PointerDown { x: p.x, y: p.y });
            d.handle_input(InputEvent::PointerMove { x: p.x + (i % 3), y: p.y + 1 });
            d.handle_input(InputEvent::PointerUp { x: p.x, y: p.y });
        }
        assert_eq!(d.subscriptions().len(), 0);
        let before = d.wm().get(id).map(|w| w.position());
        d.handle_input(InputEvent::PointerMove { x: 5, y: 5 });
        assert_eq!(d.wm().get(id).map(|w| w.position()), before);
    }

    #[test]
    fn closing_mid_drag_releases_listener() {
        let mut d = desktop();
        let id = d.open(ContentKey::About, "About Me");
        let p = title_point(&d, id);
        d.handle_input(InputEvent::PointerDown { x: p.x, y: p.y });
        assert_eq!(d.subscriptions().len(), 1);
        assert!(d.taskbar_close(0));
        assert!(d.subscriptions().is_empty());
        d.handle_input(InputEvent::PointerMove { x: 10, y: 10 });
        assert!(d.wm().is_empty());
    }

    #[test]
    fn control_button_press_does_not_start_drag() {
        let mut d = desktop();
        let id = d.open(ContentKey::About, "About Me");
        let p = button_point(&d, id, ChromeButton::Maximize);
        d.handle_input(InputEvent::PointerDown { x: p.x, y: p.y });
        assert!(d.subscriptions().is_empty());
        d.handle_input(InputEvent::PointerUp { x: p.x, y: p.y });
        d.handle_input(InputEvent::Click { x: p.x, y: p.y });
        assert!(d.chrome(id).is_some_and(WindowChrome::is_maximized));
        assert_eq!(frame(&d, id), d.metrics().maximized_frame());
    }

    #[test]
    fn maximized_window_does_not_drag() {
        let mut d = desktop();
        let id = d.open(ContentKey::About, "About Me");
        d.toggle_maximize(id);
        let stored = d.wm().get(id).map(|w| w.position());
        d.handle_input(InputEvent::PointerDown { x: 300, y: 10 });
        d.handle_input(InputEvent::PointerMove { x: 500, y: 300 });
        d.handle_input(InputEvent::PointerUp { x: 500, y: 300 });
        assert_eq!(d.wm().get(id).map(|w| w.position()), stored);
    }

    #[test]
    fn press_on_lower_window_brings_it_forward() {
        let mut d = desktop();
        let a = d.open(ContentKey::About, "About Me");
        let b = d.open(ContentKey::Experience, "Experience");
        // `a` peeks out above `b` thanks to the cascade.
        let fa = frame(&d, a);
        let p = Point::new(fa.x + fa.w as i32 / 2, fa.y + 5);
        assert_eq!(d.window_at(p), Some(a));
        d.handle_input(InputEvent::PointerDown { x: p.x, y: p.y });
        assert_eq!(d.wm().active(), Some(a));
        assert!(z(&d, a) > z(&d, b));
    }

    #[test]
    fn taskbar_toggle_round_trip() {
        let mut d = desktop();
        let id = d.open(ContentKey::Settings, "Settings");
        let z0 = z(&d, id);
        let entry = d.taskbar().entry_rect(0, 1);
        click(&mut d, Point::new(entry.x + 5, entry.y + 5));
        assert!(d.wm().get(id).is_some_and(|w| w.is_minimized()));
        assert_eq!(d.wm().active(), None);
        click(&mut d, Point::new(entry.x + 5, entry.y + 5));
        assert!(d.wm().get(id).is_some_and(|w| !w.is_minimized()));
        assert_eq!(d.wm().active(), Some(id));
        assert!(z(&d, id) > z0);
    }

    #[test]
    fn start_menu_opens_with_icon_title_and_closes() {
        let mut d = desktop();
        let button = d.taskbar().start_button_rect();
        click(&mut d, Point::new(button.x + 2, button.y + 2));
        assert!(d.start_menu().is_open());

        let id = d.start_menu_activate(1).expect("window");
        assert!(!d.start_menu().is_open());
        let rec = d.wm().get(id).expect("record");
        assert_eq!(rec.content(), ContentKey::VsCode);
        assert_eq!(rec.title(), "AboutMe.py");

        d.toggle_start_menu();
        let again = d.start_menu_activate(1);
        assert_eq!(again, Some(id));
        assert_eq!(d.wm().window_count(), 1);
    }

    #[test]
    fn start_menu_shutdown_stops_shell() {
        let mut d = desktop();
        d.open(ContentKey::VsCode, "AboutMe.py");
        d.toggle_start_menu();
        let footer = d.start_menu().footer_rect();
        click(&mut d, Point::new(footer.x + 3, footer.y + 3));
        assert_eq!(d.stage(), ShellStage::Off);
        assert!(d.scheduler().is_empty());
        assert!(!d.handle_input(InputEvent::Click { x: 1, y: 1 }));
    }

    #[test]
    fn icons_select_then_open_on_double_click() {
        let mut d = desktop();
        let icons = d.icons().icons().to_vec();
        let (first, second) = (icons[0], icons[4]);
        let p1 = Point::new(first.rect().x + 5, first.rect().y + 5);
        let p2 = Point::new(second.rect().x + 5, second.rect().y + 5);

        d.toggle_start_menu();
        d.select_icon(first.key);
        assert!(!d.start_menu().is_open());

        click(&mut d, p2);
        assert!(d.icons().is_selected(second.key));
        assert!(!d.icons().is_selected(first.key));
        assert!(d.wm().is_empty());

        d.handle_input(InputEvent::DoubleClick { x: p1.x, y: p1.y });
        let rec = d.wm().windows().next().expect("opened");
        assert_eq!(rec.content(), first.key);
        assert_eq!(rec.title(), first.name);
    }

    #[test]
    fn empty_desktop_click_deselects_and_closes_menu() {
        let mut d = desktop();
        d.select_icon(ContentKey::About);
        click(&mut d, Point::new(600, 600));
        assert_eq!(d.icons().selected(), None);

        d.toggle_start_menu();
        click(&mut d, Point::new(600, 600));
        assert!(!d.start_menu().is_open());
    }

    #[test]
    fn sidebar_tile_opens_window() {
        let mut d = desktop();
        let r = d.sidebar().tile_rect(2);
        click(&mut d, Point::new(r.x + 3, r.y + 3));
        let rec = d.wm().windows().next().expect("opened");
        assert_eq!(rec.content(), ContentKey::MlModels);
        assert_eq!(rec.title(), "ML Models");
    }

    #[test]
    fn code_view_reveals_then_timer_stops() {
        let mut d = desktop();
        let id = d.open(ContentKey::VsCode, "AboutMe.py");
        let owner = TimerOwner::Window(id);
        assert!(d.scheduler().is_running(owner, TimerKind::CodeReveal));
        let total = d.view(id).map(ContentView::line_count).unwrap_or_default();
        for _ in 0..=total {
            d.tick(15);
        }
        assert!(d.view(id).is_some_and(ContentView::is_fully_revealed));
        assert!(!d.scheduler().is_running(owner, TimerKind::CodeReveal));
    }

    #[test]
    fn closing_window_cancels_its_timers() {
        let mut d = desktop();
        let id = d.open(ContentKey::Jupyter, "projects.ipynb");
        assert_eq!(d.scheduler().owned_by(TimerOwner::Window(id)), 1);
        d.close_window(id);
        assert_eq!(d.scheduler().owned_by(TimerOwner::Window(id)), 0);
        assert!(d.view(id).is_none());
    }

    #[test]
    fn certifications_window_seeds_defaults() {
        let mut d = desktop();
        let id = d.open(ContentKey::Certifications, "Certifications");
        assert_eq!(d.view(id).map(|v| v.visible_lines().len()), Some(2));
        assert_eq!(d.certifications().len(), 2);
    }

    #[test]
    fn certification_changes_reach_view_and_sidebar() {
        let mut d = desktop();
        let id = d.open(ContentKey::Certifications, "Certifications");
        let added = d
            .add_certification(NewCertification {
                name: "Azure Data Scientist".into(),
                issuer: "Microsoft".into(),
                skills: "Azure ML, Python".into(),
                ..NewCertification::default()
            })
            .expect("added");
        assert_eq!(added.icon, "MIC");
        assert_eq!(d.view(id).map(|v| v.visible_lines().len()), Some(3));
        assert_eq!(d.sidebar().certification_count(), 3);

        assert!(d.delete_certification(&added.id));
        assert!(!d.delete_certification(&added.id));
        assert_eq!(d.sidebar().certification_count(), 2);
    }

    #[test]
    fn stored_certifications_drive_sidebar_count() {
        let mut store = MemoryStore::new();
        let mut certs = folio_storage::records::default_certifications();
        certs.truncate(1);
        CertificationRepository::new(&mut store).save(&certs);

        let mut d = desktop_with(store);
        assert_eq!(d.sidebar().certification_count(), 1);
        for _ in 0..40 {
            d.tick(50);
        }
        let tile = d.sidebar().tile(3).map(|t| t.value_text());
        assert_eq!(tile.as_deref(), Some("1"));
    }

    #[test]
    fn profile_image_round_trip() {
        let mut d = desktop();
        assert_eq!(d.profile_image(), None);
        d.set_profile_image(Some("data:image/png;base64,AAAA".into()));
        assert_eq!(d.profile_image().as_deref(), Some("data:image/png;base64,AAAA"));
        d.set_profile_image(None);
        assert_eq!(d.profile_image(), None);
    }

    #[test]
    fn taskbar_minimize_ends_drag() {
        let mut d = desktop();
        let id = d.open(ContentKey::About, "About Me");
        let p = title_point(&d, id);
        d.handle_input(InputEvent::PointerDown { x: p.x, y: p.y });
        assert!(!d.subscriptions().is_empty());

        assert!(d.taskbar_click(0));
        assert!(d.wm().get(id).is_some_and(|w| w.is_minimized()));
        assert!(d.subscriptions().is_empty());

        let before = d.wm().get(id).map(|w| w.position());
        d.handle_input(InputEvent::PointerMove { x: 900, y: 500 });
        assert_eq!(d.wm().get(id).map(|w| w.position()), before);
    }

    #[test]
    fn every_window_reachable_from_taskbar() {
        let mut d = desktop();
        let ids: Vec<WindowId> = ContentKey::ALL.iter().map(|k| d.open(*k, "w")).collect();
        let count = ids.len();
        for (index, id) in ids.iter().enumerate() {
            d.minimize_window(*id);
            let r = d.taskbar().entry_rect(index, count);
            click(&mut d, Point::new(r.x + 2, r.y + 2));
            assert!(d.wm().get(*id).is_some_and(|w| !w.is_minimized()), "entry {index}");
            assert_eq!(d.wm().active(), Some(*id));
        }
    }

    #[test]
    fn outside_click_with_menu_open_clears_selection() {
        let mut d = desktop();
        d.select_icon(ContentKey::About);
        d.toggle_start_menu();
        click(&mut d, Point::new(600, 600));
        assert!(!d.start_menu().is_open());
        assert_eq!(d.icons().selected(), None);
    }

    #[test]
    fn icon_click_with_menu_open_selects_it() {
        let mut d = desktop();
        d.select_icon(ContentKey::About);
        d.toggle_start_menu();
        let r = d
            .icons()
            .icons()
            .iter()
            .find(|i| i.key == ContentKey::Experience)
            .map(|i| i.rect())
            .expect("experience icon");
        click(&mut d, Point::new(r.x + 4, r.y + 4));
        assert!(!d.start_menu().is_open());
        assert_eq!(d.icons().selected(), Some(ContentKey::Experience));
    }

    #[test]
    fn maximize_ignores_minimized_window() {
        let mut d = desktop();
        let id = d.open(ContentKey::Browser, "Browser");
        d.minimize_window(id);
        d.toggle_maximize(id);
        assert!(d.chrome(id).is_some_and(|c| !c.is_maximized()));
        d.restore_window(id);
        assert!(d.chrome(id).is_some_and(|c| !c.is_maximized()));
    }

    #[test]
    fn long_tick_reveals_code_once_and_stays_bounded() {
        let mut d = desktop();
        let id = d.open(ContentKey::VsCode, "AboutMe.py");
        let owner = TimerOwner::Window(id);
        let total = d.view(id).map(ContentView::line_count).unwrap_or_default();
        let running = d.scheduler().len();

        let fired = d.tick(100_000_000);
        let reveals = fired.iter().filter(|f| f.owner == owner).count();
        assert_eq!(reveals, total);
        assert!(fired.len() <= running * crate::timers::MAX_CATCH_UP as usize);
        assert!(d.view(id).is_some_and(ContentView::is_fully_revealed));
        assert!(!d.scheduler().is_running(owner, TimerKind::CodeReveal));
    }

    #[test]
    fn shutdown_cancels_everything() {
        let mut d = desktop();
        let id = d.open(ContentKey::VsCode, "AboutMe.py");
        let p = title_point(&d, id);
        d.handle_input(InputEvent::PointerDown { x: p.x, y: p.y });
        assert!(!d.subscriptions().is_empty());
        assert!(!d.handle_input(InputEvent::Quit));
        assert!(d.subscriptions().is_empty());
        assert!(d.scheduler().is_empty());
        assert!(d.tick(10_000).is_empty());
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Open(usize),
            Task(usize),
            TaskClose(usize),
            Drag(usize, i32, i32),
            Tick(u32),
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                (0..ContentKey::ALL.len()).prop_map(Op::Open),
                (0..6usize).prop_map(Op::Task),
                (0..6usize).prop_map(Op::TaskClose),
                (0..6usize, -200..200i32, -200..200i32).prop_map(|(i, dx, dy)| Op::Drag(i, dx, dy)),
                (1..200u32).prop_map(Op::Tick),
            ]
        }

        proptest! {
            #[test]
            fn shell_bookkeeping_stays_consistent(ops in proptest::collection::vec(op(), 0..40)) {
                let mut d = desktop();
                for op in ops {
                    match op {
                        Op::Open(k) => {
                            let key = ContentKey::ALL[k];
                            d.open(key, key.slug());
                        },
                        Op::Task(i) => {
                            d.taskbar_click(i);
                        },
                        Op::TaskClose(i) => {
                            d.taskbar_close(i);
                        },
                        Op::Drag(i, dx, dy) => {
                            let Some(id) = d.wm().windows().nth(i).map(|w| w.id()) else {
                                continue;
                            };
                            let Some(f) = d.chrome(id).and_then(|c| c.frame(d.wm(), d.metrics())) else {
                                continue;
                            };
                            let p = Point::new(f.x + f.w as i32 / 2, f.y + 10);
                            d.handle_input(InputEvent::PointerDown { x: p.x, y: p.y });
                            d.handle_input(InputEvent::PointerMove { x: p.x + dx, y: p.y + dy });
                            d.handle_input(InputEvent::PointerUp { x: p.x + dx, y: p.y + dy });
                        },
                        Op::Tick(ms) => {
                            d.tick(ms);
                        },
                    }

                    prop_assert!(d.subscriptions().is_empty());
                    prop_assert_eq!(d.chromes.len(), d.wm().window_count());
                    prop_assert_eq!(d.views.len(), d.wm().window_count());
                    for rec in d.wm().windows() {
                        prop_assert!(rec.position().y >= 0);
                    }
                    if let Some(active) = d.wm().active() {
                        prop_assert!(d.wm().get(active).is_some_and(|w| !w.is_minimized()));
                    }
                }
            }
        }
    }
}
