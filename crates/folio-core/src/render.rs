//! Text rendering of the shell state.
//!
//! The headless frontend prints a [`Scene`] after every command. Sections
//! are drawn bottom-up in the same order a compositor would layer them:
//! icons, sidebar, windows by ascending z-index, start menu, taskbar.

use std::fmt::Write;

use crate::desktop::{Desktop, ShellStage};
use crate::icons::IconKind;
use crate::taskbar;
use crate::welcome::WelcomeStage;

/// Lines of one rendered frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scene {
    pub lines: Vec<String>,
}

impl Scene {
    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }
}

impl std::fmt::Display for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Build the scene for the current shell state.
pub fn render(desktop: &Desktop) -> Scene {
    let mut scene = Scene::default();
    let title = &desktop.config().window_title;
    match desktop.stage() {
        ShellStage::Off => scene.push(format!("== {title} == (off)")),
        ShellStage::Welcome(stage) => {
            scene.push(format!("== {title} == welcome"));
            scene.push(match stage {
                WelcomeStage::Intro => "Hello there...",
                WelcomeStage::NameEntry => "What's your name? (name <text>)",
                WelcomeStage::Ready => "Ready. (enter)",
            });
        },
        ShellStage::Desktop => render_desktop(desktop, &mut scene),
    }
    scene
}

fn render_desktop(desktop: &Desktop, scene: &mut Scene) {
    let title = &desktop.config().window_title;
    match desktop.visitor() {
        Some(name) => scene.push(format!("== {title} == welcome back, {name}")),
        None => scene.push(format!("== {title} ==")),
    }

    let certs = desktop.sidebar().certification_count();
    let mut icons = String::from("icons:");
    for icon in desktop.icons().icons() {
        let mark = if desktop.icons().is_selected(icon.key) { "*" } else { "" };
        let _ = write!(icons, " [{mark}{}{}]", icon.name, kind_suffix(icon.kind));
        if let Some(badge) = icon.badge(certs) {
            let _ = write!(icons, "({badge})");
        }
    }
    scene.push(icons);

    let sidebar = desktop.sidebar();
    let tiles: Vec<String> = sidebar
        .tiles()
        .iter()
        .map(|t| format!("{} {}", t.label, t.value_text()))
        .collect();
    scene.push(format!("sidebar: {}", tiles.join(" | ")));
    scene.push(format!("  \"{}\"", sidebar.quote()));
    if let Some(line) = sidebar.typed_text().lines().last() {
        scene.push(format!("  term> {line}"));
    }

    let wm = desktop.wm();
    for rec in wm.draw_order() {
        let id = rec.id();
        let Some(frame) = desktop.chrome(id).and_then(|c| c.frame(wm, desktop.metrics())) else {
            continue;
        };
        let mut flags = String::new();
        if wm.is_active(id) {
            flags.push_str(" active");
        }
        if desktop.chrome(id).is_some_and(|c| c.is_maximized()) {
            flags.push_str(" max");
        }
        scene.push(format!(
            "window {id} '{}' [{}] @{},{} {}x{} z={}{flags}",
            rec.title(),
            rec.content(),
            frame.x,
            frame.y,
            frame.w,
            frame.h,
            rec.z_index(),
        ));
        if let Some(view) = desktop.view(id) {
            scene.push(format!("  # {}", view.heading()));
            for line in view.visible_lines() {
                scene.push(format!("  | {line}"));
            }
        }
    }

    let menu = desktop.start_menu();
    if menu.is_open() {
        scene.push(format!(
            "start menu: {} ({})",
            crate::startmenu::OWNER_NAME,
            crate::startmenu::OWNER_TITLE
        ));
        for (i, item) in menu.visible_items().iter().enumerate() {
            scene.push(format!("  {i}: {}", item.label));
        }
        scene.push("  [Shutdown]");
    }

    let mut bar = String::from("taskbar: [Start]");
    for (i, entry) in taskbar::entries(wm).iter().enumerate() {
        let state = if entry.active {
            "*"
        } else if entry.minimized {
            "_"
        } else {
            ""
        };
        let _ = write!(bar, " {i}:{}{state}", entry.title);
    }
    let _ = write!(
        bar,
        " | {} {}",
        desktop.taskbar().clock_text(),
        desktop.taskbar().date_text()
    );
    scene.push(bar);
}

fn kind_suffix(kind: IconKind) -> &'static str {
    match kind {
        IconKind::Folder => "/",
        IconKind::File => "",
        IconKind::Browser => "@",
        IconKind::Terminal => ">",
        IconKind::Settings => "~",
    }
}
