//! Boot-time welcome screen shown before the desktop.

use folio_types::config::TimerConfig;

use crate::timers::{Scheduler, TimerKind, TimerOwner};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WelcomeStage {
    /// Greeting animation.
    Intro,
    /// Waiting for the visitor's name.
    NameEntry,
    /// Name accepted, waiting to enter the desktop.
    Ready,
}

#[derive(Debug)]
pub struct WelcomeScreen {
    stage: WelcomeStage,
    visitor: String,
}

impl Default for WelcomeScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl WelcomeScreen {
    pub fn new() -> Self {
        Self {
            stage: WelcomeStage::Intro,
            visitor: String::new(),
        }
    }

    pub fn mount(&self, scheduler: &mut Scheduler, timers: &TimerConfig) {
        if self.stage == WelcomeStage::Intro {
            scheduler.start_once(TimerOwner::Welcome, TimerKind::WelcomeAdvance, timers.welcome_delay_ms);
        }
    }

    pub fn on_timer(&mut self, kind: TimerKind) {
        if kind == TimerKind::WelcomeAdvance && self.stage == WelcomeStage::Intro {
            self.stage = WelcomeStage::NameEntry;
        }
    }

    /// Submit the visitor's name. Blank names are rejected.
    pub fn submit_name(&mut self, name: &str) -> bool {
        let name = name.trim();
        if self.stage != WelcomeStage::NameEntry || name.is_empty() {
            return false;
        }
        self.visitor = name.to_string();
        self.stage = WelcomeStage::Ready;
        true
    }

    /// Finish the welcome flow, yielding the visitor name once ready.
    pub fn enter(&self) -> Option<&str> {
        (self.stage == WelcomeStage::Ready).then_some(self.visitor.as_str())
    }

    pub fn stage(&self) -> WelcomeStage {
        self.stage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_flow() {
        let timers = TimerConfig::default();
        let mut scheduler = Scheduler::new();
        let mut welcome = WelcomeScreen::new();
        welcome.mount(&mut scheduler, &timers);

        assert!(!welcome.submit_name("Ada"));
        assert!(scheduler.tick(499).is_empty());
        for fired in scheduler.tick(1) {
            welcome.on_timer(fired.kind);
        }
        assert_eq!(welcome.stage(), WelcomeStage::NameEntry);
        assert!(scheduler.is_empty());

        assert!(welcome.enter().is_none());
        assert!(!welcome.submit_name("   "));
        assert!(welcome.submit_name("  Ada "));
        assert_eq!(welcome.enter(), Some("Ada"));
    }
}
