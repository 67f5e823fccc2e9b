//! Sidebar widgets on the right edge of the desktop.
//!
//! Stat tiles (two of them counting up), a rotating quote, and a terminal
//! that types a fixed script. All animation is driven by timers the
//! sidebar starts on [`Sidebar::mount`] under [`TimerOwner::Sidebar`].

use folio_types::config::{FolioConfig, TimerConfig};
use folio_types::content::ContentKey;
use folio_types::geometry::{Point, Rect};

use crate::effects::{CountUp, QuoteRotator, Typewriter, TypingDelay};
use crate::timers::{Scheduler, TimerKind, TimerOwner};

const SIDEBAR_W: u32 = 288;
const MARGIN: i32 = 16;
const TILE_W: u32 = 136;
const TILE_H: u32 = 72;
const TILE_GAP: i32 = 16;

/// Count shown by the "ML Models" tile.
pub const ML_MODEL_COUNT: u32 = 7;

/// Value of a stat tile.
#[derive(Debug, Clone, PartialEq)]
pub enum TileValue {
    Fixed(&'static str),
    Counting(CountUp),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatTile {
    pub label: &'static str,
    pub value: TileValue,
    pub key: ContentKey,
    /// Title of the window the tile opens.
    pub window_name: &'static str,
}

impl StatTile {
    pub fn value_text(&self) -> String {
        match &self.value {
            TileValue::Fixed(text) => (*text).to_string(),
            TileValue::Counting(counter) => counter.value().to_string(),
        }
    }
}

/// Sidebar state.
#[derive(Debug)]
pub struct Sidebar {
    origin: Point,
    tiles: Vec<StatTile>,
    quotes: QuoteRotator,
    typewriter: Typewriter,
    certification_count: usize,
}

impl Sidebar {
    pub fn new(config: &FolioConfig, certification_count: usize) -> Self {
        let x = config.screen_width as i32 - SIDEBAR_W as i32 - MARGIN;
        let tiles = vec![
            StatTile {
                label: "Skills",
                value: TileValue::Fixed("10+"),
                key: ContentKey::Excel,
                window_name: "Skills and Technologies",
            },
            StatTile {
                label: "Years Exp",
                value: TileValue::Fixed("4+"),
                key: ContentKey::Experience,
                window_name: "Experience",
            },
            StatTile {
                label: "ML Models",
                value: TileValue::Counting(CountUp::new(ML_MODEL_COUNT)),
                key: ContentKey::MlModels,
                window_name: "ML Models",
            },
            StatTile {
                label: "Certifications",
                value: TileValue::Counting(CountUp::new(certification_count as u32)),
                key: ContentKey::Certifications,
                window_name: "Certifications",
            },
        ];
        Self {
            origin: Point::new(x, MARGIN),
            tiles,
            quotes: QuoteRotator::default(),
            typewriter: Typewriter::default(),
            certification_count,
        }
    }

    /// Start every sidebar timer. The typewriter types its first character
    /// immediately.
    pub fn mount(&mut self, scheduler: &mut Scheduler, timers: &TimerConfig) {
        let owner = TimerOwner::Sidebar;
        scheduler.start(owner, TimerKind::QuoteRotation, timers.quote_ms);
        scheduler.start(owner, TimerKind::CertificationPoll, timers.cert_poll_ms);
        for (index, tile) in self.tiles.iter().enumerate() {
            if matches!(tile.value, TileValue::Counting(_)) {
                scheduler.start(owner, TimerKind::Counter(index), timers.counter_ms);
            }
        }
        let delay = self.typewriter.step();
        scheduler.reschedule(owner, TimerKind::Typing, typing_delay_ms(delay, timers));
    }

    /// React to one of the sidebar's own timers. Certification polling is
    /// left to the caller, which owns the store.
    pub fn on_timer(&mut self, kind: TimerKind, scheduler: &mut Scheduler, timers: &TimerConfig) {
        match kind {
            TimerKind::QuoteRotation => self.quotes.advance(),
            TimerKind::Typing => {
                let delay = self.typewriter.step();
                scheduler.reschedule(TimerOwner::Sidebar, TimerKind::Typing, typing_delay_ms(delay, timers));
            },
            TimerKind::Counter(index) => {
                let done = match self.tiles.get_mut(index).map(|t| &mut t.value) {
                    Some(TileValue::Counting(counter)) => counter.step(),
                    _ => true,
                };
                if done {
                    scheduler.cancel(TimerOwner::Sidebar, TimerKind::Counter(index));
                }
            },
            _ => {},
        }
    }

    /// Record a fresh certification count. A changed count restarts the
    /// certifications counter toward the new target.
    pub fn set_certification_count(&mut self, count: usize, scheduler: &mut Scheduler, timers: &TimerConfig) {
        if count == self.certification_count {
            return;
        }
        log::debug!("Certification count {} -> {count}", self.certification_count);
        self.certification_count = count;
        for (index, tile) in self.tiles.iter_mut().enumerate() {
            if tile.key != ContentKey::Certifications {
                continue;
            }
            if let TileValue::Counting(counter) = &mut tile.value {
                counter.retarget(count as u32);
                if !counter.is_done() {
                    scheduler.start(TimerOwner::Sidebar, TimerKind::Counter(index), timers.counter_ms);
                }
            }
        }
    }

    pub fn certification_count(&self) -> usize {
        self.certification_count
    }

    pub fn tiles(&self) -> &[StatTile] {
        &self.tiles
    }

    pub fn tile(&self, index: usize) -> Option<&StatTile> {
        self.tiles.get(index)
    }

    pub fn tile_rect(&self, index: usize) -> Rect {
        let col = (index % 2) as i32;
        let row = (index / 2) as i32;
        Rect::new(
            self.origin.x + col * (TILE_W as i32 + TILE_GAP),
            self.origin.y + row * (TILE_H as i32 + TILE_GAP),
            TILE_W,
            TILE_H,
        )
    }

    pub fn hit_test_tile(&self, p: Point) -> Option<usize> {
        (0..self.tiles.len()).find(|i| self.tile_rect(*i).contains(p))
    }

    pub fn quote(&self) -> &'static str {
        self.quotes.current()
    }

    pub fn typed_text(&self) -> &str {
        self.typewriter.text()
    }
}

fn typing_delay_ms(delay: TypingDelay, timers: &TimerConfig) -> u32 {
    match delay {
        TypingDelay::Char => timers.typing_char_ms,
        TypingDelay::LinePause => timers.typing_line_pause_ms,
        TypingDelay::Restart => timers.typing_restart_ms,
    }
}
