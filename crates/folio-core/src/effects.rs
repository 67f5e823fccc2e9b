//! Cosmetic text effects driven by scoped timers.
//!
//! None of these types own a timer. Each exposes a `step` that the shell
//! calls when the matching timer fires, and reports what delay it wants
//! next where that varies.

use crate::platform::SystemTime;

// -- Typewriter ---------------------------------------------------------------

/// Lines typed by the sidebar terminal.
pub const TERMINAL_SCRIPT: [&str; 11] = [
    "$ whoami",
    "> Chanakya Yadav",
    "> Data Scientist/ Risk Analyst",
    "$ cat about.txt",
    "> 4+ yrs ML & Credit Risk",
    "> Predictive models expert",
    "$ cat skills.txt",
    "> Python, XGBoost, SQL",
    "> Power BI, Azure, SHAP",
    "$ ./status",
    "> All systems operational!",
];

/// Delay the typewriter asks for before its next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingDelay {
    /// Another character follows on the current line.
    Char,
    /// A line just ended.
    LinePause,
    /// The script finished and the text was cleared.
    Restart,
}

/// Types a fixed script one character at a time, then starts over.
#[derive(Debug, Clone)]
pub struct Typewriter {
    script: &'static [&'static str],
    line: usize,
    column: usize,
    text: String,
}

impl Typewriter {
    pub fn new(script: &'static [&'static str]) -> Self {
        Self {
            script,
            line: 0,
            column: 0,
            text: String::new(),
        }
    }

    /// Advance by one character (or one line break, or a restart).
    pub fn step(&mut self) -> TypingDelay {
        let Some(current) = self.script.get(self.line) else {
            self.line = 0;
            self.column = 0;
            self.text.clear();
            return TypingDelay::Restart;
        };
        match current.chars().nth(self.column) {
            Some(c) => {
                self.text.push(c);
                self.column += 1;
                TypingDelay::Char
            },
            None => {
                self.text.push('\n');
                self.line += 1;
                self.column = 0;
                TypingDelay::LinePause
            },
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lines typed so far, including the partial current line.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(&TERMINAL_SCRIPT)
    }
}

// -- Quote rotation -----------------------------------------------------------

pub const QUOTES: [&str; 8] = [
    "Why did the data scientist break up with the statistician? Too many outliers in the relationship.",
    "Machine learning is just spicy if-else statements.",
    "I told my model to predict my love life. It returned NaN.",
    "My neural network has commitment issues - it keeps overfitting.",
    "Data scientists: turning coffee into insights since 2010.",
    "The best thing about being a data scientist? You can blame everything on the data.",
    "My regression model and I have something in common - we both have too many variables.",
    "In data we trust. Unless it is manually entered.",
];

/// Cycles through a fixed list of quotes.
#[derive(Debug, Clone)]
pub struct QuoteRotator {
    quotes: &'static [&'static str],
    index: usize,
}

impl QuoteRotator {
    pub fn new(quotes: &'static [&'static str]) -> Self {
        Self { quotes, index: 0 }
    }

    pub fn advance(&mut self) {
        if !self.quotes.is_empty() {
            self.index = (self.index + 1) % self.quotes.len();
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> &'static str {
        self.quotes.get(self.index).copied().unwrap_or("")
    }
}

impl Default for QuoteRotator {
    fn default() -> Self {
        Self::new(&QUOTES)
    }
}

// -- Count-up -----------------------------------------------------------------

/// Number of timer steps a count-up takes to reach its target.
pub const COUNT_UP_STEPS: u32 = 30;

/// Animated counter rising from zero to a target in fixed increments.
#[derive(Debug, Clone, PartialEq)]
pub struct CountUp {
    target: u32,
    current: f64,
}

impl CountUp {
    pub fn new(target: u32) -> Self {
        Self {
            target,
            current: 0.0,
        }
    }

    /// Advance one step. Returns `true` once the target is reached.
    pub fn step(&mut self) -> bool {
        let increment = f64::from(self.target) / f64::from(COUNT_UP_STEPS);
        self.current += increment;
        if self.current >= f64::from(self.target) {
            self.current = f64::from(self.target);
        }
        self.is_done()
    }

    /// Change the target, keeping progress. The counter never shows more
    /// than the new target.
    pub fn retarget(&mut self, target: u32) {
        self.target = target;
        self.current = self.current.min(f64::from(target));
    }

    pub fn value(&self) -> u32 {
        self.current.floor() as u32
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn is_done(&self) -> bool {
        self.current >= f64::from(self.target)
    }
}

// -- Clock --------------------------------------------------------------------

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// `HH:MM`, 24-hour.
pub fn format_clock(t: &SystemTime) -> String {
    format!("{:02}:{:02}", t.hour, t.minute)
}

/// `Mon D, YYYY`.
pub fn format_date(t: &SystemTime) -> String {
    let month = MONTHS_SHORT
        .get(usize::from(t.month.saturating_sub(1)))
        .copied()
        .unwrap_or("???");
    format!("{month} {}, {}", t.day, t.year)
}
