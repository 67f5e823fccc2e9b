//! Wall-clock access for the taskbar clock.

use folio_types::error::Result;

/// A broken-down UTC timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemTime {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Source of the current time.
pub trait TimeService {
    fn now(&self) -> Result<SystemTime>;
}

/// [`TimeService`] backed by the host clock (UTC).
#[derive(Debug, Default, Clone, Copy)]
pub struct WallClock;

impl TimeService for WallClock {
    fn now(&self) -> Result<SystemTime> {
        let secs = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Ok(from_unix_secs(secs))
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub SystemTime);

impl TimeService for FixedClock {
    fn now(&self) -> Result<SystemTime> {
        Ok(self.0)
    }
}

/// Break seconds since the Unix epoch into calendar fields.
pub fn from_unix_secs(secs: u64) -> SystemTime {
    let time_of_day = secs % 86_400;
    let (year, month, day) = civil_date(secs / 86_400);
    SystemTime {
        year,
        month,
        day,
        hour: (time_of_day / 3600) as u8,
        minute: ((time_of_day % 3600) / 60) as u8,
        second: (time_of_day % 60) as u8,
    }
}

fn is_leap(year: u16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn civil_date(mut days: u64) -> (u16, u8, u8) {
    let mut year = 1970u16;
    loop {
        let len = if is_leap(year) { 366 } else { 365 };
        if days < len {
            break;
        }
        days -= len;
        year += 1;
    }
    let feb = if is_leap(year) { 29 } else { 28 };
    let lengths: [u64; 12] = [31, feb, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    let mut month = 1u8;
    for len in lengths {
        if days < len {
            break;
        }
        days -= len;
        month += 1;
    }
    (year, month, days as u8 + 1)
}
