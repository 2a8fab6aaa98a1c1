//! # Civil Clock
//!
//! Timestamps for the dispense log, expressed in one fixed named zone no matter
//! which locale the host machine runs in.
//!
//! ```text
//! Utc::now() ──► + offset (e.g. +08:00 Asia/Manila) ──► truncate to seconds
//!                                                           │
//!                                                           ▼
//!                                          "2025-01-01 14:30:05"
//!                                   (logs.date_taken and the mirror file)
//! ```

use chrono::{FixedOffset, NaiveDate, NaiveDateTime, Offset, Timelike, Utc};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::TIMESTAMP_FORMAT;

/// Zone used when no configuration overrides it.
pub const DEFAULT_ZONE_NAME: &str = "Asia/Manila";

/// UTC offset of [`DEFAULT_ZONE_NAME`] in seconds. The zone observes no DST.
pub const DEFAULT_UTC_OFFSET_SECS: i32 = 8 * 3600;

// =============================================================================
// Civil Timestamp
// =============================================================================

/// A wall-clock date and time at seconds resolution, `YYYY-MM-DD HH:MM:SS`.
///
/// Ordering follows the calendar, which for this fixed-width layout is also
/// the lexical order of the stored text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CivilTimestamp(NaiveDateTime);

impl CivilTimestamp {
    /// Wraps a naive date-time, dropping sub-second precision.
    pub fn new(at: NaiveDateTime) -> Self {
        CivilTimestamp(at.with_nanosecond(0).unwrap_or(at))
    }

    /// Returns the underlying date-time.
    pub fn naive(&self) -> NaiveDateTime {
        self.0
    }

    /// Returns the calendar date part.
    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }
}

impl fmt::Display for CivilTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(TIMESTAMP_FORMAT))
    }
}

impl FromStr for CivilTimestamp {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
            .map(CivilTimestamp::new)
            .map_err(|_| ValidationError::invalid("timestamp", "expected YYYY-MM-DD HH:MM:SS"))
    }
}

impl From<CivilTimestamp> for String {
    fn from(ts: CivilTimestamp) -> Self {
        ts.to_string()
    }
}

impl TryFrom<String> for CivilTimestamp {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// =============================================================================
// Civil Clock
// =============================================================================

/// Source of "now" in a fixed named zone.
///
/// ## Usage
/// ```rust
/// use dispensary_core::CivilClock;
///
/// let clock = CivilClock::default();
/// assert_eq!(clock.zone_name(), "Asia/Manila");
/// let stamp = clock.now().to_string();
/// assert_eq!(stamp.len(), "2025-01-01 00:00:00".len());
/// ```
#[derive(Debug, Clone)]
pub struct CivilClock {
    zone_name: String,
    offset: FixedOffset,
    frozen: Option<NaiveDateTime>,
}

impl CivilClock {
    /// Creates a clock for a named zone at a fixed UTC offset.
    pub fn new(zone_name: impl Into<String>, offset: FixedOffset) -> Self {
        CivilClock {
            zone_name: zone_name.into(),
            offset,
            frozen: None,
        }
    }

    /// Creates a clock that always reports the given wall-clock time (for tests).
    pub fn fixed(at: NaiveDateTime) -> Self {
        CivilClock {
            frozen: Some(at),
            ..CivilClock::default()
        }
    }

    /// Name of the zone this clock reports in.
    pub fn zone_name(&self) -> &str {
        &self.zone_name
    }

    /// UTC offset of the zone.
    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Current civil time, truncated to whole seconds.
    pub fn now(&self) -> CivilTimestamp {
        match self.frozen {
            Some(at) => CivilTimestamp::new(at),
            None => CivilTimestamp::new(Utc::now().with_timezone(&self.offset).naive_local()),
        }
    }

    /// Current civil date.
    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

impl Default for CivilClock {
    fn default() -> Self {
        let offset = FixedOffset::east_opt(DEFAULT_UTC_OFFSET_SECS).unwrap_or_else(|| Utc.fix());
        CivilClock::new(DEFAULT_ZONE_NAME, offset)
    }
}
