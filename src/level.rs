// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Severity levels and the shared level threshold.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::AtomicI32;
use std::sync::atomic::Ordering;

use crate::Error;

/// A severity level.
///
/// Levels are signed integers so that values between the named levels remain representable.
/// From least to most severe, the named levels are:
///
/// - `TRACE` (-8)
/// - `DEBUG` (0)
/// - `INFO` (4)
/// - `WARN` (8)
/// - `ERROR` (12)
/// - `FATAL` (16)
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level(i32);

impl Level {
    /// Very low priority, often extremely verbose, information.
    pub const TRACE: Level = Level(-8);
    /// Lower priority information.
    pub const DEBUG: Level = Level(0);
    /// Useful information.
    pub const INFO: Level = Level(4);
    /// Hazardous situations.
    pub const WARN: Level = Level(8);
    /// Very serious errors.
    pub const ERROR: Level = Level(12);
    /// Errors after which the process terminates.
    pub const FATAL: Level = Level(16);

    /// The level used when a configured name cannot be resolved.
    pub const DEFAULT: Level = Level::INFO;

    const NAMED: [(Level, &'static str); 6] = [
        (Level::TRACE, "TRACE"),
        (Level::DEBUG, "DEBUG"),
        (Level::INFO, "INFO"),
        (Level::WARN, "WARN"),
        (Level::ERROR, "ERROR"),
        (Level::FATAL, "FATAL"),
    ];

    /// Create a level from its raw value.
    pub const fn new(value: i32) -> Level {
        Level(value)
    }

    /// The raw value of this level.
    pub const fn value(self) -> i32 {
        self.0
    }

    /// The name of this level, if it is one of the named levels.
    pub fn name(self) -> Option<&'static str> {
        Level::NAMED
            .iter()
            .find(|(level, _)| *level == self)
            .map(|(_, name)| *name)
    }
}

impl fmt::Debug for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Named levels print their name. Other values print as an offset from the closest named level
/// below them, e.g. `INFO+2` or `TRACE-8`.
impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (base, name) = Level::NAMED
            .iter()
            .rev()
            .find(|(level, _)| *level <= *self)
            .copied()
            .unwrap_or(Level::NAMED[0]);

        let delta = self.0 - base.0;
        if delta == 0 {
            f.pad(name)
        } else {
            f.pad(&format!("{name}{delta:+}"))
        }
    }
}

impl FromStr for Level {
    type Err = Error;

    /// Parse a configuration name. Names are case-sensitive and lowercase.
    fn from_str(s: &str) -> Result<Level, Self::Err> {
        for (name, level) in [
            ("trace", Level::TRACE),
            ("debug", Level::DEBUG),
            ("info", Level::INFO),
            ("warn", Level::WARN),
            ("error", Level::ERROR),
            ("fatal", Level::FATAL),
        ] {
            if s == name {
                return Ok(level);
            }
        }

        Err(Error::new(format!("malformed level: {s:?}")))
    }
}

/// Resolve a configured level name, falling back to [`Level::DEFAULT`] for anything unknown.
///
/// # Examples
///
/// ```
/// use prettylog::Level;
/// use prettylog::resolve_configured_level;
///
/// assert_eq!(resolve_configured_level("warn"), Level::WARN);
/// assert_eq!(resolve_configured_level("WARN"), Level::INFO);
/// assert_eq!(resolve_configured_level(""), Level::INFO);
/// ```
pub fn resolve_configured_level(name: &str) -> Level {
    name.parse().unwrap_or(Level::DEFAULT)
}

/// Whether a record at `level` passes the `threshold`.
pub fn is_enabled(threshold: Level, level: Level) -> bool {
    level >= threshold
}

/// The minimum level that will be emitted.
///
/// A threshold is shared between a [`Logger`](crate::Logger) and its handler, read on every
/// emission decision and replaced with [`Threshold::set`].
#[derive(Debug)]
pub struct Threshold(AtomicI32);

impl Threshold {
    /// Create a new threshold.
    pub fn new(level: Level) -> Self {
        Threshold(AtomicI32::new(level.0))
    }

    /// The current minimum level.
    pub fn level(&self) -> Level {
        Level(self.0.load(Ordering::Acquire))
    }

    /// Replace the minimum level.
    pub fn set(&self, level: Level) {
        self.0.store(level.0, Ordering::Release);
    }

    /// Whether a record at `level` passes the current threshold.
    pub fn enabled(&self, level: Level) -> bool {
        is_enabled(self.level(), level)
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Threshold::new(Level::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_levels_are_ordered() {
        let levels = [
            Level::TRACE,
            Level::DEBUG,
            Level::INFO,
            Level::WARN,
            Level::ERROR,
            Level::FATAL,
        ];
        for pair in levels.windows(2) {
            assert!(pair[0] < pair[1], "{} < {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_resolve_configured_level() {
        for (name, level) in [
            ("trace", Level::TRACE),
            ("debug", Level::DEBUG),
            ("info", Level::INFO),
            ("warn", Level::WARN),
            ("error", Level::ERROR),
            ("fatal", Level::FATAL),
        ] {
            assert_eq!(resolve_configured_level(name), level);
        }

        for name in ["", "bugagaga", "Info", "TRACE", " warn"] {
            assert_eq!(resolve_configured_level(name), Level::INFO, "{name:?}");
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "verbose".parse::<Level>().unwrap_err();
        assert_eq!(err.to_string(), "malformed level: \"verbose\"");
    }

    #[test]
    fn test_display() {
        assert_eq!(Level::TRACE.to_string(), "TRACE");
        assert_eq!(Level::FATAL.to_string(), "FATAL");
        assert_eq!(Level::new(6).to_string(), "INFO+2");
        assert_eq!(Level::new(-16).to_string(), "TRACE-8");
        assert_eq!(Level::new(20).to_string(), "FATAL+4");
        assert_eq!(format!("{:>6}", Level::WARN), "  WARN");
    }

    #[test]
    fn test_is_enabled() {
        let levels = [-16, -8, -1, 0, 3, 4, 8, 12, 16, 20].map(Level::new);
        for threshold in levels {
            for level in levels {
                assert_eq!(is_enabled(threshold, level), level >= threshold);
            }
        }
    }

    #[test]
    fn test_threshold_set() {
        let threshold = Threshold::new(Level::WARN);
        assert!(!threshold.enabled(Level::INFO));
        assert!(threshold.enabled(Level::ERROR));

        threshold.set(Level::FATAL);
        assert_eq!(threshold.level(), Level::FATAL);
        assert!(!threshold.enabled(Level::ERROR));
        assert!(threshold.enabled(Level::FATAL));

        threshold.set(Level::new(-16));
        assert!(threshold.enabled(Level::TRACE));
    }
}
