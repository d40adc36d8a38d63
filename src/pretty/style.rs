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

use std::borrow::Cow;

use colored::Color;

use crate::Level;

/// Display name and color of a level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelStyle {
    /// The name printed for the level.
    pub name: Cow<'static, str>,
    /// The color of the name in plain text output.
    pub color: Color,
}

/// Level styles, looked up by exact level value.
#[derive(Debug, Clone)]
pub(crate) struct LevelStyles {
    entries: Vec<(Level, LevelStyle)>,
}

impl Default for LevelStyles {
    fn default() -> Self {
        let entry = |level: Level, name: &'static str, color: Color| {
            (
                level,
                LevelStyle {
                    name: Cow::Borrowed(name),
                    color,
                },
            )
        };

        LevelStyles {
            entries: vec![
                entry(Level::TRACE, "TRACE", Color::White),
                entry(Level::DEBUG, "DEBUG", Color::BrightWhite),
                entry(Level::INFO, "INFO", Color::BrightGreen),
                entry(Level::WARN, "WARN", Color::BrightYellow),
                entry(Level::ERROR, "ERROR", Color::BrightMagenta),
                entry(Level::FATAL, "FATAL", Color::BrightRed),
            ],
        }
    }
}

impl LevelStyles {
    pub(crate) fn get(&self, level: Level) -> Option<&LevelStyle> {
        self.entries
            .iter()
            .find(|(l, _)| *l == level)
            .map(|(_, style)| style)
    }

    pub(crate) fn set(&mut self, level: Level, style: LevelStyle) {
        match self.entries.iter_mut().find(|(l, _)| *l == level) {
            Some((_, existing)) => *existing = style,
            None => self.entries.push((level, style)),
        }
    }
}
