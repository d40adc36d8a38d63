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

//! Renderers for the individual fields of a record.

use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use colored::Color;
use colored::Colorize;
use serde_json::Map;

use crate::Record;
use crate::kv::Attr;
use crate::kv::LEVEL_KEY;
use crate::kv::SOURCE_KEY;
use crate::kv::TIME_KEY;
use crate::kv::Value;
use crate::kv::collect_json;
use crate::pretty::PrettyHandler;
use crate::record::Source;

const PLAIN_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const TIME_COLOR: Color = Color::White;
const MESSAGE_COLOR: Color = Color::BrightWhite;

enum Rewrite {
    Keep,
    Drop,
    Replace(String),
}

impl PrettyHandler {
    fn rewrite(&self, key: &str, value: Value) -> Rewrite {
        let Some(replace) = self.options.replace_attr.as_ref() else {
            return Rewrite::Keep;
        };

        let attr = replace(&[], Attr::new(key, value.clone()));
        if attr.key.is_empty() {
            Rewrite::Drop
        } else if attr.value == value {
            Rewrite::Keep
        } else {
            Rewrite::Replace(attr.value.to_string())
        }
    }

    fn paint(&self, text: String, color: Color) -> String {
        if self.json || self.no_color || text.is_empty() {
            text
        } else {
            text.color(color).to_string()
        }
    }

    pub(super) fn format_time(&self, record: &Record) -> String {
        let ts = record.time();
        let rfc3339 = || format!("{}", ts.display_with_offset(self.timezone.to_offset(ts)));

        let time = if self.json {
            rfc3339()
        } else {
            let zoned = ts.to_zoned(self.timezone.clone());
            jiff::fmt::strtime::format(PLAIN_TIME_FORMAT, &zoned).unwrap_or_else(|_| rfc3339())
        };

        let time = match self.rewrite(TIME_KEY, Value::Time(ts)) {
            Rewrite::Keep => time,
            Rewrite::Drop => return String::new(),
            Rewrite::Replace(time) => time,
        };

        self.paint(time, TIME_COLOR)
    }

    pub(super) fn format_level(&self, record: &Record) -> String {
        let level = record.level();
        let (name, color) = match self.styles.get(level) {
            Some(style) => (style.name.to_string(), Some(style.color)),
            None => (level.to_string(), None),
        };

        let name = match self.rewrite(LEVEL_KEY, Value::Level(level)) {
            Rewrite::Keep => name,
            Rewrite::Drop => return String::new(),
            Rewrite::Replace(name) => name,
        };

        match color {
            Some(color) => self.paint(name, color),
            None => name,
        }
    }

    pub(super) fn format_source(&self, record: &Record) -> String {
        if !self.options.add_source {
            return String::new();
        }
        let Some(source) = record.source() else {
            return String::new();
        };
        let Some(path) = display_path(source) else {
            return String::new();
        };

        match self.rewrite(SOURCE_KEY, Value::Source(source.clone())) {
            Rewrite::Keep => path,
            Rewrite::Drop => String::new(),
            Rewrite::Replace(path) => path,
        }
    }

    pub(super) fn format_message(&self, record: &Record) -> String {
        self.paint(record.message().to_string(), MESSAGE_COLOR)
    }

    pub(super) fn format_attrs(&self, record: &Record) -> Map<String, serde_json::Value> {
        collect_json(record.attrs())
    }
}

// base name of the file relative to the working directory, plus the line
fn display_path(source: &Source) -> Option<String> {
    let cwd = std::env::current_dir().ok()?;
    let relative = relative_path(&cwd, Path::new(source.file()))?;
    let base = relative.file_name()?.to_string_lossy();
    Some(format!("{base}:{}", source.line()))
}

/// Express `path` relative to `base`.
///
/// Relative paths are returned as they are. Returns `None` when no relative form exists, e.g. the
/// two paths live on different drives.
fn relative_path(base: &Path, path: &Path) -> Option<PathBuf> {
    if path.is_relative() {
        return Some(path.to_path_buf());
    }

    let base = base.components().collect::<Vec<_>>();
    let path = path.components().collect::<Vec<_>>();
    let common = base
        .iter()
        .zip(path.iter())
        .take_while(|(a, b)| a == b)
        .count();
    if common == 0 {
        return None;
    }

    let mut relative = PathBuf::new();
    for component in &base[common..] {
        match component {
            Component::Normal(_) => relative.push(".."),
            Component::CurDir => {}
            _ => return None,
        }
    }
    for component in &path[common..] {
        relative.push(component.as_os_str());
    }
    Some(relative)
}
