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

//! A handler that renders records as colored text or as JSON lines.

use std::borrow::Cow;
use std::sync::Arc;

use colored::Color;
use jiff::tz::TimeZone;
use serde::Serialize;
use serde_json::Map;

use crate::Error;
use crate::Handler;
use crate::HandlerOptions;
use crate::Level;
use crate::Record;
use crate::Threshold;
use crate::append::Append;

mod fields;
mod style;

pub use self::style::LevelStyle;
use self::style::LevelStyles;

/// A handler that renders each record as a single line.
///
/// Plain text output:
///
/// ```text
/// 2024-08-11 22:44:57 ERROR main.rs:51 disk full {
///   "device": "/dev/sda1"
/// }
/// 2024-08-11 22:44:57 INFO started
/// ```
///
/// JSON output:
///
/// ```json
/// {"time":"2024-08-11T22:44:57.172051+08:00","level":"ERROR","source":"main.rs:51","msg":"disk full","attrs":{"device":"/dev/sda1"}}
/// {"time":"2024-08-11T22:44:57.172187+08:00","level":"INFO","msg":"started"}
/// ```
///
/// In plain text the time, level and message are colored. Empty fields are left out in both
/// modes. Rendering never fails: a field that cannot be rendered is omitted, and a failed write
/// to the appender is ignored.
///
/// # Examples
///
/// ```
/// use prettylog::HandlerOptions;
/// use prettylog::Level;
/// use prettylog::append::Stdout;
/// use prettylog::pretty::PrettyHandler;
///
/// let handler = PrettyHandler::new(Stdout::default(), HandlerOptions::new(Level::INFO)).json(true);
/// ```
#[derive(Debug)]
pub struct PrettyHandler {
    append: Box<dyn Append>,
    options: HandlerOptions,
    json: bool,
    no_color: bool,
    timezone: TimeZone,
    styles: LevelStyles,
}

impl PrettyHandler {
    /// Create a handler writing plain text lines to `append`.
    pub fn new(append: impl Into<Box<dyn Append>>, options: HandlerOptions) -> Self {
        PrettyHandler {
            append: append.into(),
            options,
            json: false,
            no_color: false,
            timezone: TimeZone::system(),
            styles: LevelStyles::default(),
        }
    }

    /// Render JSON lines instead of plain text.
    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Disable colored output in plain text mode.
    pub fn no_color(mut self) -> Self {
        self.no_color = true;
        self
    }

    /// Set the timezone for timestamps.
    ///
    /// Defaults to the system timezone if not set.
    ///
    /// # Examples
    ///
    /// ```
    /// use jiff::tz::TimeZone;
    /// use prettylog::HandlerOptions;
    /// use prettylog::append::Stdout;
    /// use prettylog::pretty::PrettyHandler;
    ///
    /// let handler =
    ///     PrettyHandler::new(Stdout::default(), HandlerOptions::default()).timezone(TimeZone::UTC);
    /// ```
    pub fn timezone(mut self, tz: TimeZone) -> Self {
        self.timezone = tz;
        self
    }

    /// Customize the name and color printed for `level`.
    ///
    /// Levels without a style print their default form, such as `INFO+2`, without color.
    pub fn level_style(
        mut self,
        level: Level,
        name: impl Into<Cow<'static, str>>,
        color: Color,
    ) -> Self {
        self.styles.set(
            level,
            LevelStyle {
                name: name.into(),
                color,
            },
        );
        self
    }

    /// The options this handler was built with.
    pub fn options(&self) -> &HandlerOptions {
        &self.options
    }

    /// Render a record to a line, without the trailing newline.
    pub fn render(&self, record: &Record) -> String {
        let time = self.format_time(record);
        let level = self.format_level(record);
        let source = self.format_source(record);
        let message = self.format_message(record);
        let attrs = self.format_attrs(record);

        if self.json {
            render_json(RecordLine {
                time,
                level,
                source,
                msg: message,
                attrs,
            })
        } else {
            render_plain([time, level, source, message], &attrs)
        }
    }
}

#[derive(Debug, Serialize)]
struct RecordLine {
    #[serde(skip_serializing_if = "String::is_empty")]
    time: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    level: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    source: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    msg: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    attrs: Map<String, serde_json::Value>,
}

fn render_json(mut line: RecordLine) -> String {
    match serde_json::to_string(&line) {
        Ok(line) => line,
        Err(_) => {
            line.attrs.clear();
            serde_json::to_string(&line).unwrap_or_default()
        }
    }
}

fn render_plain(segments: [String; 4], attrs: &Map<String, serde_json::Value>) -> String {
    let mut line = segments
        .into_iter()
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    // "{}" means no attributes
    let attrs = serde_json::to_string_pretty(attrs).unwrap_or_default();
    if attrs.len() > 2 {
        line.push(' ');
        line.push_str(&attrs);
    }

    line
}

impl Handler for PrettyHandler {
    fn threshold(&self) -> &Arc<Threshold> {
        &self.options.threshold
    }

    fn captures_source(&self) -> bool {
        self.options.add_source
    }

    fn handle(&self, record: &Record) -> Result<(), Error> {
        let line = self.render(record);
        // write failures are not reported to the caller
        let _ = self.append.append(line.as_bytes());
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        self.append.flush()
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use serde_json::json;

    use super::*;
    use crate::append::Testing;
    use crate::kv::Attr;
    use crate::kv::LEVEL_KEY;
    use crate::kv::Value;
    use crate::record::Source;

    fn at_noon() -> Timestamp {
        "2024-08-11T12:30:45.123456Z".parse().unwrap()
    }

    fn handler(options: HandlerOptions) -> PrettyHandler {
        PrettyHandler::new(Testing::default(), options)
            .timezone(TimeZone::UTC)
            .no_color()
    }

    #[test]
    fn test_plain_without_source_and_attrs() {
        let record = Record::builder()
            .time(at_noon())
            .level(Level::ERROR)
            .message("disk full")
            .build();

        let line = handler(HandlerOptions::default()).render(&record);
        assert_eq!(line, "2024-08-11 12:30:45 ERROR disk full");
    }

    #[test]
    fn test_plain_with_source_and_attrs() {
        let record = Record::builder()
            .time(at_noon())
            .level(Level::INFO)
            .message("started")
            .attr("port", 8080)
            .source(Some(Source::new("src/bin/server.rs", 17)))
            .build();

        let options = HandlerOptions::default().with_add_source(true);
        let line = handler(options).render(&record);
        assert_eq!(
            line,
            "2024-08-11 12:30:45 INFO server.rs:17 started {\n  \"port\": 8080\n}"
        );
    }

    #[test]
    fn test_source_omitted_when_disabled() {
        let record = Record::builder()
            .time(at_noon())
            .message("hello")
            .source(Some(Source::new("src/main.rs", 3)))
            .build();

        let line = handler(HandlerOptions::default()).render(&record);
        assert_eq!(line, "2024-08-11 12:30:45 INFO hello");
    }

    #[test]
    fn test_json_omits_empty_fields() {
        let record = Record::builder()
            .time(at_noon())
            .level(Level::DEBUG)
            .message("")
            .build();

        let line = handler(HandlerOptions::default()).json(true).render(&record);
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2, "{line}");
        assert_eq!(object["level"], json!("DEBUG"));
        assert!(object["time"].as_str().unwrap().starts_with("2024-08-11T12:30:45.123456"));
    }

    #[test]
    fn test_json_time_is_parseable() {
        let record = Record::builder().time(at_noon()).message("x").build();
        let line = handler(HandlerOptions::default()).json(true).render(&record);
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        let time: Timestamp = value["time"].as_str().unwrap().parse().unwrap();
        assert_eq!(time, at_noon());
    }

    #[test]
    fn test_json_attrs_last_key_wins() {
        let record = Record::builder()
            .time(at_noon())
            .message("login")
            .attr("user", "a")
            .attr("user", "b")
            .attr("admin", false)
            .build();

        let line = handler(HandlerOptions::default()).json(true).render(&record);
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["attrs"], json!({"user": "b", "admin": false}));
    }

    #[test]
    fn test_unknown_level_falls_back_to_default_form() {
        let record = Record::builder()
            .time(at_noon())
            .level(Level::new(6))
            .message("between")
            .build();

        let line = handler(HandlerOptions::default()).render(&record);
        assert_eq!(line, "2024-08-11 12:30:45 INFO+2 between");
    }

    #[test]
    fn test_custom_level_style() {
        let record = Record::builder()
            .time(at_noon())
            .level(Level::new(6))
            .message("noted")
            .build();

        let line = handler(HandlerOptions::default())
            .level_style(Level::new(6), "NOTICE", Color::Cyan)
            .render(&record);
        assert_eq!(line, "2024-08-11 12:30:45 NOTICE noted");
    }

    #[test]
    fn test_replace_attr_level() {
        let options = HandlerOptions::default().with_replace_attr(|_, attr| {
            if attr.key == LEVEL_KEY {
                Attr::new(LEVEL_KEY, "OVERRIDDEN")
            } else {
                attr
            }
        });
        let record = Record::builder()
            .time(at_noon())
            .level(Level::ERROR)
            .message("boom")
            .build();

        let plain = handler(options.clone()).render(&record);
        assert_eq!(plain, "2024-08-11 12:30:45 OVERRIDDEN boom");

        let json = handler(options).json(true).render(&record);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["level"], json!("OVERRIDDEN"));
    }

    #[test]
    fn test_replace_attr_drop_and_unchanged() {
        let options = HandlerOptions::default()
            .with_add_source(true)
            .with_replace_attr(|groups, attr| {
                assert!(groups.is_empty());
                match attr.key.as_str() {
                    "time" => Attr::new("", Value::Null),
                    _ => attr,
                }
            });
        let record = Record::builder()
            .time(at_noon())
            .level(Level::WARN)
            .message("careful")
            .source(Some(Source::new("src/main.rs", 9)))
            .build();

        let line = handler(options).render(&record);
        assert_eq!(line, "WARN main.rs:9 careful");
    }

    #[test]
    fn test_replace_attr_time_and_source() {
        let options = HandlerOptions::default()
            .with_add_source(true)
            .with_replace_attr(|_, attr| match attr.value {
                Value::Time(ts) => Attr::new(attr.key, ts.strftime("%H:%M").to_string()),
                Value::Source(source) => Attr::new(attr.key, source.file().to_string()),
                _ => attr,
            });
        let record = Record::builder()
            .time(at_noon())
            .level(Level::INFO)
            .message("tick")
            .source(Some(Source::new("src/clock.rs", 5)))
            .build();

        let line = handler(options).render(&record);
        assert_eq!(line, "12:30 INFO src/clock.rs tick");
    }

    #[test]
    fn test_handle_writes_one_line_and_respects_threshold() {
        let appender = Testing::default();
        let options = HandlerOptions::new(Level::WARN);
        let threshold = Arc::clone(&options.threshold);
        let handler = PrettyHandler::new(appender.clone(), options)
            .timezone(TimeZone::UTC)
            .no_color();

        assert!(!handler.enabled(Level::INFO));
        assert!(handler.enabled(Level::WARN));
        threshold.set(Level::TRACE);
        assert!(handler.enabled(Level::TRACE));

        let record = Record::builder().time(at_noon()).message("one").build();
        handler.handle(&record).unwrap();
        assert_eq!(appender.lines(), vec!["2024-08-11 12:30:45 INFO one"]);
    }

    #[test]
    fn test_handle_writes_empty_line() {
        let appender = Testing::default();
        let options = HandlerOptions::default()
            .with_replace_attr(|_, attr| Attr::new("", attr.value));
        let handler = PrettyHandler::new(appender.clone(), options).no_color();

        let record = Record::builder().message("").build();
        handler.handle(&record).unwrap();
        assert_eq!(appender.lines(), vec![""]);
    }
}
