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

use crate::Level;
use crate::Logger;
use crate::Record;
use crate::kv::Attr;
use crate::kv::Value;
use crate::record::Source;

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Level::ERROR,
            log::Level::Warn => Level::WARN,
            log::Level::Info => Level::INFO,
            log::Level::Debug => Level::DEBUG,
            log::Level::Trace => Level::TRACE,
        }
    }
}

/// Set up the log crate global logger.
///
/// This function calls [`log::set_boxed_logger`] with `logger`, so that records from the `log`
/// macros are rendered by its handler. Keep a clone of `logger` to change its level later.
///
/// This function will set the global maximum log level to `Trace`; the logger's own threshold
/// decides what is emitted.
///
/// # Errors
///
/// Return an error if the log crate global logger has already been set.
///
/// # Examples
///
/// ```
/// use prettylog::Config;
/// use prettylog::append::Stderr;
///
/// let logger = Config::new().to_logger(Stderr::default());
/// prettylog::bridge::setup_log_crate(logger.clone()).unwrap();
/// log::info!("hello from the log crate");
/// ```
pub fn setup_log_crate(logger: Logger) -> Result<(), log::SetLoggerError> {
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        Logger::enabled(self, metadata.level().into())
    }

    fn log(&self, record: &log::Record) {
        let level = record.level().into();
        if !Logger::enabled(self, level) {
            return;
        }

        let source = if self.handler().captures_source() {
            source_of(record)
        } else {
            None
        };

        let mut attrs = Vec::new();
        let mut visitor = AttrCollector { attrs: &mut attrs };
        // a failed visit keeps the attributes collected so far
        let _ = record.key_values().visit(&mut visitor);

        let record = Record::builder()
            .level(level)
            .message(record.args().to_string())
            .attrs(attrs)
            .source(source)
            .build();

        let _ = self.handler().handle(&record);
    }

    fn flush(&self) {
        Logger::flush(self);
    }
}

fn source_of(record: &log::Record) -> Option<Source> {
    let file: Cow<'static, str> = match record.file_static() {
        Some(file) => Cow::Borrowed(file),
        None => Cow::Owned(record.file()?.to_string()),
    };
    let source = Source::new(file, record.line().unwrap_or_default());

    let function: Option<Cow<'static, str>> = match record.module_path_static() {
        Some(module_path) => Some(Cow::Borrowed(module_path)),
        None => record.module_path().map(|m| Cow::Owned(m.to_string())),
    };
    Some(match function {
        Some(function) => source.with_function(function),
        None => source,
    })
}

struct AttrCollector<'a> {
    attrs: &'a mut Vec<Attr>,
}

impl<'kvs> log::kv::VisitSource<'kvs> for AttrCollector<'_> {
    fn visit_pair(
        &mut self,
        key: log::kv::Key<'kvs>,
        value: log::kv::Value<'kvs>,
    ) -> Result<(), log::kv::Error> {
        self.attrs.push(Attr {
            key: key.to_string(),
            value: to_value(&value),
        });
        Ok(())
    }
}

fn to_value(value: &log::kv::Value) -> Value {
    if let Some(v) = value.to_bool() {
        Value::Bool(v)
    } else if let Some(v) = value.to_i64() {
        Value::I64(v)
    } else if let Some(v) = value.to_u64() {
        Value::U64(v)
    } else if let Some(v) = value.to_f64() {
        Value::F64(v)
    } else if let Some(v) = value.to_borrowed_str() {
        Value::Str(v.to_string())
    } else {
        Value::Str(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use jiff::tz::TimeZone;
    use log::Log;

    use super::*;
    use crate::HandlerOptions;
    use crate::append::Testing;
    use crate::pretty::PrettyHandler;

    fn logger(add_source: bool) -> (Logger, Testing) {
        let appender = Testing::default();
        let options = HandlerOptions::new(Level::DEBUG).with_add_source(add_source);
        let handler = PrettyHandler::new(appender.clone(), options)
            .timezone(TimeZone::UTC)
            .json(true);
        (Logger::new(handler), appender)
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(Level::from(log::Level::Trace), Level::TRACE);
        assert_eq!(Level::from(log::Level::Debug), Level::DEBUG);
        assert_eq!(Level::from(log::Level::Info), Level::INFO);
        assert_eq!(Level::from(log::Level::Warn), Level::WARN);
        assert_eq!(Level::from(log::Level::Error), Level::ERROR);
    }

    #[test]
    fn test_enabled_uses_threshold() {
        let (logger, _) = logger(false);
        let trace = log::Metadata::builder().level(log::Level::Trace).build();
        let debug = log::Metadata::builder().level(log::Level::Debug).build();
        assert!(!Log::enabled(&logger, &trace));
        assert!(Log::enabled(&logger, &debug));
    }

    #[test]
    fn test_log_record_with_key_values() {
        let (logger, lines) = logger(true);
        let kvs: &[(&str, i64)] = &[("attempt", 1), ("attempt", 3)];
        Log::log(
            &logger,
            &log::Record::builder()
                .args(format_args!("retrying"))
                .level(log::Level::Warn)
                .file_static(Some("src/net/client.rs"))
                .line(Some(88))
                .module_path_static(Some("app::net::client"))
                .key_values(&kvs)
                .build(),
        );

        let lines = lines.take();
        assert_eq!(lines.len(), 1);
        let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(value["level"], "WARN");
        assert_eq!(value["msg"], "retrying");
        assert_eq!(value["source"], "client.rs:88");
        assert_eq!(value["attrs"], serde_json::json!({"attempt": 3}));
    }

    #[test]
    fn test_to_value() {
        assert_eq!(to_value(&log::kv::Value::from(true)), Value::Bool(true));
        assert_eq!(to_value(&log::kv::Value::from(-3i64)), Value::I64(-3));
        assert_eq!(to_value(&log::kv::Value::from(u64::MAX)), Value::U64(u64::MAX));
        assert_eq!(to_value(&log::kv::Value::from(0.5f64)), Value::F64(0.5));
        assert_eq!(
            to_value(&log::kv::Value::from("text")),
            Value::Str("text".to_string())
        );
    }
}
