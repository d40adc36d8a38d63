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

//! Log record and call site.

use std::borrow::Cow;
use std::panic::Location;

use jiff::Timestamp;

use crate::Level;
use crate::kv::Attr;

/// The call site of a log statement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Source {
    file: Cow<'static, str>,
    line: u32,
    function: Option<Cow<'static, str>>,
}

impl Source {
    /// Create a call site from a file path and line.
    pub fn new(file: impl Into<Cow<'static, str>>, line: u32) -> Self {
        Source {
            file: file.into(),
            line,
            function: None,
        }
    }

    /// Attach the enclosing function or module path.
    pub fn with_function(mut self, function: impl Into<Cow<'static, str>>) -> Self {
        self.function = Some(function.into());
        self
    }

    /// The call site of the caller.
    ///
    /// Functions marked `#[track_caller]` between the log statement and this call are skipped.
    #[track_caller]
    pub fn caller() -> Self {
        let location = Location::caller();
        Source::new(location.file(), location.line())
    }

    /// The source file, as recorded by the compiler.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// The line in the source file.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// The enclosing function or module path, if known.
    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }
}

/// The payload of a log message.
///
/// A record is a snapshot taken when the message is emitted. Attributes keep the order they were
/// added in, including repeated keys.
#[derive(Clone, Debug)]
pub struct Record {
    time: Timestamp,
    level: Level,
    message: Cow<'static, str>,
    attrs: Vec<Attr>,
    source: Option<Source>,
}

impl Record {
    /// The observed time.
    pub fn time(&self) -> Timestamp {
        self.time
    }

    /// The severity level.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The message body.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The attributes, in the order they were added.
    pub fn attrs(&self) -> &[Attr] {
        &self.attrs
    }

    /// The call site, if it was captured.
    pub fn source(&self) -> Option<&Source> {
        self.source.as_ref()
    }

    /// Returns a new builder.
    pub fn builder() -> RecordBuilder {
        RecordBuilder::default()
    }
}

/// Builder for [`Record`].
#[derive(Debug)]
pub struct RecordBuilder {
    record: Record,
}

impl Default for RecordBuilder {
    fn default() -> Self {
        RecordBuilder {
            record: Record {
                time: Timestamp::now(),
                level: Level::INFO,
                message: Cow::Borrowed(""),
                attrs: vec![],
                source: None,
            },
        }
    }
}

impl RecordBuilder {
    /// Set [`time`](Record::time).
    pub fn time(mut self, time: Timestamp) -> Self {
        self.record.time = time;
        self
    }

    /// Set [`level`](Record::level).
    pub fn level(mut self, level: Level) -> Self {
        self.record.level = level;
        self
    }

    /// Set [`message`](Record::message).
    pub fn message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.record.message = message.into();
        self
    }

    /// Append one attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<crate::Value>) -> Self {
        self.record.attrs.push(Attr::new(key, value));
        self
    }

    /// Append attributes.
    pub fn attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        self.record.attrs.extend(attrs);
        self
    }

    /// Set [`source`](Record::source).
    pub fn source(mut self, source: Option<Source>) -> Self {
        self.record.source = source;
        self
    }

    /// Invoke the builder and return a `Record`.
    pub fn build(self) -> Record {
        self.record
    }
}
