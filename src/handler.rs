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

//! The handler interface and its shared options.

use std::fmt;
use std::sync::Arc;

use crate::Error;
use crate::Level;
use crate::Record;
use crate::Threshold;
use crate::kv::Attr;

/// A hook that rewrites a standard field before it is rendered.
///
/// The hook receives the enclosing group path (always empty for the standard fields) and the
/// field as an [`Attr`] keyed by [`TIME_KEY`](crate::kv::TIME_KEY),
/// [`LEVEL_KEY`](crate::kv::LEVEL_KEY) or [`SOURCE_KEY`](crate::kv::SOURCE_KEY). Returning an
/// attribute with an empty key drops the field. Returning a different value replaces the rendered
/// text with that value's display form. Returning the value unchanged keeps the default rendering.
pub type ReplaceAttr = Arc<dyn Fn(&[String], Attr) -> Attr + Send + Sync>;

/// Handles log records produced by a [`Logger`](crate::Logger).
pub trait Handler: fmt::Debug + Send + Sync + 'static {
    /// The minimum level this handler emits.
    ///
    /// A [`Logger`](crate::Logger) built on this handler reads and sets the same threshold.
    fn threshold(&self) -> &Arc<Threshold>;

    /// Whether a record at `level` would be handled. Checked before a record is built.
    ///
    /// Default to comparing `level` against [`threshold`](Handler::threshold).
    fn enabled(&self, level: Level) -> bool {
        self.threshold().enabled(level)
    }

    /// Whether records should carry their call site.
    ///
    /// Default to `false`.
    fn captures_source(&self) -> bool {
        false
    }

    /// Handle one record.
    fn handle(&self, record: &Record) -> Result<(), Error>;

    /// Flush any buffered output.
    ///
    /// Default to a no-op.
    fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}

impl<T: Handler> From<T> for Box<dyn Handler> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

/// Options shared by handlers.
#[derive(Clone, Default)]
pub struct HandlerOptions {
    /// The minimum level to handle. Share it with a [`Logger`](crate::Logger) so that
    /// [`Logger::set_level`](crate::Logger::set_level) takes effect.
    pub threshold: Arc<Threshold>,
    /// Capture and render the call site.
    pub add_source: bool,
    /// Rewrite standard fields before rendering.
    pub replace_attr: Option<ReplaceAttr>,
}

impl HandlerOptions {
    /// Create options with a fresh threshold at `level`.
    pub fn new(level: Level) -> Self {
        HandlerOptions {
            threshold: Arc::new(Threshold::new(level)),
            add_source: false,
            replace_attr: None,
        }
    }

    /// Share an existing threshold.
    pub fn with_threshold(mut self, threshold: Arc<Threshold>) -> Self {
        self.threshold = threshold;
        self
    }

    /// Enable or disable call-site capture.
    pub fn with_add_source(mut self, add_source: bool) -> Self {
        self.add_source = add_source;
        self
    }

    /// Install a field-rewrite hook.
    pub fn with_replace_attr<F>(mut self, f: F) -> Self
    where
        F: Fn(&[String], Attr) -> Attr + Send + Sync + 'static,
    {
        self.replace_attr = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for HandlerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerOptions")
            .field("threshold", &self.threshold.level())
            .field("add_source", &self.add_source)
            .field("replace_attr", &self.replace_attr.as_ref().map(|_| ".."))
            .finish()
    }
}
