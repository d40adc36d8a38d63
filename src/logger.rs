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
use std::fmt;
use std::sync::Arc;

use crate::Handler;
use crate::Level;
use crate::Record;
use crate::Threshold;
use crate::kv::Attr;
use crate::record::Source;

/// The routine called after a fatal message has been emitted.
pub type Exit = fn(i32) -> !;

/// The status the process exits with after a fatal message.
pub const FATAL_EXIT_CODE: i32 = 1;

/// A logger that forwards messages to a [`Handler`].
///
/// Cloning a logger is cheap; clones share the handler and the threshold.
///
/// # Examples
///
/// ```
/// use prettylog::HandlerOptions;
/// use prettylog::Level;
/// use prettylog::Logger;
/// use prettylog::append::Stdout;
/// use prettylog::kv::Attr;
/// use prettylog::pretty::PrettyHandler;
///
/// let options = HandlerOptions::new(Level::INFO).with_add_source(true);
/// let logger = Logger::new(PrettyHandler::new(Stdout::default(), options));
///
/// logger.info("server started", &[Attr::new("port", 8080)]);
/// logger.set_level(Level::WARN);
/// logger.info("not printed", &[]);
/// ```
#[derive(Clone)]
pub struct Logger {
    handler: Arc<dyn Handler>,
    threshold: Arc<Threshold>,
    exit: Exit,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("handler", &self.handler)
            .field("level", &self.threshold.level())
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Create a logger sharing the handler's threshold.
    pub fn new(handler: impl Handler) -> Self {
        let threshold = Arc::clone(handler.threshold());
        Logger {
            handler: Arc::new(handler),
            threshold,
            exit: std::process::exit,
        }
    }

    /// Replace the routine that terminates the process after a fatal message.
    ///
    /// Defaults to [`std::process::exit`].
    pub fn with_exit(mut self, exit: Exit) -> Self {
        self.exit = exit;
        self
    }

    /// Set the minimum level to emit. Takes effect for every later call.
    pub fn set_level(&self, level: Level) {
        self.threshold.set(level);
    }

    /// The current minimum level.
    pub fn level(&self) -> Level {
        self.threshold.level()
    }

    /// Whether a message at `level` would be emitted.
    pub fn enabled(&self, level: Level) -> bool {
        self.handler.enabled(level)
    }

    /// The handler records are forwarded to.
    pub fn handler(&self) -> &dyn Handler {
        &*self.handler
    }

    /// Emit a message at an arbitrary level.
    #[track_caller]
    pub fn log(&self, level: Level, msg: impl Into<Cow<'static, str>>, attrs: &[Attr]) {
        if !self.handler.enabled(level) {
            return;
        }

        let source = if self.handler.captures_source() {
            Some(Source::caller())
        } else {
            None
        };
        let record = Record::builder()
            .level(level)
            .message(msg)
            .attrs(attrs.iter().cloned())
            .source(source)
            .build();

        let _ = self.handler.handle(&record);
    }

    /// Emit a message at trace level.
    #[track_caller]
    pub fn trace(&self, msg: impl Into<Cow<'static, str>>, attrs: &[Attr]) {
        self.log(Level::TRACE, msg, attrs);
    }

    /// Emit a message at debug level.
    #[track_caller]
    pub fn debug(&self, msg: impl Into<Cow<'static, str>>, attrs: &[Attr]) {
        self.log(Level::DEBUG, msg, attrs);
    }

    /// Emit a message at info level.
    #[track_caller]
    pub fn info(&self, msg: impl Into<Cow<'static, str>>, attrs: &[Attr]) {
        self.log(Level::INFO, msg, attrs);
    }

    /// Emit a message at warn level.
    #[track_caller]
    pub fn warn(&self, msg: impl Into<Cow<'static, str>>, attrs: &[Attr]) {
        self.log(Level::WARN, msg, attrs);
    }

    /// Emit a message at error level.
    #[track_caller]
    pub fn error(&self, msg: impl Into<Cow<'static, str>>, attrs: &[Attr]) {
        self.log(Level::ERROR, msg, attrs);
    }

    /// Emit a message at fatal level, then terminate the process with status 1.
    ///
    /// The process terminates even if fatal messages are below the current threshold and nothing
    /// was emitted.
    #[track_caller]
    pub fn fatal(&self, msg: impl Into<Cow<'static, str>>, attrs: &[Attr]) -> ! {
        self.log(Level::FATAL, msg, attrs);
        let _ = self.handler.flush();
        (self.exit)(FATAL_EXIT_CODE)
    }

    /// Format a message.
    pub fn sprintf(&self, args: fmt::Arguments<'_>) -> String {
        args.to_string()
    }

    /// Format a message with line breaks replaced by spaces, emit it at fatal level, then
    /// terminate the process with status 1.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # let logger: prettylog::Logger = unimplemented!();
    /// logger.fatalf(format_args!("cannot open {}", "config.yaml"));
    /// ```
    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.fatal(remove_line_breaks(&self.sprintf(args)), &[])
    }

    /// Emit a message with line breaks replaced by spaces, at the current threshold level.
    #[track_caller]
    pub fn print(&self, msg: &str, attrs: &[Attr]) {
        self.log(self.level(), remove_line_breaks(msg), attrs);
    }

    /// Format a message with line breaks replaced by spaces and emit it at the current threshold
    /// level.
    #[track_caller]
    pub fn printf(&self, args: fmt::Arguments<'_>) {
        self.log(self.level(), remove_line_breaks(&self.sprintf(args)), &[]);
    }

    /// Flush the handler.
    pub fn flush(&self) {
        let _ = self.handler.flush();
    }
}

fn remove_line_breaks(msg: &str) -> String {
    msg.replace('\n', " ")
}
