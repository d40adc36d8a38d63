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

use std::fmt;
use std::io;

/// The error struct of prettylog.
///
/// Errors never escape the rendering path; they show up where a caller asks for them
/// explicitly, such as parsing a [`Level`](crate::Level) or writing through an
/// [`Append`](crate::Append) directly.
pub struct Error {
    message: String,
    sink: Option<&'static str>,
    source: Option<anyhow::Error>,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(sink) = self.sink {
            write!(f, " (sink: {sink})")?;
        }
        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("message", &self.message)
            .field("sink", &self.sink)
            .field("source", &self.source)
            .finish()
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|v| v.as_ref())
    }
}

impl Error {
    /// Create a new Error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            sink: None,
            source: None,
        }
    }

    /// Name the sink the error happened in.
    pub fn with_sink(mut self, sink: &'static str) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Attach the underlying cause.
    pub fn with_source(mut self, src: impl Into<anyhow::Error>) -> Self {
        self.source = Some(src.into());
        self
    }

    /// The error message, without sink or source.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The sink the error happened in, if any.
    pub fn sink(&self) -> Option<&'static str> {
        self.sink
    }

    /// A failed write or flush on `sink`.
    pub(crate) fn from_io_error(sink: &'static str, err: io::Error) -> Error {
        Error::new("failed to perform io")
            .with_sink(sink)
            .with_source(err)
    }

    /// A sink whose lock was poisoned by a panicking writer.
    pub(crate) fn poisoned(sink: &'static str) -> Error {
        Error::new("lock poisoned").with_sink(sink)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_sink_and_source() {
        let err = Error::from_io_error("stdout", io::Error::other("broken pipe"));

        assert_eq!(
            err.to_string(),
            "failed to perform io (sink: stdout): broken pipe"
        );
        assert_eq!(err.sink(), Some("stdout"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_display_plain() {
        let err = Error::new("malformed level");
        assert_eq!(err.to_string(), "malformed level");
        assert_eq!(err.message(), "malformed level");
        assert_eq!(err.sink(), None);
        assert!(std::error::Error::source(&err).is_none());
    }

    #[test]
    fn test_poisoned() {
        assert_eq!(
            Error::poisoned("writer").to_string(),
            "lock poisoned (sink: writer)"
        );
    }
}
