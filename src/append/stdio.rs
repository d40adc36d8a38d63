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

use std::io::Write;

use crate::Error;
use crate::append::Append;
use crate::append::terminated;

/// An appender that prints log lines to stdout.
///
/// # Examples
///
/// ```
/// use prettylog::append::Stdout;
///
/// let stdout_appender = Stdout::default();
/// ```
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct Stdout {}

impl Append for Stdout {
    fn append(&self, line: &[u8]) -> Result<(), Error> {
        std::io::stdout()
            .lock()
            .write_all(&terminated(line))
            .map_err(|err| Error::from_io_error("stdout", err))
    }

    fn flush(&self) -> Result<(), Error> {
        std::io::stdout()
            .flush()
            .map_err(|err| Error::from_io_error("stdout", err))
    }
}

/// An appender that prints log lines to stderr.
///
/// # Examples
///
/// ```
/// use prettylog::append::Stderr;
///
/// let stderr_appender = Stderr::default();
/// ```
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct Stderr {}

impl Append for Stderr {
    fn append(&self, line: &[u8]) -> Result<(), Error> {
        std::io::stderr()
            .lock()
            .write_all(&terminated(line))
            .map_err(|err| Error::from_io_error("stderr", err))
    }

    fn flush(&self) -> Result<(), Error> {
        std::io::stderr()
            .flush()
            .map_err(|err| Error::from_io_error("stderr", err))
    }
}
