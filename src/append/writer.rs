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
use std::io::Write;
use std::sync::Mutex;

use crate::Error;
use crate::append::Append;
use crate::append::terminated;

/// An appender that writes log lines to any [`Write`] implementation, such as a file.
///
/// # Examples
///
/// ```
/// use prettylog::append::Writer;
///
/// let appender = Writer::new(std::io::sink());
/// ```
pub struct Writer<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send + 'static> Writer<W> {
    /// Create a new appender writing into `writer`.
    pub fn new(writer: W) -> Self {
        Writer {
            writer: Mutex::new(writer),
        }
    }
}

impl<W> fmt::Debug for Writer<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Writer").finish_non_exhaustive()
    }
}

impl<W: Write + Send + 'static> Append for Writer<W> {
    fn append(&self, line: &[u8]) -> Result<(), Error> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| Error::poisoned("writer"))?;
        writer
            .write_all(&terminated(line))
            .map_err(|err| Error::from_io_error("writer", err))
    }

    fn flush(&self) -> Result<(), Error> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| Error::poisoned("writer"))?;
        writer.flush().map_err(|err| Error::from_io_error("writer", err))
    }
}
