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

use std::sync::Arc;
use std::sync::Mutex;

use crate::Error;
use crate::append::Append;

/// An appender that keeps log lines in memory so tests can assert on them.
///
/// Clones share the same buffer, so one clone can be handed to a logger while another one is
/// kept for inspection.
///
/// # Examples
///
/// ```
/// use prettylog::append::Append;
/// use prettylog::append::Testing;
///
/// let appender = Testing::default();
/// let lines = appender.clone();
/// appender.append(b"hello").unwrap();
/// assert_eq!(lines.lines(), vec!["hello".to_string()]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Testing {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Testing {
    /// A copy of every line written so far.
    pub fn lines(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Remove and return every line written so far.
    pub fn take(&self) -> Vec<String> {
        match self.lines.lock() {
            Ok(mut lines) => std::mem::take(&mut *lines),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Append for Testing {
    fn append(&self, line: &[u8]) -> Result<(), Error> {
        let line = String::from_utf8_lossy(line).into_owned();
        self.lines
            .lock()
            .map_err(|_| Error::poisoned("testing"))?
            .push(line);
        Ok(())
    }
}
