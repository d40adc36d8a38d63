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

use serde::Deserialize;

use crate::HandlerOptions;
use crate::Level;
use crate::Logger;
use crate::append::Append;
use crate::level::resolve_configured_level;
use crate::pretty::PrettyHandler;

/// Configuration for a [`Logger`].
///
/// Deserializes from the keys `level`, `add-source` and `json`. Missing keys take their defaults.
///
/// # Examples
///
/// ```
/// use prettylog::Config;
/// use prettylog::append::Stderr;
///
/// let logger = Config::new()
///     .with_level("debug")
///     .with_json(true)
///     .to_logger(Stderr::default());
/// logger.debug("ready", &[]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Minimum level name: "trace", "debug", "info", "warn", "error" or "fatal".
    #[serde(default = "default_level")]
    pub level: String,
    /// Capture and print the call site.
    #[serde(default)]
    pub add_source: bool,
    /// Print JSON lines instead of colored text.
    #[serde(default)]
    pub json: bool,
}

impl Config {
    /// Create a Config with defaults.
    pub fn new() -> Self {
        Self {
            level: default_level(),
            add_source: false,
            json: false,
        }
    }

    /// Set the level name.
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Enable call-site capture.
    pub fn with_add_source(mut self, add_source: bool) -> Self {
        self.add_source = add_source;
        self
    }

    /// Enable JSON output.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// The configured level, or `INFO` if the name is not recognized.
    pub fn leveler(&self) -> Level {
        resolve_configured_level(&self.level)
    }

    /// Options for a handler built from this configuration.
    pub fn handler_options(&self) -> HandlerOptions {
        HandlerOptions::new(self.leveler()).with_add_source(self.add_source)
    }

    /// Build a logger that renders with a [`PrettyHandler`] into `append`.
    pub fn to_logger(&self, append: impl Into<Box<dyn Append>>) -> Logger {
        let handler = PrettyHandler::new(append, self.handler_options()).json(self.json);
        Logger::new(handler)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn default_level() -> String {
    "info".to_string()
}
