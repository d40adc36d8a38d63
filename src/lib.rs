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

//! Prettylog is a small structured logger with two extra levels and a pretty renderer.
//!
//! # Overview
//!
//! On top of the usual `DEBUG`, `INFO`, `WARN` and `ERROR` levels, prettylog adds `TRACE` below
//! debug and `FATAL` above error. Fatal messages terminate the process once emitted. A shared
//! [`Threshold`] decides which levels are emitted, and can be changed at any time with
//! [`Logger::set_level`].
//!
//! Records are rendered by a [`PrettyHandler`](pretty::PrettyHandler), either as a single colored
//! line of text or as a JSON object per line, and written to an [`Append`] sink.
//!
//! # Examples
//!
//! ```
//! use prettylog::Config;
//! use prettylog::Level;
//! use prettylog::append::Stdout;
//! use prettylog::kv::Attr;
//!
//! let logger = Config::new()
//!     .with_level("debug")
//!     .with_add_source(true)
//!     .to_logger(Stdout::default());
//!
//! logger.debug("connecting", &[Attr::new("host", "db.local")]);
//! logger.set_level(Level::WARN);
//! logger.info("this is skipped", &[]);
//! logger.warn("slow query", &[Attr::new("millis", 1250)]);
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
pub mod bridge;
pub mod kv;
pub mod pretty;
pub mod record;

mod config;
mod error;
mod handler;
mod level;
mod logger;

pub use append::Append;
pub use config::Config;
pub use error::Error;
pub use handler::Handler;
pub use handler::HandlerOptions;
pub use handler::ReplaceAttr;
pub use kv::Attr;
pub use kv::Value;
pub use level::Level;
pub use level::Threshold;
pub use level::is_enabled;
pub use level::resolve_configured_level;
pub use logger::Exit;
pub use logger::FATAL_EXIT_CODE;
pub use logger::Logger;
pub use record::Record;
pub use record::RecordBuilder;
