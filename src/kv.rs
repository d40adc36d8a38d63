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

//! Key-value attributes attached to a log record.

use std::fmt;

use jiff::Timestamp;
use serde_json::Map;

use crate::Level;
use crate::record::Source;

/// Key of the time field.
pub const TIME_KEY: &str = "time";
/// Key of the level field.
pub const LEVEL_KEY: &str = "level";
/// Key of the source field.
pub const SOURCE_KEY: &str = "source";
/// Key of the message field.
pub const MESSAGE_KEY: &str = "msg";

/// A key-value pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Attr {
    /// The key. An empty key returned from a [`ReplaceAttr`](crate::ReplaceAttr) hook drops the
    /// field.
    pub key: String,
    /// The value.
    pub value: Value,
}

impl Attr {
    /// Create a new attribute.
    pub fn new(key: impl Into<String>, value: impl Into<Value>) -> Self {
        Attr {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Create an attribute holding a nested group of attributes.
    pub fn group(key: impl Into<String>, attrs: impl IntoIterator<Item = Attr>) -> Self {
        Attr {
            key: key.into(),
            value: Value::Map(attrs.into_iter().collect()),
        }
    }
}

/// An attribute value.
///
/// Values are resolved when the attribute is created, not when the record is rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The absence of a value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    I64(i64),
    /// An unsigned integer.
    U64(u64),
    /// A floating point number.
    F64(f64),
    /// A string.
    Str(String),
    /// A nested group of attributes.
    Map(Vec<Attr>),
    /// A point in time.
    Time(Timestamp),
    /// A severity level.
    Level(Level),
    /// A call site.
    Source(Source),
}

impl Value {
    /// Convert to a JSON value.
    ///
    /// Nested groups follow the same rule as top-level attributes: a later duplicate key replaces
    /// an earlier one.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(v) => (*v).into(),
            Value::I64(v) => (*v).into(),
            Value::U64(v) => (*v).into(),
            Value::F64(v) => (*v).into(),
            Value::Str(v) => v.as_str().into(),
            Value::Map(attrs) => serde_json::Value::Object(collect_json(attrs)),
            Value::Time(ts) => ts.to_string().into(),
            Value::Level(level) => level.to_string().into(),
            Value::Source(source) => {
                let mut map = Map::new();
                if let Some(function) = source.function() {
                    map.insert("function".to_string(), function.into());
                }
                map.insert("file".to_string(), source.file().into());
                map.insert("line".to_string(), source.line().into());
                serde_json::Value::Object(map)
            }
        }
    }
}

/// Collect attributes into a JSON object. A later duplicate key replaces an earlier one.
pub fn collect_json<'a>(
    attrs: impl IntoIterator<Item = &'a Attr>,
) -> Map<String, serde_json::Value> {
    let mut map = Map::new();
    for attr in attrs {
        map.insert(attr.key.clone(), attr.value.to_json());
    }
    map
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::I64(v) => write!(f, "{v}"),
            Value::U64(v) => write!(f, "{v}"),
            Value::F64(v) => write!(f, "{v}"),
            Value::Str(v) => f.write_str(v),
            Value::Map(_) => write!(f, "{}", self.to_json()),
            Value::Time(ts) => write!(f, "{ts}"),
            Value::Level(level) => write!(f, "{level}"),
            Value::Source(source) => write!(f, "{}:{}", source.file(), source.line()),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident as $cast:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v as $cast)
                }
            }
        )*
    };
}

impl_from! {
    i8 => I64 as i64,
    i16 => I64 as i64,
    i32 => I64 as i64,
    i64 => I64 as i64,
    isize => I64 as i64,
    u8 => U64 as u64,
    u16 => U64 as u64,
    u32 => U64 as u64,
    u64 => U64 as u64,
    usize => U64 as u64,
    f32 => F64 as f64,
    f64 => F64 as f64,
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Timestamp> for Value {
    fn from(v: Timestamp) -> Self {
        Value::Time(v)
    }
}

impl From<Level> for Value {
    fn from(v: Level) -> Self {
        Value::Level(v)
    }
}

impl From<Source> for Value {
    fn from(v: Source) -> Self {
        Value::Source(v)
    }
}

impl From<Vec<Attr>> for Value {
    fn from(v: Vec<Attr>) -> Self {
        Value::Map(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_to_json() {
        assert_eq!(Value::from(7u8).to_json(), json!(7));
        assert_eq!(Value::from(-7).to_json(), json!(-7));
        assert_eq!(Value::from(1.5).to_json(), json!(1.5));
        assert_eq!(Value::from(true).to_json(), json!(true));
        assert_eq!(Value::from("a").to_json(), json!("a"));
        assert_eq!(Value::from(None::<i32>).to_json(), json!(null));
        assert_eq!(Value::from(Level::WARN).to_json(), json!("WARN"));
    }

    #[test]
    fn test_nested_group_last_key_wins() {
        let attr = Attr::group(
            "request",
            [
                Attr::new("id", 1),
                Attr::new("path", "/"),
                Attr::new("id", 2),
            ],
        );
        assert_eq!(attr.value.to_json(), json!({"id": 2, "path": "/"}));
    }

    #[test]
    fn test_source_to_json() {
        let source = Source::new("src/main.rs", 12).with_function("app::main");
        assert_eq!(
            Value::from(source).to_json(),
            json!({"function": "app::main", "file": "src/main.rs", "line": 12})
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::from("plain").to_string(), "plain");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(
            Value::Map(vec![Attr::new("a", 1)]).to_string(),
            r#"{"a":1}"#
        );
        assert_eq!(
            Value::from(Source::new("src/lib.rs", 3)).to_string(),
            "src/lib.rs:3"
        );
    }
}
