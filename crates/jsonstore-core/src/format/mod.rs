//! JSON text encoding and decoding for store files.
//!
//! Store files are UTF-8 JSON, pretty-printed with two-space indentation
//! unless [`SerializeOptions`] says otherwise.  Options only shape the text
//! that is written; parsing ignores them entirely.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Serializer, Value};
use thiserror::Error;

/// Longest indentation unit honoured, in characters.
pub const MAX_INDENT: usize = 10;

/// Errors produced while converting between values and JSON text.
#[derive(Debug, Error)]
pub enum FormatError {
    /// The text is not well-formed JSON.
    #[error("malformed JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// A value could not be converted to JSON.
    #[error("failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The serializer produced bytes that are not UTF-8.
    #[error("serialized JSON is not valid UTF-8: {0}")]
    Encoding(String),
}

/// Indentation used when writing a store file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Indent {
    /// Compact output on a single line.
    None,
    /// `n` spaces per level, clamped to [`MAX_INDENT`].
    Spaces(usize),
    /// A literal indentation unit (e.g. `"\t"`), truncated to [`MAX_INDENT`] characters.
    Text(String),
}

impl Default for Indent {
    fn default() -> Self {
        Indent::Spaces(2)
    }
}

impl Indent {
    /// The indentation unit as bytes, or `None` for compact output.
    fn unit(&self) -> Option<Vec<u8>> {
        match self {
            Indent::None | Indent::Spaces(0) => None,
            Indent::Spaces(n) => Some(vec![b' '; (*n).min(MAX_INDENT)]),
            Indent::Text(text) if text.is_empty() => None,
            Indent::Text(text) => Some(text.chars().take(MAX_INDENT).collect::<String>().into_bytes()),
        }
    }
}

/// Formatting directives applied when a store file is written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Allow-list of object keys.  When set, every object in the tree keeps
    /// only these keys, emitted in list order.
    pub replacer: Option<Vec<String>>,
    /// Indentation of the written text.
    pub indent: Indent,
}

impl SerializeOptions {
    /// Returns options with the given key allow-list.
    pub fn with_replacer<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.replacer = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Returns options with the given indentation.
    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }
}

/// Converts any serializable value into a JSON tree.
///
/// # Errors
///
/// Returns [`FormatError::Serialize`] if `value` cannot be represented as
/// JSON (e.g. a map with non-string keys).
pub fn to_tree<T: Serialize + ?Sized>(value: &T) -> Result<Value, FormatError> {
    Ok(serde_json::to_value(value)?)
}

/// Renders a JSON tree as file text according to `options`.
///
/// # Errors
///
/// Returns [`FormatError`] if serialization fails.
///
/// # Examples
///
/// ```rust
/// use jsonstore_core::{to_json_text, Indent, SerializeOptions};
/// use serde_json::json;
///
/// let value = json!({ "theme": "dark", "secret": "hunter2" });
///
/// let text = to_json_text(&value, &SerializeOptions::default()).unwrap();
/// assert_eq!(text, "{\n  \"theme\": \"dark\",\n  \"secret\": \"hunter2\"\n}");
///
/// let options = SerializeOptions::default()
///     .with_replacer(["theme"])
///     .with_indent(Indent::None);
/// assert_eq!(to_json_text(&value, &options).unwrap(), r#"{"theme":"dark"}"#);
/// ```
pub fn to_json_text(value: &Value, options: &SerializeOptions) -> Result<String, FormatError> {
    let filtered;
    let value = match &options.replacer {
        Some(keys) => {
            filtered = apply_replacer(value, keys);
            &filtered
        }
        None => value,
    };

    match options.indent.unit() {
        None => Ok(serde_json::to_string(value)?),
        Some(unit) => {
            let mut buf = Vec::new();
            {
                let mut serializer =
                    Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(&unit));
                value.serialize(&mut serializer)?;
            }
            String::from_utf8(buf).map_err(|e| FormatError::Encoding(e.to_string()))
        }
    }
}

/// Parses file text into a JSON tree.
///
/// # Errors
///
/// Returns [`FormatError::Parse`] if `text` is not a single well-formed JSON
/// document (empty text included).
pub fn from_json_text(text: &str) -> Result<Value, FormatError> {
    serde_json::from_str(text).map_err(FormatError::Parse)
}

fn apply_replacer(value: &Value, keys: &[String]) -> Value {
    match value {
        Value::Object(map) => {
            let mut kept = Map::new();
            for key in keys {
                if kept.contains_key(key) {
                    continue;
                }
                if let Some(child) = map.get(key) {
                    kept.insert(key.clone(), apply_replacer(child, keys));
                }
            }
            Value::Object(kept)
        }
        Value::Array(items) => Value::Array(items.iter().map(|item| apply_replacer(item, keys)).collect()),
        other => other.clone(),
    }
}
