//! Performance oriented JSON manipulation.

use serde_json_bytes::ByteString;
use serde_json_bytes::Map;
pub use serde_json_bytes::Value;

/// A JSON object.
pub type Object = Map<ByteString, Value>;

const PATH_SEPARATOR: char = '.';

/// Extension trait for [`serde_json_bytes::Value`].
pub(crate) trait ValueExt {
    /// Get a reference to the value at a dotted path.
    ///
    /// Object keys are matched by name and numeric segments index into arrays.
    /// Returns `None` when the path does not exist, which is distinct from a
    /// path that exists and holds `null`.
    fn get_path(&self, path: &str) -> Option<&Value>;

    /// Name of the JSON kind of this value, used in error messages.
    fn kind(&self) -> &'static str;
}

impl ValueExt for Value {
    fn get_path(&self, path: &str) -> Option<&Value> {
        path.split(PATH_SEPARATOR)
            .try_fold(self, |current, segment| match current {
                Value::Object(object) => object.get(segment),
                Value::Array(array) => segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| array.get(index)),
                _ => None,
            })
    }

    fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}
