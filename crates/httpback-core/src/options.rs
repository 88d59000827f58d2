//! Request options and callback argument sequences.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options describing a request.
///
/// Usually an object carrying `method`, `url`, `headers` and `body`, but any JSON value is
/// accepted: a bare URL string is the most common shorthand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestOptions(Value);

impl RequestOptions {
    /// Build options from any serializable value.
    pub fn from_serialize<T: Serialize>(options: &T) -> Result<Self, serde_json::Error> {
        serde_json::to_value(options).map(Self)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Field of an object-shaped options value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.as_object().and_then(|map| map.get(field))
    }

    /// Target URL: the string itself, or the `url` (falling back to `uri`) field.
    pub fn url(&self) -> Option<&str> {
        match &self.0 {
            Value::String(url) => Some(url),
            Value::Object(map) => map
                .get("url")
                .or_else(|| map.get("uri"))
                .and_then(Value::as_str),
            _ => None,
        }
    }

    /// Headers from the `headers` object. Non-string values are rendered as JSON.
    pub fn header_pairs(&self) -> Vec<(String, String)> {
        let Some(headers) = self.get("headers").and_then(Value::as_object) else {
            return Vec::new();
        };

        headers
            .iter()
            .map(|(name, value)| {
                let value = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (name.clone(), value)
            })
            .collect()
    }

    /// Request body, if present and not null.
    pub fn body(&self) -> Option<&Value> {
        self.get("body").filter(|body| !body.is_null())
    }
}

impl From<Value> for RequestOptions {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<&str> for RequestOptions {
    fn from(url: &str) -> Self {
        Self(Value::String(url.to_owned()))
    }
}

impl From<String> for RequestOptions {
    fn from(url: String) -> Self {
        Self(Value::String(url))
    }
}

impl From<&RequestOptions> for RequestOptions {
    fn from(options: &RequestOptions) -> Self {
        options.clone()
    }
}

/// Ordered arguments handed to a completion callback.
///
/// Follows the error-first convention: `[error-or-null, response, extra...]`. Mocked
/// sequences are opaque and replayed verbatim, so nothing enforces that shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallbackArgs(Vec<Value>);

impl CallbackArgs {
    /// First argument, unless it is absent or null.
    pub fn error(&self) -> Option<&Value> {
        self.0.first().filter(|err| !err.is_null())
    }

    /// Second argument.
    pub fn response(&self) -> Option<&Value> {
        self.0.get(1)
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.0.get(index)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.0
    }
}

impl From<Vec<Value>> for CallbackArgs {
    fn from(args: Vec<Value>) -> Self {
        Self(args)
    }
}

/// A JSON array becomes the argument list; any other value is a single argument.
impl From<Value> for CallbackArgs {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(args) => Self(args),
            other => Self(vec![other]),
        }
    }
}

impl<'a> IntoIterator for &'a CallbackArgs {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
