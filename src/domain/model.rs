use crate::utils::error::{KiotVietError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Per-call credentials injected by the host. Both values are opaque.
#[derive(Clone, Deserialize)]
pub struct Credentials {
    pub access_token: String,
    pub retailer: String,
}

impl Credentials {
    pub fn new(access_token: impl Into<String>, retailer: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            retailer: retailer.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .field("retailer", &self.retailer)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// Ordered wire-level key/value map used for both query strings and JSON bodies.
///
/// The `insert_*` helpers encode the omission policy: a filter that is absent
/// never produces a key, so the remote API applies its own default.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct WireParams(Map<String, Value>);

impl WireParams {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Always inserts.
    pub fn insert(&mut self, key: &str, value: impl Into<Value>) -> &mut Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Skips `None` and empty strings.
    pub fn insert_str(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value.filter(|v| !v.is_empty()) {
            self.insert(key, v);
        }
        self
    }

    /// Skips `None` and zero.
    pub fn insert_id(&mut self, key: &str, value: Option<i64>) -> &mut Self {
        if let Some(v) = value.filter(|v| *v != 0) {
            self.insert(key, v);
        }
        self
    }

    /// Skips `None` and empty lists.
    pub fn insert_list(&mut self, key: &str, values: Option<&[i64]>) -> &mut Self {
        if let Some(v) = values.filter(|v| !v.is_empty()) {
            self.insert(key, v.to_vec());
        }
        self
    }

    /// Skips `None` only; falsy values such as `false` or `0.0` are kept.
    pub fn insert_present<T: Into<Value>>(&mut self, key: &str, value: Option<T>) -> &mut Self {
        if let Some(v) = value {
            self.insert(key, v);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Flattens into query pairs. Arrays repeat their key once per element.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.0.len());
        for (key, value) in &self.0 {
            match value {
                Value::Array(items) => {
                    for item in items {
                        if let Some(rendered) = render_query_value(item) {
                            pairs.push((key.clone(), rendered));
                        }
                    }
                }
                other => {
                    if let Some(rendered) = render_query_value(other) {
                        pairs.push((key.clone(), rendered));
                    }
                }
            }
        }
        pairs
    }
}

fn render_query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// Transport-independent description of one remote call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub params: Option<WireParams>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>, params: Option<WireParams>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            params,
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            params: None,
            body: Some(body),
        }
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Put,
            path: path.into(),
            params: None,
            body: Some(body),
        }
    }

    pub fn delete(path: impl Into<String>, params: Option<WireParams>) -> Self {
        Self {
            method: Method::Delete,
            path: path.into(),
            params,
            body: None,
        }
    }
}

/// A record addressed either by numeric id or by its business code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Id(i64),
    Code(String),
}

impl Identifier {
    /// Prefers the id; a zero id or empty code counts as not supplied.
    pub fn resolve(
        id: Option<i64>,
        code: Option<&str>,
        id_field: &str,
        code_field: &str,
    ) -> Result<Self> {
        if let Some(id) = id.filter(|id| *id != 0) {
            return Ok(Identifier::Id(id));
        }
        if let Some(code) = code.filter(|c| !c.is_empty()) {
            // URL parsing collapses dot segments, escaped or not.
            if code == "." || code == ".." {
                return Err(KiotVietError::invalid_argument(format!(
                    "{} cannot be '{}'",
                    code_field, code
                )));
            }
            return Ok(Identifier::Code(code.to_string()));
        }
        Err(KiotVietError::invalid_argument(format!(
            "need to provide {} or {}",
            id_field, code_field
        )))
    }

    /// `/{collection}/{id}` or `/{collection}/code/{code}`.
    pub fn path(&self, collection: &str) -> String {
        match self {
            Identifier::Id(id) => format!("/{}/{}", collection, id),
            Identifier::Code(code) => format!("/{}/code/{}", collection, encode_path_segment(code)),
        }
    }
}

fn encode_path_segment(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for c in segment.chars() {
        match c {
            '%' => out.push_str("%25"),
            '/' => out.push_str("%2F"),
            '?' => out.push_str("%3F"),
            '#' => out.push_str("%23"),
            _ => out.push(c),
        }
    }
    out
}
