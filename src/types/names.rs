use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Characters the store refuses inside a node key. Khatabook and customer
/// names double as path keys, so they inherit these rules.
const FORBIDDEN: [char; 6] = ['.', '$', '#', '[', ']', '/'];

const MAX_LEN: usize = 120;

/// A validated record name, safe to embed as a path segment in the store
/// tree. Unique-within-parent is enforced by the directory operations, not
/// here.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NodeKey(String);

impl NodeKey {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(Error::Validation("name must not be empty".into()));
        }
        if trimmed.len() > MAX_LEN {
            return Err(Error::Validation(format!(
                "name exceeds {} characters",
                MAX_LEN
            )));
        }
        if let Some(c) = trimmed.chars().find(|c| FORBIDDEN.contains(c) || c.is_control()) {
            return Err(Error::Validation(format!(
                "name contains character not allowed in a store key: {:?}",
                c
            )));
        }
        Ok(NodeKey(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for NodeKey {
    type Error = Error;
    fn try_from(value: String) -> Result<Self> {
        NodeKey::new(value)
    }
}

impl From<NodeKey> for String {
    fn from(key: NodeKey) -> String {
        key.0
    }
}

impl AsRef<str> for NodeKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
