//! Package reference as reported by the package manager

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// Extra-metadata key under which a package advertises its block class
pub const BLOCK_CLASS_KEY: &str = "block-class";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PackageRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Value>,
}

impl PackageRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: BTreeMap::new(),
        }
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn with_block_class(self, class: impl Into<String>) -> Self {
        self.with_extra(BLOCK_CLASS_KEY, Value::String(class.into()))
    }

    /// The block class this package declares, if any.
    ///
    /// A non-string value under `block-class` is ignored.
    pub fn block_class(&self) -> Option<&str> {
        match self.extra.get(BLOCK_CLASS_KEY)? {
            Value::String(class) => Some(class.as_str()),
            other => {
                warn!(
                    "Package {} declares a non-string {}: {}",
                    self.name, BLOCK_CLASS_KEY, other
                );
                None
            }
        }
    }
}
