//! Department record.

use serde::{Deserialize, Serialize};

/// Organizational unit keyed by a caller-supplied id.
///
/// Serialized as `{"id": .., "name": ..}` both on disk and on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Department {
    pub id: String,
    pub name: String,
}

impl Department {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
