//! Employee record.

use serde::{Deserialize, Serialize};

/// Person keyed by a caller-supplied id.
///
/// `department_id` points at a [`Department`](super::department::Department)
/// id but is never checked against the department collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub position: String,
    /// Serialized as `department:id` to stay compatible with existing stores.
    #[serde(rename = "department:id")]
    pub department_id: String,
}

impl Employee {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        position: impl Into<String>,
        department_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            position: position.into(),
            department_id: department_id.into(),
        }
    }
}
