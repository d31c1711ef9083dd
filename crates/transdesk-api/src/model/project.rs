use serde::{Deserialize, Serialize};
use transdesk_common_core::{ensure, Result};

/// A project as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
}

/// Body of create and update requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectPayload {
    pub name: String,
}

impl ProjectPayload {
    /// Build a payload from user input, trimming the name.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
        }
    }

    /// The name must not be blank.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.name.trim().is_empty(), "name", "Project name is required");
        Ok(())
    }
}
