use serde::{Deserialize, Serialize};
use transdesk_common_core::{ensure, Result};

/// A locale attached to one project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locale {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub locale: String,
    #[serde(default)]
    pub is_default: bool,
}

/// Body of locale create and update requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalePayload {
    pub project_id: String,
    pub locale: String,
    pub is_default: bool,
}

impl LocalePayload {
    pub fn new(project_id: impl Into<String>, locale: impl Into<String>, is_default: bool) -> Self {
        Self {
            project_id: project_id.into(),
            locale: locale.into(),
            is_default,
        }
    }

    /// Project id and locale code are both required.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.project_id.trim().is_empty(), "projectId", "Project ID is required");
        ensure!(!self.locale.trim().is_empty(), "locale", "Locale code is required");
        Ok(())
    }
}

impl From<&Locale> for LocalePayload {
    fn from(locale: &Locale) -> Self {
        Self {
            project_id: locale.project_id.clone(),
            locale: locale.locale.clone(),
            is_default: locale.is_default,
        }
    }
}
