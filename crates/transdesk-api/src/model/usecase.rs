use serde::{Deserialize, Serialize};
use transdesk_common_core::{ensure, Result};

/// One locale's value in a new translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationValue {
    pub locale_id: String,
    pub value: String,
}

/// Request to create a translation key with its per-locale values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNewTranslation {
    pub project_id: String,
    pub key: String,
    #[serde(default)]
    pub locales: Vec<TranslationValue>,
}

impl CreateNewTranslation {
    pub fn new(
        project_id: impl Into<String>,
        key: impl Into<String>,
        locales: Vec<TranslationValue>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            key: key.into(),
            locales,
        }
    }

    /// Build a request and validate it in one step.
    pub fn try_new(
        project_id: impl Into<String>,
        key: impl Into<String>,
        locales: Vec<TranslationValue>,
    ) -> Result<Self> {
        let request = Self::new(project_id, key, locales);
        request.validate()?;
        Ok(request)
    }

    /// Reject the request when a required field is missing.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.project_id.is_empty(), "projectId", "Project ID is required");
        ensure!(!self.key.is_empty(), "key", "Key is required");
        ensure!(!self.locales.is_empty(), "locales", "Locales are required");
        Ok(())
    }
}
