//! Single project page.

use serde::Serialize;
use transdesk_api::Project;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDetailPage {
    pub project: Project,
}

impl ProjectDetailPage {
    /// Path of the project's translation editor.
    pub fn translations_path(&self) -> Option<String> {
        self.project.id.as_ref().map(|id| format!("/translations/{id}"))
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "Project: {}\nID: {}\n",
            self.project.name,
            self.project.id.as_deref().unwrap_or("-")
        );
        if let Some(path) = self.translations_path() {
            out.push_str(&format!("Translations: {path}\n"));
        }
        out
    }
}
