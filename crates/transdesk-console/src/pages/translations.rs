//! The translation manager page.

use serde::Serialize;
use serde_json::{json, Value};
use transdesk_api::{CreateNewTranslation, Locale};
use transdesk_common_core::{Error, Result};
use transdesk_editor::{locale_name, EditorError, TranslationEditor};
use transdesk_query::QueryState;

use super::fallback::{user_message, UNKNOWN_ERROR};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TranslationView {
    Loading,
    Error { message: String },
    NoLocales,
    Ready,
}

/// Page controller owning the editor for one project.
#[derive(Debug, Clone)]
pub struct TranslationPage {
    project_id: String,
    view: TranslationView,
    editor: Option<TranslationEditor>,
}

impl TranslationPage {
    /// Build the page from the project's locale query.
    pub fn from_state(project_id: impl Into<String>, state: QueryState<Vec<Locale>>) -> Self {
        let project_id = project_id.into();
        let (view, editor) = match state {
            QueryState::Pending => (TranslationView::Loading, None),
            QueryState::Error(err) => (
                TranslationView::Error {
                    message: user_message(&err, UNKNOWN_ERROR),
                },
                None,
            ),
            QueryState::Success(locales) => match TranslationEditor::from_locales(&locales) {
                Ok(editor) => (TranslationView::Ready, Some(editor)),
                Err(EditorError::NoLocales) => (TranslationView::NoLocales, None),
                Err(err) => (
                    TranslationView::Error {
                        message: err.to_string(),
                    },
                    None,
                ),
            },
        };
        Self {
            project_id,
            view,
            editor,
        }
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn view(&self) -> &TranslationView {
        &self.view
    }

    pub fn editor(&self) -> Option<&TranslationEditor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut TranslationEditor> {
        self.editor.as_mut()
    }

    /// Usecase requests for every key in the editor.
    pub fn export(&self) -> Result<Vec<CreateNewTranslation>> {
        let editor = self
            .editor
            .as_ref()
            .ok_or_else(|| Error::invalid("the translation editor is not ready"))?;
        editor.export_requests(&self.project_id)
    }

    pub fn to_json(&self) -> Value {
        let mut value = json!({
            "projectId": self.project_id,
            "view": self.view,
        });
        if let Some(editor) = &self.editor {
            value["summary"] = json!(editor.summary());
            value["locales"] = json!(editor.locales());
            value["entries"] = json!(editor.entries());
            value["selected"] = json!(editor.selected());
        }
        value
    }

    pub fn render(&self) -> String {
        let editor = match (&self.view, &self.editor) {
            (TranslationView::Ready, Some(editor)) => editor,
            (TranslationView::Loading, _) => return "Loading translations...\n".to_string(),
            (TranslationView::NoLocales, _) => {
                return format!(
                    "Project {} has no locales. Add one before editing translations.\n",
                    self.project_id
                )
            }
            (TranslationView::Error { message }, _) => {
                return format!("Failed to load locales\n{message}\n")
            }
            _ => return format!("Failed to load locales\n{UNKNOWN_ERROR}\n"),
        };

        let summary = editor.summary();
        let mut out = format!(
            "Translations for project {}: {} keys, {} locales\n",
            self.project_id, summary.keys, summary.locales
        );
        let names: Vec<String> = editor
            .locales()
            .iter()
            .map(|code| format!("{code} ({})", locale_name(code)))
            .collect();
        out.push_str(&format!("Locales: {}\n", names.join(", ")));

        let keys = editor.filtered_keys();
        if keys.is_empty() {
            out.push_str("No translation keys\n");
        }
        for key in keys {
            let marker = if editor.selected() == Some(key) { '>' } else { ' ' };
            out.push_str(&format!("{marker} {key}\n"));
            if let Some(values) = editor.entry(key) {
                for (code, value) in values {
                    out.push_str(&format!("    {code}: {value}\n"));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locale(id: &str, code: &str) -> Locale {
        Locale {
            id: Some(id.to_string()),
            project_id: "p1".to_string(),
            locale: code.to_string(),
            is_default: code == "en",
        }
    }

    #[test]
    fn test_ready_page_builds_editor() {
        let page = TranslationPage::from_state(
            "p1",
            QueryState::Success(vec![locale("l1", "en"), locale("l2", "es")]),
        );
        assert_eq!(page.view(), &TranslationView::Ready);
        let editor = page.editor().unwrap();
        assert_eq!(editor.locales().as_slice(), ["en", "es"]);
        assert!(editor.entries().is_empty());
        assert!(page.render().contains("Locales: en (English), es (Spanish)"));
    }

    #[test]
    fn test_no_locales_state() {
        let page = TranslationPage::from_state("p1", QueryState::Success(vec![]));
        assert_eq!(page.view(), &TranslationView::NoLocales);
        assert!(page.editor().is_none());
        assert!(page.export().unwrap_err().is_validation());
    }

    #[test]
    fn test_error_and_loading_states() {
        let page = TranslationPage::from_state("p1", QueryState::Error(Error::transport("down")));
        assert!(page.render().starts_with("Failed to load locales"));
        let page = TranslationPage::from_state("p1", QueryState::Pending);
        assert_eq!(page.render(), "Loading translations...\n");
    }

    #[test]
    fn test_render_marks_selection_and_exports() {
        let mut page = TranslationPage::from_state("p1", QueryState::Success(vec![locale("l1", "en")]));
        let editor = page.editor_mut().unwrap();
        editor.begin_add().unwrap();
        editor.set_new_key("nav.home").unwrap();
        editor.set_new_value("en", "Home").unwrap();
        editor.commit_add().unwrap();

        let rendered = page.render();
        assert!(rendered.contains("> nav.home\n    en: Home\n"));

        let requests = page.export().unwrap();
        assert_eq!(requests[0].locales[0].locale_id, "l1");

        let json = page.to_json();
        assert_eq!(json["summary"]["keys"], 1);
        assert_eq!(json["entries"]["nav.home"]["en"], "Home");
    }
}
