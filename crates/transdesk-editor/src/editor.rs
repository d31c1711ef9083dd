//! The translation editor state machine.

use indexmap::IndexMap;
use serde::Serialize;
use transdesk_api::{CreateNewTranslation, Locale, TranslationValue};
use transdesk_common_core::Result;

use crate::error::{EditResult, EditorError};
use crate::locale::{normalize_locale, LocaleSet};

/// Locale code to translated value, in locale order.
pub type ValueMap = IndexMap<String, String>;

/// What the editor pane is doing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Viewing,
    Editing {
        buffer: ValueMap,
    },
    Adding {
        new_key: String,
        buffer: ValueMap,
    },
}

/// A destructive change waiting for the user to confirm or decline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingConfirmation {
    DeleteKey { key: String },
    RemoveLocale { code: String },
}

impl PendingConfirmation {
    /// The question shown to the user.
    pub fn prompt(&self) -> String {
        match self {
            Self::DeleteKey { key } => format!("Delete key \"{key}\"?"),
            Self::RemoveLocale { code } => format!(
                "Remove \"{code}\" locale? All translations for this locale will be deleted."
            ),
        }
    }
}

/// Counts shown in the editor header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EditorSummary {
    pub keys: usize,
    pub locales: usize,
}

/// Editing session for one project's translations.
#[derive(Debug, Clone)]
pub struct TranslationEditor {
    entries: IndexMap<String, ValueMap>,
    locales: LocaleSet,
    locale_ids: IndexMap<String, String>,
    selected: Option<String>,
    mode: Mode,
    search_term: String,
    pending: Option<PendingConfirmation>,
    locale_manager_open: bool,
    locale_draft: String,
}

impl TranslationEditor {
    /// Start an empty session over the given locale codes.
    pub fn new<I, S>(codes: I) -> EditResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let locales = LocaleSet::from_codes(codes);
        if locales.is_empty() {
            return Err(EditorError::NoLocales);
        }
        Ok(Self {
            entries: IndexMap::new(),
            locales,
            locale_ids: IndexMap::new(),
            selected: None,
            mode: Mode::Viewing,
            search_term: String::new(),
            pending: None,
            locale_manager_open: false,
            locale_draft: String::new(),
        })
    }

    /// Start a session from the locales the backend lists for a project.
    ///
    /// Server ids are remembered so exported requests can reference them.
    pub fn from_locales(locales: &[Locale]) -> EditResult<Self> {
        let mut editor = Self::new(locales.iter().map(|l| l.locale.as_str()))?;
        for locale in locales {
            if let Some(id) = &locale.id {
                editor
                    .locale_ids
                    .entry(normalize_locale(&locale.locale))
                    .or_insert_with(|| id.clone());
            }
        }
        Ok(editor)
    }

    pub fn entries(&self) -> &IndexMap<String, ValueMap> {
        &self.entries
    }

    pub fn entry(&self, key: &str) -> Option<&ValueMap> {
        self.entries.get(key)
    }

    pub fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn selected_entry(&self) -> Option<&ValueMap> {
        self.entries.get(self.selected.as_deref()?)
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn pending(&self) -> Option<&PendingConfirmation> {
        self.pending.as_ref()
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn summary(&self) -> EditorSummary {
        EditorSummary {
            keys: self.entries.len(),
            locales: self.locales.len(),
        }
    }

    /// Keys whose name or any value contains the search term, ignoring case.
    pub fn filtered_keys(&self) -> Vec<&str> {
        let term = self.search_term.to_lowercase();
        self.entries
            .iter()
            .filter(|(key, values)| {
                key.to_lowercase().contains(&term)
                    || values.values().any(|v| v.to_lowercase().contains(&term))
            })
            .map(|(key, _)| key.as_str())
            .collect()
    }

    /// Select a key. Ignored while a buffer is open or when the key is unknown.
    pub fn select(&mut self, key: &str) -> bool {
        if self.mode != Mode::Viewing || !self.entries.contains_key(key) {
            return false;
        }
        self.selected = Some(key.to_string());
        true
    }

    pub fn begin_edit(&mut self) -> EditResult<()> {
        self.ensure_viewing()?;
        self.ensure_nothing_pending()?;
        let entry = self.selected_entry().ok_or(EditorError::NoSelection)?;
        self.mode = Mode::Editing {
            buffer: entry.clone(),
        };
        Ok(())
    }

    pub fn set_edit_value(
        &mut self,
        locale: &str,
        value: impl Into<String>,
    ) -> EditResult<()> {
        if !self.locales.contains(locale) {
            return Err(EditorError::UnknownLocale(locale.to_string()));
        }
        match &mut self.mode {
            Mode::Editing { buffer } => {
                buffer.insert(locale.to_string(), value.into());
                Ok(())
            }
            _ => Err(EditorError::NotEditing),
        }
    }

    pub fn cancel_edit(&mut self) {
        if matches!(self.mode, Mode::Editing { .. }) {
            self.mode = Mode::Viewing;
        }
    }

    /// Replace the selected entry with the edit buffer as typed.
    pub fn commit_edit(&mut self) -> EditResult<()> {
        if !matches!(self.mode, Mode::Editing { .. }) {
            return Err(EditorError::NotEditing);
        }
        let key = self.selected.clone().ok_or(EditorError::NoSelection)?;
        match std::mem::take(&mut self.mode) {
            Mode::Editing { buffer } => {
                tracing::debug!(key = %key, "committing edit");
                self.entries.insert(key, buffer);
                Ok(())
            }
            other => {
                self.mode = other;
                Err(EditorError::NotEditing)
            }
        }
    }

    /// Ask to delete the selected key.
    pub fn delete_key(&mut self) -> EditResult<&PendingConfirmation> {
        self.ensure_viewing()?;
        self.ensure_nothing_pending()?;
        let key = self.selected.clone().ok_or(EditorError::NoSelection)?;
        Ok(&*self.pending.insert(PendingConfirmation::DeleteKey { key }))
    }

    /// Open the add buffer with an empty value for every locale.
    pub fn begin_add(&mut self) -> EditResult<()> {
        self.ensure_viewing()?;
        self.ensure_nothing_pending()?;
        self.mode = Mode::Adding {
            new_key: String::new(),
            buffer: self.empty_values(),
        };
        Ok(())
    }

    pub fn set_new_key(&mut self, key: impl Into<String>) -> EditResult<()> {
        match &mut self.mode {
            Mode::Adding { new_key, .. } => {
                *new_key = key.into();
                Ok(())
            }
            _ => Err(EditorError::NotAdding),
        }
    }

    pub fn set_new_value(
        &mut self,
        locale: &str,
        value: impl Into<String>,
    ) -> EditResult<()> {
        if !self.locales.contains(locale) {
            return Err(EditorError::UnknownLocale(locale.to_string()));
        }
        match &mut self.mode {
            Mode::Adding { buffer, .. } => {
                buffer.insert(locale.to_string(), value.into());
                Ok(())
            }
            _ => Err(EditorError::NotAdding),
        }
    }

    pub fn cancel_add(&mut self) {
        if matches!(self.mode, Mode::Adding { .. }) {
            self.mode = Mode::Viewing;
        }
    }

    /// Store the new key, select it and close the add buffer.
    ///
    /// The key is stored trimmed. On error the buffer stays open.
    pub fn commit_add(&mut self) -> EditResult<String> {
        let Mode::Adding { new_key, .. } = &self.mode else {
            return Err(EditorError::NotAdding);
        };
        let key = new_key.trim().to_string();
        if key.is_empty() {
            return Err(EditorError::EmptyKey);
        }
        if self.entries.contains_key(&key) {
            return Err(EditorError::DuplicateKey(key));
        }

        match std::mem::take(&mut self.mode) {
            Mode::Adding { buffer, .. } => {
                tracing::debug!(key = %key, "adding translation key");
                self.entries.insert(key.clone(), buffer);
                self.selected = Some(key.clone());
                Ok(key)
            }
            other => {
                self.mode = other;
                Err(EditorError::NotAdding)
            }
        }
    }

    /// Append a locale, giving every entry and open buffer an empty value.
    ///
    /// Returns the normalized code.
    pub fn add_locale(&mut self, code: &str) -> EditResult<String> {
        let code = normalize_locale(code);
        if code.is_empty() {
            return Err(EditorError::EmptyLocale);
        }
        if self.locales.contains(&code) {
            return Err(EditorError::DuplicateLocale(code));
        }

        self.locales.push(code.clone());
        for values in self.entries.values_mut() {
            values.insert(code.clone(), String::new());
        }
        if let Some(buffer) = self.buffer_mut() {
            buffer.insert(code.clone(), String::new());
        }
        tracing::debug!(locale = %code, "added locale");
        Ok(code)
    }

    /// Ask to remove a locale. The last remaining locale cannot be removed.
    pub fn remove_locale(&mut self, code: &str) -> EditResult<&PendingConfirmation> {
        self.ensure_nothing_pending()?;
        let code = normalize_locale(code);
        if !self.locales.contains(&code) {
            return Err(EditorError::UnknownLocale(code));
        }
        if self.locales.len() <= 1 {
            return Err(EditorError::LastLocale);
        }
        Ok(&*self.pending.insert(PendingConfirmation::RemoveLocale { code }))
    }

    /// Apply the pending change and return it.
    ///
    /// A key deletion is refused with [`EditorError::Busy`] while a buffer is
    /// open; the confirmation stays pending.
    pub fn confirm(&mut self) -> EditResult<PendingConfirmation> {
        if matches!(self.pending, Some(PendingConfirmation::DeleteKey { .. })) {
            self.ensure_viewing()?;
        }
        let pending = self.pending.take().ok_or(EditorError::NothingPending)?;
        match &pending {
            PendingConfirmation::DeleteKey { key } => {
                if self.entries.shift_remove(key).is_none() {
                    return Err(EditorError::UnknownKey(key.clone()));
                }
                self.selected = self.entries.keys().next().cloned();
                tracing::debug!(key = %key, "deleted translation key");
            }
            PendingConfirmation::RemoveLocale { code } => {
                if self.locales.len() <= 1 {
                    return Err(EditorError::LastLocale);
                }
                if !self.locales.remove(code) {
                    return Err(EditorError::UnknownLocale(code.clone()));
                }
                for values in self.entries.values_mut() {
                    values.shift_remove(code);
                }
                if let Some(buffer) = self.buffer_mut() {
                    buffer.shift_remove(code);
                }
                self.locale_ids.shift_remove(code);
                tracing::debug!(locale = %code, "removed locale");
            }
        }
        Ok(pending)
    }

    /// Drop the pending change without applying it.
    pub fn decline(&mut self) -> Option<PendingConfirmation> {
        self.pending.take()
    }

    pub fn open_locale_manager(&mut self) {
        self.locale_manager_open = true;
    }

    pub fn close_locale_manager(&mut self) {
        self.locale_manager_open = false;
        self.locale_draft.clear();
    }

    pub fn is_locale_manager_open(&self) -> bool {
        self.locale_manager_open
    }

    pub fn locale_draft(&self) -> &str {
        &self.locale_draft
    }

    pub fn set_locale_draft(&mut self, draft: impl Into<String>) {
        self.locale_draft = draft.into();
    }

    /// Add the drafted locale and clear the draft on success.
    pub fn add_locale_from_draft(&mut self) -> EditResult<String> {
        let draft = self.locale_draft.clone();
        let code = self.add_locale(&draft)?;
        self.locale_draft.clear();
        Ok(code)
    }

    /// One validated usecase request per entry, values in locale order.
    ///
    /// Locales loaded from the backend are referenced by their server id;
    /// locales added in this session by their code.
    pub fn export_requests(&self, project_id: &str) -> Result<Vec<CreateNewTranslation>> {
        self.entries
            .iter()
            .map(|(key, values)| {
                let locales = self
                    .locales
                    .iter()
                    .map(|code| TranslationValue {
                        locale_id: self
                            .locale_ids
                            .get(code)
                            .cloned()
                            .unwrap_or_else(|| code.to_string()),
                        value: values.get(code).cloned().unwrap_or_default(),
                    })
                    .collect();
                CreateNewTranslation::try_new(project_id, key.clone(), locales)
            })
            .collect()
    }

    fn empty_values(&self) -> ValueMap {
        self.locales
            .iter()
            .map(|code| (code.to_string(), String::new()))
            .collect()
    }

    fn buffer_mut(&mut self) -> Option<&mut ValueMap> {
        match &mut self.mode {
            Mode::Viewing => None,
            Mode::Editing { buffer } | Mode::Adding { buffer, .. } => Some(buffer),
        }
    }

    fn ensure_viewing(&self) -> EditResult<()> {
        match self.mode {
            Mode::Viewing => Ok(()),
            _ => Err(EditorError::Busy),
        }
    }

    fn ensure_nothing_pending(&self) -> EditResult<()> {
        match self.pending {
            Some(_) => Err(EditorError::AwaitingConfirmation),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn editor(codes: &[&str]) -> TranslationEditor {
        TranslationEditor::new(codes.iter().copied()).unwrap()
    }

    fn add_key(editor: &mut TranslationEditor, key: &str, values: &[(&str, &str)]) {
        editor.begin_add().unwrap();
        editor.set_new_key(key).unwrap();
        for (locale, value) in values {
            editor.set_new_value(locale, *value).unwrap();
        }
        editor.commit_add().unwrap();
    }

    #[test]
    fn test_new_requires_a_locale() {
        assert_eq!(
            TranslationEditor::new(Vec::<String>::new()).unwrap_err(),
            EditorError::NoLocales
        );
        assert_eq!(
            TranslationEditor::new(["  "]).unwrap_err(),
            EditorError::NoLocales
        );
    }

    #[test]
    fn test_begin_add_seeds_every_locale() {
        let mut editor = editor(&["en", "es"]);
        editor.begin_add().unwrap();
        match editor.mode() {
            Mode::Adding { new_key, buffer } => {
                assert!(new_key.is_empty());
                assert_eq!(buffer.keys().collect::<Vec<_>>(), ["en", "es"]);
                assert!(buffer.values().all(String::is_empty));
            }
            other => panic!("Expected Adding, got {:?}", other),
        }
    }

    #[test]
    fn test_commit_add_trims_and_rejects_blank() {
        let mut editor = editor(&["en"]);
        editor.begin_add().unwrap();
        editor.set_new_key("   ").unwrap();
        assert_eq!(editor.commit_add(), Err(EditorError::EmptyKey));
        assert!(matches!(editor.mode(), Mode::Adding { .. }));

        editor.set_new_key("  nav.home ").unwrap();
        assert_eq!(editor.commit_add().unwrap(), "nav.home");
        assert_eq!(editor.selected(), Some("nav.home"));
        assert_eq!(editor.mode(), &Mode::Viewing);
    }

    #[test]
    fn test_select_is_ignored_while_buffer_open() {
        let mut editor = editor(&["en"]);
        add_key(&mut editor, "a", &[]);
        add_key(&mut editor, "b", &[]);

        assert!(editor.select("a"));
        editor.begin_edit().unwrap();
        assert!(!editor.select("b"));
        assert_eq!(editor.selected(), Some("a"));
        editor.cancel_edit();

        editor.begin_add().unwrap();
        assert!(!editor.select("b"));
        editor.cancel_add();
        assert!(!editor.select("missing"));
        assert!(editor.select("b"));
    }

    #[test]
    fn test_edit_commit_and_cancel() {
        let mut editor = editor(&["en", "es"]);
        add_key(&mut editor, "nav.home", &[("en", "Home")]);

        editor.begin_edit().unwrap();
        editor.set_edit_value("es", "Inicio").unwrap();
        editor.cancel_edit();
        assert_eq!(editor.entry("nav.home").unwrap()["es"], "");

        editor.begin_edit().unwrap();
        editor.set_edit_value("es", "Inicio").unwrap();
        assert_eq!(
            editor.set_edit_value("fr", "Accueil"),
            Err(EditorError::UnknownLocale("fr".into()))
        );
        editor.commit_edit().unwrap();
        assert_eq!(editor.entry("nav.home").unwrap()["es"], "Inicio");
        assert_eq!(editor.commit_edit(), Err(EditorError::NotEditing));
    }

    #[test]
    fn test_begin_edit_needs_selection() {
        let mut editor = editor(&["en"]);
        assert_eq!(editor.begin_edit(), Err(EditorError::NoSelection));
    }

    #[test]
    fn test_delete_key_declined() {
        let mut editor = editor(&["en"]);
        add_key(&mut editor, "a", &[]);

        let pending = editor.delete_key().unwrap().clone();
        assert_eq!(pending.prompt(), "Delete key \"a\"?");
        assert_eq!(editor.decline(), Some(pending));
        assert!(editor.entry("a").is_some());
        assert_eq!(editor.selected(), Some("a"));
    }

    #[test]
    fn test_one_confirmation_at_a_time() {
        let mut editor = editor(&["en", "es"]);
        add_key(&mut editor, "a", &[]);
        editor.delete_key().unwrap();
        assert_eq!(
            editor.remove_locale("es").unwrap_err(),
            EditorError::AwaitingConfirmation
        );
        editor.decline();
        assert_eq!(editor.confirm(), Err(EditorError::NothingPending));
    }

    #[test]
    fn test_remove_locale_prompt() {
        let mut editor = editor(&["en", "es"]);
        let pending = editor.remove_locale(" ES ").unwrap();
        assert_eq!(
            pending.prompt(),
            "Remove \"es\" locale? All translations for this locale will be deleted."
        );
    }

    #[test]
    fn test_add_locale_reaches_open_buffer() {
        let mut editor = editor(&["en"]);
        editor.begin_add().unwrap();
        editor.add_locale("fr").unwrap();
        editor.set_new_key("k").unwrap();
        editor.set_new_value("fr", "v").unwrap();
        editor.commit_add().unwrap();
        assert_eq!(editor.entry("k").unwrap()["fr"], "v");
    }

    #[test]
    fn test_locale_manager_draft() {
        let mut editor = editor(&["en"]);
        editor.open_locale_manager();
        assert!(editor.is_locale_manager_open());

        editor.set_locale_draft(" EN ");
        assert_eq!(
            editor.add_locale_from_draft(),
            Err(EditorError::DuplicateLocale("en".into()))
        );
        assert_eq!(editor.locale_draft(), " EN ");

        editor.set_locale_draft("Ja");
        assert_eq!(editor.add_locale_from_draft().unwrap(), "ja");
        assert!(editor.locale_draft().is_empty());

        editor.set_locale_draft("x");
        editor.close_locale_manager();
        assert!(!editor.is_locale_manager_open());
        assert!(editor.locale_draft().is_empty());
    }

    #[test]
    fn test_summary() {
        let mut editor = editor(&["en", "es"]);
        add_key(&mut editor, "a", &[]);
        assert_eq!(editor.summary(), EditorSummary { keys: 1, locales: 2 });
    }

    #[test]
    fn test_from_locales_keeps_server_ids() {
        let locales = vec![
            Locale {
                id: Some("l1".into()),
                project_id: "p1".into(),
                locale: "en".into(),
                is_default: true,
            },
            Locale {
                id: None,
                project_id: "p1".into(),
                locale: "ES".into(),
                is_default: false,
            },
        ];
        let mut editor = TranslationEditor::from_locales(&locales).unwrap();
        editor.add_locale("fr").unwrap();
        add_key(&mut editor, "nav.home", &[("en", "Home"), ("es", "Inicio")]);

        let requests = editor.export_requests("p1").unwrap();
        assert_eq!(requests.len(), 1);
        let ids: Vec<_> = requests[0].locales.iter().map(|v| v.locale_id.as_str()).collect();
        assert_eq!(ids, ["l1", "es", "fr"]);
        assert_eq!(requests[0].locales[1].value, "Inicio");
        assert_eq!(requests[0].key, "nav.home");
    }

    #[test]
    fn test_export_validates_project_id() {
        let mut editor = editor(&["en"]);
        add_key(&mut editor, "a", &[]);
        assert!(editor.export_requests("").unwrap_err().is_validation());
        assert!(editor.export_requests("p1").is_ok());
    }

    #[test]
    fn test_filter_ignores_case_across_values() {
        let mut editor = editor(&["en", "es"]);
        add_key(&mut editor, "button.login", &[("en", "Log in"), ("es", "Entrar")]);
        add_key(&mut editor, "nav.home", &[("en", "Home")]);

        editor.set_search_term("ENTRAR");
        assert_eq!(editor.filtered_keys(), ["button.login"]);
        editor.set_search_term("");
        assert_eq!(editor.filtered_keys(), ["button.login", "nav.home"]);
    }
}
