//! Page controllers.
//!
//! Each page is built from the query cache state for its route and renders
//! to plain text or JSON.

pub mod fallback;
pub mod project_detail;
pub mod project_form;
pub mod project_list;
pub mod translations;

use serde_json::{json, Value};

pub use fallback::{ErrorFallback, NotFoundPage};
pub use project_detail::ProjectDetailPage;
pub use project_form::{FormKind, ProjectForm};
pub use project_list::{ListView, ProjectListPage, Sort, SortDirection, SortField};
pub use translations::{TranslationPage, TranslationView};

/// A rendered route.
#[derive(Debug, Clone)]
pub enum Page {
    /// Route-level placeholder painted before the loader finishes.
    Pending,
    Home,
    About,
    Projects(ProjectListPage),
    Project(ProjectDetailPage),
    Translations(TranslationPage),
    Error(ErrorFallback),
    NotFound(NotFoundPage),
}

impl Page {
    pub fn is_pending(&self) -> bool {
        matches!(self, Page::Pending)
    }

    pub fn render(&self) -> String {
        match self {
            Page::Pending => "Loading...\n".to_string(),
            Page::Home => "Transdesk\nManage projects and their translations.\n".to_string(),
            Page::About => "About Transdesk\nAn administration console for translation projects.\n"
                .to_string(),
            Page::Projects(page) => page.render(),
            Page::Project(page) => page.render(),
            Page::Translations(page) => page.render(),
            Page::Error(page) => page.render(),
            Page::NotFound(page) => page.render(),
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Page::Pending => json!({"page": "pending"}),
            Page::Home => json!({"page": "home"}),
            Page::About => json!({"page": "about"}),
            Page::Projects(page) => json!({"page": "projects", "list": page}),
            Page::Project(page) => json!({"page": "project", "project": page.project}),
            Page::Translations(page) => json!({"page": "translations", "translations": page.to_json()}),
            Page::Error(page) => json!({"page": "error", "message": page.message}),
            Page::NotFound(page) => json!({"page": "not_found", "path": page.path}),
        }
    }
}
