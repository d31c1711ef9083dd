//! Route loaders and navigation.

use serde_json::{json, Value};
use transdesk_common_async::{CancellationToken, DropGuard};
use transdesk_common_core::{Error, Result};
use transdesk_query::QueryState;

use crate::app::Console;
use crate::navigation::render_nav;
use crate::pages::{
    ErrorFallback, NotFoundPage, Page, ProjectDetailPage, ProjectListPage, Sort, TranslationPage,
};
use crate::routes::Route;

/// How a navigation was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    /// Link inside a running console; the loader finishes before the
    /// transition, so the first paint already has data.
    InApp,
    /// Fresh load of a URL; a pending placeholder is painted first.
    Direct,
}

/// Outcome of a navigation.
///
/// The navigation owns the scope its loader ran under. Calls started for
/// the page with [`Navigation::token`] are cancelled when it is dropped.
#[derive(Debug)]
pub struct Navigation {
    pub route: Route,
    pub first_paint: Page,
    pub page: Page,
    scope: CancellationToken,
    _guard: DropGuard,
}

impl Navigation {
    /// Token of this page's scope.
    pub fn token(&self) -> &CancellationToken {
        &self.scope
    }

    /// Navigation bar followed by the page.
    pub fn render(&self) -> String {
        format!("{}\n\n{}", render_nav(&self.route.path()), self.page.render())
    }

    pub fn to_json(&self) -> Value {
        json!({
            "path": self.route.path(),
            "firstPaintPending": self.first_paint.is_pending(),
            "page": self.page.to_json(),
        })
    }
}

/// Resolves paths to pages through the session's query cache.
#[derive(Clone)]
pub struct Router {
    console: Console,
}

impl Router {
    pub fn new(console: Console) -> Self {
        Self { console }
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    /// Make sure the data a route renders from is cached.
    pub async fn load(&self, route: &Route, token: &CancellationToken) -> Result<()> {
        match route {
            Route::Projects => self.console.projects().all(token).await.map(drop),
            Route::Project { id } => self.console.projects().by_id(id, token).await.map(drop),
            Route::Translations { project_id } => self
                .console
                .locales()
                .all(project_id, token)
                .await
                .map(drop),
            Route::Home | Route::About | Route::NotFound { .. } => Ok(()),
        }
    }

    /// Build the page for a route from whatever the cache holds now.
    pub fn render(&self, route: &Route) -> Page {
        match route {
            Route::Home => Page::Home,
            Route::About => Page::About,
            Route::Projects => Page::Projects(ProjectListPage::from_state(
                self.console.projects().list_state(),
                Sort::default(),
            )),
            Route::Project { id } => match self.console.projects().project_state(id) {
                QueryState::Pending => Page::Pending,
                QueryState::Error(err) => Page::Error(ErrorFallback::from_error(Some(&err))),
                QueryState::Success(project) => Page::Project(ProjectDetailPage { project }),
            },
            Route::Translations { project_id } => Page::Translations(TranslationPage::from_state(
                project_id.clone(),
                self.console.locales().state(project_id),
            )),
            Route::NotFound { path } => Page::NotFound(NotFoundPage { path: path.clone() }),
        }
    }

    /// Resolve `path`, run its loader and render it.
    ///
    /// The loader runs under a child of `token`, so dropping this future
    /// cancels it. Only cancellation is returned as an error; load failures
    /// become error pages.
    pub async fn navigate(
        &self,
        path: &str,
        kind: NavigationKind,
        token: &CancellationToken,
    ) -> Result<Navigation> {
        let route = Route::parse(path);
        tracing::debug!(route = %route, ?kind, "navigating");

        let has_loader = matches!(
            route,
            Route::Projects | Route::Project { .. } | Route::Translations { .. }
        );
        let placeholder = (kind == NavigationKind::Direct && has_loader).then_some(Page::Pending);

        let scope = token.child_token();
        let guard = scope.drop_guard();

        let page = match self.load(&route, &scope).await {
            Err(Error::Cancelled) => return Err(Error::Cancelled),
            Err(err) if !matches!(route, Route::Projects) => {
                tracing::debug!(route = %route, error = %err, "route loader failed");
                Page::Error(ErrorFallback::from_error(Some(&err)))
            }
            _ => self.render(&route),
        };

        Ok(Navigation {
            first_paint: placeholder.unwrap_or_else(|| page.clone()),
            route,
            page,
            scope,
            _guard: guard,
        })
    }
}
