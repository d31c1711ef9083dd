//! The console route table.

use std::fmt;

/// A resolved console location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    About,
    Projects,
    Project { id: String },
    Translations { project_id: String },
    NotFound { path: String },
}

impl Route {
    /// Resolve a path. Query strings, fragments and trailing slashes are
    /// ignored; anything outside the table is [`Route::NotFound`].
    pub fn parse(path: &str) -> Self {
        let trimmed = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["about"] => Route::About,
            ["projects"] => Route::Projects,
            ["projects", id] => Route::Project { id: id.to_string() },
            ["translations", project_id] => Route::Translations {
                project_id: project_id.to_string(),
            },
            _ => Route::NotFound {
                path: path.to_string(),
            },
        }
    }

    /// Canonical path for this route.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::About => "/about".to_string(),
            Route::Projects => "/projects".to_string(),
            Route::Project { id } => format!("/projects/{id}"),
            Route::Translations { project_id } => format!("/translations/{project_id}"),
            Route::NotFound { path } => path.clone(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Route::NotFound { .. })
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("/", Route::Home ; "root")]
    #[test_case("", Route::Home ; "empty")]
    #[test_case("/about", Route::About ; "about")]
    #[test_case("/projects/", Route::Projects ; "trailing slash")]
    #[test_case("/projects?page=2", Route::Projects ; "query string")]
    #[test_case("/projects/p1", Route::Project { id: "p1".into() } ; "project detail")]
    #[test_case("/translations/p1#top", Route::Translations { project_id: "p1".into() } ; "translations")]
    fn test_parse(path: &str, expected: Route) {
        assert_eq!(Route::parse(path), expected);
    }

    #[test_case("/nope")]
    #[test_case("/translations")]
    #[test_case("/projects/p1/extra")]
    fn test_parse_not_found(path: &str) {
        let route = Route::parse(path);
        assert!(route.is_not_found());
        assert_eq!(route.path(), path);
    }

    #[test]
    fn test_path_round_trips() {
        for route in [
            Route::Home,
            Route::About,
            Route::Projects,
            Route::Project { id: "7".into() },
            Route::Translations {
                project_id: "7".into(),
            },
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }
}
