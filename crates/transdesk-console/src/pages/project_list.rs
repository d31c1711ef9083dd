//! The project list page.

use std::cmp::Ordering;

use serde::Serialize;
use transdesk_api::Project;
use transdesk_query::QueryState;

use super::fallback::{user_message, UNKNOWN_ERROR};
use crate::output::{Alignment, Column, Table};

const MISSING: &str = "-";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Id,
    #[default]
    Name,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Column sort state, toggled like a table header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Same column flips the direction; another column sorts ascending.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == field {
            self.direction = match self.direction {
                SortDirection::Asc => SortDirection::Desc,
                SortDirection::Desc => SortDirection::Asc,
            };
        } else {
            *self = Self::new(field, SortDirection::Asc);
        }
    }
}

/// A table row. Missing values render as `-`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRow {
    pub id: Option<String>,
    pub name: Option<String>,
}

impl ProjectRow {
    fn from_project(project: Project) -> Self {
        let name = Some(project.name).filter(|n| !n.trim().is_empty());
        Self {
            id: project.id,
            name,
        }
    }

    pub fn id_label(&self) -> &str {
        self.id.as_deref().unwrap_or(MISSING)
    }

    pub fn name_label(&self) -> &str {
        self.name.as_deref().unwrap_or(MISSING)
    }
}

/// What the list shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ListView {
    Loading,
    Error { title: String, message: String },
    Empty,
    Rows { rows: Vec<ProjectRow> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectListPage {
    pub sort: Sort,
    pub view: ListView,
}

impl ProjectListPage {
    pub fn from_state(state: QueryState<Vec<Project>>, sort: Sort) -> Self {
        let view = match state {
            QueryState::Pending => ListView::Loading,
            QueryState::Error(err) => ListView::Error {
                title: "Failed to load projects".to_string(),
                message: user_message(&err, UNKNOWN_ERROR),
            },
            QueryState::Success(projects) if projects.is_empty() => ListView::Empty,
            QueryState::Success(projects) => ListView::Rows {
                rows: projects.into_iter().map(ProjectRow::from_project).collect(),
            },
        };
        let mut page = Self { sort, view };
        page.apply_sort();
        page
    }

    /// Replace the sort state and reorder.
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = sort;
        self.apply_sort();
        self
    }

    pub fn sort_by(&mut self, field: SortField) {
        self.sort.toggle(field);
        self.apply_sort();
    }

    pub fn rows(&self) -> &[ProjectRow] {
        match &self.view {
            ListView::Rows { rows } => rows.as_slice(),
            _ => &[],
        }
    }

    fn apply_sort(&mut self) {
        let sort = self.sort;
        if let ListView::Rows { rows } = &mut self.view {
            rows.sort_by(|a, b| {
                let ordering = match sort.field {
                    SortField::Id => compare_ids(a.id.as_deref(), b.id.as_deref()),
                    SortField::Name => compare_names(a.name.as_deref(), b.name.as_deref()),
                };
                match sort.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }
    }

    pub fn table(&self) -> Table {
        let mut table = Table::new(vec![
            Column::new("ID").align(Alignment::Right),
            Column::new("Name").min_width(16).max_width(48),
        ]);
        for row in self.rows() {
            table.add_row(vec![row.id_label(), row.name_label()]);
        }
        table
    }

    pub fn render(&self) -> String {
        match &self.view {
            ListView::Loading => "Loading projects...\n".to_string(),
            ListView::Error { title, message } => format!("{title}\n{message}\n"),
            ListView::Empty => "No projects found\n".to_string(),
            ListView::Rows { .. } => self.table().render(),
        }
    }
}

/// Numeric ids compare numerically, everything else as text.
fn compare_ids(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match (a.parse::<u64>(), b.parse::<u64>()) {
            (Ok(x), Ok(y)) => x.cmp(&y),
            _ => a.cmp(b),
        },
        _ => a.cmp(&b),
    }
}

fn compare_names(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        _ => a.cmp(&b),
    }
}
