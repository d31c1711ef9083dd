//! Create and edit project forms.

use transdesk_api::{Project, ProjectPayload};
use transdesk_common_async::CancellationToken;
use transdesk_common_core::{Error, Result};
use transdesk_query::{MutationStatus, ProjectQueries};

use super::fallback::user_message;

pub const NAME_REQUIRED: &str = "Project name is required";
pub const ID_MISSING: &str = "Project ID is missing";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormKind {
    Create,
    Edit { id: Option<String> },
}

impl FormKind {
    fn failure_message(&self) -> &'static str {
        match self {
            FormKind::Create => "Failed to create project. Please try again.",
            FormKind::Edit { .. } => "Failed to update project. Please try again.",
        }
    }
}

/// Modal form state for creating or renaming a project.
#[derive(Debug, Clone)]
pub struct ProjectForm {
    kind: FormKind,
    open: bool,
    name: String,
    error: Option<String>,
    status: MutationStatus,
}

impl ProjectForm {
    pub fn create() -> Self {
        Self {
            kind: FormKind::Create,
            open: true,
            name: String::new(),
            error: None,
            status: MutationStatus::Idle,
        }
    }

    /// Edit form prefilled with the project's current name.
    pub fn edit(project: &Project) -> Self {
        Self {
            kind: FormKind::Edit {
                id: project.id.clone(),
            },
            name: project.name.clone(),
            ..Self::create()
        }
    }

    pub fn kind(&self) -> &FormKind {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status(&self) -> &MutationStatus {
        &self.status
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_pending(&self) -> bool {
        self.status.is_pending()
    }

    /// The submit control is disabled while pending or with a blank name.
    pub fn can_submit(&self) -> bool {
        !self.is_pending() && !self.name.trim().is_empty()
    }

    /// Close and reset the form. Ignored while a save is pending.
    pub fn close(&mut self) -> bool {
        if self.is_pending() {
            return false;
        }
        self.open = false;
        self.error = None;
        self.status = MutationStatus::Idle;
        if self.kind == FormKind::Create {
            self.name.clear();
        }
        true
    }

    /// Validate and save. On success the form clears and closes; on failure
    /// it keeps its input, shows the message and can be submitted again. A
    /// cancelled save returns the form to idle with its input intact.
    pub async fn submit(&mut self, queries: &ProjectQueries, token: &CancellationToken) -> Result<Project> {
        if self.is_pending() {
            return Err(Error::conflict("A save is already in progress"));
        }
        if let Err(err) = self.validate() {
            self.error = Some(user_message(&err, NAME_REQUIRED));
            return Err(err);
        }

        let payload = ProjectPayload::new(&self.name);
        self.error = None;
        self.status = MutationStatus::Pending;

        let result = match self.kind.clone() {
            FormKind::Create => queries.create(&payload, token).await,
            FormKind::Edit { id } => {
                let id = id.unwrap_or_default();
                queries.update(&id, &payload, token).await
            }
        };

        match &result {
            Ok(project) => {
                tracing::info!(id = ?project.id, name = %project.name, "project saved");
                self.status = MutationStatus::Success;
                self.name.clear();
                self.open = false;
            }
            Err(Error::Cancelled) => self.status = MutationStatus::Idle,
            Err(err) => {
                self.error = Some(user_message(err, self.kind.failure_message()));
                self.status.settle(&result);
            }
        }
        result
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("name", NAME_REQUIRED));
        }
        if let FormKind::Edit { id } = &self.kind {
            if id.as_deref().map_or(true, |id| id.trim().is_empty()) {
                return Err(Error::validation("id", ID_MISSING));
            }
        }
        Ok(())
    }

    pub fn render(&self) -> String {
        let title = match self.kind {
            FormKind::Create => "Create project",
            FormKind::Edit { .. } => "Edit project",
        };
        let mut out = format!("{title}\nName: {}\n", self.name);
        if let Some(error) = &self.error {
            out.push_str(&format!("Error: {error}\n"));
        }
        if self.is_pending() {
            out.push_str("Saving...\n");
        }
        out
    }
}
