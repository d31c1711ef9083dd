//! Project commands.

use clap::{Args, Subcommand};
use transdesk_api::Project;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::print_json;
use crate::pages::{ProjectDetailPage, ProjectForm, ProjectListPage, Sort, SortDirection, SortField};

/// List, inspect and edit projects
#[derive(Debug, Args)]
pub struct ProjectsCommand {
    #[command(subcommand)]
    pub action: ProjectsAction,
}

#[derive(Debug, Subcommand)]
pub enum ProjectsAction {
    /// List all projects
    List {
        /// Column to sort by
        #[arg(long, value_enum, default_value_t = SortField::Name)]
        sort: SortField,

        /// Sort descending
        #[arg(long)]
        desc: bool,
    },

    /// Show one project
    Show {
        /// Project ID
        id: String,
    },

    /// Create a project
    Create {
        /// Project name
        name: String,
    },

    /// Rename a project
    Rename {
        /// Project ID
        id: String,

        /// New name
        name: String,
    },

    /// Delete a project
    Delete {
        /// Project ID
        id: String,

        /// Skip the confirmation guard
        #[arg(long)]
        yes: bool,
    },
}

impl ProjectsCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let queries = ctx.console().projects();

        match &self.action {
            ProjectsAction::List { sort, desc } => {
                queries.all(&ctx.token).await?;
                let direction = if *desc {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                };
                let page =
                    ProjectListPage::from_state(queries.list_state(), Sort::new(*sort, direction));
                if ctx.format.is_json() {
                    print_json(&page)
                } else {
                    print!("{}", page.render());
                    Ok(())
                }
            }
            ProjectsAction::Show { id } => {
                let project = queries.by_id(id, &ctx.token).await?;
                if ctx.format.is_json() {
                    print_json(&project)
                } else {
                    print!("{}", ProjectDetailPage { project }.render());
                    Ok(())
                }
            }
            ProjectsAction::Create { name } => {
                let mut form = ProjectForm::create();
                form.set_name(name.as_str());
                let project = form.submit(queries, &ctx.token).await?;
                report(ctx, "Created", &project)
            }
            ProjectsAction::Rename { id, name } => {
                let current = queries.by_id(id, &ctx.token).await?;
                let mut form = ProjectForm::edit(&current);
                form.set_name(name.as_str());
                let project = form.submit(queries, &ctx.token).await?;
                report(ctx, "Renamed", &project)
            }
            ProjectsAction::Delete { id, yes } => {
                if !yes {
                    return Err(CliError::user_with_hint(
                        format!("Refusing to delete project {id} without confirmation"),
                        "Re-run with --yes to delete it",
                    ));
                }
                let ack = queries.delete(id, &ctx.token).await?;
                if ctx.format.is_json() {
                    print_json(&ack)
                } else {
                    ctx.status(format!("Deleted project {id}"));
                    Ok(())
                }
            }
        }
    }
}

fn report(ctx: &CommandContext, verb: &str, project: &Project) -> Result<(), CliError> {
    if ctx.format.is_json() {
        return print_json(project);
    }
    ctx.status(format!(
        "{verb} project {} ({})",
        project.name,
        project.id.as_deref().unwrap_or("-")
    ));
    Ok(())
}
