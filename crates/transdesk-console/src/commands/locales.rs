//! Locale commands.

use clap::{Args, Subcommand};
use transdesk_api::{Locale, LocalePayload};
use transdesk_editor::{locale_name, normalize_locale};

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::{print_json, Column, Table};

/// Manage the locales of a project
#[derive(Debug, Args)]
pub struct LocalesCommand {
    #[command(subcommand)]
    pub action: LocalesAction,
}

#[derive(Debug, Subcommand)]
pub enum LocalesAction {
    /// List a project's locales
    List {
        /// Project ID
        project_id: String,
    },

    /// Add a locale to a project
    Add {
        /// Project ID
        project_id: String,

        /// Locale code, e.g. `en` or `pt-br`
        code: String,

        /// Mark as the project's default locale
        #[arg(long)]
        default: bool,
    },

    /// Change a locale's code or default flag
    Update {
        /// Project ID
        project_id: String,

        /// Locale ID
        id: String,

        /// Locale code
        code: String,

        /// Mark as the project's default locale
        #[arg(long)]
        default: bool,
    },

    /// Remove a locale
    Remove {
        /// Project ID
        project_id: String,

        /// Locale ID
        id: String,

        /// Skip the confirmation guard
        #[arg(long)]
        yes: bool,
    },
}

impl LocalesCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let queries = ctx.console().locales();

        match &self.action {
            LocalesAction::List { project_id } => {
                let locales = queries.all(project_id, &ctx.token).await?;
                if ctx.format.is_json() {
                    return print_json(&locales);
                }
                if locales.is_empty() {
                    println!("No locales found");
                } else {
                    print!("{}", locale_table(&locales).render());
                }
                Ok(())
            }
            LocalesAction::Add {
                project_id,
                code,
                default,
            } => {
                let payload = LocalePayload::new(project_id.as_str(), normalize_locale(code), *default);
                let locale = queries.create(&payload, &ctx.token).await?;
                report(ctx, "Added", &locale)
            }
            LocalesAction::Update {
                project_id,
                id,
                code,
                default,
            } => {
                let payload = LocalePayload::new(project_id.as_str(), normalize_locale(code), *default);
                let locale = queries.update(id, &payload, &ctx.token).await?;
                report(ctx, "Updated", &locale)
            }
            LocalesAction::Remove {
                project_id,
                id,
                yes,
            } => {
                if !yes {
                    return Err(CliError::user_with_hint(
                        format!(
                            "Refusing to remove locale {id} without confirmation. \
                             All translations for this locale will be deleted."
                        ),
                        "Re-run with --yes to remove it",
                    ));
                }
                let ack = queries.delete(project_id, id, &ctx.token).await?;
                if ctx.format.is_json() {
                    print_json(&ack)
                } else {
                    ctx.status(format!("Removed locale {id}"));
                    Ok(())
                }
            }
        }
    }
}

fn locale_table(locales: &[Locale]) -> Table {
    let mut table = Table::new(vec![
        Column::new("ID"),
        Column::new("Locale"),
        Column::new("Name"),
        Column::new("Default"),
    ]);
    for locale in locales {
        table.add_row(vec![
            locale.id.as_deref().unwrap_or("-"),
            locale.locale.as_str(),
            locale_name(&locale.locale),
            if locale.is_default { "yes" } else { "" },
        ]);
    }
    table
}

fn report(ctx: &CommandContext, verb: &str, locale: &Locale) -> Result<(), CliError> {
    if ctx.format.is_json() {
        return print_json(locale);
    }
    ctx.status(format!(
        "{verb} locale {} ({})",
        locale.locale,
        locale_name(&locale.locale)
    ));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_table_rows() {
        let locales = vec![
            Locale {
                id: Some("l1".to_string()),
                project_id: "p1".to_string(),
                locale: "en".to_string(),
                is_default: true,
            },
            Locale {
                id: None,
                project_id: "p1".to_string(),
                locale: "pt".to_string(),
                is_default: false,
            },
        ];
        let rows = locale_table(&locales).to_json_rows();
        assert_eq!(rows[0]["name"], "English");
        assert_eq!(rows[0]["default"], "yes");
        assert_eq!(rows[1]["id"], "-");
        assert_eq!(rows[1]["name"], "pt");
    }
}
