//! Translation commands.

use clap::{Args, Subcommand};
use serde_json::json;
use transdesk_editor::normalize_locale;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::print_json;
use crate::pages::{TranslationPage, TranslationView};

/// Build translation requests
#[derive(Debug, Args)]
pub struct TranslationsCommand {
    #[command(subcommand)]
    pub action: TranslationsAction,
}

#[derive(Debug, Subcommand)]
pub enum TranslationsAction {
    /// Compose a new translation key and print the request for it
    New {
        /// Project ID
        project_id: String,

        /// Translation key, e.g. `nav.home`
        key: String,

        /// Value for one locale as `locale=text`; repeatable
        #[arg(long = "value", value_name = "LOCALE=TEXT", value_parser = parse_value)]
        values: Vec<(String, String)>,
    },
}

/// Parse `locale=text`. The text may be empty or contain `=`; the locale
/// code is normalized.
fn parse_value(raw: &str) -> Result<(String, String), String> {
    let (locale, text) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected LOCALE=TEXT, got `{raw}`"))?;
    if locale.trim().is_empty() {
        return Err("locale code is required".to_string());
    }
    Ok((normalize_locale(locale), text.to_string()))
}

impl TranslationsCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        match &self.action {
            TranslationsAction::New {
                project_id,
                key,
                values,
            } => {
                let locales = ctx.console().locales();
                locales.all(project_id, &ctx.token).await?;
                let mut page = TranslationPage::from_state(project_id.as_str(), locales.state(project_id));

                if page.view() == &TranslationView::NoLocales {
                    return Err(CliError::user_with_hint(
                        format!("Project {project_id} has no locales"),
                        format!("Add one with `transdesk locales add {project_id} <code>`"),
                    ));
                }
                let editor = page
                    .editor_mut()
                    .ok_or_else(|| CliError::Other(format!("translations for {project_id} are unavailable")))?;

                editor.begin_add()?;
                editor.set_new_key(key.as_str())?;
                for (locale, text) in values {
                    editor.set_new_value(locale, text.as_str())?;
                }
                let stored = editor.commit_add()?;
                tracing::debug!(key = %stored, "translation key composed");

                let requests = page.export()?;
                if ctx.format.is_json() {
                    return print_json(&json!({ "requests": requests }));
                }
                for request in &requests {
                    println!("{} ({})", request.key, request.project_id);
                    for value in &request.locales {
                        println!("  {}: {}", value.locale_id, value.value);
                    }
                }
                Ok(())
            }
        }
    }
}
