//! Open command: resolve a console path and print its page.

use clap::Args;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::output::print_json;
use crate::router::NavigationKind;

/// Open a console path and print the page
#[derive(Debug, Args)]
pub struct OpenCommand {
    /// Path to open, e.g. `/projects` or `/translations/42`
    #[arg(default_value = "/")]
    pub path: String,
}

impl OpenCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let navigation = ctx
            .router
            .navigate(&self.path, NavigationKind::Direct, &ctx.token)
            .await?;

        if ctx.format.is_json() {
            print_json(&navigation.to_json())
        } else {
            println!("{}", navigation.render());
            Ok(())
        }
    }
}
