//! Installing missing tools.
//!
//! The dependency gate hands every missing tool to a [`DependencyInstaller`]
//! in one batch. [`RecipeInstaller`] is the production implementation: it
//! runs a configured shell recipe per tool after the user confirms.

use crate::error::{ClusterUpError, Result};
use crate::ui::{Prompt, UserInterface};
use std::collections::BTreeMap;

/// Installs a batch of missing tools or fails.
pub trait DependencyInstaller {
    /// Install every tool in `tools`.
    ///
    /// Any failure fails the whole batch with
    /// `ClusterUpError::UnresolvedDependency`.
    fn install(&mut self, tools: &[String], ui: &mut dyn UserInterface) -> Result<()>;
}

/// Mockable dependencies for the installer.
pub struct InstallerContext<'a> {
    /// Run a shell command, returning true on success.
    pub run_command: &'a dyn Fn(&str) -> bool,
}

/// Build the default `InstallerContext` for production use.
pub fn default_context() -> InstallerContext<'static> {
    InstallerContext {
        run_command: &|cmd| {
            let options = crate::shell::CommandOptions::default();
            crate::shell::execute(cmd, &options).is_ok_and(|r| r.success)
        },
    }
}

/// Installs tools by running a shell recipe for each.
pub struct RecipeInstaller<'a> {
    recipes: BTreeMap<String, String>,
    ctx: InstallerContext<'a>,
}

impl<'a> RecipeInstaller<'a> {
    /// Create an installer from tool → shell command recipes.
    pub fn new(recipes: BTreeMap<String, String>, ctx: InstallerContext<'a>) -> Self {
        Self { recipes, ctx }
    }
}

fn unresolved(tools: &[String], message: String) -> ClusterUpError {
    ClusterUpError::UnresolvedDependency {
        tools: tools.join(", "),
        message,
    }
}

impl DependencyInstaller for RecipeInstaller<'_> {
    fn install(&mut self, tools: &[String], ui: &mut dyn UserInterface) -> Result<()> {
        if tools.is_empty() {
            return Ok(());
        }

        let without_recipe: Vec<String> = tools
            .iter()
            .filter(|t| !self.recipes.contains_key(t.as_str()))
            .cloned()
            .collect();
        if !without_recipe.is_empty() {
            return Err(unresolved(
                tools,
                format!(
                    "no install recipe configured for {}",
                    without_recipe.join(", ")
                ),
            ));
        }

        let prompt = Prompt::confirm(
            "install-dependencies",
            &format!("Install missing dependencies ({})?", tools.join(", ")),
            true,
        );
        let confirmed = ui
            .prompt(&prompt)
            .map_err(|e| unresolved(tools, format!("could not confirm installation: {}", e)))?
            .as_bool()
            .unwrap_or(false);
        if !confirmed {
            return Err(unresolved(tools, "installation declined".to_string()));
        }

        for tool in tools {
            let recipe = &self.recipes[tool.as_str()];
            tracing::info!("Installing {} with `{}`", tool, recipe);

            let mut spinner = ui.start_spinner(&format!("Installing {}", tool));
            if (self.ctx.run_command)(recipe) {
                spinner.finish_success(&format!("Installed {}", tool));
            } else {
                spinner.finish_error(&format!("Failed to install {}", tool));
                return Err(unresolved(tools, format!("`{}` failed", recipe)));
            }
        }

        Ok(())
    }
}
