//! Config command implementation.
//!
//! The `clusterup config` command shows resolved configuration.

use std::path::{Path, PathBuf};

use crate::cli::args::ConfigArgs;
use crate::config::{load_config, validate_config, ConfigPaths};
use crate::error::{ClusterUpError, Result};
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The config command implementation.
pub struct ConfigCommand {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
    args: ConfigArgs,
}

impl ConfigCommand {
    /// Create a new config command.
    pub fn new(project_root: &Path, config_override: Option<&Path>, args: ConfigArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            config_override: config_override.map(Path::to_path_buf),
            args,
        }
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }
}

impl Command for ConfigCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = load_config(&self.project_root, self.config_override.as_deref())?;

        // Show config file path(s)
        let sources: Vec<PathBuf> = match &self.config_override {
            Some(path) => vec![path.clone()],
            None => ConfigPaths::discover(&self.project_root)
                .all_existing()
                .into_iter()
                .cloned()
                .collect(),
        };
        if sources.is_empty() {
            ui.message("# defaults (no config files found)");
        } else {
            for path in &sources {
                ui.message(&format!("# {}", path.display()));
            }
        }

        if self.args.json {
            let json = serde_json::to_string_pretty(&config)
                .map_err(|e| ClusterUpError::Other(e.into()))?;
            ui.message(&json);
        } else {
            let yaml =
                serde_yaml::to_string(&config).map_err(|e| ClusterUpError::Other(e.into()))?;
            ui.message(&yaml);
        }

        let problems = validate_config(&config);
        for problem in &problems {
            ui.warning(&format!("[{}] {}", problem.rule, problem.message));
        }
        if !problems.is_empty() {
            return Ok(CommandResult::failure(2));
        }

        Ok(CommandResult::success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_DIR;
    use crate::ui::MockUI;
    use std::fs;
    use tempfile::TempDir;

    fn setup_project(config: &str) -> TempDir {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.yml"), config).unwrap();
        temp
    }

    #[test]
    fn config_command_creation() {
        let temp = TempDir::new().unwrap();
        let cmd = ConfigCommand::new(temp.path(), None, ConfigArgs::default());
        assert_eq!(cmd.project_root(), temp.path());
    }

    #[test]
    fn config_without_files_shows_defaults() {
        let temp = TempDir::new().unwrap();
        let cmd = ConfigCommand::new(temp.path(), None, ConfigArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert!(result.success);
        assert!(ui.has_message("defaults"));
        assert!(ui.has_message("max_attempts: 200"));
    }

    #[test]
    fn config_shows_config_path_and_merged_values() {
        let temp = setup_project("readiness:\n  max_attempts: 12\n");
        let cmd = ConfigCommand::new(temp.path(), None, ConfigArgs::default());
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_message("config.yml"));
        assert!(ui.has_message("max_attempts: 12"));
    }

    #[test]
    fn config_json_output() {
        let temp = setup_project("handoff:\n  program: /opt/jx\n");
        let cmd = ConfigCommand::new(temp.path(), None, ConfigArgs { json: true });
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        let json = ui
            .messages()
            .iter()
            .find(|m| m.starts_with('{'))
            .expect("json output");
        let value: serde_json::Value = serde_json::from_str(json).unwrap();
        assert_eq!(value["handoff"]["program"], "/opt/jx");
    }

    #[test]
    fn invalid_config_reports_problems() {
        let temp = setup_project("readiness:\n  max_attempts: 0\n");
        let cmd = ConfigCommand::new(temp.path(), None, ConfigArgs::default());
        let mut ui = MockUI::new();

        let result = cmd.execute(&mut ui).unwrap();

        assert_eq!(result.exit_code, 2);
        assert!(ui.has_warning("retry-attempts"));
    }

    #[test]
    fn override_file_is_shown() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cluster.yml");
        fs::write(&path, "required_tools: [kops]\n").unwrap();
        let cmd = ConfigCommand::new(temp.path(), Some(&path), ConfigArgs::default());
        let mut ui = MockUI::new();

        cmd.execute(&mut ui).unwrap();

        assert!(ui.has_message("cluster.yml"));
    }
}
