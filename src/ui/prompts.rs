//! Interactive prompts.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};

use crate::error::{ClusterUpError, Result};

use super::{parse_confirm, Prompt, PromptResult, PromptType};

/// Convert dialoguer errors to ClusterUpError.
fn map_dialoguer_err(e: dialoguer::Error) -> ClusterUpError {
    ClusterUpError::Io(e.into())
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Prompt the user for input.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    match &prompt.prompt_type {
        PromptType::Confirm => prompt_confirm(prompt, term),
        PromptType::Input => prompt_input(prompt, term),
    }
}

fn prompt_confirm(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let default = prompt.default.as_deref().map(parse_confirm).unwrap_or(true);

    let result = Confirm::with_theme(&prompt_theme())
        .with_prompt(&prompt.question)
        .default(default)
        .interact_on(term)
        .map_err(map_dialoguer_err)?;

    Ok(PromptResult::Bool(result))
}

fn prompt_input(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let theme = prompt_theme();
    let mut input = Input::<String>::with_theme(&theme)
        .with_prompt(&prompt.question)
        .allow_empty(!prompt.required);

    if let Some(default) = prompt.default.as_ref().filter(|d| !d.is_empty()) {
        input = input.default(default.clone());
    }

    if prompt.required {
        input = input.validate_with(|value: &String| -> std::result::Result<(), &str> {
            validate_required(value)
        });
    }

    let result = input.interact_on(term).map_err(map_dialoguer_err)?;

    Ok(PromptResult::String(result))
}

fn validate_required(value: &str) -> std::result::Result<(), &'static str> {
    if value.trim().is_empty() {
        Err("Value is required")
    } else {
        Ok(())
    }
}
