//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use clusterup::ui::{MockUI, Prompt, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("zones", "eu-west-1a");
//!
//! let answer = ui.prompt(&Prompt::input("zones", "Availability zones", None)).unwrap();
//! assert_eq!(answer.as_string(), "eu-west-1a");
//! assert_eq!(ui.prompts_shown(), &["zones"]);
//! ```

use std::collections::{HashMap, HashSet, VecDeque};

use crate::error::{ClusterUpError, Result};

use super::{
    parse_confirm, OutputMode, Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface,
};

/// Mock UI implementation for testing.
///
/// Captures all UI interactions and allows pre-configured prompt responses.
/// Supports both single responses (via `set_prompt_response`) and queued
/// responses (via `queue_prompt_responses`) for keys asked multiple times.
/// Keys registered with `fail_prompt` return an error instead of an answer.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    interactive: bool,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    hints: Vec<String>,
    spinners: Vec<String>,
    prompt_responses: HashMap<String, String>,
    prompt_queues: HashMap<String, VecDeque<String>>,
    failing_prompts: HashSet<String>,
    prompts_shown: Vec<String>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self {
            mode: OutputMode::Normal,
            interactive: true,
            ..Default::default()
        }
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            interactive: true,
            ..Default::default()
        }
    }

    /// Set a response for a prompt key.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Queue multiple responses for the same prompt key.
    ///
    /// Responses are returned in order. After the queue is exhausted,
    /// falls back to `set_prompt_response` or defaults.
    pub fn queue_prompt_responses(&mut self, key: &str, responses: Vec<&str>) {
        let queue = responses.into_iter().map(|s| s.to_string()).collect();
        self.prompt_queues.insert(key.to_string(), queue);
    }

    /// Make prompting for `key` fail, as a closed terminal would.
    pub fn fail_prompt(&mut self, key: &str) {
        self.failing_prompts.insert(key.to_string());
    }

    /// Set whether this mock behaves as interactive.
    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all captured headers.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all captured hints.
    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Get all prompts that were shown (by key).
    pub fn prompts_shown(&self) -> &[String] {
        &self.prompts_shown
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    fn to_result(prompt: &Prompt, response: &str) -> PromptResult {
        match prompt.prompt_type {
            PromptType::Confirm => PromptResult::Bool(parse_confirm(response)),
            PromptType::Input => PromptResult::String(response.to_string()),
        }
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.key.clone());

        if self.failing_prompts.contains(&prompt.key) {
            return Err(ClusterUpError::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("prompt '{}' was closed", prompt.key),
            )));
        }

        // Queued responses first (for keys asked multiple times)
        if let Some(queue) = self.prompt_queues.get_mut(&prompt.key) {
            if let Some(response) = queue.pop_front() {
                return Ok(Self::to_result(prompt, &response));
            }
        }

        if let Some(response) = self.prompt_responses.get(&prompt.key) {
            return Ok(Self::to_result(prompt, response));
        }

        if let Some(default) = &prompt.default {
            return Ok(Self::to_result(prompt, default));
        }

        // Type-appropriate empty as a last resort
        Ok(Self::to_result(prompt, ""))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner::new())
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_hint(&mut self, hint: &str) {
        self.hints.push(hint.to_string());
    }

    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

/// Mock spinner that captures finish messages.
#[derive(Debug, Default)]
pub struct MockSpinner {
    messages: Vec<String>,
    finish_message: Option<String>,
    status: Option<SpinnerStatus>,
}

/// Status of a mock spinner when finished.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinnerStatus {
    /// Finished successfully.
    Success,
    /// Finished with error.
    Error,
}

impl MockSpinner {
    /// Create a new mock spinner.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all messages set during spinning.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get the final finish message.
    pub fn finish_message(&self) -> Option<&str> {
        self.finish_message.as_deref()
    }

    /// Get the final status.
    pub fn status(&self) -> Option<SpinnerStatus> {
        self.status
    }
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn finish_success(&mut self, msg: &str) {
        self.finish_message = Some(msg.to_string());
        self.status = Some(SpinnerStatus::Success);
    }

    fn finish_error(&mut self, msg: &str) {
        self.finish_message = Some(msg.to_string());
        self.status = Some(SpinnerStatus::Error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_ui_captures_messages() {
        let mut ui = MockUI::new();

        ui.message("Hello");
        ui.success("Done");
        ui.warning("Be careful");
        ui.error("Oops");
        ui.show_hint("Try again");

        assert_eq!(ui.messages(), &["Hello"]);
        assert_eq!(ui.successes(), &["Done"]);
        assert_eq!(ui.warnings(), &["Be careful"]);
        assert_eq!(ui.errors(), &["Oops"]);
        assert_eq!(ui.hints(), &["Try again"]);
    }

    #[test]
    fn mock_ui_prompt_with_response() {
        let mut ui = MockUI::new();
        ui.set_prompt_response("zones", "us-east-1a");

        let result = ui
            .prompt(&Prompt::input("zones", "Availability zones", None))
            .unwrap();
        assert_eq!(result.as_string(), "us-east-1a");
        assert_eq!(ui.prompts_shown(), &["zones"]);
    }

    #[test]
    fn mock_ui_prompt_falls_back_to_default() {
        let mut ui = MockUI::new();
        let result = ui.prompt(&Prompt::input("nodes", "nodes", Some("3"))).unwrap();
        assert_eq!(result.as_string(), "3");
    }

    #[test]
    fn mock_ui_prompt_without_default_is_empty() {
        let mut ui = MockUI::new();
        let result = ui
            .prompt(&Prompt::input("zones", "Availability zones", None).required())
            .unwrap();
        assert_eq!(result.as_string(), "");
    }

    #[test]
    fn mock_ui_queued_responses_in_order() {
        let mut ui = MockUI::new();
        ui.queue_prompt_responses("install", vec!["no", "yes"]);
        let prompt = Prompt::confirm("install", "Install?", true);

        assert_eq!(ui.prompt(&prompt).unwrap().as_bool(), Some(false));
        assert_eq!(ui.prompt(&prompt).unwrap().as_bool(), Some(true));
        // Queue exhausted: falls back to the prompt default
        assert_eq!(ui.prompt(&prompt).unwrap().as_bool(), Some(true));
    }

    #[test]
    fn mock_ui_failing_prompt_errors() {
        let mut ui = MockUI::new();
        ui.fail_prompt("zones");
        assert!(ui
            .prompt(&Prompt::input("zones", "Availability zones", None))
            .is_err());
        assert_eq!(ui.prompts_shown(), &["zones"]);
    }

    #[test]
    fn mock_ui_records_spinners() {
        let mut ui = MockUI::new();
        let mut spinner = ui.start_spinner("Waiting for cluster");
        spinner.finish_success("ready");
        assert_eq!(ui.spinners(), &["Waiting for cluster"]);
    }

    #[test]
    fn mock_spinner_tracks_status() {
        let mut spinner = MockSpinner::new();
        spinner.set_message("attempt 2");
        spinner.finish_error("timed out");
        assert_eq!(spinner.messages(), &["attempt 2"]);
        assert_eq!(spinner.finish_message(), Some("timed out"));
        assert_eq!(spinner.status(), Some(SpinnerStatus::Error));
    }

    #[test]
    fn mock_ui_interactive_toggle() {
        let mut ui = MockUI::with_mode(OutputMode::Quiet);
        assert!(ui.is_interactive());
        ui.set_interactive(false);
        assert!(!ui.is_interactive());
        assert_eq!(ui.output_mode(), OutputMode::Quiet);
    }
}
