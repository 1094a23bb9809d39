//! Mock command runner for testing.
//!
//! `MockRunner` implements [`CommandRunner`] without spawning processes.
//! It records every invocation and answers with pre-configured exit codes.
//!
//! # Example
//!
//! ```
//! use clusterup::shell::{CommandOptions, CommandRunner, MockRunner};
//!
//! let mut runner = MockRunner::new();
//! runner.queue_exits("kubectl", vec![1, 0]);
//!
//! let args = vec!["get".to_string(), "node".to_string()];
//! let opts = CommandOptions::captured();
//! assert!(!runner.run("kubectl", &args, &opts).unwrap().success);
//! assert!(runner.run("kubectl", &args, &opts).unwrap().success);
//! assert_eq!(runner.count("kubectl"), 2);
//! ```

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use crate::error::{ClusterUpError, Result};

use super::command::{display_command, CommandOptions, CommandResult, CommandRunner};

/// How a mocked program responds to one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockResponse {
    /// The program runs and exits with this code.
    Exit(i32),
    /// The program cannot be started at all.
    SpawnError,
}

/// A recorded call to [`MockRunner::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

/// Command runner that records invocations instead of spawning processes.
///
/// Programs with nothing configured exit successfully. Queued responses are
/// consumed first; once a queue is empty, the per-program fallback applies.
#[derive(Debug, Default)]
pub struct MockRunner {
    queues: HashMap<String, VecDeque<MockResponse>>,
    fallbacks: HashMap<String, MockResponse>,
    invocations: Vec<Invocation>,
}

impl MockRunner {
    /// Create a runner where every program succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call to `program` exit with `code`.
    pub fn set_exit(&mut self, program: &str, code: i32) {
        self.fallbacks
            .insert(program.to_string(), MockResponse::Exit(code));
    }

    /// Make every call to `program` fail to start.
    pub fn set_spawn_error(&mut self, program: &str) {
        self.fallbacks
            .insert(program.to_string(), MockResponse::SpawnError);
    }

    /// Queue exit codes returned in order by successive calls to `program`.
    pub fn queue_exits(&mut self, program: &str, codes: Vec<i32>) {
        self.queue_responses(program, codes.into_iter().map(MockResponse::Exit).collect());
    }

    /// Queue arbitrary responses for successive calls to `program`.
    pub fn queue_responses(&mut self, program: &str, responses: Vec<MockResponse>) {
        self.queues
            .entry(program.to_string())
            .or_default()
            .extend(responses);
    }

    /// All recorded invocations, in call order.
    pub fn invocations(&self) -> &[Invocation] {
        &self.invocations
    }

    /// Recorded invocations of one program.
    pub fn invocations_of(&self, program: &str) -> Vec<&Invocation> {
        self.invocations
            .iter()
            .filter(|i| i.program == program)
            .collect()
    }

    /// Number of times `program` was run.
    pub fn count(&self, program: &str) -> usize {
        self.invocations_of(program).len()
    }

    fn next_response(&mut self, program: &str) -> MockResponse {
        if let Some(response) = self.queues.get_mut(program).and_then(|q| q.pop_front()) {
            return response;
        }
        self.fallbacks
            .get(program)
            .copied()
            .unwrap_or(MockResponse::Exit(0))
    }
}

impl CommandRunner for MockRunner {
    fn run(
        &mut self,
        program: &str,
        args: &[String],
        _options: &CommandOptions,
    ) -> Result<CommandResult> {
        self.invocations.push(Invocation {
            program: program.to_string(),
            args: args.to_vec(),
        });

        match self.next_response(program) {
            MockResponse::Exit(0) => Ok(CommandResult::success(
                String::new(),
                String::new(),
                Duration::ZERO,
            )),
            MockResponse::Exit(code) => Ok(CommandResult::failure(
                Some(code),
                String::new(),
                format!("{} failed", program),
                Duration::ZERO,
            )),
            MockResponse::SpawnError => Err(ClusterUpError::CommandNotStarted {
                command: display_command(program, args),
                message: "No such file or directory (os error 2)".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn unconfigured_programs_succeed() {
        let mut runner = MockRunner::new();
        let result = runner
            .run("kops", &args(&["version"]), &CommandOptions::default())
            .unwrap();
        assert!(result.success);
        assert_eq!(runner.count("kops"), 1);
        assert_eq!(runner.invocations()[0].args, args(&["version"]));
    }

    #[test]
    fn queue_is_consumed_before_fallback() {
        let mut runner = MockRunner::new();
        runner.set_exit("kubectl", 1);
        runner.queue_exits("kubectl", vec![0]);

        let opts = CommandOptions::default();
        assert!(runner.run("kubectl", &[], &opts).unwrap().success);
        let second = runner.run("kubectl", &[], &opts).unwrap();
        assert!(!second.success);
        assert_eq!(second.exit_code, Some(1));
    }

    #[test]
    fn spawn_error_is_not_started() {
        let mut runner = MockRunner::new();
        runner.set_spawn_error("jx");
        let err = runner
            .run("jx", &args(&["install"]), &CommandOptions::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ClusterUpError::CommandNotStarted { ref command, .. } if command == "jx install"
        ));
        assert_eq!(runner.count("jx"), 1);
    }

    #[test]
    fn invocations_of_filters_by_program() {
        let mut runner = MockRunner::new();
        let opts = CommandOptions::default();
        runner.run("kops", &[], &opts).unwrap();
        runner.run("kubectl", &[], &opts).unwrap();
        runner.run("kubectl", &[], &opts).unwrap();
        assert_eq!(runner.invocations_of("kubectl").len(), 2);
        assert_eq!(runner.count("kops"), 1);
        assert_eq!(runner.count("jx"), 0);
    }
}
