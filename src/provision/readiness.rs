//! Waiting for the cluster API to answer.
//!
//! After provisioning, the status tool is run up to `max_attempts` times
//! with a constant interval between attempts. Any non-success, including
//! a status tool that cannot be started, counts as one failed attempt.

use crate::config::ReadinessSettings;
use crate::error::{ClusterUpError, Result};
use crate::shell::{display_command, CommandOptions, CommandRunner};
use std::time::Duration;

/// Interval used when none is configured.
pub const DEFAULT_INTERVAL: Duration = Duration::from_nanos(1_000_000_020);

/// Default number of readiness probes.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 200;

/// Bounded retry settings for the readiness loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_INTERVAL,
        }
    }
}

impl RetryPolicy {
    /// Create a policy.
    ///
    /// # Errors
    ///
    /// Returns `ConfigValidationError` if either value is zero.
    pub fn new(max_attempts: u32, interval: Duration) -> Result<Self> {
        if max_attempts == 0 {
            return Err(ClusterUpError::ConfigValidationError {
                message: "readiness max_attempts must be greater than zero".to_string(),
            });
        }
        if interval.is_zero() {
            return Err(ClusterUpError::ConfigValidationError {
                message: "readiness interval must be greater than zero".to_string(),
            });
        }
        Ok(Self {
            max_attempts,
            interval,
        })
    }

    pub fn from_settings(settings: &ReadinessSettings) -> Result<Self> {
        let interval = settings
            .interval_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_INTERVAL);
        Self::new(settings.max_attempts, interval)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// Blocks the current thread for a duration.
pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

/// [`Sleeper`] backed by `std::thread::sleep`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// [`Sleeper`] that records requested durations without waiting.
#[derive(Debug, Default, Clone)]
pub struct RecordingSleeper {
    sleeps: Vec<Duration>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every duration passed to `sleep`, in order.
    pub fn sleeps(&self) -> &[Duration] {
        &self.sleeps
    }

    /// Sum of all recorded sleeps.
    pub fn total(&self) -> Duration {
        self.sleeps.iter().sum()
    }
}

impl Sleeper for RecordingSleeper {
    fn sleep(&mut self, duration: Duration) {
        self.sleeps.push(duration);
    }
}

/// Runs the readiness probe until it succeeds or attempts run out.
#[derive(Debug, Clone)]
pub struct ReadinessPoller {
    program: String,
    args: Vec<String>,
    policy: RetryPolicy,
}

impl ReadinessPoller {
    pub fn new(program: &str, args: Vec<String>, policy: RetryPolicy) -> Self {
        Self {
            program: program.to_string(),
            args,
            policy,
        }
    }

    pub fn from_settings(settings: &ReadinessSettings) -> Result<Self> {
        Ok(Self::new(
            &settings.program,
            settings.args.clone(),
            RetryPolicy::from_settings(settings)?,
        ))
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// The probe as one display line.
    pub fn probe_display(&self) -> String {
        display_command(&self.program, &self.args)
    }

    /// Probe until success.
    ///
    /// `on_attempt` is called with the attempt number before each probe.
    /// Returns the number of probes it took.
    ///
    /// # Errors
    ///
    /// Returns `ReadinessTimeout` after `max_attempts` failed probes.
    pub fn wait_until_ready(
        &self,
        runner: &mut dyn CommandRunner,
        sleeper: &mut dyn Sleeper,
        on_attempt: &mut dyn FnMut(u32),
    ) -> Result<u32> {
        let probe = self.probe_display();
        let options = CommandOptions::captured();
        let mut last_error = String::new();

        for attempt in 1..=self.policy.max_attempts {
            if attempt > 1 {
                sleeper.sleep(self.policy.interval);
            }
            on_attempt(attempt);

            match runner.run(&self.program, &self.args, &options) {
                Ok(result) if result.success => {
                    tracing::debug!("{} succeeded on attempt {}", probe, attempt);
                    return Ok(attempt);
                }
                Ok(result) => last_error = result.failure_summary(&probe),
                Err(e) => last_error = e.to_string(),
            }
            tracing::debug!(
                "Readiness attempt {}/{} failed: {}",
                attempt,
                self.policy.max_attempts,
                last_error
            );
        }

        Err(ClusterUpError::ReadinessTimeout {
            attempts: self.policy.max_attempts,
            last_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::{MockResponse, MockRunner};

    fn poller(max_attempts: u32) -> ReadinessPoller {
        ReadinessPoller::new(
            "kubectl",
            vec!["get".to_string(), "node".to_string()],
            RetryPolicy::new(max_attempts, Duration::from_secs(1)).unwrap(),
        )
    }

    #[test]
    fn succeeds_after_three_failures() {
        let mut runner = MockRunner::new();
        runner.queue_exits("kubectl", vec![1, 1, 1, 0]);
        let mut sleeper = RecordingSleeper::new();

        let attempts = poller(5)
            .wait_until_ready(&mut runner, &mut sleeper, &mut |_| {})
            .unwrap();

        assert_eq!(attempts, 4);
        assert_eq!(runner.count("kubectl"), 4);
        assert_eq!(sleeper.sleeps().len(), 3);
    }

    #[test]
    fn times_out_after_exactly_max_attempts() {
        let mut runner = MockRunner::new();
        runner.set_exit("kubectl", 1);
        let mut sleeper = RecordingSleeper::new();

        let err = poller(3)
            .wait_until_ready(&mut runner, &mut sleeper, &mut |_| {})
            .unwrap_err();

        assert_eq!(runner.count("kubectl"), 3);
        assert_eq!(sleeper.sleeps(), &[Duration::from_secs(1); 2]);
        match err {
            ClusterUpError::ReadinessTimeout {
                attempts,
                last_error,
            } => {
                assert_eq!(attempts, 3);
                assert!(last_error.contains("kubectl get node exited with code 1"));
            }
            other => panic!("expected ReadinessTimeout, got {:?}", other),
        }
    }

    #[test]
    fn spawn_failure_counts_as_attempt() {
        let mut runner = MockRunner::new();
        runner.queue_responses(
            "kubectl",
            vec![MockResponse::SpawnError, MockResponse::Exit(0)],
        );
        let mut sleeper = RecordingSleeper::new();

        let attempts = poller(3)
            .wait_until_ready(&mut runner, &mut sleeper, &mut |_| {})
            .unwrap();
        assert_eq!(attempts, 2);
    }

    #[test]
    fn timeout_keeps_the_reason_the_status_tool_could_not_start() {
        let mut runner = MockRunner::new();
        runner.set_spawn_error("kubectl");
        let mut sleeper = RecordingSleeper::new();

        let err = poller(2)
            .wait_until_ready(&mut runner, &mut sleeper, &mut |_| {})
            .unwrap_err();

        match err {
            ClusterUpError::ReadinessTimeout { last_error, .. } => {
                assert_eq!(
                    last_error,
                    "Could not start `kubectl get node`: No such file or directory (os error 2)"
                );
            }
            other => panic!("expected ReadinessTimeout, got {:?}", other),
        }
    }

    #[test]
    fn first_probe_success_never_sleeps() {
        let mut runner = MockRunner::new();
        let mut sleeper = RecordingSleeper::new();
        let mut seen = Vec::new();

        poller(200)
            .wait_until_ready(&mut runner, &mut sleeper, &mut |n| seen.push(n))
            .unwrap();

        assert!(sleeper.sleeps().is_empty());
        assert_eq!(seen, vec![1]);
    }

    #[test]
    fn probes_with_configured_args() {
        let mut runner = MockRunner::new();
        let mut sleeper = RecordingSleeper::new();
        poller(1)
            .wait_until_ready(&mut runner, &mut sleeper, &mut |_| {})
            .unwrap();
        assert_eq!(runner.invocations()[0].args, vec!["get", "node"]);
    }

    #[test]
    fn policy_rejects_zero_values() {
        assert!(matches!(
            RetryPolicy::new(0, Duration::from_secs(1)),
            Err(ClusterUpError::ConfigValidationError { .. })
        ));
        assert!(matches!(
            RetryPolicy::new(3, Duration::ZERO),
            Err(ClusterUpError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 200);
        assert_eq!(
            policy.interval(),
            Duration::from_secs(1) + Duration::from_nanos(20)
        );
        assert_eq!(
            RetryPolicy::from_settings(&ReadinessSettings::default()).unwrap(),
            policy
        );
    }

    #[test]
    fn policy_from_configured_interval() {
        let settings = ReadinessSettings {
            max_attempts: 10,
            interval_ms: Some(250),
            ..Default::default()
        };
        let policy = RetryPolicy::from_settings(&settings).unwrap();
        assert_eq!(policy.max_attempts(), 10);
        assert_eq!(policy.interval(), Duration::from_millis(250));
    }

    #[test]
    fn recording_sleeper_totals() {
        let mut sleeper = RecordingSleeper::new();
        sleeper.sleep(Duration::from_secs(30));
        sleeper.sleep(Duration::from_secs(1));
        assert_eq!(sleeper.total(), Duration::from_secs(31));
    }
}
