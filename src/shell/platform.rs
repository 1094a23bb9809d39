//! Platform and CI detection.

/// Environment variables whose presence marks a CI run.
const CI_VARS: &[&str] = &[
    "CI",
    "GITHUB_ACTIONS",
    "GITLAB_CI",
    "CIRCLECI",
    "TRAVIS",
    "JENKINS_URL",
];

/// Check if running in a CI environment.
///
/// Used to force non-interactive mode in `main()`.
pub fn is_ci() -> bool {
    is_ci_with_env(|key| std::env::var(key).ok())
}

/// CI detection with a custom env var lookup function.
pub fn is_ci_with_env<F>(env_fn: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    CI_VARS.iter().any(|var| env_fn(var).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_github_actions() {
        assert!(is_ci_with_env(|k| (k == "GITHUB_ACTIONS").then(|| "true".to_string())));
    }

    #[test]
    fn no_ci_vars_means_not_ci() {
        assert!(!is_ci_with_env(|_| None));
    }

    #[test]
    fn is_ci_does_not_panic() {
        let _ = is_ci();
    }
}
