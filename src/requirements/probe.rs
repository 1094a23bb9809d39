//! Locating tools on the search path.
//!
//! Lookups walk PATH entries directly rather than shelling out to `which`,
//! whose behavior varies across systems and is sometimes a shell builtin.

use std::path::{Path, PathBuf};

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// File names a tool may have on this platform.
fn candidate_names(tool: &str) -> Vec<String> {
    if cfg!(windows) && Path::new(tool).extension().is_none() {
        vec![format!("{}.exe", tool), format!("{}.cmd", tool), tool.to_string()]
    } else {
        vec![tool.to_string()]
    }
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    let names = candidate_names(tool);
    for dir in path_entries {
        for name in &names {
            let candidate = dir.join(name);
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Look a tool up on the current process PATH.
///
/// PATH is re-read on every call so tools installed earlier in the run
/// are found.
pub fn locate_on_path(tool: &str) -> Option<PathBuf> {
    resolve_tool_path(tool, &parse_system_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[cfg(unix)]
    fn write_tool(dir: &Path, name: &str, mode: u32) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
        path
    }

    #[cfg(unix)]
    #[test]
    fn resolves_executable_in_path_order() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        write_tool(second.path(), "kops", 0o755);
        let expected = write_tool(first.path(), "kops", 0o755);

        let entries = vec![first.path().to_path_buf(), second.path().to_path_buf()];
        assert_eq!(resolve_tool_path("kops", &entries), Some(expected));
    }

    #[cfg(unix)]
    #[test]
    fn skips_non_executable_files() {
        let dir = TempDir::new().unwrap();
        write_tool(dir.path(), "kubectl", 0o644);

        let entries = vec![dir.path().to_path_buf()];
        assert_eq!(resolve_tool_path("kubectl", &entries), None);
    }

    #[test]
    fn skips_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("kops")).unwrap();

        let entries = vec![dir.path().to_path_buf()];
        assert_eq!(resolve_tool_path("kops", &entries), None);
    }

    #[test]
    fn missing_tool_is_none() {
        let dir = TempDir::new().unwrap();
        let entries = vec![dir.path().to_path_buf()];
        assert_eq!(resolve_tool_path("kops", &entries), None);
    }

    #[test]
    fn locate_on_path_misses_nonsense() {
        assert!(locate_on_path("clusterup-definitely-not-a-real-binary").is_none());
    }
}
