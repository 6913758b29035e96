use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Return true if the environment variable is set to a truthy value.
pub fn is_env_enabled(key: &str) -> bool {
    env::var(key).is_ok_and(|value| {
        let value = value.to_lowercase();

        value == "1" || value == "true" || value == "yes" || value == "on"
    })
}

/// Return the environment variable if set and not empty.
pub fn get_env_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse a duration in seconds from an environment variable.
pub fn get_env_duration(key: &str) -> Option<Duration> {
    get_env_var(key)
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}

/// Expand `~` and environment variables in a user provided path, and make
/// it absolute relative to the working directory.
pub fn expand_path(value: &str, working_dir: &Path) -> PathBuf {
    let expanded = shellexpand::full(value)
        .map(|path| path.into_owned())
        .unwrap_or_else(|_| shellexpand::tilde(value).into_owned());
    let path = PathBuf::from(expanded);

    if path.is_absolute() {
        path
    } else {
        working_dir.join(path)
    }
}

/// Resolve symlinks when the path exists, otherwise return it untouched.
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Escape a value so that it can be embedded within double quotes in
/// a POSIX shell script.
pub fn escape_double_quoted(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for ch in value.chars() {
        if matches!(ch, '"' | '\\' | '$' | '`') {
            escaped.push('\\');
        }

        escaped.push(ch);
    }

    escaped
}
