//! Path utilities for the Zellij sandbox, where the host filesystem is
//! mounted under `/host`.

use std::path::PathBuf;

/// File name of the OTLP trace output.
pub const TRACE_FILE_NAME: &str = "pitwall-otlp.json";

/// Plugin data directory, `/host/.local/share/zellij/pitwall`.
///
/// `/host` is the cwd of the last focused terminal (or where Zellij started),
/// which is usually the home directory.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("pitwall")
}

/// Location of the trace file inside [`get_data_dir`].
#[must_use]
pub fn trace_file_path() -> PathBuf {
    get_data_dir().join(TRACE_FILE_NAME)
}

/// Maps `~` paths from plugin configuration into the sandbox.
///
/// ```
/// use pitwall::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/f1.toml"), "/host/themes/f1.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/pitwall.toml"), "/etc/pitwall.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_file_lives_in_data_dir() {
        assert_eq!(
            trace_file_path(),
            PathBuf::from("/host/.local/share/zellij/pitwall/pitwall-otlp.json")
        );
    }
}
