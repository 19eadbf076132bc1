//! Paths inside the Zellij plugin sandbox, where the host filesystem is
//! mounted under `/host`.

use std::path::PathBuf;

/// Directory holding the trace output of the plugin and its worker.
///
/// In the sandbox `/host` is the cwd of the last focused terminal, which is
/// usually the user's home, so this ends up as
/// `~/.local/share/zellij/zentask` on the host.
///
/// ```
/// use zentask::infrastructure::get_data_dir;
///
/// assert_eq!(
///     get_data_dir().to_str(),
///     Some("/host/.local/share/zellij/zentask")
/// );
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("zentask")
}

/// Maps `~` to the sandbox home mount.
///
/// ```
/// use zentask::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/Documents/report.pdf"), "/host/Documents/report.pdf");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/tmp/a.txt"), "/tmp/a.txt");
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
    fn tilde_only_expands_at_start() {
        assert_eq!(expand_tilde("notes/~draft"), "notes/~draft");
        assert_eq!(expand_tilde("~user/file"), "~user/file");
    }
}
