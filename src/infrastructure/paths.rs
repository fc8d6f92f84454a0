//! Path handling for the Zellij plugin sandbox.
//!
//! Inside the sandbox `/host` is the directory Zellij was started from,
//! usually the user's home, so `~/x` on the host is `/host/x` here.

use std::path::PathBuf;

const HOST_ROOT: &str = "/host";

/// Directory holding the trace file.
///
/// Resolves to `~/.local/share/zellij/bookfinder` on the host.
///
/// ```
/// use bookfinder::infrastructure::data_dir;
///
/// assert_eq!(data_dir().to_str(), Some("/host/.local/share/zellij/bookfinder"));
/// ```
#[must_use]
pub fn data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT).join(".local/share/zellij/bookfinder")
}

/// Maps a user-supplied path to its sandbox location.
///
/// `~` and `~/...` are rooted at `/host`, as are relative paths. Absolute
/// paths are used unchanged.
///
/// ```
/// use bookfinder::infrastructure::resolve_host_path;
/// use std::path::PathBuf;
///
/// assert_eq!(resolve_host_path("~/themes/a.toml"), PathBuf::from("/host/themes/a.toml"));
/// assert_eq!(resolve_host_path("themes/a.toml"), PathBuf::from("/host/themes/a.toml"));
/// assert_eq!(resolve_host_path("/etc/a.toml"), PathBuf::from("/etc/a.toml"));
/// ```
#[must_use]
pub fn resolve_host_path(path: &str) -> PathBuf {
    let path = path.trim();
    if path == "~" {
        return PathBuf::from(HOST_ROOT);
    }
    if let Some(rest) = path.strip_prefix("~/") {
        return PathBuf::from(HOST_ROOT).join(rest);
    }
    if path.starts_with('/') {
        return PathBuf::from(path);
    }
    PathBuf::from(HOST_ROOT).join(path)
}

/// Removes the `/host` prefix so paths read as they do on the host.
#[must_use]
pub fn display_path(path: &std::path::Path) -> String {
    let text = path.to_string_lossy();
    match text.strip_prefix(HOST_ROOT) {
        Some("") => "~".to_string(),
        Some(rest) if rest.starts_with('/') => format!("~{rest}"),
        _ => text.into_owned(),
    }
}
