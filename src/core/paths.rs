//! Installation root lookup and the default model directory under it.
use std::env;
use std::path::{Path, PathBuf};

/// Overrides the installation root when set to a non-empty path.
pub const ROOT_ENV: &str = "ALLSORTS_ROOT";

/// Directory holding the installed application.
///
/// Resolution order: `$ALLSORTS_ROOT`, the directory of the running
/// executable, then the current directory.
pub fn install_root() -> PathBuf {
    if let Some(root) = env::var_os(ROOT_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(root);
    }
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `<root>/models/allsorts/`
pub fn default_model_dir(root: &Path) -> PathBuf {
    root.join("models").join("allsorts")
}
